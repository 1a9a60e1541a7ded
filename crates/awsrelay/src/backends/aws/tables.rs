//! DynamoDB gateway.

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;

use awsrelay_core::dynamo::{
    GetItemOutput, GetItemParams, ListTablesOutput, ListTablesParams, PutItemOutput,
    PutItemParams,
};
use awsrelay_core::{Result, TableGateway};

use super::conversions::{
    consumed_capacity_from_sdk, item_collection_metrics_from_sdk, item_from_sdk, item_to_sdk,
    return_consumed_capacity_to_sdk, return_item_collection_metrics_to_sdk,
};
use super::error::{map_get_item_error, map_list_tables_error, map_put_item_error};

/// DynamoDB-backed table gateway.
pub struct DynamoDbGateway {
    client: Client,
}

impl DynamoDbGateway {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TableGateway for DynamoDbGateway {
    async fn list_tables(&self, params: ListTablesParams) -> Result<ListTablesOutput> {
        let result = self
            .client
            .list_tables()
            .set_exclusive_start_table_name(params.exclusive_start_table_name)
            .set_limit(params.limit)
            .send()
            .await
            .map_err(map_list_tables_error)?;

        Ok(ListTablesOutput {
            table_names: result.table_names.unwrap_or_default(),
            last_evaluated_table_name: result.last_evaluated_table_name,
        })
    }

    async fn get_item(&self, params: GetItemParams) -> Result<GetItemOutput> {
        let table_name = params.table_name;

        let result = self
            .client
            .get_item()
            .table_name(&table_name)
            .set_key(Some(item_to_sdk(params.key)?))
            .set_attributes_to_get(Some(params.attributes_to_get))
            .consistent_read(params.consistent_read)
            .return_consumed_capacity(return_consumed_capacity_to_sdk(
                params.return_consumed_capacity,
            ))
            .send()
            .await
            .map_err(|e| map_get_item_error(e, &table_name))?;

        Ok(GetItemOutput {
            item: result.item.map(item_from_sdk).transpose()?,
            consumed_capacity: result.consumed_capacity.map(consumed_capacity_from_sdk),
        })
    }

    async fn put_item(&self, params: PutItemParams) -> Result<PutItemOutput> {
        let table_name = params.table_name;

        let result = self
            .client
            .put_item()
            .table_name(&table_name)
            .set_item(Some(item_to_sdk(params.item)?))
            .return_consumed_capacity(return_consumed_capacity_to_sdk(
                params.return_consumed_capacity,
            ))
            .return_item_collection_metrics(return_item_collection_metrics_to_sdk(
                params.return_item_collection_metrics,
            ))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, &table_name))?;

        Ok(PutItemOutput {
            attributes: result.attributes.map(item_from_sdk).transpose()?,
            consumed_capacity: result.consumed_capacity.map(consumed_capacity_from_sdk),
            item_collection_metrics: result
                .item_collection_metrics
                .map(item_collection_metrics_from_sdk)
                .transpose()?,
        })
    }
}
