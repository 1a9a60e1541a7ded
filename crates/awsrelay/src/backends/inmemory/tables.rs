use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use awsrelay_core::dynamo::{
    AttributeValue, ConsumedCapacity, GetItemOutput, GetItemParams, Item, ListTablesOutput,
    ListTablesParams, PutItemOutput, PutItemParams, ReturnConsumedCapacity, KEY_ATTRIBUTE,
};
use awsrelay_core::{Result, ServiceError, TableGateway};

/// Read capacity charged for an eventually consistent read of a small item.
const READ_UNITS: f64 = 0.5;
/// Write capacity charged for writing a small item.
const WRITE_UNITS: f64 = 1.0;
/// Largest page `ListTables` returns.
const MAX_LIST_LIMIT: i32 = 100;

/// In-memory DynamoDB tables keyed by the `guid` attribute.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTables {
    tables: Arc<RwLock<BTreeMap<String, HashMap<String, Item>>>>,
}

impl InMemoryTables {
    /// Creates a gateway with the given empty tables.
    pub fn with_tables<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tables = names
            .into_iter()
            .map(|name| (name.into(), HashMap::new()))
            .collect();

        Self {
            tables: Arc::new(RwLock::new(tables)),
        }
    }

    #[cfg(test)]
    /// Number of items stored in `table_name`, if the table exists.
    pub async fn item_count(&self, table_name: &str) -> Option<usize> {
        self.tables.read().await.get(table_name).map(HashMap::len)
    }
}

fn key_of(item: &Item) -> Result<String> {
    item.get(KEY_ATTRIBUTE)
        .and_then(AttributeValue::as_s)
        .map(String::from)
        .ok_or_else(|| {
            ServiceError::InvalidInput(format!(
                "One or more parameter values were invalid: Missing the key {KEY_ATTRIBUTE} in the item"
            ))
        })
}

fn table_not_found(table_name: &str) -> ServiceError {
    ServiceError::NotFound {
        resource: "Table",
        id: table_name.to_string(),
    }
}

fn capacity(
    option: ReturnConsumedCapacity,
    table_name: &str,
    units: f64,
) -> Option<ConsumedCapacity> {
    match option {
        ReturnConsumedCapacity::None => None,
        ReturnConsumedCapacity::Total | ReturnConsumedCapacity::Indexes => {
            Some(ConsumedCapacity {
                table_name: Some(table_name.to_string()),
                capacity_units: Some(units),
                ..Default::default()
            })
        }
    }
}

#[async_trait]
impl TableGateway for InMemoryTables {
    async fn list_tables(&self, params: ListTablesParams) -> Result<ListTablesOutput> {
        let limit = params.limit.unwrap_or(MAX_LIST_LIMIT);
        if !(1..=MAX_LIST_LIMIT).contains(&limit) {
            return Err(ServiceError::InvalidInput(format!(
                "limit must be between 1 and {MAX_LIST_LIMIT}"
            )));
        }

        let tables = self.tables.read().await;
        let remaining: Vec<String> = tables
            .keys()
            .filter(|name| {
                params
                    .exclusive_start_table_name
                    .as_ref()
                    .is_none_or(|start| *name > start)
            })
            .cloned()
            .collect();

        let limit = limit as usize;
        let last_evaluated_table_name = (remaining.len() > limit).then(|| remaining[limit - 1].clone());

        Ok(ListTablesOutput {
            table_names: remaining.into_iter().take(limit).collect(),
            last_evaluated_table_name,
        })
    }

    async fn get_item(&self, params: GetItemParams) -> Result<GetItemOutput> {
        let key = key_of(&params.key)?;
        let tables = self.tables.read().await;
        let table = tables
            .get(&params.table_name)
            .ok_or_else(|| table_not_found(&params.table_name))?;

        let item = table.get(&key).map(|stored| {
            if params.attributes_to_get.is_empty() {
                stored.clone()
            } else {
                stored
                    .iter()
                    .filter(|(name, _)| params.attributes_to_get.contains(name))
                    .map(|(name, value)| (name.clone(), value.clone()))
                    .collect()
            }
        });

        tracing::trace!(table = %params.table_name, %key, found = item.is_some(), "get_item");

        Ok(GetItemOutput {
            item,
            consumed_capacity: capacity(
                params.return_consumed_capacity,
                &params.table_name,
                READ_UNITS,
            ),
        })
    }

    async fn put_item(&self, params: PutItemParams) -> Result<PutItemOutput> {
        let key = key_of(&params.item)?;
        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(&params.table_name)
            .ok_or_else(|| table_not_found(&params.table_name))?;

        table.insert(key, params.item);

        Ok(PutItemOutput {
            attributes: None,
            consumed_capacity: capacity(
                params.return_consumed_capacity,
                &params.table_name,
                WRITE_UNITS,
            ),
            // Only tables with local secondary indexes report collection metrics.
            item_collection_metrics: None,
        })
    }
}
