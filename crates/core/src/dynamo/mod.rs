//! DynamoDB wire types and request construction.

mod requests;
mod types;

pub use requests::{
    graph_lookup, graph_record, GetItemParams, ListTablesParams, PutGraphRequest, PutItemParams,
    ReturnConsumedCapacity, ReturnItemCollectionMetrics, DEFAULT_TABLE_NAME, GRAPH_ID_ATTRIBUTE,
    KEY_ATTRIBUTE, MISSING_GRAPH_ID,
};
pub use types::{
    AttributeValue, ConsumedCapacity, GetItemOutput, Item, ItemCollectionMetrics,
    ListTablesOutput, PutItemOutput,
};
