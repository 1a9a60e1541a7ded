use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A DynamoDB item: attribute name to typed value.
pub type Item = HashMap<String, AttributeValue>;

/// A DynamoDB attribute value in its JSON tagged form (`{"S": "..."}`).
///
/// Binary values (`B`, `BS`) hold base64 text, as they do on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    #[serde(rename = "S")]
    S(String),
    #[serde(rename = "N")]
    N(String),
    #[serde(rename = "B")]
    B(String),
    #[serde(rename = "SS")]
    Ss(Vec<String>),
    #[serde(rename = "NS")]
    Ns(Vec<String>),
    #[serde(rename = "BS")]
    Bs(Vec<String>),
    #[serde(rename = "M")]
    M(HashMap<String, AttributeValue>),
    #[serde(rename = "L")]
    L(Vec<AttributeValue>),
    #[serde(rename = "NULL")]
    Null(bool),
    #[serde(rename = "BOOL")]
    Bool(bool),
}

impl AttributeValue {
    /// Returns the string payload of an `S` value.
    pub fn as_s(&self) -> Option<&str> {
        match self {
            Self::S(s) => Some(s),
            _ => None,
        }
    }
}

/// Capacity consumed by a single operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConsumedCapacity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity_units: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_capacity_units: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_capacity_units: Option<f64>,
}

/// Size information about the item collection touched by a write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemCollectionMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_collection_key: Option<Item>,
    #[serde(rename = "SizeEstimateRangeGB", default)]
    pub size_estimate_range_gb: Vec<f64>,
}

/// Response body of `ListTables`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTablesOutput {
    pub table_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_evaluated_table_name: Option<String>,
}

/// Response body of `GetItem`. `Item` is absent when no item matched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumed_capacity: Option<ConsumedCapacity>,
}

/// Response body of `PutItem`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutItemOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumed_capacity: Option<ConsumedCapacity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_collection_metrics: Option<ItemCollectionMetrics>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attribute_value_uses_dynamodb_tags() {
        let value = serde_json::to_value(AttributeValue::S("abc".into())).unwrap();
        assert_eq!(value, json!({"S": "abc"}));

        let value = serde_json::to_value(AttributeValue::Null(true)).unwrap();
        assert_eq!(value, json!({"NULL": true}));

        let value = serde_json::to_value(AttributeValue::Ss(vec!["a".into()])).unwrap();
        assert_eq!(value, json!({"SS": ["a"]}));
    }

    #[test]
    fn test_nested_map_parses() {
        let value: AttributeValue =
            serde_json::from_value(json!({"M": {"n": {"N": "1"}, "l": {"L": [{"BOOL": false}]}}}))
                .unwrap();

        let AttributeValue::M(map) = value else {
            panic!("expected a map");
        };
        assert_eq!(map["n"], AttributeValue::N("1".into()));
        assert_eq!(map["l"], AttributeValue::L(vec![AttributeValue::Bool(false)]));
    }

    #[test]
    fn test_get_item_output_omits_missing_item() {
        let output = GetItemOutput {
            item: None,
            consumed_capacity: Some(ConsumedCapacity {
                table_name: Some("test-coinstar".into()),
                capacity_units: Some(0.5),
                ..Default::default()
            }),
        };

        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(
            value,
            json!({"ConsumedCapacity": {"TableName": "test-coinstar", "CapacityUnits": 0.5}})
        );
    }

    #[test]
    fn test_item_collection_metrics_field_name() {
        let metrics = ItemCollectionMetrics {
            item_collection_key: None,
            size_estimate_range_gb: vec![0.0, 1.0],
        };
        let value = serde_json::to_value(&metrics).unwrap();
        assert_eq!(value, json!({"SizeEstimateRangeGB": [0.0, 1.0]}));
    }

    #[test]
    fn test_list_tables_output_shape() {
        let output = ListTablesOutput {
            table_names: vec!["a".into(), "b".into()],
            last_evaluated_table_name: Some("b".into()),
        };
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(
            value,
            json!({"TableNames": ["a", "b"], "LastEvaluatedTableName": "b"})
        );
    }
}
