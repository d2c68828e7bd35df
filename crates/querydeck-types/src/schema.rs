use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Read-only snapshot of the connected database's schema.
///
/// Fetched after connect/upload and replaced wholesale on refresh, never
/// merged. Keyed by table name, which the backend guarantees unique.
pub type SchemaInfo = BTreeMap<String, TableInfo>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableInfo {
    pub row_count: u64,
    pub columns: Vec<ColumnInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_deserializes_wire_shape() {
        let json = r#"{
            "students": {
                "row_count": 120,
                "columns": [
                    {"name": "id", "type": "INT"},
                    {"name": "name", "type": "VARCHAR(255)"}
                ]
            }
        }"#;
        let schema: SchemaInfo = serde_json::from_str(json).unwrap();
        assert_eq!(schema.len(), 1);
        let table = &schema["students"];
        assert_eq!(table.row_count, 120);
        assert_eq!(table.columns[1].data_type, "VARCHAR(255)");
    }
}
