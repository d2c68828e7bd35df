use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SchemaViewModel {
    pub tables: Vec<SchemaTable>,
    pub total_rows: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SchemaTable {
    pub name: String,
    pub row_count: u64,
    pub columns: Vec<SchemaColumn>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SchemaColumn {
    pub name: String,
    pub data_type: String,
}
