use querydeck_types::SchemaInfo;

use crate::presentation::view_models::{SchemaColumn, SchemaTable, SchemaViewModel};

pub fn present_schema(schema: &SchemaInfo) -> SchemaViewModel {
    let tables: Vec<SchemaTable> = schema
        .iter()
        .map(|(name, info)| SchemaTable {
            name: name.clone(),
            row_count: info.row_count,
            columns: info
                .columns
                .iter()
                .map(|column| SchemaColumn {
                    name: column.name.clone(),
                    data_type: column.data_type.clone(),
                })
                .collect(),
        })
        .collect();
    let total_rows = tables.iter().map(|t| t.row_count).sum();
    SchemaViewModel { tables, total_rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use querydeck_types::{ColumnInfo, TableInfo};

    #[test]
    fn test_schema_tables_are_sorted_by_name() {
        let mut schema = SchemaInfo::new();
        schema.insert(
            "teachers".to_string(),
            TableInfo {
                row_count: 10,
                columns: vec![],
            },
        );
        schema.insert(
            "students".to_string(),
            TableInfo {
                row_count: 120,
                columns: vec![ColumnInfo {
                    name: "name".to_string(),
                    data_type: "varchar(64)".to_string(),
                }],
            },
        );

        let vm = present_schema(&schema);
        assert_eq!(vm.tables[0].name, "students");
        assert_eq!(vm.tables[1].name, "teachers");
        assert_eq!(vm.total_rows, 130);
        assert_eq!(vm.tables[0].columns[0].data_type, "varchar(64)");
    }
}
