pub mod config;
pub mod error;
pub mod result;
pub mod schema;

pub use config::{ConnectionConfig, Driver};
pub use error::{Error, Result};
pub use result::{
    AnswerMode, ChartConfig, ChartDataset, ChartType, HeadlineMetric, Kpis, Metrics, QueryResult,
    Row,
};
pub use schema::{ColumnInfo, SchemaInfo, TableInfo};
