pub mod common;
pub mod result;
pub mod schema;

pub use common::{StatusBadge, StatusLevel};
pub use result::{ChartEntry, ChartSection, MetricCard, ResultViewModel, Section, TableSection};
pub use schema::{SchemaColumn, SchemaTable, SchemaViewModel};
