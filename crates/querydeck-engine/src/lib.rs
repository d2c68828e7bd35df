pub mod chart;
pub mod table;

pub use chart::{ChartKind, ChartView, PALETTE, Series, color_for};
pub use table::{PAGE_SIZE, TableSummary, TableView, cell_display};
