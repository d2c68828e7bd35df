//! TUI components.
//!
//! Components encapsulate UI state + input logic + render logic. The
//! renderer only routes keys and areas; paging, search entry and chart-type
//! state live inside the owning component, and index safety is enforced at
//! the component boundary.
//!
//! Table and chart components are rebuilt from scratch whenever a new result
//! is applied, so no page, search term or chart-type choice survives into a
//! result it does not belong to.

pub mod chart;
pub mod prompt;
pub mod table;

pub use chart::ChartComponent;
pub use prompt::{PromptAction, PromptComponent};
pub use table::TableComponent;
