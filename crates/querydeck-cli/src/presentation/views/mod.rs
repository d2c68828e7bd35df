pub mod result;
pub mod schema;
pub mod tui;

pub use result::ResultView;
pub use schema::SchemaView;
