pub mod result;
pub mod schema;

pub use result::present_result;
pub use schema::present_schema;
