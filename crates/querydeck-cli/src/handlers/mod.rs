pub mod connect;
pub mod dash;
pub mod query;
pub mod schema;
pub mod upload;
