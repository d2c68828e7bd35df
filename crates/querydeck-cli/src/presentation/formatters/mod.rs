pub mod number;
pub mod table;
pub mod text;
