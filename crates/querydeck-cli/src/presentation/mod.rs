//! Presentation layer.
//!
//! Presenters turn domain data into serializable view models; views format
//! view models for one surface (console text or TUI widgets); renderers
//! route a view model to the right view for the selected output.

pub mod formatters;
pub mod presenters;
pub mod renderers;
pub mod view_models;
pub mod views;
