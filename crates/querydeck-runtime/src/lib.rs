pub mod config;
pub mod error;
pub mod session;

pub use config::{Config, SavedConnection};
pub use error::{Error, Result};
pub use session::{Phase, QueryTicket, Session};
