pub mod backend;

pub use backend::{BackendClient, UploadOutcome, DEFAULT_BACKEND_URL};
