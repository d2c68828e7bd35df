use std::fmt;

/// Result type for querydeck operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared across the client and runtime layers.
///
/// Every variant is terminal for the operation that raised it; there is no
/// automatic retry anywhere in the client. `BackendDown` is kept separate
/// from `Connection` because an unreachable backend drives a persistent
/// status indicator, not just a one-off message.
#[derive(Debug)]
pub enum Error {
    /// The backend process is unreachable (connect/timeout at transport level)
    BackendDown(String),

    /// The backend rejected the connection (bad credentials, missing field)
    Connection(String),

    /// File upload failed (unsupported format, write failure)
    Upload(String),

    /// The backend failed to answer a question
    Query(String),

    /// Configuration error
    Config(String),

    /// IO operation failed
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendDown(msg) => write!(f, "Backend unreachable: {}", msg),
            Error::Connection(msg) => write!(f, "Connection failed: {}", msg),
            Error::Upload(msg) => write!(f, "Upload failed: {}", msg),
            Error::Query(msg) => write!(f, "Query failed: {}", msg),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl Error {
    /// True when the failure means the backend process itself is gone,
    /// as opposed to the backend answering with an error.
    pub fn is_backend_down(&self) -> bool {
        matches!(self, Error::BackendDown(_))
    }
}
