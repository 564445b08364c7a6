/// Error type for host-sampler operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("System call error: {0}")]
    System(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Feature not available: {0}")]
    NotAvailable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    #[allow(dead_code)]
    pub(crate) fn system<S: Into<String>>(msg: S) -> Self {
        Error::System(msg.into())
    }

    /// Builds a `System` error from a Mach/IOKit status code.
    #[allow(dead_code)]
    pub(crate) fn kern<S: AsRef<str>>(operation: S, code: i32) -> Self {
        Error::System(format!("{} failed with status {:#x}", operation.as_ref(), code))
    }

    pub(crate) fn invalid_data<S: Into<String>>(msg: S) -> Self {
        Error::InvalidData(msg.into())
    }

    pub(crate) fn not_available<S: Into<String>>(msg: S) -> Self {
        Error::NotAvailable(msg.into())
    }

    pub(crate) fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Error::InvalidConfig(msg.into())
    }
}

/// Result type for host-sampler operations
pub type Result<T> = std::result::Result<T, Error>;
