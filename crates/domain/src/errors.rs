use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Server not found: {0}")]
    ServerNotFound(String),

    #[error("Invalid server target: {0}")]
    InvalidServerTarget(String),

    #[error("Invalid cache pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid cache action: {0}")]
    InvalidCacheAction(String),

    #[error("Invalid data type: {0}")]
    InvalidDataType(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Query timeout after {timeout_ms}ms contacting {server}")]
    QueryTimeout { server: String, timeout_ms: u64 },

    #[error("Connection refused by {server}")]
    ConnectionRefused { server: String },

    #[error("Malformed server response: {0}")]
    MalformedResponse(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    #[error("Registry error: {0}")]
    RegistryError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

impl DomainError {
    /// Errors caused by the caller rather than by the environment.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidPattern(_)
                | Self::InvalidCacheAction(_)
                | Self::InvalidDataType(_)
                | Self::MissingField(_)
                | Self::InvalidServerTarget(_)
        )
    }
}
