use std::io;
use thiserror::Error;

/// Custom error type for the hostwatch library
#[derive(Error, Debug)]
pub enum HostwatchError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Metric unavailable: {0}")]
    MetricUnavailable(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for the hostwatch library
pub type Result<T> = std::result::Result<T, HostwatchError>;

impl HostwatchError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        HostwatchError::Config(msg.into())
    }

    /// Create a metric unavailable error
    pub fn metric_unavailable<S: Into<String>>(msg: S) -> Self {
        HostwatchError::MetricUnavailable(msg.into())
    }

    /// Create a permission denied error
    pub fn permission_denied<S: Into<String>>(msg: S) -> Self {
        HostwatchError::PermissionDenied(msg.into())
    }

    pub fn server<S: Into<String>>(msg: S) -> Self {
        HostwatchError::Server(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        HostwatchError::Other(msg.into())
    }

    /// Message without the variant prefix, used in "Unable to determine" reports
    pub fn reason(&self) -> String {
        match self {
            HostwatchError::Io(e) => e.to_string(),
            HostwatchError::Config(msg)
            | HostwatchError::MetricUnavailable(msg)
            | HostwatchError::PermissionDenied(msg)
            | HostwatchError::Server(msg)
            | HostwatchError::Other(msg) => msg.clone(),
        }
    }
}
