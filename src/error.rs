use std::io;

use thiserror::Error;

/// Result type for benchmark loading operations.
pub type Result<T> = std::result::Result<T, LoadError>;

/// Errors raised while locating, reading, or validating a benchmark.
///
/// `resource` always names the file or URL that was being read so the
/// caller can tell which of the dataset's files is at fault.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Conflicting or unusable source location.
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// A resource was read but its contents have the wrong shape or type.
    #[error("Invalid data in '{resource}': {message}")]
    InvalidData { resource: String, message: String },

    /// A required resource could not be read.
    #[error("Cannot read '{resource}': {source}")]
    Io {
        resource: String,
        #[source]
        source: io::Error,
    },

    /// The remote transport failed or answered with an error status.
    #[error("HTTP request for '{resource}' failed: {message}")]
    Http { resource: String, message: String },

    /// Writing a loaded benchmark elsewhere failed.
    #[error("Export failed: {message}")]
    Export { message: String },
}

impl LoadError {
    pub(crate) fn invalid_data(resource: impl Into<String>, message: impl Into<String>) -> Self {
        LoadError::InvalidData {
            resource: resource.into(),
            message: message.into(),
        }
    }

    pub(crate) fn io(resource: impl Into<String>, source: io::Error) -> Self {
        LoadError::Io {
            resource: resource.into(),
            source,
        }
    }

    /// Whether this error is a shape/content violation rather than an access failure.
    pub fn is_invalid_data(&self) -> bool {
        matches!(self, LoadError::InvalidData { .. })
    }
}
