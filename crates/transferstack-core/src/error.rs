//! Error types for the TransferStack core.

/// Core error type for TransferStack configuration and templates.
#[derive(Debug, thiserror::Error)]
pub enum StackError {
    /// A required configuration value was not provided by any source.
    #[error("missing required configuration: {0}")]
    MissingConfig(String),

    /// Invalid CloudFormation logical ID.
    #[error("invalid logical ID: {0} (must be 1-255 alphanumeric characters)")]
    InvalidLogicalId(String),

    /// Two resources were declared under the same logical ID.
    #[error("duplicate logical ID in template: {0}")]
    DuplicateLogicalId(String),

    /// The context file exists but could not be read.
    #[error("failed to read context file {path}")]
    ContextRead {
        /// Path of the context file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The context file is not valid JSON or has the wrong shape.
    #[error("failed to parse context file {path}")]
    ContextParse {
        /// Path of the context file.
        path: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience result type for TransferStack core operations.
pub type StackResult<T> = Result<T, StackError>;
