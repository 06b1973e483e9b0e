//! Synthesis error types.
//!
//! Every configuration error names the offending entry, and for client list
//! entries its 1-based position.

use transferstack_core::StackError;

/// Synthesis error type.
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    // -----------------------------------------------------------------------
    // Client list errors
    // -----------------------------------------------------------------------
    /// The client list is empty or whitespace only.
    #[error("client list is empty (expected user:key[,user:key...])")]
    EmptyClientList,

    /// An entry between two commas is empty (e.g. a trailing comma).
    #[error("client entry #{position} is empty (check for stray or trailing commas)")]
    EmptyClientEntry {
        /// 1-based position of the entry.
        position: usize,
    },

    /// An entry is not a `user:key` pair.
    #[error("client entry #{position} ({entry}) is malformed: {reason}")]
    MalformedClientEntry {
        /// 1-based position of the entry.
        position: usize,
        /// The offending entry, or its username when only the key is missing.
        entry: String,
        /// What is wrong with the entry.
        reason: String,
    },

    /// A username cannot be used as a home directory name.
    #[error("client entry #{position} has an invalid username {username:?}: {reason}")]
    InvalidUsername {
        /// 1-based position of the entry.
        position: usize,
        /// The rejected username.
        username: String,
        /// Which rule was violated.
        reason: String,
    },

    /// The same username appears more than once.
    #[error("duplicate client {username:?} at entries #{first} and #{second}")]
    DuplicateClient {
        /// The duplicated username.
        username: String,
        /// Position of the first occurrence.
        first: usize,
        /// Position of the repeated occurrence.
        second: usize,
    },

    // -----------------------------------------------------------------------
    // Stack errors
    // -----------------------------------------------------------------------
    /// The explicit bucket name violates S3 naming rules.
    #[error("invalid bucket name {name:?}: {reason}")]
    InvalidBucketName {
        /// The rejected bucket name.
        name: String,
        /// Which rule was violated.
        reason: String,
    },

    /// Template assembly failed.
    #[error(transparent)]
    Stack(#[from] StackError),

    /// The template could not be rendered.
    #[error("failed to render template")]
    Render(#[from] serde_json::Error),
}
