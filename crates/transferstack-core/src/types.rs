//! Common type definitions shared across crates.

use std::borrow::Borrow;
use std::fmt;

/// CloudFormation logical ID (1-255 ASCII alphanumeric characters).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct LogicalId(String);

impl LogicalId {
    /// Maximum logical ID length accepted by CloudFormation.
    pub const MAX_LEN: usize = 255;

    /// Create a new logical ID.
    ///
    /// # Errors
    /// Returns an error if the ID is empty, too long, or contains anything
    /// other than ASCII letters and digits.
    pub fn new(id: impl Into<String>) -> Result<Self, crate::StackError> {
        let id = id.into();
        if id.is_empty()
            || id.len() > Self::MAX_LEN
            || !id.bytes().all(|b| b.is_ascii_alphanumeric())
        {
            return Err(crate::StackError::InvalidLogicalId(id));
        }
        Ok(Self(id))
    }

    /// Get the logical ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LogicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for LogicalId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
