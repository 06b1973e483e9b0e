//! CloudFormation template values and intrinsic functions.
//!
//! A [`Value`] is either a literal string or one of the intrinsics the stack
//! needs to wire resources together (`Ref`, `Fn::GetAtt`, `Fn::Join`). Values
//! resolve at deploy time, so nothing here evaluates them.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use transferstack_core::LogicalId;

/// A template value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Plain string.
    Literal(String),
    /// `{"Ref": target}`, where the target is a logical ID.
    Ref(String),
    /// `{"Fn::GetAtt": [resource, attribute]}`.
    GetAtt {
        /// Logical ID of the resource.
        resource: LogicalId,
        /// Attribute name (e.g. `Arn`).
        attribute: String,
    },
    /// `{"Fn::Join": [delimiter, parts]}`.
    Join {
        /// Delimiter placed between parts.
        delimiter: String,
        /// Joined parts.
        parts: Vec<Value>,
    },
}

impl Value {
    /// A literal string value.
    #[must_use]
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    /// A `Ref` to another resource in the same template.
    #[must_use]
    pub fn reference(resource: &LogicalId) -> Self {
        Self::Ref(resource.as_str().to_owned())
    }

    /// A `Fn::GetAtt` on another resource.
    #[must_use]
    pub fn get_att(resource: &LogicalId, attribute: impl Into<String>) -> Self {
        Self::GetAtt {
            resource: resource.clone(),
            attribute: attribute.into(),
        }
    }

    /// Join parts with a delimiter, folding literals where possible.
    ///
    /// With an empty delimiter adjacent literals are concatenated. If every
    /// remaining part is a literal the result is a plain [`Value::Literal`].
    #[must_use]
    pub fn join(delimiter: impl Into<String>, parts: Vec<Value>) -> Self {
        let delimiter = delimiter.into();

        let parts = if delimiter.is_empty() {
            let mut merged: Vec<Value> = Vec::with_capacity(parts.len());
            for part in parts {
                if let (Some(Self::Literal(prev)), Self::Literal(next)) = (merged.last_mut(), &part)
                {
                    prev.push_str(next);
                    continue;
                }
                merged.push(part);
            }
            merged
        } else {
            parts
        };

        if parts.iter().all(Self::is_literal) {
            let literals: Vec<&str> = parts.iter().filter_map(Self::as_literal).collect();
            return Self::Literal(literals.join(&delimiter));
        }

        Self::Join { delimiter, parts }
    }

    /// The literal string, if this value is a literal.
    #[must_use]
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this value is a literal string.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::literal(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Literal(s)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Literal(s) => serializer.serialize_str(s),
            Self::Ref(target) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Ref", target)?;
                map.end()
            }
            Self::GetAtt {
                resource,
                attribute,
            } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::GetAtt", &(resource, attribute))?;
                map.end()
            }
            Self::Join { delimiter, parts } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::Join", &(delimiter, parts))?;
                map.end()
            }
        }
    }
}
