//! IAM policy documents, statements, and role/policy resources.
//!
//! Policy documents are kept structured until the template is rendered.
//! Where CloudFormation wants a document as a JSON string (Transfer user
//! session policies), [`serialize_as_json_string`] performs the conversion at
//! serialization time.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use typed_builder::TypedBuilder;

use crate::intrinsic::Value;

/// IAM policy language version used by every document.
pub const POLICY_VERSION: &str = "2012-10-17";

/// IAM statement effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Effect {
    /// Grant the listed actions.
    #[default]
    Allow,
    /// Refuse the listed actions, overriding any allow.
    Deny,
}

impl Effect {
    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "Allow",
            Self::Deny => "Deny",
        }
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statement principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Principal {
    /// `{"Service": "<service>.amazonaws.com"}`.
    Service(String),
    /// `{"AWS": "<arn or *>"}`.
    #[serde(rename = "AWS")]
    Aws(String),
}

impl Principal {
    /// Any AWS principal (`{"AWS": "*"}`).
    #[must_use]
    pub fn anyone() -> Self {
        Self::Aws("*".to_owned())
    }
}

/// Condition block: operator -> condition key -> allowed values.
pub type Conditions = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// A single policy statement.
#[derive(Debug, Clone, PartialEq, Serialize, TypedBuilder)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    /// Statement identifier, unique within its document.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option, into))]
    pub sid: Option<String>,

    /// Allow or deny.
    #[builder(default)]
    pub effect: Effect,

    /// Who the statement applies to; only resource and trust policies set it.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub principal: Option<Principal>,

    /// Actions such as `s3:GetObject`.
    pub action: Vec<String>,

    /// Resource ARNs; empty for trust policies.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub resource: Vec<Value>,

    /// Conditions that must hold for the statement to apply.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    #[builder(default)]
    pub condition: Conditions,
}

impl PolicyStatement {
    /// Whether every resource is a literal, i.e. the statement can be
    /// embedded in a JSON string without losing intrinsics.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.resource.iter().all(Value::is_literal)
    }
}

/// An IAM policy document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    /// Policy language version, always [`POLICY_VERSION`].
    pub version: &'static str,
    /// Statements in declaration order.
    pub statement: Vec<PolicyStatement>,
}

impl PolicyDocument {
    /// Create a document with the current policy language version.
    #[must_use]
    pub fn new(statement: Vec<PolicyStatement>) -> Self {
        Self {
            version: POLICY_VERSION,
            statement,
        }
    }

    /// Whether the document contains no intrinsics.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.statement.iter().all(PolicyStatement::is_static)
    }

    /// Find a statement by its `Sid`.
    #[must_use]
    pub fn statement(&self, sid: &str) -> Option<&PolicyStatement> {
        self.statement.iter().find(|s| s.sid.as_deref() == Some(sid))
    }
}

/// Serialize a [`PolicyDocument`] as a pretty-printed JSON string.
///
/// Fails if the document still contains intrinsics, since those cannot
/// resolve inside a string property.
///
/// # Errors
/// Returns a serializer error for non-static documents.
pub fn serialize_as_json_string<S: Serializer>(
    document: &PolicyDocument,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    if !document.is_static() {
        return Err(serde::ser::Error::custom(
            "policy document embedded as a string must not contain intrinsics",
        ));
    }
    let rendered = serde_json::to_string_pretty(document).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&rendered)
}

/// Inline policy declared directly on a role.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InlinePolicy {
    /// Name, unique within the role.
    pub policy_name: String,
    /// Permissions granted.
    pub policy_document: PolicyDocument,
}

/// `AWS::IAM::Role` properties.
#[derive(Debug, Clone, PartialEq, Serialize, TypedBuilder)]
#[serde(rename_all = "PascalCase")]
pub struct RoleProperties {
    /// Trust policy naming who may assume the role.
    pub assume_role_policy_document: PolicyDocument,

    /// Human-readable role description.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option, into))]
    pub description: Option<String>,

    /// Inline policies embedded in the role.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub policies: Vec<InlinePolicy>,
}

/// `AWS::IAM::Policy` properties: a named document attached to roles.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyProperties {
    /// Policy name.
    pub policy_name: String,
    /// Permissions granted.
    pub policy_document: PolicyDocument,
    /// Roles the policy is attached to, usually `Ref`s.
    pub roles: Vec<Value>,
}
