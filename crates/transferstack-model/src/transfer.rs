//! AWS Transfer Family server and user descriptors.

use serde::Serialize;

use crate::iam::{PolicyDocument, serialize_as_json_string};
use crate::intrinsic::Value;

/// Transfer IdentityProviderType enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum IdentityProviderType {
    /// Default variant.
    #[default]
    #[serde(rename = "SERVICE_MANAGED")]
    ServiceManaged,
}

/// Transfer EndpointType enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum EndpointType {
    /// Default variant.
    #[default]
    #[serde(rename = "PUBLIC")]
    Public,
}

/// Transfer Protocol enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Protocol {
    /// Default variant.
    #[default]
    #[serde(rename = "SFTP")]
    Sftp,
}

/// `AWS::Transfer::Server` properties.
///
/// Identity provider and endpoint type are fixed; only the logging role
/// varies.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServerProperties {
    identity_provider_type: IdentityProviderType,
    endpoint_type: EndpointType,
    logging_role: Value,
    protocols: Vec<Protocol>,
}

impl ServerProperties {
    /// A public, service-managed SFTP server logging through `logging_role`.
    #[must_use]
    pub fn new(logging_role: Value) -> Self {
        Self {
            identity_provider_type: IdentityProviderType::ServiceManaged,
            endpoint_type: EndpointType::Public,
            logging_role,
            protocols: vec![Protocol::Sftp],
        }
    }

    /// ARN of the role the server writes audit logs with.
    #[must_use]
    pub fn logging_role(&self) -> &Value {
        &self.logging_role
    }

    /// Identity provider type.
    #[must_use]
    pub fn identity_provider_type(&self) -> IdentityProviderType {
        self.identity_provider_type
    }

    /// Endpoint exposure.
    #[must_use]
    pub fn endpoint_type(&self) -> EndpointType {
        self.endpoint_type
    }
}

/// `AWS::Transfer::User` properties.
///
/// The session policy stays a [`PolicyDocument`] and is rendered to the JSON
/// string CloudFormation expects only during serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserProperties {
    /// Login name.
    pub user_name: String,
    /// ARN of the role the server assumes for this user's S3 requests.
    pub role: Value,
    /// ID of the server the user belongs to.
    pub server_id: Value,
    /// Landing directory, `/<bucket>/<user>`.
    pub home_directory: Value,
    /// Session policy narrowing the role to the home directory.
    #[serde(serialize_with = "serialize_as_json_string")]
    pub policy: PolicyDocument,
    /// Accepted SSH public keys.
    pub ssh_public_keys: Vec<String>,
}
