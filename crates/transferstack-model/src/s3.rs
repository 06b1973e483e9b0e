//! S3 bucket and bucket policy descriptors.
//!
//! [`BucketProperties`] can only be built through [`BucketProperties::new`],
//! which always applies S3-managed encryption and blocks all public access.
//! Neither setting has a public setter.

use serde::Serialize;

use crate::iam::PolicyDocument;
use crate::intrinsic::Value;

/// S3 ServerSideEncryption enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ServerSideEncryption {
    /// S3-managed keys (SSE-S3).
    #[default]
    #[serde(rename = "AES256")]
    Aes256,
}

impl ServerSideEncryption {
    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aes256 => "AES256",
        }
    }
}

impl std::fmt::Display for ServerSideEncryption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// S3 BucketVersioningStatus enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum BucketVersioningStatus {
    /// Every write creates a new object version.
    #[default]
    Enabled,
}

impl BucketVersioningStatus {
    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enabled => "Enabled",
        }
    }
}

impl std::fmt::Display for BucketVersioningStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// S3 ExpirationStatus enum (lifecycle rule status).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ExpirationStatus {
    /// The rule is applied.
    #[default]
    Enabled,
}

/// S3 ServerSideEncryptionByDefault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerSideEncryptionByDefault {
    /// Encryption algorithm.
    #[serde(rename = "SSEAlgorithm")]
    pub sse_algorithm: ServerSideEncryption,
}

/// S3 ServerSideEncryptionRule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServerSideEncryptionRule {
    /// Encryption applied to objects stored without explicit settings.
    pub server_side_encryption_by_default: ServerSideEncryptionByDefault,
}

/// S3 BucketEncryption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BucketEncryption {
    /// Encryption rules; the stack declares exactly one.
    pub server_side_encryption_configuration: Vec<ServerSideEncryptionRule>,
}

impl BucketEncryption {
    /// S3-managed keys (SSE-S3).
    #[must_use]
    pub fn s3_managed() -> Self {
        Self {
            server_side_encryption_configuration: vec![ServerSideEncryptionRule {
                server_side_encryption_by_default: ServerSideEncryptionByDefault {
                    sse_algorithm: ServerSideEncryption::Aes256,
                },
            }],
        }
    }
}

/// S3 PublicAccessBlockConfiguration.
///
/// The only constructor is [`PublicAccessBlockConfiguration::block_all`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PublicAccessBlockConfiguration {
    block_public_acls: bool,
    block_public_policy: bool,
    ignore_public_acls: bool,
    restrict_public_buckets: bool,
}

impl PublicAccessBlockConfiguration {
    /// Creates a configuration that blocks all public access.
    #[must_use]
    pub fn block_all() -> Self {
        Self {
            block_public_acls: true,
            block_public_policy: true,
            ignore_public_acls: true,
            restrict_public_buckets: true,
        }
    }

    /// Returns true if all public access is blocked.
    #[must_use]
    pub fn blocks_all(&self) -> bool {
        self.block_public_acls
            && self.block_public_policy
            && self.ignore_public_acls
            && self.restrict_public_buckets
    }
}

/// S3 VersioningConfiguration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VersioningConfiguration {
    /// Versioning state.
    pub status: BucketVersioningStatus,
}

/// S3 AbortIncompleteMultipartUpload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AbortIncompleteMultipartUpload {
    /// Days after an upload starts before its parts are removed.
    pub days_after_initiation: u32,
}

/// S3 NoncurrentVersionExpiration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NoncurrentVersionExpiration {
    /// Days a version stays after becoming noncurrent.
    pub noncurrent_days: u32,
}

/// S3 LifecycleRule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LifecycleRule {
    /// Whether the rule is applied.
    pub status: ExpirationStatus,
    /// Cleanup of abandoned multipart uploads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abort_incomplete_multipart_upload: Option<AbortIncompleteMultipartUpload>,
    /// Days before current object versions expire.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_in_days: Option<u32>,
    /// Removal of noncurrent versions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noncurrent_version_expiration: Option<NoncurrentVersionExpiration>,
}

impl LifecycleRule {
    /// An enabled rule with the given incomplete-upload grace period and
    /// current/noncurrent version expiry, all in days.
    #[must_use]
    pub fn enabled(
        abort_incomplete_after: u32,
        expire_after: u32,
        noncurrent_expire_after: u32,
    ) -> Self {
        Self {
            status: ExpirationStatus::Enabled,
            abort_incomplete_multipart_upload: Some(AbortIncompleteMultipartUpload {
                days_after_initiation: abort_incomplete_after,
            }),
            expiration_in_days: Some(expire_after),
            noncurrent_version_expiration: Some(NoncurrentVersionExpiration {
                noncurrent_days: noncurrent_expire_after,
            }),
        }
    }
}

/// S3 LifecycleConfiguration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LifecycleConfiguration {
    /// Rules in declaration order.
    pub rules: Vec<LifecycleRule>,
}

/// `AWS::S3::Bucket` properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BucketProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    bucket_name: Option<String>,
    bucket_encryption: BucketEncryption,
    #[serde(skip_serializing_if = "Option::is_none")]
    lifecycle_configuration: Option<LifecycleConfiguration>,
    public_access_block_configuration: PublicAccessBlockConfiguration,
    versioning_configuration: VersioningConfiguration,
}

impl BucketProperties {
    /// A versioned, SSE-S3 encrypted bucket with all public access blocked.
    ///
    /// `bucket_name` is left to CloudFormation when `None`.
    #[must_use]
    pub fn new(bucket_name: Option<String>, lifecycle_rules: Vec<LifecycleRule>) -> Self {
        let lifecycle_configuration = if lifecycle_rules.is_empty() {
            None
        } else {
            Some(LifecycleConfiguration {
                rules: lifecycle_rules,
            })
        };

        Self {
            bucket_name,
            bucket_encryption: BucketEncryption::s3_managed(),
            lifecycle_configuration,
            public_access_block_configuration: PublicAccessBlockConfiguration::block_all(),
            versioning_configuration: VersioningConfiguration {
                status: BucketVersioningStatus::Enabled,
            },
        }
    }

    /// Explicit bucket name, if any.
    #[must_use]
    pub fn bucket_name(&self) -> Option<&str> {
        self.bucket_name.as_deref()
    }

    /// Server-side encryption settings.
    #[must_use]
    pub fn encryption(&self) -> &BucketEncryption {
        &self.bucket_encryption
    }

    /// Public access block settings.
    #[must_use]
    pub fn public_access_block(&self) -> &PublicAccessBlockConfiguration {
        &self.public_access_block_configuration
    }

    /// Lifecycle rules in declaration order.
    #[must_use]
    pub fn lifecycle_rules(&self) -> &[LifecycleRule] {
        self.lifecycle_configuration
            .as_ref()
            .map(|c| c.rules.as_slice())
            .unwrap_or_default()
    }

    /// Versioning status.
    #[must_use]
    pub fn versioning(&self) -> BucketVersioningStatus {
        self.versioning_configuration.status
    }
}

/// `AWS::S3::BucketPolicy` properties.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BucketPolicyProperties {
    /// Bucket the policy applies to, usually a `Ref`.
    pub bucket: Value,
    /// Resource policy granted or denied on the bucket.
    pub policy_document: PolicyDocument,
}
