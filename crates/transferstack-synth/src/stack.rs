//! Resource graph assembly.
//!
//! [`synthesize`] builds the full stack from a [`SynthConfig`]: roles, the
//! transfer server, the upload bucket and its TLS policy, the operator
//! policy, and one transfer user per client. The result depends only on the
//! configuration, so identical input always renders identical JSON.

use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};
use typed_builder::TypedBuilder;

use transferstack_core::LogicalId;
use transferstack_model::iam::{InlinePolicy, PolicyProperties, RoleProperties};
use transferstack_model::s3::{BucketPolicyProperties, BucketProperties, LifecycleRule};
use transferstack_model::transfer::{ServerProperties, UserProperties};
use transferstack_model::{DeletionPolicy, Output, Resource, ResourceProperties, Template, Value};

use crate::clients::parse_clients;
use crate::error::SynthError;
use crate::policy::{
    enforce_tls_policy, logging_policy, operator_policy, session_policy, transfer_trust_policy,
};
use crate::validation::validate_bucket_name;

/// Logical IDs of the fixed stack resources and outputs.
pub mod ids {
    /// Role the server writes audit logs with.
    pub const LOGGING_ROLE: &str = "TransferLoggingRole";
    /// The transfer server.
    pub const SERVER: &str = "TransferServer";
    /// Bucket holding every home directory.
    pub const BUCKET: &str = "UploadBucket";
    /// TLS-only bucket policy.
    pub const BUCKET_POLICY: &str = "UploadBucketPolicy";
    /// Role shared by all transfer users.
    pub const USER_ROLE: &str = "TransferUserRole";
    /// Operator policy attached to the user role.
    pub const ACCESS_POLICY: &str = "UploadBucketAccessPolicy";

    /// Output: transfer server ID.
    pub const OUTPUT_SERVER_ID: &str = "ServerId";
    /// Output: bucket name.
    pub const OUTPUT_BUCKET_NAME: &str = "BucketName";
    /// Output: user role ARN.
    pub const OUTPUT_USER_ROLE_ARN: &str = "UserRoleArn";
}

/// Prefix of every transfer user's logical ID.
const USER_ID_PREFIX: &str = "TransferUser";

/// Longest alphanumeric username stem kept in a user logical ID.
const MAX_USER_ID_STEM: usize = 200;

/// Bucket retention settings, all in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleSettings {
    /// Grace period before incomplete multipart uploads are aborted.
    pub abort_incomplete_upload_days: u32,
    /// Expiry of current object versions.
    pub expiration_days: u32,
    /// Expiry of noncurrent object versions.
    pub noncurrent_expiration_days: u32,
}

impl Default for LifecycleSettings {
    fn default() -> Self {
        Self {
            abort_incomplete_upload_days: 1,
            expiration_days: 30,
            noncurrent_expiration_days: 14,
        }
    }
}

impl LifecycleSettings {
    fn rule(self) -> LifecycleRule {
        LifecycleRule::enabled(
            self.abort_incomplete_upload_days,
            self.expiration_days,
            self.noncurrent_expiration_days,
        )
    }
}

/// Input to [`synthesize`].
///
/// # Examples
///
/// ```
/// use transferstack_synth::SynthConfig;
///
/// let config = SynthConfig::builder()
///     .clients("alice:ssh-ed25519 AAAA")
///     .descriptor("acme-prod")
///     .build();
/// assert!(config.bucket_name.is_none());
/// ```
#[derive(Debug, Clone, TypedBuilder)]
pub struct SynthConfig {
    /// Raw client list (`user:key[,user:key...]`).
    #[builder(setter(into))]
    pub clients: String,

    /// Free-text descriptor appended to role descriptions.
    #[builder(default, setter(into))]
    pub descriptor: String,

    /// Explicit bucket name; generated by CloudFormation when unset.
    #[builder(default, setter(strip_option, into))]
    pub bucket_name: Option<String>,

    /// Bucket retention settings.
    #[builder(default)]
    pub lifecycle: LifecycleSettings,

    /// Template description.
    #[builder(default, setter(strip_option, into))]
    pub description: Option<String>,
}

/// Deterministic logical ID for a transfer user.
///
/// Usernames may contain `_ @ . -`, which logical IDs do not allow, so the
/// ID is the alphanumeric part of the name plus the first 8 hex digits of its
/// SHA-256. Distinct usernames that strip to the same text still differ.
/// The alphanumeric part is capped so long usernames still fit.
///
/// # Errors
///
/// Returns [`SynthError::Stack`] if the resulting ID is rejected.
pub fn user_logical_id(username: &str) -> Result<LogicalId, SynthError> {
    let alnum: String = username
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(MAX_USER_ID_STEM)
        .collect();
    let digest = Sha256::digest(username.as_bytes());
    let suffix = hex::encode_upper(&digest[..4]);
    Ok(LogicalId::new(format!("{USER_ID_PREFIX}{alnum}{suffix}"))?)
}

fn role_description(kind: &str, descriptor: &str) -> String {
    let descriptor = descriptor.trim();
    if descriptor.is_empty() {
        format!("Temporary transfer {kind} role")
    } else {
        format!("Temporary transfer {kind} role for {descriptor}")
    }
}

/// Build the transfer stack template.
///
/// The client list is parsed and the bucket name validated before any
/// resource is declared; on error no template is produced.
///
/// # Errors
///
/// Returns the [`SynthError`] configuration error describing the first
/// problem found.
pub fn synthesize(config: &SynthConfig) -> Result<Template, SynthError> {
    let clients = parse_clients(&config.clients)?;
    if let Some(name) = &config.bucket_name {
        validate_bucket_name(name)?;
    }
    if config.descriptor.trim().is_empty() {
        warn!("no stack descriptor set, role descriptions will not name the deployment");
    }

    let mut template = Template::new(config.description.clone());

    let logging_role = LogicalId::new(ids::LOGGING_ROLE)?;
    template.add_resource(
        logging_role.clone(),
        Resource::new(ResourceProperties::Role(
            RoleProperties::builder()
                .assume_role_policy_document(transfer_trust_policy())
                .description(role_description("server", &config.descriptor))
                .policies(vec![InlinePolicy {
                    policy_name: "TransferAuditLogging".to_owned(),
                    policy_document: logging_policy(),
                }])
                .build(),
        )),
    )?;

    let server = LogicalId::new(ids::SERVER)?;
    template.add_resource(
        server.clone(),
        Resource::new(ResourceProperties::Server(ServerProperties::new(
            Value::get_att(&logging_role, "Arn"),
        ))),
    )?;

    let bucket = LogicalId::new(ids::BUCKET)?;
    template.add_resource(
        bucket.clone(),
        Resource::new(ResourceProperties::Bucket(BucketProperties::new(
            config.bucket_name.clone(),
            vec![config.lifecycle.rule()],
        )))
        .with_deletion_policy(DeletionPolicy::Delete),
    )?;
    let bucket_arn = Value::get_att(&bucket, "Arn");
    let bucket_name = config
        .bucket_name
        .as_deref()
        .map_or_else(|| Value::reference(&bucket), |name| Value::literal(name));

    template.add_resource(
        LogicalId::new(ids::BUCKET_POLICY)?,
        Resource::new(ResourceProperties::BucketPolicy(BucketPolicyProperties {
            bucket: Value::reference(&bucket),
            policy_document: enforce_tls_policy(&bucket_arn),
        })),
    )?;

    let user_role = LogicalId::new(ids::USER_ROLE)?;
    template.add_resource(
        user_role.clone(),
        Resource::new(ResourceProperties::Role(
            RoleProperties::builder()
                .assume_role_policy_document(transfer_trust_policy())
                .description(role_description("user", &config.descriptor))
                .build(),
        )),
    )?;

    let access_policy = LogicalId::new(ids::ACCESS_POLICY)?;
    template.add_resource(
        access_policy.clone(),
        Resource::new(ResourceProperties::Policy(PolicyProperties {
            policy_name: ids::ACCESS_POLICY.to_owned(),
            policy_document: operator_policy(&bucket_arn),
            roles: vec![Value::reference(&user_role)],
        })),
    )?;

    let session = session_policy();
    for client in &clients {
        let id = user_logical_id(&client.username)?;
        let home_directory = Value::join(
            "",
            vec![
                "/".into(),
                bucket_name.clone(),
                "/".into(),
                client.username.as_str().into(),
            ],
        );

        debug!(username = %client.username, logical_id = %id, "declaring transfer user");
        template.add_resource(
            id,
            Resource::new(ResourceProperties::User(UserProperties {
                user_name: client.username.clone(),
                role: Value::get_att(&user_role, "Arn"),
                server_id: Value::get_att(&server, "ServerId"),
                home_directory,
                policy: session.clone(),
                ssh_public_keys: vec![client.public_key.clone()],
            }))
            .depends_on(&access_policy),
        )?;
    }

    template.add_output(
        LogicalId::new(ids::OUTPUT_SERVER_ID)?,
        Output {
            description: Some("Transfer server ID".to_owned()),
            value: Value::get_att(&server, "ServerId"),
        },
    )?;
    template.add_output(
        LogicalId::new(ids::OUTPUT_BUCKET_NAME)?,
        Output {
            description: Some("Bucket holding client home directories".to_owned()),
            value: bucket_name,
        },
    )?;
    template.add_output(
        LogicalId::new(ids::OUTPUT_USER_ROLE_ARN)?,
        Output {
            description: Some("Role assumed by transfer users".to_owned()),
            value: Value::get_att(&user_role, "Arn"),
        },
    )?;

    info!(
        clients = clients.len(),
        resources = template.resource_count(),
        "synthesized transfer stack"
    );
    Ok(template)
}

/// Render a template as pretty-printed CloudFormation JSON.
///
/// # Errors
///
/// Returns [`SynthError::Render`] if serialization fails.
pub fn render(template: &Template) -> Result<String, SynthError> {
    Ok(template.to_json_pretty()?)
}
