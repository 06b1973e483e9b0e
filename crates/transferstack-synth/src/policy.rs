//! IAM policy documents for the transfer stack.
//!
//! Two documents govern bucket access. The operator policy is attached to the
//! shared user role and covers the whole bucket. The session policy is a
//! static template embedded in every transfer user; its `${transfer:...}`
//! placeholders are resolved by Transfer Family per connection, which confines
//! each session to its own home directory.
//!
//! See <https://docs.aws.amazon.com/transfer/latest/userguide/users-policies.html>.

use std::collections::BTreeMap;

use transferstack_model::{Effect, PolicyDocument, PolicyStatement, Principal, Value};

/// Service principal trusted by both stack roles.
pub const TRANSFER_SERVICE_PRINCIPAL: &str = "transfer.amazonaws.com";

/// Bucket-level listing actions granted to the operator role.
pub const BUCKET_LISTING_ACTIONS: &[&str] = &["s3:ListBucket", "s3:GetBucketLocation"];

/// Object-level actions granted within the bucket or home directory.
pub const OBJECT_ACTIONS: &[&str] = &[
    "s3:PutObject",
    "s3:GetObject",
    "s3:DeleteObject",
    "s3:DeleteObjectVersion",
    "s3:GetObjectVersion",
    "s3:GetObjectACL",
    "s3:PutObjectACL",
];

/// CloudWatch Logs actions the server needs for audit logging.
pub const LOGGING_ACTIONS: &[&str] = &[
    "logs:CreateLogStream",
    "logs:DescribeLogStreams",
    "logs:CreateLogGroup",
    "logs:PutLogEvents",
];

/// Log groups Transfer Family writes to.
pub const TRANSFER_LOG_GROUP_ARN: &str = "arn:aws:logs:*:*:log-group:/aws/transfer/*";

/// Session placeholder: bucket part of the home directory.
pub const HOME_BUCKET: &str = "${transfer:HomeBucket}";

/// Session placeholder: key prefix part of the home directory.
pub const HOME_FOLDER: &str = "${transfer:HomeFolder}";

/// Session placeholder: full home directory (`bucket/prefix`).
pub const HOME_DIRECTORY: &str = "${transfer:HomeDirectory}";

fn actions(list: &[&str]) -> Vec<String> {
    list.iter().map(|&a| a.to_owned()).collect()
}

/// `<bucket-arn>/*`.
fn objects_in(bucket_arn: &Value) -> Value {
    Value::join("", vec![bucket_arn.clone(), "/*".into()])
}

/// Bucket-wide access for the shared user role.
#[must_use]
pub fn operator_policy(bucket_arn: &Value) -> PolicyDocument {
    PolicyDocument::new(vec![
        PolicyStatement::builder()
            .sid("AllowListingOfFolders")
            .action(actions(BUCKET_LISTING_ACTIONS))
            .resource(vec![bucket_arn.clone()])
            .build(),
        PolicyStatement::builder()
            .sid("AllowFolderObjectAccess")
            .action(actions(OBJECT_ACTIONS))
            .resource(vec![objects_in(bucket_arn)])
            .build(),
    ])
}

/// Home-directory scoped access embedded in every transfer user.
///
/// The document is static: it contains no intrinsics and is identical for
/// every client.
#[must_use]
pub fn session_policy() -> PolicyDocument {
    let mut prefixes = BTreeMap::new();
    prefixes.insert(
        "s3:prefix".to_owned(),
        vec![format!("{HOME_FOLDER}/*"), HOME_FOLDER.to_owned()],
    );
    let mut condition = BTreeMap::new();
    condition.insert("StringLike".to_owned(), prefixes);

    PolicyDocument::new(vec![
        PolicyStatement::builder()
            .sid("AllowListingOfUserFolder")
            .action(actions(&["s3:ListBucket"]))
            .resource(vec![Value::literal(format!("arn:aws:s3:::{HOME_BUCKET}"))])
            .condition(condition)
            .build(),
        PolicyStatement::builder()
            .sid("HomeDirObjectAccess")
            .action(actions(OBJECT_ACTIONS))
            .resource(vec![Value::literal(format!("arn:aws:s3:::{HOME_DIRECTORY}*"))])
            .build(),
    ])
}

/// CloudWatch Logs access for the server's logging role.
#[must_use]
pub fn logging_policy() -> PolicyDocument {
    PolicyDocument::new(vec![
        PolicyStatement::builder()
            .sid("AllowTransferAuditLogging")
            .action(actions(LOGGING_ACTIONS))
            .resource(vec![Value::literal(TRANSFER_LOG_GROUP_ARN)])
            .build(),
    ])
}

/// Deny any request to the bucket or its objects made without TLS.
#[must_use]
pub fn enforce_tls_policy(bucket_arn: &Value) -> PolicyDocument {
    let mut secure_transport = BTreeMap::new();
    secure_transport.insert("aws:SecureTransport".to_owned(), vec!["false".to_owned()]);
    let mut condition = BTreeMap::new();
    condition.insert("Bool".to_owned(), secure_transport);

    PolicyDocument::new(vec![
        PolicyStatement::builder()
            .sid("DenyInsecureTransport")
            .effect(Effect::Deny)
            .principal(Principal::anyone())
            .action(actions(&["s3:*"]))
            .resource(vec![bucket_arn.clone(), objects_in(bucket_arn)])
            .condition(condition)
            .build(),
    ])
}

/// Trust policy letting Transfer Family assume a role.
#[must_use]
pub fn transfer_trust_policy() -> PolicyDocument {
    PolicyDocument::new(vec![
        PolicyStatement::builder()
            .principal(Principal::Service(TRANSFER_SERVICE_PRINCIPAL.to_owned()))
            .action(actions(&["sts:AssumeRole"]))
            .build(),
    ])
}
