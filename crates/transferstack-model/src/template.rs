//! CloudFormation template, resources, and outputs.

use std::collections::BTreeMap;

use serde::Serialize;
use transferstack_core::{LogicalId, StackError, StackResult};

use crate::iam::{PolicyProperties, RoleProperties};
use crate::intrinsic::Value;
use crate::s3::{BucketPolicyProperties, BucketProperties};
use crate::transfer::{ServerProperties, UserProperties};

/// Template format version emitted in every template.
pub const TEMPLATE_FORMAT_VERSION: &str = "2010-09-09";

/// What happens to a resource when it leaves the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DeletionPolicy {
    /// Delete the resource along with the stack.
    Delete,
}

/// Properties of any resource the stack declares.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResourceProperties {
    /// `AWS::S3::Bucket`.
    Bucket(BucketProperties),
    /// `AWS::S3::BucketPolicy`.
    BucketPolicy(BucketPolicyProperties),
    /// `AWS::IAM::Role`.
    Role(RoleProperties),
    /// `AWS::IAM::Policy`.
    Policy(PolicyProperties),
    /// `AWS::Transfer::Server`.
    Server(ServerProperties),
    /// `AWS::Transfer::User`.
    User(UserProperties),
}

impl ResourceProperties {
    /// CloudFormation resource type name.
    #[must_use]
    pub fn resource_type(&self) -> &'static str {
        match self {
            Self::Bucket(_) => "AWS::S3::Bucket",
            Self::BucketPolicy(_) => "AWS::S3::BucketPolicy",
            Self::Role(_) => "AWS::IAM::Role",
            Self::Policy(_) => "AWS::IAM::Policy",
            Self::Server(_) => "AWS::Transfer::Server",
            Self::User(_) => "AWS::Transfer::User",
        }
    }
}

/// A single template resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Resource {
    #[serde(rename = "Type")]
    resource_type: &'static str,
    properties: ResourceProperties,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    depends_on: Vec<LogicalId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deletion_policy: Option<DeletionPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    update_replace_policy: Option<DeletionPolicy>,
}

impl Resource {
    /// Wrap properties into a resource of the matching type.
    #[must_use]
    pub fn new(properties: ResourceProperties) -> Self {
        Self {
            resource_type: properties.resource_type(),
            properties,
            depends_on: Vec::new(),
            deletion_policy: None,
            update_replace_policy: None,
        }
    }

    /// Declare an explicit dependency on another resource.
    #[must_use]
    pub fn depends_on(mut self, resource: &LogicalId) -> Self {
        if !self.depends_on.contains(resource) {
            self.depends_on.push(resource.clone());
        }
        self
    }

    /// Apply the same policy on deletion and on replacement.
    #[must_use]
    pub fn with_deletion_policy(mut self, policy: DeletionPolicy) -> Self {
        self.deletion_policy = Some(policy);
        self.update_replace_policy = Some(policy);
        self
    }

    /// CloudFormation resource type name.
    #[must_use]
    pub fn resource_type(&self) -> &'static str {
        self.resource_type
    }

    /// Resource properties.
    #[must_use]
    pub fn properties(&self) -> &ResourceProperties {
        &self.properties
    }

    /// Explicit dependencies.
    #[must_use]
    pub fn dependencies(&self) -> &[LogicalId] {
        &self.depends_on
    }

    /// Deletion policy, if set.
    #[must_use]
    pub fn deletion_policy(&self) -> Option<DeletionPolicy> {
        self.deletion_policy
    }
}

/// A template output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Output {
    /// Shown next to the value in the console.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Exported value.
    pub value: Value,
}

/// A CloudFormation template.
///
/// Resources and outputs are keyed by [`LogicalId`] in sorted order, so the
/// same declarations always render to the same bytes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Template {
    #[serde(rename = "AWSTemplateFormatVersion")]
    format_version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    resources: BTreeMap<LogicalId, Resource>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    outputs: BTreeMap<LogicalId, Output>,
}

impl Template {
    /// Create an empty template.
    #[must_use]
    pub fn new(description: Option<String>) -> Self {
        Self {
            format_version: TEMPLATE_FORMAT_VERSION,
            description,
            resources: BTreeMap::new(),
            outputs: BTreeMap::new(),
        }
    }

    /// Add a resource.
    ///
    /// # Errors
    /// Returns [`StackError::DuplicateLogicalId`] if the ID is already taken.
    pub fn add_resource(&mut self, id: LogicalId, resource: Resource) -> StackResult<()> {
        if self.resources.contains_key(&id) {
            return Err(StackError::DuplicateLogicalId(id.to_string()));
        }
        self.resources.insert(id, resource);
        Ok(())
    }

    /// Add an output.
    ///
    /// # Errors
    /// Returns [`StackError::DuplicateLogicalId`] if the ID is already taken.
    pub fn add_output(&mut self, id: LogicalId, output: Output) -> StackResult<()> {
        if self.outputs.contains_key(&id) {
            return Err(StackError::DuplicateLogicalId(id.to_string()));
        }
        self.outputs.insert(id, output);
        Ok(())
    }

    /// Template description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Look up a resource by logical ID.
    #[must_use]
    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.resources.get(id)
    }

    /// Look up an output by logical ID.
    #[must_use]
    pub fn output(&self, id: &str) -> Option<&Output> {
        self.outputs.get(id)
    }

    /// All resources in logical-ID order.
    pub fn resources(&self) -> impl Iterator<Item = (&LogicalId, &Resource)> {
        self.resources.iter()
    }

    /// Number of declared resources.
    #[must_use]
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// All Transfer users in logical-ID order.
    pub fn users(&self) -> impl Iterator<Item = &UserProperties> {
        self.resources.values().filter_map(|r| match &r.properties {
            ResourceProperties::User(user) => Some(user),
            _ => None,
        })
    }

    /// Render the template as pretty-printed JSON.
    ///
    /// # Errors
    /// Fails if a string-embedded policy document still holds intrinsics.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::s3::LifecycleRule;

    fn id(s: &str) -> LogicalId {
        LogicalId::new(s).unwrap()
    }

    fn bucket_resource() -> Resource {
        Resource::new(ResourceProperties::Bucket(BucketProperties::new(None, vec![])))
    }

    #[test]
    fn test_should_render_resource_with_type_and_policies() {
        let resource = Resource::new(ResourceProperties::Bucket(BucketProperties::new(
            None,
            vec![LifecycleRule::enabled(1, 30, 14)],
        )))
        .with_deletion_policy(DeletionPolicy::Delete);

        let value = serde_json::to_value(&resource).unwrap();
        assert_eq!(value["Type"], "AWS::S3::Bucket");
        assert_eq!(value["DeletionPolicy"], "Delete");
        assert_eq!(value["UpdateReplacePolicy"], "Delete");
        assert!(value.get("DependsOn").is_none());
        assert_eq!(
            value["Properties"]["VersioningConfiguration"],
            json!({"Status": "Enabled"})
        );
    }

    #[test]
    fn test_should_deduplicate_dependencies() {
        let policy = id("UploadBucketAccessPolicy");
        let resource = bucket_resource().depends_on(&policy).depends_on(&policy);
        assert_eq!(resource.dependencies(), &[policy]);
    }

    #[test]
    fn test_should_reject_duplicate_logical_ids() {
        let mut template = Template::new(None);
        template.add_resource(id("UploadBucket"), bucket_resource()).unwrap();
        let err = template.add_resource(id("UploadBucket"), bucket_resource()).unwrap_err();
        assert!(matches!(err, StackError::DuplicateLogicalId(ref s) if s == "UploadBucket"));
        assert_eq!(template.resource_count(), 1);
    }

    #[test]
    fn test_should_render_template_skeleton() {
        let mut template = Template::new(Some("transfer stack".to_owned()));
        let bucket = id("UploadBucket");
        template.add_resource(bucket.clone(), bucket_resource()).unwrap();
        template
            .add_output(
                id("BucketName"),
                Output {
                    description: None,
                    value: Value::reference(&bucket),
                },
            )
            .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&template.to_json_pretty().unwrap()).unwrap();
        assert_eq!(value["AWSTemplateFormatVersion"], "2010-09-09");
        assert_eq!(value["Description"], "transfer stack");
        assert_eq!(value["Resources"]["UploadBucket"]["Type"], "AWS::S3::Bucket");
        assert_eq!(value["Outputs"]["BucketName"]["Value"], json!({"Ref": "UploadBucket"}));
        assert!(template.resource("UploadBucket").is_some());
        assert!(template.output("BucketName").is_some());
        assert_eq!(template.users().count(), 0);
    }
}
