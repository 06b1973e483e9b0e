//! Upload bucket invariants.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{alice_and_bob, resources_of_type, synth_clients};

    #[test]
    fn test_should_block_all_public_access() {
        let template = synth_clients(&alice_and_bob());
        let buckets = resources_of_type(&template, "AWS::S3::Bucket");
        assert_eq!(buckets.len(), 1);

        assert_eq!(
            buckets[0].1["Properties"]["PublicAccessBlockConfiguration"],
            json!({
                "BlockPublicAcls": true,
                "BlockPublicPolicy": true,
                "IgnorePublicAcls": true,
                "RestrictPublicBuckets": true
            })
        );
    }

    #[test]
    fn test_should_enforce_tls_through_bucket_policy() {
        let template = synth_clients(&alice_and_bob());
        let policies = resources_of_type(&template, "AWS::S3::BucketPolicy");
        assert_eq!(policies.len(), 1);

        let properties = &policies[0].1["Properties"];
        assert_eq!(properties["Bucket"], json!({"Ref": "UploadBucket"}));

        let statement = &properties["PolicyDocument"]["Statement"][0];
        assert_eq!(statement["Effect"], "Deny");
        assert_eq!(
            statement["Condition"],
            json!({"Bool": {"aws:SecureTransport": ["false"]}})
        );
        assert_eq!(
            statement["Resource"],
            json!([
                {"Fn::GetAtt": ["UploadBucket", "Arn"]},
                {"Fn::Join": ["", [{"Fn::GetAtt": ["UploadBucket", "Arn"]}, "/*"]]}
            ])
        );
    }

    #[test]
    fn test_should_encrypt_and_version_bucket() {
        let template = synth_clients(&alice_and_bob());
        let properties = &template["Resources"]["UploadBucket"]["Properties"];

        assert_eq!(
            properties["BucketEncryption"]["ServerSideEncryptionConfiguration"][0]
                ["ServerSideEncryptionByDefault"]["SSEAlgorithm"],
            "AES256"
        );
        assert_eq!(properties["VersioningConfiguration"]["Status"], "Enabled");
    }

    #[test]
    fn test_should_apply_default_lifecycle_rule() {
        let template = synth_clients(&alice_and_bob());
        let properties = &template["Resources"]["UploadBucket"]["Properties"];
        let rules = &properties["LifecycleConfiguration"]["Rules"];

        assert_eq!(
            rules,
            &json!([{
                "Status": "Enabled",
                "AbortIncompleteMultipartUpload": {"DaysAfterInitiation": 1},
                "ExpirationInDays": 30,
                "NoncurrentVersionExpiration": {"NoncurrentDays": 14}
            }])
        );
    }

    #[test]
    fn test_should_delete_bucket_with_stack() {
        let template = synth_clients(&alice_and_bob());
        let bucket = &template["Resources"]["UploadBucket"];
        assert_eq!(bucket["DeletionPolicy"], "Delete");
        assert_eq!(bucket["UpdateReplacePolicy"], "Delete");
    }
}
