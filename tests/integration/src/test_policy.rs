//! Roles, policies, and their wiring.

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use transferstack_synth::policy::session_policy;

    use crate::{alice_and_bob, resources_of_type, synth_clients, user};

    fn trusts_transfer(role: &Value) -> bool {
        role["Properties"]["AssumeRolePolicyDocument"]["Statement"][0]["Principal"]
            == json!({"Service": "transfer.amazonaws.com"})
    }

    #[test]
    fn test_should_embed_session_policy_as_json_string() {
        let template = synth_clients(&alice_and_bob());
        let text = user(&template, "alice")["Properties"]["Policy"]
            .as_str()
            .expect("Policy should be a JSON string");

        let embedded: Value = serde_json::from_str(text).unwrap();
        assert_eq!(embedded, serde_json::to_value(session_policy()).unwrap());
        assert!(text.contains("${transfer:HomeDirectory}"));
        assert!(!text.contains("alice"));
    }

    #[test]
    fn test_should_declare_two_roles_trusting_transfer() {
        let template = synth_clients(&alice_and_bob());
        let roles = resources_of_type(&template, "AWS::IAM::Role");
        assert_eq!(roles.len(), 2);
        assert!(roles.iter().all(|(_, role)| trusts_transfer(role)));

        assert_eq!(
            template["Resources"]["TransferUserRole"]["Properties"]["Description"],
            "Temporary transfer user role for integration"
        );
        assert_eq!(
            template["Resources"]["TransferLoggingRole"]["Properties"]["Description"],
            "Temporary transfer server role for integration"
        );
    }

    #[test]
    fn test_should_attach_operator_policy_to_user_role() {
        let template = synth_clients(&alice_and_bob());
        let policies = resources_of_type(&template, "AWS::IAM::Policy");
        assert_eq!(policies.len(), 1);

        let (id, policy) = policies[0];
        assert_eq!(id, "UploadBucketAccessPolicy");
        assert_eq!(policy["Properties"]["Roles"], json!([{"Ref": "TransferUserRole"}]));

        let statements = policy["Properties"]["PolicyDocument"]["Statement"]
            .as_array()
            .unwrap();
        let sids: Vec<&str> = statements.iter().filter_map(|s| s["Sid"].as_str()).collect();
        assert_eq!(sids, ["AllowListingOfFolders", "AllowFolderObjectAccess"]);
        assert_eq!(statements[0]["Resource"], json!([{"Fn::GetAtt": ["UploadBucket", "Arn"]}]));
    }

    #[test]
    fn test_should_make_every_user_wait_for_operator_policy() {
        let template = synth_clients(&alice_and_bob());
        for (_, user) in resources_of_type(&template, "AWS::Transfer::User") {
            assert_eq!(user["DependsOn"], json!(["UploadBucketAccessPolicy"]));
        }
    }

    #[test]
    fn test_should_wire_server_to_logging_role() {
        let template = synth_clients(&alice_and_bob());
        let server = &template["Resources"]["TransferServer"];
        assert_eq!(server["Type"], "AWS::Transfer::Server");
        assert_eq!(
            server["Properties"],
            json!({
                "IdentityProviderType": "SERVICE_MANAGED",
                "EndpointType": "PUBLIC",
                "LoggingRole": {"Fn::GetAtt": ["TransferLoggingRole", "Arn"]},
                "Protocols": ["SFTP"]
            })
        );

        let logging = &template["Resources"]["TransferLoggingRole"]["Properties"]["Policies"][0];
        assert_eq!(logging["PolicyName"], "TransferAuditLogging");
        assert_eq!(
            logging["PolicyDocument"]["Statement"][0]["Resource"],
            json!(["arn:aws:logs:*:*:log-group:/aws/transfer/*"])
        );
    }
}
