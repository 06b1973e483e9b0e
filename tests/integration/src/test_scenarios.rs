//! End-to-end client provisioning scenarios.

#[cfg(test)]
mod tests {
    use serde_json::json;
    use transferstack_core::{StackConfig, StackError};
    use transferstack_synth::{SynthConfig, SynthError, synthesize};

    use crate::{
        ALICE_KEY, BOB_KEY, alice_and_bob, resources_of_type, synth_clients, synth_json, user,
    };

    #[test]
    fn test_should_provision_alice_and_bob() {
        let template = synth_clients(&alice_and_bob());
        let users = resources_of_type(&template, "AWS::Transfer::User");
        assert_eq!(users.len(), 2);

        let alice = &user(&template, "alice")["Properties"];
        let bob = &user(&template, "bob")["Properties"];

        assert_eq!(alice["SshPublicKeys"], json!([ALICE_KEY]));
        assert_eq!(bob["SshPublicKeys"], json!([BOB_KEY]));

        assert_eq!(alice["Role"], json!({"Fn::GetAtt": ["TransferUserRole", "Arn"]}));
        assert_eq!(alice["Role"], bob["Role"]);
        assert_eq!(alice["ServerId"], json!({"Fn::GetAtt": ["TransferServer", "ServerId"]}));
        assert_eq!(alice["ServerId"], bob["ServerId"]);
        assert_eq!(alice["Policy"], bob["Policy"]);

        assert_eq!(
            alice["HomeDirectory"],
            json!({"Fn::Join": ["", ["/", {"Ref": "UploadBucket"}, "/alice"]]})
        );
        assert_eq!(
            bob["HomeDirectory"],
            json!({"Fn::Join": ["", ["/", {"Ref": "UploadBucket"}, "/bob"]]})
        );
    }

    #[test]
    fn test_should_provision_two_character_usernames() {
        let template = synth_clients("u1:k1,u2:k2");
        assert_eq!(resources_of_type(&template, "AWS::Transfer::User").len(), 2);

        let u1 = &user(&template, "u1")["Properties"];
        assert_eq!(u1["SshPublicKeys"], json!(["k1"]));
        assert_eq!(
            u1["HomeDirectory"],
            json!({"Fn::Join": ["", ["/", {"Ref": "UploadBucket"}, "/u1"]]})
        );
        assert_eq!(user(&template, "u2")["Properties"]["SshPublicKeys"], json!(["k2"]));
    }

    #[test]
    fn test_should_use_explicit_bucket_name_in_home_directories() {
        let template = synth_json(
            &SynthConfig::builder()
                .clients(alice_and_bob())
                .bucket_name("acme-sftp-uploads")
                .build(),
        );

        assert_eq!(
            user(&template, "alice")["Properties"]["HomeDirectory"],
            "/acme-sftp-uploads/alice"
        );
        assert_eq!(
            user(&template, "bob")["Properties"]["HomeDirectory"],
            "/acme-sftp-uploads/bob"
        );
        assert_eq!(
            template["Resources"]["UploadBucket"]["Properties"]["BucketName"],
            "acme-sftp-uploads"
        );
        assert_eq!(template["Outputs"]["BucketName"]["Value"], "acme-sftp-uploads");
    }

    #[test]
    fn test_should_produce_one_user_per_client() {
        let clients: Vec<String> = (1..=25)
            .map(|i| format!("client{i:02}:ssh-ed25519 KEY{i}"))
            .collect();
        let template = synth_clients(&clients.join(" , "));

        let users = resources_of_type(&template, "AWS::Transfer::User");
        assert_eq!(users.len(), 25);
        for i in 1..=25 {
            let name = format!("client{i:02}");
            assert_eq!(
                user(&template, &name)["Properties"]["HomeDirectory"]["Fn::Join"][1][2],
                format!("/{name}")
            );
        }
    }

    #[test]
    fn test_should_render_identical_bytes_for_identical_config() {
        let config = SynthConfig::builder()
            .clients(alice_and_bob())
            .descriptor("acme-prod")
            .build();
        let first = transferstack_synth::render(&synthesize(&config).unwrap()).unwrap();
        let second = transferstack_synth::render(&synthesize(&config).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_should_fail_on_empty_client_list() {
        let config = SynthConfig::builder().clients("   ").build();
        let err = synthesize(&config).unwrap_err();
        assert!(matches!(err, SynthError::EmptyClientList));
    }

    #[test]
    fn test_should_fail_on_missing_client_configuration() {
        let config = StackConfig {
            context_file: "/nonexistent/transferstack/cdk.json".to_owned(),
            ..StackConfig::default()
        };
        assert!(matches!(
            config.resolve_clients(),
            Err(StackError::MissingConfig(_))
        ));
    }

    #[test]
    fn test_should_reject_duplicates_before_building_resources() {
        let config = SynthConfig::builder()
            .clients(format!("alice:{ALICE_KEY},bob:{BOB_KEY},alice:{BOB_KEY}"))
            .build();
        let err = synthesize(&config).unwrap_err();
        assert!(err.to_string().contains("alice"));
        assert!(err.to_string().contains("#3"));
    }

    #[test]
    fn test_should_keep_keys_containing_colons() {
        let template = synth_clients("alice:ssh-ed25519 AAAA:BBBB alice@host");
        assert_eq!(
            user(&template, "alice")["Properties"]["SshPublicKeys"],
            json!(["ssh-ed25519 AAAA:BBBB alice@host"])
        );
    }

    #[test]
    fn test_should_expose_stack_outputs() {
        let template = synth_clients(&alice_and_bob());
        assert_eq!(
            template["Outputs"]["ServerId"]["Value"],
            json!({"Fn::GetAtt": ["TransferServer", "ServerId"]})
        );
        assert_eq!(template["Outputs"]["BucketName"]["Value"], json!({"Ref": "UploadBucket"}));
        assert_eq!(
            template["Outputs"]["UserRoleArn"]["Value"],
            json!({"Fn::GetAtt": ["TransferUserRole", "Arn"]})
        );
    }
}
