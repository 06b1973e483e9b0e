//! End-to-end synthesis tests for TransferStack.
//!
//! Each test synthesizes a full stack and asserts on the rendered
//! CloudFormation JSON, the same bytes the deployment tool would receive.
//!
//! Run them with:
//! ```text
//! cargo test -p transferstack-integration
//! ```

use std::sync::Once;

use serde_json::Value;
use transferstack_synth::{SynthConfig, render, synthesize};

static INIT: Once = Once::new();

/// Sample key for `alice`.
pub const ALICE_KEY: &str = "ssh-rsa AAAAB3NzaC1yc2EAAAADAQABAAABAQCalice alice@laptop";

/// Sample key for `bob`.
pub const BOB_KEY: &str = "ssh-rsa AAAAB3NzaC1yc2EAAAADAQABAAABAQCbob bob@desktop";

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// The `alice`/`bob` client list used across scenarios.
#[must_use]
pub fn alice_and_bob() -> String {
    format!("alice:{ALICE_KEY},bob:{BOB_KEY}")
}

/// Synthesize and render a stack, returning the parsed template JSON.
#[must_use]
pub fn synth_json(config: &SynthConfig) -> Value {
    init_tracing();
    let template = synthesize(config).expect("synthesis should succeed");
    let rendered = render(&template).expect("rendering should succeed");
    serde_json::from_str(&rendered).expect("rendered template should be valid JSON")
}

/// Synthesize with default settings for the given client list.
#[must_use]
pub fn synth_clients(clients: &str) -> Value {
    synth_json(
        &SynthConfig::builder()
            .clients(clients)
            .descriptor("integration")
            .build(),
    )
}

/// All resources of a CloudFormation type, as `(logical id, resource)` pairs.
#[must_use]
pub fn resources_of_type<'a>(
    template: &'a Value,
    resource_type: &str,
) -> Vec<(&'a str, &'a Value)> {
    template["Resources"]
        .as_object()
        .expect("Resources should be an object")
        .iter()
        .filter(|(_, r)| r["Type"] == resource_type)
        .map(|(id, r)| (id.as_str(), r))
        .collect()
}

/// The transfer user with the given username.
#[must_use]
pub fn user<'a>(template: &'a Value, username: &str) -> &'a Value {
    resources_of_type(template, "AWS::Transfer::User")
        .into_iter()
        .map(|(_, r)| r)
        .find(|r| r["Properties"]["UserName"] == username)
        .unwrap_or_else(|| panic!("no transfer user named {username}"))
}

mod test_bucket;
mod test_policy;
mod test_scenarios;
