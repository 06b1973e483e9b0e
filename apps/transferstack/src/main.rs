//! TransferStack - SFTP transfer server stack synthesizer.
//!
//! Reads the client list and stack settings from the environment (or a
//! CDK-style `cdk.json` context file), and writes a CloudFormation template
//! declaring the transfer server, its upload bucket, the scoping IAM roles and
//! policies, and one transfer user per client.
//!
//! # Usage
//!
//! ```text
//! TRANSFER_CLIENTS="alice:ssh-ed25519 AAAA...,bob:ssh-rsa BBBB..." \
//! CDK_TRANSFER_SERVER_DESCRIPTOR=acme-prod \
//! transferstack > template.json
//! ```
//!
//! Pass `--check` to validate the configuration without writing a template.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `TRANSFER_CLIENTS` | *(unset)* | `user:key[,user:key...]`; overrides the context file |
//! | `CONTEXT_FILE` | `cdk.json` | JSON file whose `context.clients` supplies the client list |
//! | `CDK_TRANSFER_SERVER_DESCRIPTOR` | *(empty)* | Appended to role descriptions |
//! | `BUCKET_NAME` | *(generated)* | Explicit upload bucket name |
//! | `STACK_DESCRIPTION` | built-in | Template description |
//! | `OUTPUT` | `-` | Template path, `-` for stdout |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use std::io::Write;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use transferstack_core::StackConfig;
use transferstack_synth::{SynthConfig, render, synthesize};

/// Version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
/// Logs go to stderr so stdout carries only the template.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Build the [`SynthConfig`] from the application [`StackConfig`].
fn build_synth_config(config: &StackConfig) -> Result<SynthConfig> {
    let clients = config
        .resolve_clients()
        .context("cannot determine the client list")?;

    Ok(SynthConfig {
        clients,
        descriptor: config.descriptor.clone(),
        bucket_name: config.bucket_name.clone(),
        lifecycle: transferstack_synth::LifecycleSettings::default(),
        description: Some(config.stack_description.clone()),
    })
}

/// Write the rendered template to `output` (`-` for stdout).
fn write_template(output: &str, rendered: &str) -> Result<()> {
    if output == "-" {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{rendered}").context("failed to write template to stdout")?;
        return Ok(());
    }

    std::fs::write(output, format!("{rendered}\n"))
        .with_context(|| format!("failed to write template to {output}"))
}

fn main() -> Result<()> {
    let check_only = std::env::args().any(|a| a == "--check");
    let config = StackConfig::from_env();

    init_tracing(&config.log_level)?;

    info!(
        context_file = %config.context_file,
        output = %config.output,
        version = VERSION,
        "starting TransferStack synthesis",
    );

    let synth_config = build_synth_config(&config)?;
    let template = synthesize(&synth_config).context("stack synthesis failed")?;
    let rendered = render(&template)?;

    if check_only {
        info!(
            resources = template.resource_count(),
            "configuration is valid, no template written"
        );
        return Ok(());
    }

    write_template(&config.output, &rendered)?;
    info!(output = %config.output, bytes = rendered.len(), "template written");

    Ok(())
}
