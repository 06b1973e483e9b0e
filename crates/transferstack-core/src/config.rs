//! Configuration management for TransferStack.
//!
//! All configuration is driven by environment variables. The client list may
//! also come from the `context` object of a CDK-style JSON context file, so
//! an existing `cdk.json` keeps working unchanged.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::error::{StackError, StackResult};

/// Name of the context key holding the client list.
const CLIENTS_CONTEXT_KEY: &str = "clients";

/// Global configuration for TransferStack.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackConfig {
    /// Raw client list (`user:key[,user:key...]`), if set in the environment.
    pub clients: Option<String>,
    /// Free-text descriptor appended to role descriptions.
    pub descriptor: String,
    /// Explicit bucket name. When unset, CloudFormation generates one.
    pub bucket_name: Option<String>,
    /// Template description.
    pub stack_description: String,
    /// Path of the JSON context file consulted when `clients` is unset.
    pub context_file: String,
    /// Template destination; `-` means stdout.
    pub output: String,
    /// Log level.
    pub log_level: String,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            clients: None,
            descriptor: String::new(),
            bucket_name: None,
            stack_description: "SFTP transfer server backed by S3 with per-client home directories"
                .to_owned(),
            context_file: "cdk.json".to_owned(),
            output: "-".to_owned(),
            log_level: "info".to_owned(),
        }
    }
}

impl StackConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `TRANSFER_CLIENTS` | *(unset, falls back to the context file)* |
    /// | `CDK_TRANSFER_SERVER_DESCRIPTOR` | *(empty)* |
    /// | `BUCKET_NAME` | *(unset, generated)* |
    /// | `STACK_DESCRIPTION` | built-in description |
    /// | `CONTEXT_FILE` | `cdk.json` |
    /// | `OUTPUT` | `-` (stdout) |
    /// | `LOG_LEVEL` | `info` |
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// [`StackConfig::from_env`] delegates here with `std::env::var`.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("TRANSFER_CLIENTS") {
            config.clients = Some(v);
        }
        if let Some(v) = lookup("CDK_TRANSFER_SERVER_DESCRIPTOR") {
            config.descriptor = v;
        }
        if let Some(v) = lookup("BUCKET_NAME") {
            if !v.trim().is_empty() {
                config.bucket_name = Some(v.trim().to_owned());
            }
        }
        if let Some(v) = lookup("STACK_DESCRIPTION") {
            config.stack_description = v;
        }
        if let Some(v) = lookup("CONTEXT_FILE") {
            config.context_file = v;
        }
        if let Some(v) = lookup("OUTPUT") {
            config.output = v;
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }

    /// Resolve the raw client list.
    ///
    /// The environment value wins, even when empty; otherwise the `clients`
    /// key of the context file is used.
    ///
    /// # Errors
    /// Returns [`StackError::MissingConfig`] if no source provides the client
    /// list, or a context-file error if the file exists but is unreadable.
    pub fn resolve_clients(&self) -> StackResult<String> {
        if let Some(clients) = &self.clients {
            debug!("using client list from TRANSFER_CLIENTS");
            return Ok(clients.clone());
        }

        let path = Path::new(&self.context_file);
        if !path.exists() {
            return Err(StackError::MissingConfig(format!(
                "clients (set TRANSFER_CLIENTS or add context.clients to {})",
                self.context_file
            )));
        }

        let context = ContextFile::load(path)?;
        debug!(path = %self.context_file, "using client list from context file");
        context.clients().map(str::to_owned).ok_or_else(|| {
            StackError::MissingConfig(format!(
                "clients (context.clients in {} is absent or not a string)",
                self.context_file
            ))
        })
    }
}

/// CDK-style JSON context file (`{"context": {"clients": "..."}}`).
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ContextFile {
    /// Context values keyed by name. Other top-level keys are ignored.
    #[serde(default)]
    pub context: BTreeMap<String, serde_json::Value>,
}

impl ContextFile {
    /// Read and parse a context file.
    ///
    /// # Errors
    /// Returns [`StackError::ContextRead`] or [`StackError::ContextParse`].
    pub fn load(path: &Path) -> StackResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| StackError::ContextRead {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| StackError::ContextParse {
            path: path.display().to_string(),
            source,
        })
    }

    /// The `clients` context value, if present and a string.
    #[must_use]
    pub fn clients(&self) -> Option<&str> {
        self.context
            .get(CLIENTS_CONTEXT_KEY)
            .and_then(serde_json::Value::as_str)
    }
}
