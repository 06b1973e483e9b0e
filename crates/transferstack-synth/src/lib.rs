//! Stack synthesis for TransferStack.
//!
//! Turns a raw client list and a handful of settings into a CloudFormation
//! [`Template`](transferstack_model::Template) declaring an SFTP transfer
//! server, its backing bucket, the IAM roles and policies that scope each
//! client to a home directory, and one transfer user per client.
//!
//! # Architecture
//!
//! ```text
//! "alice:key,bob:key"
//!        |
//!        v
//!   clients::parse_clients  (validation of usernames, duplicates)
//!        |
//!        v
//!   stack::synthesize  <--  policy::* (operator, session, logging, TLS)
//!        |
//!        v
//!   Template --> stack::render --> JSON
//! ```

pub mod clients;
pub mod error;
pub mod policy;
pub mod stack;
pub mod validation;

pub use clients::{Client, parse_clients};
pub use error::SynthError;
pub use stack::{LifecycleSettings, SynthConfig, render, synthesize};
