//! Core types, configuration, and errors for TransferStack.
//!
//! This crate provides the foundational building blocks shared by the
//! descriptor model and the synthesizer: the environment-driven
//! [`StackConfig`], the [`StackError`] type, and the [`LogicalId`]
//! newtype used to key every resource in a template.

mod config;
mod error;
mod types;

pub use config::{ContextFile, StackConfig};
pub use error::{StackError, StackResult};
pub use types::LogicalId;
