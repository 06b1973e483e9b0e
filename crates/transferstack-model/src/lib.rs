//! Typed resource descriptors for TransferStack.
//!
//! Every resource the stack declares is a plain data structure here, and a
//! [`Template`] renders to a CloudFormation template through `serde`. Values
//! that refer to other resources are [`Value`] intrinsics rather than
//! pre-formatted strings, and IAM policies stay structured
//! [`PolicyDocument`]s until serialization.
//!
//! # Architecture
//!
//! ```text
//! Template
//!    |-- Resource (Type, Properties, DependsOn, DeletionPolicy)
//!    |      |-- s3::{BucketProperties, BucketPolicyProperties}
//!    |      |-- iam::{RoleProperties, PolicyProperties}
//!    |      `-- transfer::{ServerProperties, UserProperties}
//!    `-- Output
//! ```

pub mod iam;
pub mod intrinsic;
pub mod s3;
pub mod template;
pub mod transfer;

pub use iam::{Effect, PolicyDocument, PolicyStatement, Principal};
pub use intrinsic::Value;
pub use template::{DeletionPolicy, Output, Resource, ResourceProperties, Template};
