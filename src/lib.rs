//! This crate provides the core business logic for S3 Policy Studio:
//! - Bucket policy synthesis from structured access requests
//! - Plain-English policy explanation with security warnings
//! - Boundary validation of user-supplied request fields
//!
//! Both engines are pure and synchronous; serialization, clipboard/file
//! export, and any simulated-delay presentation belong to the UI adapters
//! that call into [`api`].

pub mod api;
mod errors;
mod explanation;
mod synthesis;
mod types;

// Re-exports for a small, focused public API
pub use api::model::{AccessRequest, AccessType, Permission};
pub use api::{build_policy, explain_policy, validate_bucket_name, validate_request};
pub use errors::{PolicyStudioError, Result};
pub use explanation::Engine as ExplanationEngine;
pub use explanation::{Explanation, EXAMPLE_POLICY};
pub use synthesis::Engine as SynthesisEngine;
pub use synthesis::GENERATED_SID;
pub use types::{
    ConditionMap, ConditionValues, Effect, PolicyDocument, Principal, Statement, POLICY_VERSION,
};
