use crate::errors::Result;
use crate::explanation::Explanation;
use crate::ExplanationEngine;

/// Explain a policy document given as raw JSON text.
///
/// Returns [`crate::PolicyStudioError::JsonParsing`] for malformed text and
/// [`crate::PolicyStudioError::UnsupportedShape`] for well-formed JSON that
/// is not a recognizable single-statement bucket policy.
pub fn explain_policy(policy_json: &str) -> Result<Explanation> {
    ExplanationEngine::new().explain(policy_json)
}
