//! Policy explanation engine implementation
//!
//! The engine parses untrusted policy text in two phases: raw JSON first
//! (malformed text is the `JsonParsing` kind), then conversion into the
//! typed document model (anything well-formed but unrecognizable is
//! `UnsupportedShape`). Rendering itself cannot fail.

use log::debug;
use regex::Regex;

use super::Explanation;
use crate::errors::{PolicyStudioError, Result};
use crate::types::{
    PolicyDocument, Principal, Statement, ACTION_NAMESPACE, DATE_CONDITION_OPERATOR,
    IP_ADDRESS_OPERATOR,
};

const PUBLIC_PRINCIPAL_PREFIX: &str = "This policy allows ANYONE on the internet to ";
const PRINCIPAL_NAME_FALLBACK: &str = "specified principal";

const PUBLIC_ACCESS_WARNING: &str =
    "Public access detected - this bucket is accessible to everyone!";
const FULL_ACCESS_WARNING: &str =
    "Full S3 access granted - consider using least privilege principle";

const IP_RESTRICTION_SENTENCE: &str = " This access is restricted to specific IP addresses.";
const TIME_RESTRICTION_SENTENCE: &str = " This policy has time-based restrictions.";

/// Policy explanation engine pattern-matching documents into prose
#[derive(Debug)]
#[non_exhaustive]
pub struct Engine {
    /// Extracts the trailing `user/<name>` segment of a principal ARN
    user_name_pattern: Regex,
    /// Splits an S3 resource ARN into bucket and path
    bucket_arn_pattern: Regex,
}

impl Engine {
    /// Create a new explanation engine
    pub fn new() -> Self {
        Self {
            user_name_pattern: Regex::new(r"user/(.+)$").expect("user ARN pattern compiles"),
            bucket_arn_pattern: Regex::new(r"arn:aws:s3:::([^/]+)(.*)$")
                .expect("bucket ARN pattern compiles"),
        }
    }

    /// Explain a policy document given as raw JSON text.
    ///
    /// Only the first statement is inspected; any later statements are
    /// silently ignored.
    pub fn explain(&self, policy_json: &str) -> Result<Explanation> {
        let value: serde_json::Value = serde_json::from_str(policy_json)
            .map_err(|e| PolicyStudioError::json_parsing("policy document", e))?;

        let document: PolicyDocument = serde_json::from_value(value)
            .map_err(|e| PolicyStudioError::unsupported_shape(e.to_string()))?;

        if document.statement.len() > 1 {
            debug!(
                "Document has {} statements; explaining only the first",
                document.statement.len()
            );
        }

        let statement = document.statement.first().ok_or_else(|| {
            PolicyStudioError::unsupported_shape("document contains no statements")
        })?;

        self.explain_statement(statement)
    }

    fn explain_statement(&self, statement: &Statement) -> Result<Explanation> {
        let principal = statement
            .principal
            .as_ref()
            .ok_or_else(|| PolicyStudioError::unsupported_shape("statement has no Principal"))?;

        let mut warnings = Vec::new();

        let mut description = match principal {
            Principal::Wildcard => {
                warnings.push(PUBLIC_ACCESS_WARNING.to_string());
                PUBLIC_PRINCIPAL_PREFIX.to_string()
            }
            Principal::Aws(arn) => {
                let user_name = self
                    .user_name_pattern
                    .captures(arn)
                    .and_then(|captures| captures.get(1))
                    .map_or(PRINCIPAL_NAME_FALLBACK, |name| name.as_str());
                format!("This policy allows the user \"{}\" to ", user_name)
            }
        };

        let phrases = statement
            .action
            .iter()
            .map(|action| action_phrase(action, &mut warnings))
            .collect::<Vec<_>>();
        description.push_str(&phrases.join(", "));

        if let Some(sentence) = self.describe_resources(&statement.resource) {
            description.push_str(&sentence);
        }

        if let Some(condition) = &statement.condition {
            if condition.has_operator(IP_ADDRESS_OPERATOR) {
                description.push_str(IP_RESTRICTION_SENTENCE);
            }
            if condition.has_operator(DATE_CONDITION_OPERATOR) {
                description.push_str(TIME_RESTRICTION_SENTENCE);
            }
        }

        Ok(Explanation {
            description,
            warnings,
        })
    }

    /// Render the access scope from the resource list.
    ///
    /// The first entry yielding an entire-bucket or folder reading wins;
    /// otherwise the first entry matching the S3 ARN shape falls back to
    /// the "specific resources" phrase. Entries that are not S3 bucket
    /// ARNs contribute nothing.
    fn describe_resources(&self, resources: &[String]) -> Option<String> {
        let mut fallback = None;

        for resource in resources {
            let Some(captures) = self.bucket_arn_pattern.captures(resource) else {
                continue;
            };
            let bucket = &captures[1];
            let path = &captures[2];

            if path == "/*" {
                return Some(format!(" in the entire \"{}\" bucket.", bucket));
            }
            if path.starts_with('/') && path.ends_with("/*") {
                let folder = &path[1..path.len() - 2];
                return Some(format!(
                    " only in the \"{}/\" folder of the \"{}\" bucket.",
                    folder, bucket
                ));
            }
            if fallback.is_none() {
                fallback = Some(format!(
                    " on specific resources in the \"{}\" bucket.",
                    bucket
                ));
            }
        }

        fallback
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Map one action identifier to its plain-English phrase, accumulating any
/// warning the action implies
fn action_phrase(action: &str, warnings: &mut Vec<String>) -> String {
    match action {
        "s3:GetObject" => "download files".to_string(),
        "s3:PutObject" => "upload files".to_string(),
        "s3:DeleteObject" => "delete files".to_string(),
        "s3:ListBucket" => "list bucket contents".to_string(),
        "s3:*" => {
            warnings.push(FULL_ACCESS_WARNING.to_string());
            "perform any S3 operation".to_string()
        }
        other => strip_namespace(other).to_string(),
    }
}

/// Strip the service namespace prefix from an unrecognized action
fn strip_namespace(action: &str) -> &str {
    action
        .strip_prefix(ACTION_NAMESPACE)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(action)
}
