//! Policy synthesis engine implementation
//!
//! This module provides the Engine for turning a structured access request
//! into a single-statement S3 bucket policy document. The engine is a pure
//! reflection of its input: malformed bucket names or empty principal ARNs
//! land in the output verbatim, and validation is the form layer's job
//! (see `crate::api::validate_request`).

use log::{debug, warn};

use super::GENERATED_SID;
use crate::api::model::{AccessRequest, AccessType};
use crate::types::{
    PolicyDocument, Principal, Statement, IP_ADDRESS_OPERATOR, S3_ARN_PREFIX,
    SOURCE_IP_CONDITION_KEY,
};

/// Policy synthesis engine converting access requests into bucket policies
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct Engine;

impl Engine {
    /// Create a new synthesis engine
    pub fn new() -> Self {
        Self
    }

    /// Build a single-statement bucket policy for an access request.
    ///
    /// Never fails: every well-typed request produces a document. The
    /// statement grants to the wildcard principal for `public-read` and to
    /// the supplied principal ARN (verbatim) for every other access type.
    pub fn build(&self, request: &AccessRequest) -> PolicyDocument {
        debug!(
            "Synthesizing bucket policy for '{}' ({:?})",
            request.bucket_name, request.access_type
        );

        if request.permissions.is_empty() {
            warn!(
                "Access request for bucket '{}' selects no permissions; the statement will carry an empty action list",
                request.bucket_name
            );
        }

        let principal = match request.access_type {
            AccessType::PublicRead => Principal::Wildcard,
            _ => Principal::Aws(request.principal_arn.clone()),
        };

        // Selection order is preserved and duplicates are kept
        let actions = request
            .permissions
            .iter()
            .map(|permission| permission.to_action())
            .collect();

        let (base, objects) = Self::resource_pair(&request.bucket_name, &request.folder_prefix);

        let mut statement =
            Statement::allow(principal, actions, vec![base, objects]).with_sid(GENERATED_SID);

        if !request.ip_whitelist.is_empty() {
            statement = statement.with_condition(
                IP_ADDRESS_OPERATOR,
                SOURCE_IP_CONDITION_KEY,
                split_whitelist(&request.ip_whitelist),
            );
        }

        let mut policy = PolicyDocument::new();
        policy.add_statement(statement);
        policy
    }

    /// The two resource ARNs every statement carries: the scoped prefix
    /// itself and its wildcard-suffixed child form
    fn resource_pair(bucket_name: &str, folder_prefix: &str) -> (String, String) {
        let base = if folder_prefix.is_empty() {
            bucket_name.to_string()
        } else {
            format!("{}/{}", bucket_name, folder_prefix)
        };

        (
            format!("{}{}", S3_ARN_PREFIX, base),
            format!("{}{}/*", S3_ARN_PREFIX, base),
        )
    }
}

/// Split a comma-separated whitelist into trimmed tokens
fn split_whitelist(raw: &str) -> Vec<String> {
    raw.split(',').map(|token| token.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::model::Permission;
    use crate::types::{ConditionValues, Effect, POLICY_VERSION};

    fn create_test_engine() -> Engine {
        Engine::new()
    }

    #[test]
    fn test_build_public_read_policy() {
        let engine = create_test_engine();
        let request = AccessRequest::new(
            AccessType::PublicRead,
            "my-bucket",
            vec![Permission::GetObject],
        );

        let policy = engine.build(&request);
        assert_eq!(policy.version, POLICY_VERSION);
        assert_eq!(policy.statement.len(), 1);

        let statement = &policy.statement[0];
        assert_eq!(statement.sid, Some(GENERATED_SID.to_string()));
        assert_eq!(statement.effect, Effect::Allow);
        assert_eq!(statement.principal, Some(Principal::Wildcard));
        assert_eq!(statement.action, vec!["s3:GetObject"]);
        assert_eq!(
            statement.resource,
            vec!["arn:aws:s3:::my-bucket", "arn:aws:s3:::my-bucket/*"]
        );
        assert!(statement.condition.is_none());
    }

    #[test]
    fn test_build_iam_user_policy_carries_principal_verbatim() {
        let engine = create_test_engine();
        let request = AccessRequest::new(
            AccessType::IamUser,
            "my-bucket",
            vec![Permission::PutObject],
        )
        .with_principal_arn("arn:aws:iam::123456789012:user/Alice");

        let policy = engine.build(&request);
        let statement = &policy.statement[0];
        assert_eq!(
            statement.principal,
            Some(Principal::Aws(
                "arn:aws:iam::123456789012:user/Alice".to_string()
            ))
        );
    }

    #[test]
    fn test_build_empty_principal_arn_is_reflected_not_rejected() {
        let engine = create_test_engine();
        let request = AccessRequest::new(
            AccessType::CrossAccount,
            "my-bucket",
            vec![Permission::GetObject],
        );

        let policy = engine.build(&request);
        assert_eq!(
            policy.statement[0].principal,
            Some(Principal::Aws(String::new()))
        );
    }

    #[test]
    fn test_build_with_folder_prefix_scopes_both_resources() {
        let engine = create_test_engine();
        let request = AccessRequest::new(
            AccessType::IamUser,
            "my-bucket",
            vec![Permission::PutObject],
        )
        .with_folder_prefix("logs")
        .with_principal_arn("arn:aws:iam::123456789012:user/Alice");

        let policy = engine.build(&request);
        assert_eq!(
            policy.statement[0].resource,
            vec!["arn:aws:s3:::my-bucket/logs", "arn:aws:s3:::my-bucket/logs/*"]
        );
    }

    #[test]
    fn test_build_preserves_permission_order_and_duplicates() {
        let engine = create_test_engine();
        let request = AccessRequest::new(
            AccessType::PublicRead,
            "my-bucket",
            vec![
                Permission::ListBucket,
                Permission::GetObject,
                Permission::ListBucket,
            ],
        );

        let policy = engine.build(&request);
        assert_eq!(
            policy.statement[0].action,
            vec!["s3:ListBucket", "s3:GetObject", "s3:ListBucket"]
        );
    }

    #[test]
    fn test_build_wildcard_permission_maps_to_service_wildcard() {
        let engine = create_test_engine();
        let request =
            AccessRequest::new(AccessType::PublicRead, "my-bucket", vec![Permission::All]);

        let policy = engine.build(&request);
        assert_eq!(policy.statement[0].action, vec!["s3:*"]);
    }

    #[test]
    fn test_build_tolerates_empty_permission_selection() {
        let engine = create_test_engine();
        let request = AccessRequest::new(AccessType::PublicRead, "my-bucket", vec![]);

        let policy = engine.build(&request);
        assert!(policy.statement[0].action.is_empty());
        assert_eq!(policy.statement.len(), 1);
    }

    #[test]
    fn test_build_with_ip_whitelist_trims_entries() {
        let engine = create_test_engine();
        let request = AccessRequest::new(
            AccessType::IpBased,
            "my-bucket",
            vec![Permission::GetObject],
        )
        .with_principal_arn("arn:aws:iam::123456789012:role/app")
        .with_ip_whitelist("1.2.3.0/24, 10.0.0.0/8");

        let policy = engine.build(&request);
        let condition = policy.statement[0].condition.as_ref().unwrap();
        assert_eq!(
            condition.0[IP_ADDRESS_OPERATOR][SOURCE_IP_CONDITION_KEY],
            ConditionValues(vec!["1.2.3.0/24".to_string(), "10.0.0.0/8".to_string()])
        );
    }

    #[test]
    fn test_build_empty_whitelist_attaches_no_condition_key() {
        let engine = create_test_engine();
        let request = AccessRequest::new(
            AccessType::PublicRead,
            "my-bucket",
            vec![Permission::GetObject],
        );

        let policy = engine.build(&request);
        let json = serde_json::to_string(&policy).unwrap();
        assert!(policy.statement[0].condition.is_none());
        assert!(!json.contains("\"Condition\""));
    }

    #[test]
    fn test_policy_json_serialization() {
        let engine = create_test_engine();
        let request = AccessRequest::new(
            AccessType::PublicRead,
            "my-bucket",
            vec![Permission::GetObject],
        )
        .with_ip_whitelist("192.168.1.0/24");

        let json = engine.build(&request).to_json_pretty().unwrap();

        assert!(json.contains("\"Version\": \"2012-10-17\""));
        assert!(json.contains("\"Sid\": \"GeneratedPolicy\""));
        assert!(json.contains("\"Effect\": \"Allow\""));
        assert!(json.contains("\"Principal\": \"*\""));
        assert!(json.contains("\"s3:GetObject\""));
        assert!(json.contains("\"arn:aws:s3:::my-bucket/*\""));
        assert!(json.contains("\"aws:SourceIp\""));
    }

    #[test]
    fn test_split_whitelist_keeps_tokens_verbatim() {
        assert_eq!(
            split_whitelist(" 1.2.3.4 ,10.0.0.0/8"),
            vec!["1.2.3.4", "10.0.0.0/8"]
        );
        // No empty-token filtering; reflection over interpretation
        assert_eq!(split_whitelist("1.2.3.4,"), vec!["1.2.3.4", ""]);
    }
}
