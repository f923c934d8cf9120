//! Boundary validation for access requests.
//!
//! Synthesis never rejects input, so form shells call these checks before
//! enabling generation. The rules mirror the S3 bucket naming constraints a
//! policy is pointless without: 3-63 characters, lowercase letters, digits,
//! dots, and hyphens, starting and ending alphanumeric.

use crate::api::model::{AccessRequest, AccessType};
use crate::errors::{PolicyStudioError, Result};

const BUCKET_NAME_MIN_LEN: usize = 3;
const BUCKET_NAME_MAX_LEN: usize = 63;

/// Validate an access request before it is handed to synthesis.
///
/// Checks the bucket name against S3 naming rules and requires a principal
/// ARN for the access types that grant to a specific identity.
pub fn validate_request(request: &AccessRequest) -> Result<()> {
    validate_bucket_name(&request.bucket_name)?;

    let needs_principal = matches!(
        request.access_type,
        AccessType::IamUser | AccessType::CrossAccount
    );
    if needs_principal && request.principal_arn.is_empty() {
        return Err(PolicyStudioError::validation_for_field(
            "a principal ARN is required for this access type",
            "principalArn",
        ));
    }

    Ok(())
}

/// Validate a bucket name against S3 naming rules
pub fn validate_bucket_name(bucket_name: &str) -> Result<()> {
    if bucket_name.len() < BUCKET_NAME_MIN_LEN || bucket_name.len() > BUCKET_NAME_MAX_LEN {
        return Err(PolicyStudioError::validation_for_field(
            format!(
                "bucket name must be between {} and {} characters, got {}",
                BUCKET_NAME_MIN_LEN,
                BUCKET_NAME_MAX_LEN,
                bucket_name.len()
            ),
            "bucketName",
        ));
    }

    if bucket_name.contains('_') {
        return Err(PolicyStudioError::validation_for_field(
            "bucket name must not contain underscores; use hyphens instead",
            "bucketName",
        ));
    }

    if !bucket_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-')
    {
        return Err(PolicyStudioError::validation_for_field(
            "bucket name may only contain lowercase letters, digits, dots, and hyphens",
            "bucketName",
        ));
    }

    let edges_alphanumeric = bucket_name
        .chars()
        .next()
        .zip(bucket_name.chars().last())
        .is_some_and(|(first, last)| {
            first.is_ascii_alphanumeric() && last.is_ascii_alphanumeric()
        });
    if !edges_alphanumeric {
        return Err(PolicyStudioError::validation_for_field(
            "bucket name must start and end with a letter or digit",
            "bucketName",
        ));
    }

    Ok(())
}
