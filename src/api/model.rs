//! Request and response model for the adapter-facing API.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::ACTION_NAMESPACE;

/// Which principal shape the generated statement should carry.
///
/// Only `public-read` changes the synthesized principal; the remaining
/// variants exist so form shells can preselect permission sets and labels,
/// and all of them grant to the supplied principal ARN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AccessType {
    PublicRead,
    IamUser,
    CrossAccount,
    FolderSpecific,
    IpBased,
    UploadOnly,
    ReadOnly,
    Logging,
}

/// A selectable S3 permission, mapped onto a fully-qualified action name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Permission {
    GetObject,
    PutObject,
    ListBucket,
    DeleteObject,
    GetBucketLocation,
    /// All S3 actions
    #[serde(rename = "*")]
    All,
}

impl Permission {
    /// The bare permission name as presented to users
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetObject => "GetObject",
            Self::PutObject => "PutObject",
            Self::ListBucket => "ListBucket",
            Self::DeleteObject => "DeleteObject",
            Self::GetBucketLocation => "GetBucketLocation",
            Self::All => "*",
        }
    }

    /// The fully-qualified IAM action name (e.g. `s3:GetObject`, `s3:*`)
    pub fn to_action(self) -> String {
        format!("{}:{}", ACTION_NAMESPACE, self.as_str())
    }
}

/// A structured access request assembled by a form shell.
///
/// Every field is reflected verbatim into the synthesized policy; see
/// [`crate::api::validate_request`] for the advisory boundary checks a
/// shell should run before enabling generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessRequest {
    #[schemars(description = "Principal shape to synthesize")]
    pub access_type: AccessType,

    #[schemars(description = "Target bucket name")]
    pub bucket_name: String,

    #[schemars(description = "Optional folder/key prefix scoping the resource ARNs; empty scopes to the whole bucket")]
    #[serde(default)]
    pub folder_prefix: String,

    #[schemars(description = "Principal ARN granted access for every access type except public-read")]
    #[serde(default)]
    pub principal_arn: String,

    #[schemars(description = "Selected permissions, in selection order")]
    pub permissions: Vec<Permission>,

    #[schemars(description = "Comma-separated IP/CIDR whitelist; empty attaches no condition")]
    #[serde(default)]
    pub ip_whitelist: String,
}

impl AccessRequest {
    /// Create a request with the given access type, bucket, and permissions
    pub fn new(
        access_type: AccessType,
        bucket_name: impl Into<String>,
        permissions: Vec<Permission>,
    ) -> Self {
        Self {
            access_type,
            bucket_name: bucket_name.into(),
            folder_prefix: String::new(),
            principal_arn: String::new(),
            permissions,
            ip_whitelist: String::new(),
        }
    }

    /// Scope the resource ARNs to a folder/key prefix
    pub fn with_folder_prefix(mut self, folder_prefix: impl Into<String>) -> Self {
        self.folder_prefix = folder_prefix.into();
        self
    }

    /// Set the principal ARN granted access
    pub fn with_principal_arn(mut self, principal_arn: impl Into<String>) -> Self {
        self.principal_arn = principal_arn.into();
        self
    }

    /// Restrict access to a comma-separated IP/CIDR whitelist
    pub fn with_ip_whitelist(mut self, ip_whitelist: impl Into<String>) -> Self {
        self.ip_whitelist = ip_whitelist.into();
        self
    }
}
