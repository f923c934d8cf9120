//! Plain-English policy explanation
//!
//! Pattern-matches a single-statement bucket policy document and renders a
//! description plus heuristic security warnings.

pub(crate) mod engine;

pub use engine::Engine;

use schemars::JsonSchema;
use serde::Serialize;

/// A rendered explanation of a policy document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Explanation {
    #[schemars(description = "Plain-English description of what the policy's first statement allows")]
    pub description: String,

    #[schemars(description = "Heuristic security warnings, in discovery order")]
    pub warnings: Vec<String>,
}

/// Sample policy document shells offer through a "load example" affordance
pub const EXAMPLE_POLICY: &str = r#"{
  "Version": "2012-10-17",
  "Statement": [
    {
      "Sid": "AllowUserAliceUploadToLogsFolder",
      "Effect": "Allow",
      "Principal": {
        "AWS": "arn:aws:iam::123456789012:user/Alice"
      },
      "Action": [
        "s3:PutObject",
        "s3:PutObjectAcl"
      ],
      "Resource": "arn:aws:s3:::my-bucket-name/logs/*"
    }
  ]
}"#;
