use log::debug;

use crate::api::model::AccessRequest;
use crate::types::PolicyDocument;
use crate::SynthesisEngine;

/// Build a single-statement bucket policy document for an access request.
///
/// Pure and infallible: the request is reflected into the document verbatim.
/// Run [`crate::api::validate_request`] first when the request carries
/// unchecked user input.
pub fn build_policy(request: &AccessRequest) -> PolicyDocument {
    debug!(
        "build_policy invoked for bucket '{}' with {} permissions",
        request.bucket_name,
        request.permissions.len()
    );

    SynthesisEngine::new().build(request)
}
