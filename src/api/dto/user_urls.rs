//! DTOs for the per-user URL listing and bulk delete endpoints.

use serde::{Deserialize, Serialize};

/// One URL created by the calling user.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserUrlResponse {
    pub short_url: String,
    pub original_url: String,
}

/// Short codes the calling user wants removed.
///
/// Serialized as a bare JSON array: `["ab12cd34", "ef56gh78"]`.
pub type DeleteUrlsRequest = Vec<String>;
