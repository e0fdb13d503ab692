//! DTOs for the batch shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// One URL of a batch request.
///
/// The request body is a bare JSON array of these items.
#[derive(Debug, Deserialize, Validate)]
pub struct BatchRequestItem {
    /// Caller-chosen identifier echoed back in the response.
    #[validate(length(min = 1, max = 256))]
    pub correlation_id: String,

    #[validate(url(message = "Invalid URL format"))]
    pub original_url: String,
}

/// Short URL assigned to one correlation id, in request order.
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchResponseItem {
    pub correlation_id: String,
    pub short_url: String,
}
