//! gzip request decompression and response compression.

use tower_http::compression::CompressionLayer;
use tower_http::decompression::RequestDecompressionLayer;

/// Compresses response bodies with gzip when the client sends
/// `Accept-Encoding: gzip`.
pub fn response_layer() -> CompressionLayer {
    CompressionLayer::new().gzip(true)
}

/// Transparently inflates request bodies sent with `Content-Encoding: gzip`.
///
/// Requests with an encoding other than gzip or identity are answered with
/// `415 Unsupported Media Type`.
pub fn request_layer() -> RequestDecompressionLayer {
    RequestDecompressionLayer::new().gzip(true)
}
