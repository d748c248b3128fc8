//! Response compression layer.

use tower_http::compression::CompressionLayer;

/// Gzip responses when the client accepts it.
pub fn build_compression_layer() -> CompressionLayer {
    CompressionLayer::new()
}
