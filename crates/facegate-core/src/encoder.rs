//! FaceEncoder port: image bytes in, detected faces with embeddings out.
//!
//! Face detection and embedding extraction are treated as an opaque
//! external capability. The production adapter (HTTP sidecar client) lives
//! in facegate-infra; tests substitute a fixture encoder.

use facegate_types::embedding::Embedding;
use facegate_types::error::RecognitionError;

/// Axis-aligned face bounding box in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// One detected face: where it is and its feature vector.
#[derive(Debug, Clone)]
pub struct DetectedFace {
    pub bbox: BoundingBox,
    pub embedding: Embedding,
}

/// Trait for detecting faces and extracting embeddings from an image.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
/// Implementations live in facegate-infra.
///
/// Contract: an empty result means "no face found" and callers must reject
/// the input, never synthesize a zero vector. Detections are ordered most
/// prominent first; matching uses the first, enrollment requires exactly
/// one.
pub trait FaceEncoder: Send + Sync {
    /// Detect faces in an encoded image (JPEG/PNG bytes) and return one
    /// embedding per face.
    fn detect(
        &self,
        image: &[u8],
    ) -> impl std::future::Future<Output = Result<Vec<DetectedFace>, RecognitionError>> + Send;

    /// The model label behind this encoder (e.g., "buffalo_s").
    fn model_name(&self) -> &str;

    /// The dimensionality of the output vectors.
    fn dimension(&self) -> usize;
}
