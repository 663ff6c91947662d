//! Image payload decoding for camera uploads.
//!
//! Clients send either a bare base64 string or a full data URL
//! (`data:image/jpeg;base64,...`). Decoding strips the header, base64-decodes
//! the body, and validates that the bytes are a decodable image before they
//! are handed to the encoder sidecar.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use facegate_types::error::RecognitionError;

/// Decode an uploaded image payload into raw encoded-image bytes.
///
/// The bytes are validated with a full decode; a camera sometimes hands
/// over truncated frames and those must be rejected here, not deep inside
/// the encoder call.
pub fn decode_image_payload(payload: &str) -> Result<Vec<u8>, RecognitionError> {
    // Data-URL form: everything after the last comma is the base64 body.
    let body = payload.rsplit(',').next().unwrap_or(payload).trim();
    if body.is_empty() {
        return Err(RecognitionError::InvalidImage("empty payload".to_string()));
    }

    let bytes = BASE64
        .decode(body)
        .map_err(|e| RecognitionError::InvalidImage(format!("base64: {e}")))?;

    image::load_from_memory(&bytes)
        .map_err(|e| RecognitionError::InvalidImage(format!("decode: {e}")))?;

    Ok(bytes)
}
