//! HTTP client for the face-encoder sidecar.
//!
//! Implements the `FaceEncoder` port from `facegate-core` against a small
//! sidecar service wrapping the actual detection/embedding model (the
//! deployment default is InsightFace `buffalo_s`, 512 dimensions). The
//! model is loaded once inside the sidecar; this client is constructed
//! once at startup and injected, never reached through global state.
//!
//! Wire format: `POST {base_url}/encode` with `{"image": "<base64>"}`,
//! reply `{"model": "...", "faces": [{"bbox": [x1,y1,x2,y2],
//! "embedding": [...]}, ...]}` ordered most prominent first.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use facegate_core::encoder::{BoundingBox, DetectedFace, FaceEncoder};
use facegate_types::config::EncoderConfig;
use facegate_types::embedding::Embedding;
use facegate_types::error::RecognitionError;

pub struct RemoteFaceEncoder {
    client: reqwest::Client,
    base_url: String,
    model: String,
    dimension: usize,
}

#[derive(Debug, Serialize)]
struct EncodeRequest<'a> {
    image: &'a str,
}

#[derive(Debug, Deserialize)]
struct EncodeResponse {
    #[serde(default)]
    faces: Vec<WireFace>,
}

#[derive(Debug, Deserialize)]
struct WireFace {
    bbox: [f32; 4],
    embedding: Vec<f32>,
}

impl RemoteFaceEncoder {
    pub fn new(config: &EncoderConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            dimension: config.dimension,
        }
    }

    fn convert(&self, face: WireFace) -> Result<DetectedFace, RecognitionError> {
        let embedding = Embedding::new(face.embedding)
            .map_err(|e| RecognitionError::EncoderUnavailable(format!("bad embedding: {e}")))?;
        if embedding.dimension() != self.dimension {
            return Err(RecognitionError::DimensionMismatch {
                expected: self.dimension,
                actual: embedding.dimension(),
            });
        }
        Ok(DetectedFace {
            bbox: BoundingBox {
                x1: face.bbox[0],
                y1: face.bbox[1],
                x2: face.bbox[2],
                y2: face.bbox[3],
            },
            embedding,
        })
    }
}

impl FaceEncoder for RemoteFaceEncoder {
    async fn detect(&self, image: &[u8]) -> Result<Vec<DetectedFace>, RecognitionError> {
        let body = EncodeRequest {
            image: &BASE64.encode(image),
        };

        let response = self
            .client
            .post(format!("{}/encode", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| RecognitionError::EncoderUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RecognitionError::EncoderUnavailable(format!(
                "sidecar returned {}",
                response.status()
            )));
        }

        let decoded: EncodeResponse = response
            .json()
            .await
            .map_err(|e| RecognitionError::EncoderUnavailable(format!("bad reply: {e}")))?;

        tracing::debug!(faces = decoded.faces.len(), model = %self.model, "encoder reply");

        decoded
            .faces
            .into_iter()
            .map(|face| self.convert(face))
            .collect()
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder(dimension: usize) -> RemoteFaceEncoder {
        RemoteFaceEncoder::new(&EncoderConfig {
            base_url: "http://localhost:5100/".to_string(),
            timeout_secs: 1,
            dimension,
            model: "buffalo_s".to_string(),
        })
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        assert_eq!(encoder(512).base_url, "http://localhost:5100");
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"{"model":"buffalo_s","faces":[{"bbox":[1.0,2.0,3.0,4.0],"embedding":[0.1,0.2]}]}"#;
        let parsed: EncodeResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.faces.len(), 1);
        assert_eq!(parsed.faces[0].bbox[3], 4.0);
    }

    #[test]
    fn test_response_missing_faces_defaults_empty() {
        let parsed: EncodeResponse = serde_json::from_str(r#"{"model":"x"}"#).unwrap();
        assert!(parsed.faces.is_empty());
    }

    #[test]
    fn test_convert_rejects_wrong_dimension() {
        let enc = encoder(4);
        let err = enc
            .convert(WireFace {
                bbox: [0.0; 4],
                embedding: vec![0.1, 0.2],
            })
            .unwrap_err();
        assert!(matches!(
            err,
            RecognitionError::DimensionMismatch {
                expected: 4,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_convert_accepts_matching_dimension() {
        let enc = encoder(2);
        let face = enc
            .convert(WireFace {
                bbox: [1.0, 2.0, 3.0, 4.0],
                embedding: vec![0.1, 0.2],
            })
            .unwrap();
        assert_eq!(face.embedding.dimension(), 2);
        assert_eq!(face.bbox.x2, 3.0);
    }
}
