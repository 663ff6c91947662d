use serde::{Deserialize, Serialize};
use thiserror::Error;

use std::fmt;

/// Errors from constructing or parsing an embedding.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("empty embedding")]
    Empty,

    #[error("invalid embedding text at element {index}: {reason}")]
    InvalidText { index: usize, reason: String },

    #[error("non-finite value at element {0}")]
    NonFinite(usize),
}

/// A fixed-length facial feature vector produced by a face encoder.
///
/// Immutable once produced. Embeddings are only comparable against
/// embeddings of the same dimension from the same provider; the match
/// policy skips candidates whose dimension differs from the query.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Embedding(Vec<f32>);

impl Embedding {
    /// Wrap a raw feature vector. Rejects empty and non-finite input.
    pub fn new(values: Vec<f32>) -> Result<Self, EmbeddingError> {
        if values.is_empty() {
            return Err(EmbeddingError::Empty);
        }
        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(EmbeddingError::NonFinite(i));
        }
        Ok(Self(values))
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Parse the textual record-store encoding: `"[0.1,-0.2,...]"`.
    ///
    /// Whitespace and embedded newlines are tolerated (stored rows in the
    /// wild contain both). Any unparseable element fails the whole row;
    /// callers decide whether that row is skipped or fatal.
    pub fn parse_text(raw: &str) -> Result<Self, EmbeddingError> {
        let trimmed: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        let inner = trimmed
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .unwrap_or(&trimmed);

        if inner.is_empty() {
            return Err(EmbeddingError::Empty);
        }

        let mut values = Vec::new();
        for (index, part) in inner.split(',').enumerate() {
            let value: f32 = part.parse().map_err(|e| EmbeddingError::InvalidText {
                index,
                reason: format!("{e}"),
            })?;
            values.push(value);
        }

        Self::new(values)
    }

    /// Serialize to the textual record-store encoding.
    pub fn to_text(&self) -> String {
        let parts: Vec<String> = self.0.iter().map(|v| v.to_string()).collect();
        format!("[{}]", parts.join(","))
    }
}

// Debug prints dimension only; a 512-element dump is useless in logs.
impl fmt::Debug for Embedding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Embedding(dim={})", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty() {
        assert!(matches!(Embedding::new(vec![]), Err(EmbeddingError::Empty)));
    }

    #[test]
    fn test_new_rejects_nan() {
        let err = Embedding::new(vec![0.1, f32::NAN]).unwrap_err();
        assert!(matches!(err, EmbeddingError::NonFinite(1)));
    }

    #[test]
    fn test_parse_text_roundtrip() {
        let original = Embedding::new(vec![0.125, -0.5, 3.0]).unwrap();
        let parsed = Embedding::parse_text(&original.to_text()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_parse_text_tolerates_whitespace_and_newlines() {
        let parsed = Embedding::parse_text("[ 0.1,\n -0.2,\n 0.3 ]").unwrap();
        assert_eq!(parsed.as_slice(), &[0.1, -0.2, 0.3]);
    }

    #[test]
    fn test_parse_text_without_brackets() {
        let parsed = Embedding::parse_text("0.1,0.2").unwrap();
        assert_eq!(parsed.dimension(), 2);
    }

    #[test]
    fn test_parse_text_corrupt_row_fails() {
        let err = Embedding::parse_text("[0.1,oops,0.3]").unwrap_err();
        assert!(matches!(err, EmbeddingError::InvalidText { index: 1, .. }));
    }

    #[test]
    fn test_parse_text_empty_brackets() {
        assert!(matches!(
            Embedding::parse_text("[]"),
            Err(EmbeddingError::Empty)
        ));
    }

    #[test]
    fn test_debug_hides_values() {
        let e = Embedding::new(vec![0.1; 512]).unwrap();
        assert_eq!(format!("{e:?}"), "Embedding(dim=512)");
    }
}
