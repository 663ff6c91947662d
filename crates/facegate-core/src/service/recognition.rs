//! Face recognition flows: identify a person from a photo, or extract a
//! single embedding for enrollment.
//!
//! Wires the FaceEncoder port, the employee record store, and the match
//! decision policy into the synchronous per-request chain:
//! detect -> fetch candidates -> tolerant ingestion -> decide.

use facegate_types::embedding::Embedding;
use facegate_types::employee::FaceRecord;
use facegate_types::error::{RecognitionError, RepositoryError};

use crate::encoder::{DetectedFace, FaceEncoder};
use crate::matching::{MatchDecision, MatchPolicy};
use crate::repository::employee::EmployeeRepository;

/// A successful identification.
#[derive(Debug, Clone)]
pub struct RecognizedEmployee {
    pub nip: String,
    pub name: String,
    pub score: f32,
}

/// Service for the two face flows. Pure composition over ports; the policy
/// itself is stateless, so the service needs no locking and is cheap to
/// share behind an Arc.
pub struct RecognitionService<E, R> {
    encoder: E,
    repo: R,
    policy: MatchPolicy,
}

impl<E, R> RecognitionService<E, R>
where
    E: FaceEncoder,
    R: EmployeeRepository,
{
    pub fn new(encoder: E, repo: R, policy: MatchPolicy) -> Self {
        Self {
            encoder,
            repo,
            policy,
        }
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Identify the most prominent face in `image` against all enrolled
    /// employees.
    ///
    /// An empty enrollment table is `NoCandidates`; a table whose rows are
    /// all corrupt still runs the scan and comes back `NoMatch` with no
    /// best score. Corrupt rows are skipped and logged, never fatal.
    pub async fn identify(&self, image: &[u8]) -> Result<RecognizedEmployee, RecognitionError> {
        let mut faces = self.encoder.detect(image).await?;
        if faces.is_empty() {
            return Err(RecognitionError::NoFaceDetected);
        }
        // Detections are ordered most prominent first.
        let query = faces.remove(0).embedding;
        self.check_dimension(&query)?;

        let records = self
            .repo
            .list_with_embeddings()
            .await
            .map_err(store_unavailable)?;
        if records.is_empty() {
            return Err(RecognitionError::NoCandidates);
        }

        let candidates = ingest_candidates(records);
        match self.policy.decide(&query, candidates) {
            MatchDecision::Match {
                identity: (nip, name),
                score,
            } => {
                tracing::info!(%nip, score, "face recognized");
                Ok(RecognizedEmployee { nip, name, score })
            }
            MatchDecision::NoMatch { best_score } => {
                tracing::info!(?best_score, "face not recognized");
                Err(RecognitionError::NoMatch { best_score })
            }
        }
    }

    /// Extract exactly one face for enrollment.
    ///
    /// Zero faces and more than one face are both rejected: an enrollment
    /// photo with several people is an ambiguous identity.
    pub async fn extract_single(&self, image: &[u8]) -> Result<DetectedFace, RecognitionError> {
        let mut faces = self.encoder.detect(image).await?;
        match faces.len() {
            0 => Err(RecognitionError::NoFaceDetected),
            1 => {
                let face = faces.remove(0);
                self.check_dimension(&face.embedding)?;
                Ok(face)
            }
            n => Err(RecognitionError::MultipleFacesDetected(n)),
        }
    }

    fn check_dimension(&self, embedding: &Embedding) -> Result<(), RecognitionError> {
        let expected = self.encoder.dimension();
        if embedding.dimension() != expected {
            return Err(RecognitionError::DimensionMismatch {
                expected,
                actual: embedding.dimension(),
            });
        }
        Ok(())
    }
}

/// Parse raw stored rows into scan candidates, in first-seen order.
///
/// Rows that fail to parse are dropped with a warning; production data has
/// the occasional corrupt row and one must never abort matching for the
/// rest.
pub fn ingest_candidates(records: Vec<FaceRecord>) -> Vec<((String, String), Embedding)> {
    let mut candidates = Vec::with_capacity(records.len());
    for record in records {
        match Embedding::parse_text(&record.raw_embedding) {
            Ok(embedding) => candidates.push(((record.nip, record.name), embedding)),
            Err(err) => {
                tracing::warn!(nip = %record.nip, %err, "skipping corrupt stored embedding");
            }
        }
    }
    candidates
}

fn store_unavailable(e: RepositoryError) -> RecognitionError {
    RecognitionError::StoreUnavailable(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::BoundingBox;
    use facegate_types::employee::{Credentials, Employee, EmployeeId};
    use std::sync::Mutex;

    /// Fixture encoder returning a canned detection list.
    struct FixtureEncoder {
        faces: Vec<DetectedFace>,
        dimension: usize,
    }

    impl FixtureEncoder {
        fn with_embeddings(embeddings: Vec<Vec<f32>>, dimension: usize) -> Self {
            let faces = embeddings
                .into_iter()
                .map(|v| DetectedFace {
                    bbox: BoundingBox {
                        x1: 0.0,
                        y1: 0.0,
                        x2: 10.0,
                        y2: 10.0,
                    },
                    embedding: Embedding::new(v).unwrap(),
                })
                .collect();
            Self { faces, dimension }
        }
    }

    impl FaceEncoder for FixtureEncoder {
        async fn detect(&self, _image: &[u8]) -> Result<Vec<DetectedFace>, RecognitionError> {
            Ok(self.faces.clone())
        }

        fn model_name(&self) -> &str {
            "fixture"
        }

        fn dimension(&self) -> usize {
            self.dimension
        }
    }

    /// In-memory employee store; only the scan-relevant calls are real.
    #[derive(Default)]
    struct FakeRepo {
        records: Vec<FaceRecord>,
        stored: Mutex<Vec<(String, Embedding)>>,
    }

    impl EmployeeRepository for FakeRepo {
        async fn list_with_embeddings(&self) -> Result<Vec<FaceRecord>, RepositoryError> {
            Ok(self.records.clone())
        }

        async fn store_embedding(
            &self,
            nip: &str,
            embedding: &Embedding,
        ) -> Result<(), RepositoryError> {
            self.stored
                .lock()
                .unwrap()
                .push((nip.to_string(), embedding.clone()));
            Ok(())
        }

        async fn create(
            &self,
            _employee: &Employee,
            _password_hash: Option<&str>,
        ) -> Result<(), RepositoryError> {
            unimplemented!()
        }

        async fn list(&self) -> Result<Vec<Employee>, RepositoryError> {
            unimplemented!()
        }

        async fn find_by_id(&self, _id: &EmployeeId) -> Result<Option<Employee>, RepositoryError> {
            unimplemented!()
        }

        async fn find_by_nip(&self, _nip: &str) -> Result<Option<Employee>, RepositoryError> {
            unimplemented!()
        }

        async fn find_credentials(
            &self,
            _email: &str,
        ) -> Result<Option<Credentials>, RepositoryError> {
            unimplemented!()
        }

        async fn update(
            &self,
            _id: &EmployeeId,
            _nip: Option<&str>,
            _name: Option<&str>,
            _email: Option<&str>,
            _password_hash: Option<&str>,
        ) -> Result<Employee, RepositoryError> {
            unimplemented!()
        }
    }

    fn record(nip: &str, name: &str, raw: &str) -> FaceRecord {
        FaceRecord {
            nip: nip.to_string(),
            name: name.to_string(),
            raw_embedding: raw.to_string(),
        }
    }

    fn service(
        encoder: FixtureEncoder,
        records: Vec<FaceRecord>,
    ) -> RecognitionService<FixtureEncoder, FakeRepo> {
        let repo = FakeRepo {
            records,
            ..FakeRepo::default()
        };
        RecognitionService::new(encoder, repo, MatchPolicy::cosine(0.5))
    }

    #[tokio::test]
    async fn test_identify_no_face() {
        let svc = service(FixtureEncoder::with_embeddings(vec![], 2), vec![]);
        let err = svc.identify(b"img").await.unwrap_err();
        assert!(matches!(err, RecognitionError::NoFaceDetected));
    }

    #[tokio::test]
    async fn test_identify_empty_store_is_no_candidates() {
        let svc = service(
            FixtureEncoder::with_embeddings(vec![vec![1.0, 0.0]], 2),
            vec![],
        );
        let err = svc.identify(b"img").await.unwrap_err();
        assert!(matches!(err, RecognitionError::NoCandidates));
    }

    #[tokio::test]
    async fn test_identify_matches_best_candidate() {
        let svc = service(
            FixtureEncoder::with_embeddings(vec![vec![1.0, 0.0]], 2),
            vec![
                record("100", "Ana", "[0.0,1.0]"),
                record("200", "Budi", "[1.0,0.0]"),
            ],
        );
        let hit = svc.identify(b"img").await.unwrap();
        assert_eq!(hit.nip, "200");
        assert_eq!(hit.name, "Budi");
        assert!((hit.score - 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_identify_skips_corrupt_rows() {
        let svc = service(
            FixtureEncoder::with_embeddings(vec![vec![1.0, 0.0]], 2),
            vec![
                record("100", "Ana", "not-a-vector"),
                record("200", "Budi", "[1.0,0.0]"),
            ],
        );
        let hit = svc.identify(b"img").await.unwrap();
        assert_eq!(hit.nip, "200");
    }

    #[tokio::test]
    async fn test_identify_all_corrupt_is_no_match_without_score() {
        let svc = service(
            FixtureEncoder::with_embeddings(vec![vec![1.0, 0.0]], 2),
            vec![record("100", "Ana", "garbage")],
        );
        match svc.identify(b"img").await.unwrap_err() {
            RecognitionError::NoMatch { best_score } => assert!(best_score.is_none()),
            other => panic!("expected NoMatch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_identify_below_threshold_reports_best_score() {
        let svc = service(
            FixtureEncoder::with_embeddings(vec![vec![1.0, 0.0]], 2),
            vec![record("100", "Ana", "[0.0,1.0]")],
        );
        match svc.identify(b"img").await.unwrap_err() {
            RecognitionError::NoMatch { best_score } => {
                assert!(best_score.unwrap().abs() < 1e-6);
            }
            other => panic!("expected NoMatch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_identify_uses_most_prominent_face() {
        let svc = service(
            FixtureEncoder::with_embeddings(vec![vec![1.0, 0.0], vec![0.0, 1.0]], 2),
            vec![record("200", "Budi", "[1.0,0.0]")],
        );
        let hit = svc.identify(b"img").await.unwrap();
        assert_eq!(hit.nip, "200");
    }

    #[tokio::test]
    async fn test_identify_rejects_mismatched_query_dimension() {
        let svc = service(
            FixtureEncoder::with_embeddings(vec![vec![1.0, 0.0, 0.0]], 2),
            vec![],
        );
        let err = svc.identify(b"img").await.unwrap_err();
        assert!(matches!(
            err,
            RecognitionError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        ));
    }

    #[tokio::test]
    async fn test_extract_single_rejects_multiple_faces() {
        let svc = service(
            FixtureEncoder::with_embeddings(vec![vec![1.0, 0.0], vec![0.0, 1.0]], 2),
            vec![],
        );
        let err = svc.extract_single(b"img").await.unwrap_err();
        assert!(matches!(err, RecognitionError::MultipleFacesDetected(2)));
    }

    #[tokio::test]
    async fn test_extract_single_rejects_no_face() {
        let svc = service(FixtureEncoder::with_embeddings(vec![], 2), vec![]);
        let err = svc.extract_single(b"img").await.unwrap_err();
        assert!(matches!(err, RecognitionError::NoFaceDetected));
    }

    #[tokio::test]
    async fn test_extract_single_happy_path() {
        let svc = service(
            FixtureEncoder::with_embeddings(vec![vec![0.5, 0.5]], 2),
            vec![],
        );
        let face = svc.extract_single(b"img").await.unwrap();
        assert_eq!(face.embedding.dimension(), 2);
    }

    #[test]
    fn test_ingest_preserves_first_seen_order() {
        let candidates = ingest_candidates(vec![
            record("1", "A", "[1.0]"),
            record("2", "B", "bad"),
            record("3", "C", "[3.0]"),
        ]);
        let nips: Vec<&str> = candidates.iter().map(|((nip, _), _)| nip.as_str()).collect();
        assert_eq!(nips, vec!["1", "3"]);
    }
}
