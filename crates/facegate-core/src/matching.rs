//! The match decision policy.
//!
//! Given one query embedding and an ordered collection of (identity,
//! embedding) candidates, decide whether any candidate is the same person.
//! This is a pure linear scan with a single best-score tracker; there is no
//! index, no batching, and no state.
//!
//! Two score functions are supported, selected by configuration:
//! cosine similarity (higher is better, accept strictly above the
//! threshold) and euclidean distance (lower is better, accept at or below
//! the tolerance).

use facegate_types::config::{MatchingConfig, MetricKind};
use facegate_types::embedding::Embedding;

/// Result of one match scan. Transient, computed per request.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchDecision<I> {
    Match {
        identity: I,
        score: f32,
    },
    NoMatch {
        /// Best score seen, absent when no candidate was comparable.
        best_score: Option<f32>,
    },
}

/// Parametric match policy: one score function plus its accept threshold.
#[derive(Debug, Clone, Copy)]
pub struct MatchPolicy {
    metric: MetricKind,
    threshold: f32,
}

impl MatchPolicy {
    /// Cosine-similarity policy: accept strictly above `threshold`.
    pub fn cosine(threshold: f32) -> Self {
        Self {
            metric: MetricKind::Cosine,
            threshold,
        }
    }

    /// Distance policy: accept at or below `tolerance`.
    pub fn distance(tolerance: f32) -> Self {
        Self {
            metric: MetricKind::Distance,
            threshold: tolerance,
        }
    }

    pub fn from_config(config: &MatchingConfig) -> Self {
        Self {
            metric: config.metric,
            threshold: config.threshold,
        }
    }

    pub fn metric(&self) -> MetricKind {
        self.metric
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Score two embeddings of equal dimension.
    pub fn score(&self, a: &Embedding, b: &Embedding) -> f32 {
        match self.metric {
            MetricKind::Cosine => cosine_similarity(a.as_slice(), b.as_slice()),
            MetricKind::Distance => euclidean_distance(a.as_slice(), b.as_slice()),
        }
    }

    /// Whether `candidate` beats the current `best`.
    ///
    /// Strict comparison in both directions: on an exact score tie the
    /// first-seen candidate wins. That tie-break is deliberate documented
    /// policy (determinism over scan order), not an artifact.
    fn better(&self, candidate: f32, best: f32) -> bool {
        match self.metric {
            MetricKind::Cosine => candidate > best,
            MetricKind::Distance => candidate < best,
        }
    }

    /// Whether a best score crosses the accept threshold.
    fn accepts(&self, score: f32) -> bool {
        match self.metric {
            MetricKind::Cosine => score > self.threshold,
            MetricKind::Distance => score <= self.threshold,
        }
    }

    /// Linear scan over `candidates`, returning the best accepted match.
    ///
    /// Candidates whose dimension differs from the query are skipped (they
    /// came from a different provider and are not comparable). An empty
    /// collection yields `NoMatch`. Deterministic given identical inputs;
    /// no side effects.
    pub fn decide<I>(
        &self,
        query: &Embedding,
        candidates: impl IntoIterator<Item = (I, Embedding)>,
    ) -> MatchDecision<I> {
        let mut best: Option<(I, f32)> = None;

        for (identity, embedding) in candidates {
            if embedding.dimension() != query.dimension() {
                tracing::warn!(
                    expected = query.dimension(),
                    actual = embedding.dimension(),
                    "skipping candidate with mismatched embedding dimension"
                );
                continue;
            }

            let score = self.score(query, &embedding);
            let replace = match &best {
                Some((_, best_score)) => self.better(score, *best_score),
                None => true,
            };
            if replace {
                best = Some((identity, score));
            }
        }

        match best {
            Some((identity, score)) if self.accepts(score) => {
                MatchDecision::Match { identity, score }
            }
            Some((_, score)) => MatchDecision::NoMatch {
                best_score: Some(score),
            },
            None => MatchDecision::NoMatch { best_score: None },
        }
    }
}

/// `dot(a,b) / (norm(a) * norm(b))`, range [-1, 1], higher is better.
///
/// A zero-norm input yields 0.0 (no direction to compare) rather than NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom <= 0.0 { 0.0 } else { dot / denom }
}

/// Euclidean (L2) distance, lower is better.
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emb(values: &[f32]) -> Embedding {
        Embedding::new(values.to_vec()).unwrap()
    }

    #[test]
    fn test_empty_candidates_is_no_match() {
        let policy = MatchPolicy::cosine(0.5);
        let decision = policy.decide::<&str>(&emb(&[1.0, 0.0]), vec![]);
        assert_eq!(decision, MatchDecision::NoMatch { best_score: None });
    }

    #[test]
    fn test_identical_vector_scores_one() {
        let policy = MatchPolicy::cosine(0.5);
        let query = emb(&[0.3, -0.7, 0.2]);
        let decision = policy.decide(&query, vec![("self", query.clone())]);
        match decision {
            MatchDecision::Match { identity, score } => {
                assert_eq!(identity, "self");
                assert!((score - 1.0).abs() < 1e-6);
            }
            other => panic!("expected match, got {other:?}"),
        }
    }

    #[test]
    fn test_best_score_wins_above_threshold() {
        // Candidates engineered against query [1, 0]:
        // cosine([1,0],[cos t, sin t]) = cos t
        let policy = MatchPolicy::cosine(0.5);
        let query = emb(&[1.0, 0.0]);
        let candidates = vec![
            ("e1", emb(&[0.3, (1.0f32 - 0.09).sqrt()])), // cos = 0.3
            ("e2", emb(&[0.7, (1.0f32 - 0.49).sqrt()])), // cos = 0.7
            ("e3", emb(&[0.6, (1.0f32 - 0.36).sqrt()])), // cos = 0.6
        ];
        match policy.decide(&query, candidates) {
            MatchDecision::Match { identity, score } => {
                assert_eq!(identity, "e2");
                assert!((score - 0.7).abs() < 1e-5);
            }
            other => panic!("expected e2 match, got {other:?}"),
        }
    }

    #[test]
    fn test_below_threshold_is_no_match_with_best_score() {
        let policy = MatchPolicy::cosine(0.5);
        let query = emb(&[1.0, 0.0]);
        let candidates = vec![("e1", emb(&[0.3, (1.0f32 - 0.09).sqrt()]))];
        match policy.decide(&query, candidates) {
            MatchDecision::NoMatch { best_score } => {
                let best = best_score.unwrap();
                assert!((best - 0.3).abs() < 1e-5);
            }
            other => panic!("expected no match, got {other:?}"),
        }
    }

    #[test]
    fn test_threshold_monotonicity() {
        // Raising the similarity threshold can only turn Match into NoMatch.
        let query = emb(&[1.0, 0.0]);
        let candidate = emb(&[0.6, 0.8]);
        let mut matched_after_unmatch = false;
        let mut previously_unmatched = false;
        for threshold in [0.0, 0.2, 0.4, 0.6, 0.8, 0.99] {
            let policy = MatchPolicy::cosine(threshold);
            let decision = policy.decide(&query, vec![((), candidate.clone())]);
            match decision {
                MatchDecision::Match { .. } if previously_unmatched => {
                    matched_after_unmatch = true;
                }
                MatchDecision::NoMatch { .. } => previously_unmatched = true,
                _ => {}
            }
        }
        assert!(!matched_after_unmatch);
    }

    #[test]
    fn test_distance_policy_accepts_at_or_below_tolerance() {
        // Distances against query [0,0]: norm of each candidate.
        let policy = MatchPolicy::distance(0.5);
        let query = emb(&[0.0, 0.0]);
        let candidates = vec![
            ("far", emb(&[0.6, 0.0])),  // distance 0.6
            ("near", emb(&[0.4, 0.0])), // distance 0.4
        ];
        match policy.decide(&query, candidates) {
            MatchDecision::Match { identity, score } => {
                assert_eq!(identity, "near");
                assert!((score - 0.4).abs() < 1e-6);
            }
            other => panic!("expected near match, got {other:?}"),
        }
    }

    #[test]
    fn test_distance_exactly_at_tolerance_matches() {
        let policy = MatchPolicy::distance(0.5);
        let query = emb(&[0.0]);
        match policy.decide(&query, vec![("edge", emb(&[0.5]))]) {
            MatchDecision::Match { identity, .. } => assert_eq!(identity, "edge"),
            other => panic!("expected match at tolerance boundary, got {other:?}"),
        }
    }

    #[test]
    fn test_tie_break_first_seen_wins() {
        let policy = MatchPolicy::cosine(0.5);
        let query = emb(&[1.0, 0.0]);
        let same = emb(&[1.0, 0.0]);
        let candidates = vec![("first", same.clone()), ("second", same)];
        match policy.decide(&query, candidates) {
            MatchDecision::Match { identity, .. } => assert_eq!(identity, "first"),
            other => panic!("expected first-seen winner, got {other:?}"),
        }
    }

    #[test]
    fn test_dimension_mismatch_candidates_skipped() {
        let policy = MatchPolicy::cosine(0.5);
        let query = emb(&[1.0, 0.0]);
        let candidates = vec![
            ("wrong-dim", emb(&[1.0, 0.0, 0.0])),
            ("ok", emb(&[1.0, 0.0])),
        ];
        match policy.decide(&query, candidates) {
            MatchDecision::Match { identity, .. } => assert_eq!(identity, "ok"),
            other => panic!("expected ok match, got {other:?}"),
        }
    }

    #[test]
    fn test_all_candidates_incomparable_is_no_match_without_score() {
        let policy = MatchPolicy::cosine(0.5);
        let query = emb(&[1.0, 0.0]);
        let candidates = vec![("wrong-dim", emb(&[1.0, 0.0, 0.0]))];
        assert_eq!(
            policy.decide(&query, candidates),
            MatchDecision::NoMatch { best_score: None }
        );
    }

    #[test]
    fn test_cosine_zero_norm_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_euclidean_distance_known_value() {
        let d = euclidean_distance(&[0.0, 0.0], &[3.0, 4.0]);
        assert!((d - 5.0).abs() < 1e-6);
    }
}
