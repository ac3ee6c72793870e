//! # Similarity Matcher
//!
//! Normalized edit-distance similarity between two canonical ingredient
//! names: `(max_len - levenshtein) / max_len`, measured in characters.

use crate::engine_config::DEFAULT_SIMILARITY_THRESHOLD;
use log::trace;

/// Similarity in `[0, 1]`; identical strings score exactly `1.0`
pub fn similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }

    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    let distance = strsim::levenshtein(a, b);
    (max_len - distance) as f64 / max_len as f64
}

/// Decides whether two canonical names refer to the same ingredient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityMatcher {
    threshold: f64,
}

impl Default for SimilarityMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_SIMILARITY_THRESHOLD)
    }
}

impl SimilarityMatcher {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Exact equality, or similarity strictly above the threshold
    pub fn is_match(&self, a: &str, b: &str) -> bool {
        if a == b {
            return true;
        }
        let score = similarity(a, b);
        trace!("Similarity '{}' vs '{}' = {:.3}", a, b, score);
        score > self.threshold
    }
}
