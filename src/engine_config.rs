//! # Engine Configuration Module
//!
//! This module defines the tunable parameters of the ingredient engine:
//! the name-matching threshold, fraction rendering tolerance, the bound on
//! the consolidation scan, and the annotation used for non-summable duplicates.

use anyhow::{Context, Result};
use log::debug;
use std::env;

// Constants for engine configuration
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.8;
pub const DEFAULT_FRACTION_EPSILON: f64 = 0.01;
pub const DEFAULT_MAX_CONSOLIDATION_ITEMS: usize = 1000; // grocery lists stay in the low hundreds
pub const DEFAULT_NON_SUMMABLE_MARKER: &str = "(multiple recipes)";

pub const ENV_SIMILARITY_THRESHOLD: &str = "GROCERY_SIMILARITY_THRESHOLD";
pub const ENV_FRACTION_EPSILON: &str = "GROCERY_FRACTION_EPSILON";
pub const ENV_MAX_CONSOLIDATION_ITEMS: &str = "GROCERY_MAX_CONSOLIDATION_ITEMS";
pub const ENV_NON_SUMMABLE_MARKER: &str = "GROCERY_NON_SUMMABLE_MARKER";

/// Configuration structure for the ingredient engine
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Two canonical names match when their similarity is strictly greater than this
    pub similarity_threshold: f64,
    /// Tolerance used when rendering a scaled decimal as a fraction glyph
    pub fraction_epsilon: f64,
    /// Maximum number of buckets scanned during consolidation
    pub max_consolidation_items: usize,
    /// Annotation appended to a bucket name when a duplicate could not be summed
    pub non_summable_marker: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            fraction_epsilon: DEFAULT_FRACTION_EPSILON,
            max_consolidation_items: DEFAULT_MAX_CONSOLIDATION_ITEMS,
            non_summable_marker: DEFAULT_NON_SUMMABLE_MARKER.to_string(),
        }
    }
}

impl EngineConfig {
    /// Build a configuration from environment variables, loading `.env` first.
    ///
    /// Unset variables keep their defaults; malformed or out-of-range values are errors.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_SIMILARITY_THRESHOLD) {
            config.similarity_threshold = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_SIMILARITY_THRESHOLD} must be a number, got '{raw}'"))?;
        }
        if let Some(raw) = lookup(ENV_FRACTION_EPSILON) {
            config.fraction_epsilon = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_FRACTION_EPSILON} must be a number, got '{raw}'"))?;
        }
        if let Some(raw) = lookup(ENV_MAX_CONSOLIDATION_ITEMS) {
            config.max_consolidation_items = raw.trim().parse().with_context(|| {
                format!("{ENV_MAX_CONSOLIDATION_ITEMS} must be a positive integer, got '{raw}'")
            })?;
        }
        if let Some(raw) = lookup(ENV_NON_SUMMABLE_MARKER) {
            config.non_summable_marker = raw.trim().to_string();
        }

        config.validate()?;
        debug!("Loaded engine configuration: {:?}", config);
        Ok(config)
    }

    /// Check that every value is within its meaningful range
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            anyhow::bail!(
                "similarity threshold must be within [0, 1], got {}",
                self.similarity_threshold
            );
        }
        if !self.fraction_epsilon.is_finite() || self.fraction_epsilon < 0.0 {
            anyhow::bail!(
                "fraction epsilon must be a non-negative number, got {}",
                self.fraction_epsilon
            );
        }
        if self.max_consolidation_items == 0 {
            anyhow::bail!("max consolidation items must be greater than zero");
        }
        if self.non_summable_marker.trim().is_empty() {
            anyhow::bail!("non-summable marker must not be blank");
        }
        Ok(())
    }
}
