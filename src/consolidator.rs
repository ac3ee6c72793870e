//! # Grocery Consolidator
//!
//! Merges parsed ingredients from one or more recipes into a deduplicated
//! grocery list.
//!
//! Each incoming ingredient is compared, in order, against the buckets built
//! so far. The first bucket with a matching canonical name (exact, or similar
//! above the threshold) and a compatible unit absorbs it:
//!
//! - both numeric: quantities are summed
//! - otherwise: the incoming quantity is kept in the bucket notes, and the
//!   bucket name is annotated once it spans more than one recipe
//!
//! With no matching bucket the ingredient opens a new one. The scan is linear,
//! so the result depends on input order.

use crate::engine_config::EngineConfig;
use crate::ingredient_model::{ConsolidatedItem, ParsedIngredient};
use crate::name_normalizer::NameNormalizer;
use crate::quantity_scaler::QuantityScaler;
use crate::similarity::SimilarityMatcher;
use crate::unit_normalizer::UnitNormalizer;
use log::{debug, info, warn};

/// Builds consolidated grocery lists
#[derive(Debug, Clone)]
pub struct Consolidator {
    names: NameNormalizer,
    matcher: SimilarityMatcher,
    renderer: QuantityScaler,
    max_items: usize,
    non_summable_marker: String,
}

impl Default for Consolidator {
    fn default() -> Self {
        Self::new(
            NameNormalizer::default(),
            QuantityScaler::default(),
            &EngineConfig::default(),
        )
    }
}

impl Consolidator {
    pub fn new(names: NameNormalizer, renderer: QuantityScaler, config: &EngineConfig) -> Self {
        Self {
            names,
            matcher: SimilarityMatcher::new(config.similarity_threshold),
            renderer,
            max_items: config.max_consolidation_items,
            non_summable_marker: config.non_summable_marker.clone(),
        }
    }

    /// Merge ingredients into consolidated items, preserving first-seen order
    pub fn consolidate(&self, ingredients: &[ParsedIngredient]) -> Vec<ConsolidatedItem> {
        let mut buckets: Vec<ConsolidatedItem> = Vec::new();
        let mut bound_reported = false;

        for ingredient in ingredients {
            let key = self.names.canonical_key(&ingredient.item_name);

            if buckets.len() >= self.max_items {
                if !bound_reported {
                    warn!(
                        "Grocery list reached {} items; remaining ingredients are appended without merging",
                        self.max_items
                    );
                    bound_reported = true;
                }
                buckets.push(ConsolidatedItem::from_ingredient(ingredient, &key));
                continue;
            }

            match self.find_bucket(&buckets, &key, ingredient) {
                Some(index) => self.merge_into(&mut buckets[index], ingredient),
                None => {
                    debug!("New grocery item '{}' (key '{}')", ingredient.item_name, key);
                    buckets.push(ConsolidatedItem::from_ingredient(ingredient, &key));
                }
            }
        }

        info!(
            "Consolidated {} ingredients into {} grocery items",
            ingredients.len(),
            buckets.len()
        );
        buckets
    }

    fn find_bucket(
        &self,
        buckets: &[ConsolidatedItem],
        key: &str,
        ingredient: &ParsedIngredient,
    ) -> Option<usize> {
        buckets.iter().position(|bucket| {
            UnitNormalizer::compatible(bucket.unit, ingredient.unit)
                && self.matcher.is_match(&bucket.canonical_key, key)
        })
    }

    fn merge_into(&self, bucket: &mut ConsolidatedItem, ingredient: &ParsedIngredient) {
        bucket.contributions += 1;
        bucket.add_recipe_id(ingredient.recipe_id.as_ref());

        match (bucket.quantity_numeric, ingredient.quantity_numeric) {
            (Some(current), Some(incoming)) => {
                let total = current + incoming;
                bucket.quantity_numeric = Some(total);
                bucket.quantity = self.renderer.render(total);
                debug!(
                    "Merged '{}' into '{}': {} + {} = {}",
                    ingredient.item_name, bucket.item_name, current, incoming, total
                );
            }
            _ => {
                // Only duplicates spanning several recipes are flagged
                if bucket.is_multi_recipe() && !bucket.item_name.ends_with(&self.non_summable_marker) {
                    bucket.item_name = format!("{} {}", bucket.item_name, self.non_summable_marker);
                }
                let note = ingredient.format(true);
                bucket.notes.push(note);
                debug!(
                    "Could not sum '{}' into '{}'; kept as a note",
                    ingredient.item_name, bucket.item_name
                );
            }
        }
    }
}
