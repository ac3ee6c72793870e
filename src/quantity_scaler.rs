//! # Quantity Scaler
//!
//! Rescales parsed ingredients when a recipe's serving count changes and
//! renders the result back to a readable quantity:
//!
//! - whole numbers render as integers (`"2"`)
//! - values near a common fraction render with its glyph (`"½"`, `"1½"`)
//! - anything else renders as a decimal truncated to two places (`"1.47"`)
//!
//! The numeric value always travels with the rendered string, so scaling an
//! already scaled ingredient never round-trips through the display form.

use crate::engine_config::DEFAULT_FRACTION_EPSILON;
use crate::fraction_resolver::FractionTable;
use crate::ingredient_model::ParsedIngredient;
use log::{debug, warn};

/// Values closer than this to an integer are treated as whole
const WHOLE_NUMBER_TOLERANCE: f64 = 1e-9;

/// Multiplies ingredient quantities and renders them for display
#[derive(Debug, Clone)]
pub struct QuantityScaler {
    fractions: FractionTable,
    epsilon: f64,
}

impl Default for QuantityScaler {
    fn default() -> Self {
        Self::new(FractionTable::default(), DEFAULT_FRACTION_EPSILON)
    }
}

impl QuantityScaler {
    pub fn new(fractions: FractionTable, epsilon: f64) -> Self {
        Self { fractions, epsilon }
    }

    /// Scale one ingredient, returning a new value
    ///
    /// Ingredients without a numeric quantity, a multiplier of exactly 1, and
    /// non-positive or non-finite multipliers all return an unchanged copy.
    pub fn scale(&self, ingredient: &ParsedIngredient, multiplier: f64) -> ParsedIngredient {
        let Some(value) = ingredient.quantity_numeric else {
            return ingredient.clone();
        };
        if multiplier == 1.0 {
            return ingredient.clone();
        }
        if !multiplier.is_finite() || multiplier <= 0.0 {
            warn!(
                "Ignoring invalid scale multiplier {} for '{}'",
                multiplier, ingredient.item_name
            );
            return ingredient.clone();
        }

        let scaled = value * multiplier;
        if !scaled.is_finite() {
            warn!(
                "Scaling '{}' by {} overflows; leaving quantity unchanged",
                ingredient.item_name, multiplier
            );
            return ingredient.clone();
        }

        let rendered = self.render(scaled);
        debug!(
            "Scaled '{}' by {}: {} -> {} ('{}')",
            ingredient.item_name, multiplier, value, scaled, rendered
        );

        ParsedIngredient {
            quantity: rendered,
            quantity_numeric: Some(scaled),
            ..ingredient.clone()
        }
    }

    /// Scale every ingredient by the same multiplier
    pub fn scale_all(&self, ingredients: &[ParsedIngredient], multiplier: f64) -> Vec<ParsedIngredient> {
        ingredients
            .iter()
            .map(|ingredient| self.scale(ingredient, multiplier))
            .collect()
    }

    /// Scale a recipe from its original serving count to a target one
    pub fn scale_to_servings(
        &self,
        ingredients: &[ParsedIngredient],
        original_servings: f64,
        target_servings: f64,
    ) -> Vec<ParsedIngredient> {
        if !original_servings.is_finite()
            || !target_servings.is_finite()
            || original_servings <= 0.0
            || target_servings <= 0.0
        {
            warn!(
                "Cannot scale from {} to {} servings; leaving quantities unchanged",
                original_servings, target_servings
            );
            return ingredients.to_vec();
        }

        self.scale_all(ingredients, target_servings / original_servings)
    }

    /// Render a quantity for display
    pub fn render(&self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }

        let rounded = value.round();
        if (value - rounded).abs() < WHOLE_NUMBER_TOLERANCE {
            return format!("{:.0}", rounded);
        }

        let whole = value.floor();
        if let Some(glyph) = self.fractions.closest_glyph(value - whole, self.epsilon) {
            return if whole >= 1.0 {
                format!("{:.0}{}", whole, glyph)
            } else {
                glyph.to_string()
            };
        }

        truncate_decimal(value)
    }
}

/// Two decimal places, truncated, trailing zeros stripped
fn truncate_decimal(value: f64) -> String {
    let truncated = (value * 100.0 + WHOLE_NUMBER_TOLERANCE).trunc() / 100.0;
    let text = format!("{:.2}", truncated);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
