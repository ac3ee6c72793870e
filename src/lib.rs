//! # Grocery Engine
//!
//! Parses free-text recipe ingredient lines into structured quantity, unit
//! and item records, rescales them when serving counts change, and merges
//! ingredients from several recipes into one consolidated grocery list.
//!
//! Every operation is a pure function of its inputs and fail-soft: malformed
//! text degrades to an item-name-only record instead of an error.
//!
//! ```rust
//! let flour = grocery_engine::parse("1 1/2 cups flour", None).unwrap();
//! let doubled = grocery_engine::scale(&flour, 2.0);
//! assert_eq!(grocery_engine::format(&doubled, true), "3 cup flour");
//! ```

pub mod consolidator;
pub mod engine;
pub mod engine_config;
pub mod engine_errors;
pub mod fraction_resolver;
pub mod ingredient_model;
pub mod ingredient_parser;
pub mod name_normalizer;
pub mod quantity_scaler;
pub mod recipe_input;
pub mod similarity;
pub mod unit_normalizer;

use engine::GroceryEngine;
use ingredient_model::{ConsolidatedItem, ParsedIngredient};
use lazy_static::lazy_static;

// Built once with the default tables; immutable afterwards
lazy_static! {
    static ref DEFAULT_ENGINE: GroceryEngine = GroceryEngine::default();
}

/// Parse one ingredient line with the default tables; `None` for blank input
pub fn parse(text: &str, recipe_id: Option<&str>) -> Option<ParsedIngredient> {
    DEFAULT_ENGINE.parse(text, recipe_id)
}

/// Scale an ingredient's quantity by `multiplier`
pub fn scale(ingredient: &ParsedIngredient, multiplier: f64) -> ParsedIngredient {
    DEFAULT_ENGINE.scale(ingredient, multiplier)
}

/// Merge ingredients from any number of recipes into grocery items
pub fn consolidate(ingredients: &[ParsedIngredient]) -> Vec<ConsolidatedItem> {
    DEFAULT_ENGINE.consolidate(ingredients)
}

/// Render `"<quantity> <unit> <item>"`, omitting empty parts
pub fn format(ingredient: &ParsedIngredient, include_unit: bool) -> String {
    DEFAULT_ENGINE.format(ingredient, include_unit)
}
