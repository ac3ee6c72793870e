//! # Grocery Engine
//!
//! Bundles the parser, scaler and consolidator behind one value built from
//! an [`EngineConfig`]. The engine holds only immutable tables, so a single
//! instance can be shared across threads.
//!
//! ```rust
//! use grocery_engine::engine::GroceryEngine;
//!
//! let engine = GroceryEngine::default();
//! let mut ingredients = Vec::new();
//! ingredients.extend(engine.parse_lines("2 cups flour\n1 tsp salt", Some("bread")));
//! ingredients.extend(engine.parse_lines("1 cup Flour\n3 eggs", Some("cake")));
//!
//! let groceries = engine.consolidate(&ingredients);
//! assert_eq!(groceries.len(), 3);
//! assert_eq!(groceries[0].format(true), "3 cup flour");
//! ```

use crate::consolidator::Consolidator;
use crate::engine_config::EngineConfig;
use crate::engine_errors::EngineError;
use crate::fraction_resolver::FractionTable;
use crate::ingredient_model::{ConsolidatedItem, ParsedIngredient, RawIngredientLine};
use crate::ingredient_parser::IngredientParser;
use crate::name_normalizer::NameRules;
use crate::quantity_scaler::QuantityScaler;
use crate::unit_normalizer::UnitTable;
use log::info;

/// Parsing, scaling and consolidation over one set of tables
#[derive(Debug)]
pub struct GroceryEngine {
    config: EngineConfig,
    parser: IngredientParser,
    scaler: QuantityScaler,
    consolidator: Consolidator,
}

impl GroceryEngine {
    /// Build an engine with the default tables
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Self::with_tables(
            config,
            FractionTable::default(),
            UnitTable::default(),
            NameRules::default(),
        )
    }

    /// Build an engine over custom vocabulary tables
    pub fn with_tables(
        config: EngineConfig,
        fractions: FractionTable,
        units: UnitTable,
        rules: NameRules,
    ) -> Result<Self, EngineError> {
        config
            .validate()
            .map_err(|e| EngineError::Config(e.to_string()))?;

        let scaler = QuantityScaler::new(fractions.clone(), config.fraction_epsilon);
        let parser = IngredientParser::with_tables(fractions, units, rules)?;
        let consolidator = Consolidator::new(parser.name_normalizer().clone(), scaler.clone(), &config);

        info!(
            "Grocery engine ready (similarity threshold {}, bound {})",
            config.similarity_threshold, config.max_consolidation_items
        );

        Ok(Self {
            config,
            parser,
            scaler,
            consolidator,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn parser(&self) -> &IngredientParser {
        &self.parser
    }

    pub fn scaler(&self) -> &QuantityScaler {
        &self.scaler
    }

    pub fn consolidator(&self) -> &Consolidator {
        &self.consolidator
    }

    /// Parse one line; `None` for blank input
    pub fn parse(&self, text: &str, recipe_id: Option<&str>) -> Option<ParsedIngredient> {
        self.parser.parse(text, recipe_id)
    }

    /// Parse raw line records, dropping blank ones
    pub fn parse_all(&self, lines: &[RawIngredientLine]) -> Vec<ParsedIngredient> {
        lines.iter().filter_map(|line| self.parser.parse_line(line)).collect()
    }

    /// Parse multi-line recipe text
    pub fn parse_lines(&self, text: &str, recipe_id: Option<&str>) -> Vec<ParsedIngredient> {
        self.parser.parse_lines(text, recipe_id)
    }

    pub fn scale(&self, ingredient: &ParsedIngredient, multiplier: f64) -> ParsedIngredient {
        self.scaler.scale(ingredient, multiplier)
    }

    pub fn scale_to_servings(
        &self,
        ingredients: &[ParsedIngredient],
        original_servings: f64,
        target_servings: f64,
    ) -> Vec<ParsedIngredient> {
        self.scaler
            .scale_to_servings(ingredients, original_servings, target_servings)
    }

    pub fn consolidate(&self, ingredients: &[ParsedIngredient]) -> Vec<ConsolidatedItem> {
        self.consolidator.consolidate(ingredients)
    }

    /// `"<quantity> <unit> <item>"` with empty parts omitted
    pub fn format(&self, ingredient: &ParsedIngredient, include_unit: bool) -> String {
        ingredient.format(include_unit)
    }
}

impl Default for GroceryEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default()).expect("Default engine configuration should be valid")
    }
}
