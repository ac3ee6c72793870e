//! # Ingredient and Grocery Data Model
//!
//! This module defines the records produced and consumed by the engine:
//! raw input lines, parsed ingredients, canonical units and consolidated
//! grocery items.
//!
//! ## Core Concepts
//!
//! - **ParsedIngredient**: one structured record per raw recipe line
//! - **CanonicalUnit**: the fixed unit vocabulary every synonym maps to
//! - **ConsolidatedItem**: a grocery-list entry merged from one or more recipes
//!
//! ## Usage
//!
//! ```rust
//! use grocery_engine::ingredient_model::{CanonicalUnit, ParsedIngredient};
//!
//! let flour = ParsedIngredient::new("flour")
//!     .with_quantity("2", 2.0)
//!     .with_unit(CanonicalUnit::Cup);
//!
//! assert_eq!(flour.to_string(), "2 cup flour");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the recipe an ingredient line came from
pub type RecipeId = String;

/// A raw ingredient line as typed in a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawIngredientLine {
    pub text: String,
    pub recipe_id: Option<RecipeId>,
}

impl RawIngredientLine {
    pub fn new(text: &str, recipe_id: Option<&str>) -> Self {
        Self {
            text: text.to_string(),
            recipe_id: recipe_id.map(str::to_string),
        }
    }
}

/// Canonical measurement units
///
/// An absent unit (`None` wherever a unit is optional) stands for "unitless".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanonicalUnit {
    // Volume units
    #[serde(rename = "cup")]
    Cup,
    #[serde(rename = "tbsp")]
    Tablespoon,
    #[serde(rename = "tsp")]
    Teaspoon,
    #[serde(rename = "L")]
    Liter,
    #[serde(rename = "mL")]
    Milliliter,

    // Weight units
    #[serde(rename = "oz")]
    Ounce,
    #[serde(rename = "lb")]
    Pound,
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "mg")]
    Milligram,
    #[serde(rename = "kg")]
    Kilogram,

    // Count units
    #[serde(rename = "piece")]
    Piece,
    #[serde(rename = "package")]
    Package,
    #[serde(rename = "can")]
    Can,
    #[serde(rename = "clove")]
    Clove,
}

impl CanonicalUnit {
    /// Every canonical unit, in display order
    pub const ALL: [CanonicalUnit; 14] = [
        CanonicalUnit::Cup,
        CanonicalUnit::Tablespoon,
        CanonicalUnit::Teaspoon,
        CanonicalUnit::Ounce,
        CanonicalUnit::Pound,
        CanonicalUnit::Gram,
        CanonicalUnit::Milligram,
        CanonicalUnit::Kilogram,
        CanonicalUnit::Liter,
        CanonicalUnit::Milliliter,
        CanonicalUnit::Piece,
        CanonicalUnit::Package,
        CanonicalUnit::Can,
        CanonicalUnit::Clove,
    ];

    /// The canonical code of this unit
    pub fn code(&self) -> &'static str {
        match self {
            CanonicalUnit::Cup => "cup",
            CanonicalUnit::Tablespoon => "tbsp",
            CanonicalUnit::Teaspoon => "tsp",
            CanonicalUnit::Liter => "L",
            CanonicalUnit::Milliliter => "mL",
            CanonicalUnit::Ounce => "oz",
            CanonicalUnit::Pound => "lb",
            CanonicalUnit::Gram => "g",
            CanonicalUnit::Milligram => "mg",
            CanonicalUnit::Kilogram => "kg",
            CanonicalUnit::Piece => "piece",
            CanonicalUnit::Package => "package",
            CanonicalUnit::Can => "can",
            CanonicalUnit::Clove => "clove",
        }
    }

    /// Look up a unit by its exact canonical code
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|unit| unit.code() == code)
    }

    /// Check if this is a volume unit
    pub fn is_volume(&self) -> bool {
        matches!(
            self,
            CanonicalUnit::Cup
                | CanonicalUnit::Tablespoon
                | CanonicalUnit::Teaspoon
                | CanonicalUnit::Liter
                | CanonicalUnit::Milliliter
        )
    }

    /// Check if this is a weight unit
    pub fn is_weight(&self) -> bool {
        matches!(
            self,
            CanonicalUnit::Ounce
                | CanonicalUnit::Pound
                | CanonicalUnit::Gram
                | CanonicalUnit::Milligram
                | CanonicalUnit::Kilogram
        )
    }

    /// Check if this is a count unit
    pub fn is_count(&self) -> bool {
        matches!(
            self,
            CanonicalUnit::Piece | CanonicalUnit::Package | CanonicalUnit::Can | CanonicalUnit::Clove
        )
    }
}

impl fmt::Display for CanonicalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A structured ingredient recovered from one raw line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIngredient {
    /// Display name of the ingredient (e.g., "flour", "Olive Oil")
    pub item_name: String,

    /// Display form of the quantity, empty when none was found
    pub quantity: String,

    /// Numeric value of the quantity, present only when one was recovered
    pub quantity_numeric: Option<f64>,

    /// Canonical unit, `None` for unitless ingredients
    pub unit: Option<CanonicalUnit>,

    /// The raw line this record was parsed from, never modified
    pub original_text: String,

    /// The recipe the line belongs to
    pub recipe_id: Option<RecipeId>,
}

impl ParsedIngredient {
    /// Create an ingredient with just a name
    ///
    /// The name doubles as the original text until one is supplied.
    pub fn new(item_name: &str) -> Self {
        Self {
            item_name: item_name.to_string(),
            quantity: String::new(),
            quantity_numeric: None,
            unit: None,
            original_text: item_name.to_string(),
            recipe_id: None,
        }
    }

    /// Add a quantity with its display form
    pub fn with_quantity(mut self, display: &str, value: f64) -> Self {
        self.quantity = display.to_string();
        self.quantity_numeric = Some(value);
        self
    }

    /// Add a canonical unit
    pub fn with_unit(mut self, unit: CanonicalUnit) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Record the raw line this ingredient came from
    pub fn with_original_text(mut self, text: &str) -> Self {
        self.original_text = text.to_string();
        self
    }

    /// Attach a recipe identifier
    pub fn with_recipe_id(mut self, recipe_id: &str) -> Self {
        self.recipe_id = Some(recipe_id.to_string());
        self
    }

    /// Check if a numeric quantity was recovered
    pub fn has_numeric_quantity(&self) -> bool {
        self.quantity_numeric.is_some()
    }

    /// Render as `"<quantity> <unit> <item>"`, omitting empty parts
    pub fn format(&self, include_unit: bool) -> String {
        let unit = if include_unit {
            self.unit.map(|u| u.code())
        } else {
            None
        };

        [Some(self.quantity.as_str()), unit, Some(self.item_name.as_str())]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ParsedIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(true))
    }
}

/// A grocery-list entry merged from one or more parsed ingredients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedItem {
    /// Display name, possibly annotated when a duplicate could not be summed
    pub item_name: String,

    /// Display form of the (summed) quantity
    pub quantity: String,

    /// Sum of all numeric contributions
    pub quantity_numeric: Option<f64>,

    /// Canonical unit shared by every contribution
    pub unit: Option<CanonicalUnit>,

    /// Raw text of the first contributing line
    pub original_text: String,

    /// Contributing recipes, in first-seen order without duplicates
    pub recipe_ids: Vec<RecipeId>,

    /// Comparison key the bucket was matched on
    pub canonical_key: String,

    /// Number of source lines merged into this item
    pub contributions: usize,

    /// Quantities of duplicates that could not be summed
    pub notes: Vec<String>,
}

impl ConsolidatedItem {
    /// Open a new bucket from its first ingredient
    pub fn from_ingredient(ingredient: &ParsedIngredient, canonical_key: &str) -> Self {
        Self {
            item_name: ingredient.item_name.clone(),
            quantity: ingredient.quantity.clone(),
            quantity_numeric: ingredient.quantity_numeric,
            unit: ingredient.unit,
            original_text: ingredient.original_text.clone(),
            recipe_ids: ingredient.recipe_id.iter().cloned().collect(),
            canonical_key: canonical_key.to_string(),
            contributions: 1,
            notes: Vec::new(),
        }
    }

    /// Add a recipe to the provenance set
    pub fn add_recipe_id(&mut self, recipe_id: Option<&RecipeId>) {
        if let Some(id) = recipe_id {
            if !self.recipe_ids.contains(id) {
                self.recipe_ids.push(id.clone());
            }
        }
    }

    /// Check if this item merged contributions from more than one recipe
    pub fn is_multi_recipe(&self) -> bool {
        self.recipe_ids.len() > 1
    }

    /// View this item as a parsed ingredient, joining recipe ids with ", "
    pub fn to_ingredient(&self) -> ParsedIngredient {
        ParsedIngredient {
            item_name: self.item_name.clone(),
            quantity: self.quantity.clone(),
            quantity_numeric: self.quantity_numeric,
            unit: self.unit,
            original_text: self.original_text.clone(),
            recipe_id: if self.recipe_ids.is_empty() {
                None
            } else {
                Some(self.recipe_ids.join(", "))
            },
        }
    }

    /// Render as `"<quantity> <unit> <item>"`, omitting empty parts
    pub fn format(&self, include_unit: bool) -> String {
        self.to_ingredient().format(include_unit)
    }
}

impl fmt::Display for ConsolidatedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(true))?;

        if !self.notes.is_empty() {
            write!(f, " [also: {}]", self.notes.join("; "))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingredient_creation() {
        let ingredient = ParsedIngredient::new("flour")
            .with_quantity("2", 2.0)
            .with_unit(CanonicalUnit::Cup)
            .with_original_text("2 cups flour")
            .with_recipe_id("bread");

        assert_eq!(ingredient.item_name, "flour");
        assert!(ingredient.has_numeric_quantity());
        assert_eq!(ingredient.quantity_numeric, Some(2.0));
        assert_eq!(ingredient.unit, Some(CanonicalUnit::Cup));
        assert_eq!(ingredient.original_text, "2 cups flour");
        assert_eq!(ingredient.recipe_id, Some("bread".to_string()));
    }

    #[test]
    fn test_unit_codes_round_trip() {
        for unit in CanonicalUnit::ALL {
            assert_eq!(CanonicalUnit::from_code(unit.code()), Some(unit));
        }
        assert_eq!(CanonicalUnit::from_code("cups"), None);
    }

    #[test]
    fn test_unit_properties() {
        assert!(CanonicalUnit::Cup.is_volume());
        assert!(!CanonicalUnit::Cup.is_weight());
        assert!(!CanonicalUnit::Cup.is_count());

        assert!(CanonicalUnit::Pound.is_weight());
        assert!(!CanonicalUnit::Pound.is_volume());

        assert!(CanonicalUnit::Clove.is_count());
        assert!(!CanonicalUnit::Clove.is_weight());
    }

    #[test]
    fn test_unit_serializes_as_code() {
        let json = serde_json::to_string(&CanonicalUnit::Milliliter).unwrap();
        assert_eq!(json, "\"mL\"");

        let unit: CanonicalUnit = serde_json::from_str("\"tbsp\"").unwrap();
        assert_eq!(unit, CanonicalUnit::Tablespoon);
    }

    #[test]
    fn test_format_omits_empty_parts() {
        let full = ParsedIngredient::new("sugar")
            .with_quantity("½", 0.5)
            .with_unit(CanonicalUnit::Cup);
        assert_eq!(full.format(true), "½ cup sugar");
        assert_eq!(full.format(false), "½ sugar");

        let bare = ParsedIngredient::new("salt to taste");
        assert_eq!(bare.format(true), "salt to taste");

        let unitless = ParsedIngredient::new("eggs").with_quantity("3", 3.0);
        assert_eq!(unitless.to_string(), "3 eggs");
    }

    #[test]
    fn test_consolidated_item_provenance() {
        let ingredient = ParsedIngredient::new("flour")
            .with_quantity("2", 2.0)
            .with_recipe_id("bread");
        let mut item = ConsolidatedItem::from_ingredient(&ingredient, "flour");

        item.add_recipe_id(Some(&"cake".to_string()));
        item.add_recipe_id(Some(&"bread".to_string()));
        item.add_recipe_id(None);

        assert_eq!(item.recipe_ids, vec!["bread".to_string(), "cake".to_string()]);
        assert!(item.is_multi_recipe());
        assert_eq!(item.to_ingredient().recipe_id, Some("bread, cake".to_string()));
    }

    #[test]
    fn test_consolidated_display_with_notes() {
        let ingredient = ParsedIngredient::new("basil").with_quantity("1", 1.0);
        let mut item = ConsolidatedItem::from_ingredient(&ingredient, "basil");
        item.notes.push("a handful".to_string());

        assert_eq!(item.to_string(), "1 basil [also: a handful]");
    }
}
