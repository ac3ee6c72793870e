//! # Consolidation Tests
//!
//! Tests for scaling and grocery-list consolidation through the crate-level
//! API, including provenance tracking and the similarity rules.

use grocery_engine::ingredient_model::{CanonicalUnit, ParsedIngredient};
use grocery_engine::similarity::similarity;
use grocery_engine::unit_normalizer::UnitNormalizer;

#[cfg(test)]
mod tests {
    use super::*;

    fn create_ingredient(name: &str, quantity: f64, unit: &str, recipe: &str) -> ParsedIngredient {
        let mut ingredient = ParsedIngredient::new(name)
            .with_quantity(&quantity.to_string(), quantity)
            .with_recipe_id(recipe);
        ingredient.unit = UnitNormalizer::default().normalize(unit);
        ingredient
    }

    #[test]
    fn test_scale_identity() {
        let parsed = grocery_engine::parse("2 1/4 cups butter", Some("cookies")).unwrap();
        assert_eq!(grocery_engine::scale(&parsed, 1.0), parsed);

        let salt = grocery_engine::parse("salt to taste", None).unwrap();
        assert_eq!(grocery_engine::scale(&salt, 1.0), salt);
    }

    #[test]
    fn test_scale_half_cup() {
        let sugar = ParsedIngredient::new("sugar")
            .with_quantity("1/2", 0.5)
            .with_unit(CanonicalUnit::Cup);
        let scaled = grocery_engine::scale(&sugar, 2.0);

        assert_eq!(scaled.quantity_numeric, Some(1.0));
        assert_eq!(scaled.quantity, "1");
        assert_eq!(sugar.quantity, "1/2");
    }

    #[test]
    fn test_scale_renders_fractions() {
        let flour = grocery_engine::parse("1 cup flour", None).unwrap();
        assert_eq!(grocery_engine::scale(&flour, 0.5).quantity, "½");
        assert_eq!(grocery_engine::scale(&flour, 2.5).quantity, "2½");
        assert_eq!(grocery_engine::scale(&flour, 1.0 / 3.0).quantity, "⅓");
        assert_eq!(grocery_engine::scale(&flour, 1.1).quantity, "1.1");
    }

    #[test]
    fn test_merges_synonym_units() {
        let result = grocery_engine::consolidate(&[
            create_ingredient("flour", 2.0, "cup", "bread"),
            create_ingredient("Flour", 1.0, "cups", "cake"),
        ]);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].quantity_numeric, Some(3.0));
        assert_eq!(result[0].unit, Some(CanonicalUnit::Cup));
        assert!(result[0].is_multi_recipe());
    }

    #[test]
    fn test_dissimilar_names_never_merge() {
        let result = grocery_engine::consolidate(&[
            create_ingredient("milk", 1.0, "cup", "a"),
            create_ingredient("flour", 1.0, "cup", "a"),
        ]);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_unit_incompatibility_blocks_merge() {
        let result = grocery_engine::consolidate(&[
            create_ingredient("sugar", 1.0, "cup", "a"),
            create_ingredient("sugar", 200.0, "g", "b"),
        ]);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].unit, Some(CanonicalUnit::Cup));
        assert_eq!(result[1].unit, Some(CanonicalUnit::Gram));
    }

    #[test]
    fn test_inputs_not_mutated() {
        let inputs = vec![
            create_ingredient("flour", 2.0, "cup", "bread"),
            create_ingredient("flour", 1.0, "cup", "cake"),
        ];
        let snapshot = inputs.clone();
        let _ = grocery_engine::consolidate(&inputs);
        assert_eq!(inputs, snapshot);
    }

    #[test]
    fn test_similarity_properties() {
        assert_eq!(similarity("olive oil", "olive oil"), 1.0);
        for (a, b) in [("basil", "basel"), ("onion", "onions"), ("", "x"), ("cumin", "coriander")] {
            assert_eq!(similarity(a, b), similarity(b, a));
            let score = similarity(a, b);
            assert!((0.0..=1.0).contains(&score));
        }
    }

    #[test]
    fn test_consolidated_format() {
        let parsed: Vec<ParsedIngredient> = ["2 cups flour", "1 cup flour", "salt to taste"]
            .iter()
            .filter_map(|line| grocery_engine::parse(line, None))
            .collect();
        let result = grocery_engine::consolidate(&parsed);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].format(true), "3 cup flour");
        assert_eq!(result[0].format(false), "3 flour");
        assert_eq!(result[1].format(true), "salt to taste");
    }
}
