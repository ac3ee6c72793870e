//! # Unit Normalizer
//!
//! Maps unit synonyms, abbreviations and plurals (`"cups"`, `"c."`, `"Tbsp"`)
//! to the canonical unit vocabulary, and decides whether two units are
//! compatible for merging.
//!
//! Compatibility is an equivalence class, not a conversion: `cup` and `mL`
//! are never merged.

use crate::engine_errors::EngineError;
use crate::ingredient_model::CanonicalUnit;
use log::trace;
use std::collections::HashMap;

/// Default synonym table, canonical code followed by its spellings
pub const DEFAULT_UNIT_SYNONYMS: &[(&str, &[&str])] = &[
    ("cup", &["cup", "cups", "c", "c.", "tasse", "tasses"]),
    (
        "tbsp",
        &[
            "tbsp", "tbsp.", "tbsps", "tbs", "tbs.", "tb", "tb.", "tbl", "tbl.",
            "tablespoon", "tablespoons",
        ],
    ),
    ("tsp", &["tsp", "tsp.", "tsps", "ts", "teaspoon", "teaspoons"]),
    (
        "oz",
        &["oz", "oz.", "ozs", "ounce", "ounces", "fl oz", "fl. oz.", "fluid ounce", "fluid ounces"],
    ),
    ("lb", &["lb", "lb.", "lbs", "lbs.", "pound", "pounds"]),
    ("g", &["g", "g.", "gr", "gram", "grams", "gramme", "grammes"]),
    ("mg", &["mg", "mg.", "milligram", "milligrams"]),
    ("kg", &["kg", "kg.", "kilo", "kilos", "kilogram", "kilograms", "kilogramme", "kilogrammes"]),
    ("L", &["l", "l.", "liter", "liters", "litre", "litres"]),
    ("mL", &["ml", "ml.", "milliliter", "milliliters", "millilitre", "millilitres"]),
    ("piece", &["piece", "pieces", "pc", "pcs", "pc.", "pcs."]),
    ("package", &["package", "packages", "pkg", "pkg.", "pkgs", "pack", "packs", "packet", "packets"]),
    ("can", &["can", "cans", "tin", "tins"]),
    ("clove", &["clove", "cloves"]),
];

/// Case-insensitive synonym to canonical unit table
#[derive(Debug, Clone, PartialEq)]
pub struct UnitTable {
    synonyms: HashMap<String, CanonicalUnit>,
    /// Largest number of words in any synonym
    max_words: usize,
}

impl UnitTable {
    /// Build a table from `(canonical code, synonyms)` entries
    ///
    /// Fails on unknown canonical codes, empty synonyms, or a synonym mapped to two units.
    pub fn new(entries: &[(&str, &[&str])]) -> Result<Self, EngineError> {
        let mut synonyms = HashMap::new();
        let mut max_words = 1;

        for &(code, spellings) in entries {
            let unit = CanonicalUnit::from_code(code).ok_or_else(|| {
                EngineError::InvalidTable(format!("unknown canonical unit code '{code}'"))
            })?;

            for spelling in spellings.iter().copied().chain(std::iter::once(code)) {
                let key = normalize_key(spelling);
                if key.is_empty() {
                    return Err(EngineError::InvalidTable(format!(
                        "empty synonym for unit '{code}'"
                    )));
                }
                if let Some(existing) = synonyms.insert(key.clone(), unit) {
                    if existing != unit {
                        return Err(EngineError::InvalidTable(format!(
                            "synonym '{key}' maps to both '{existing}' and '{unit}'"
                        )));
                    }
                }
                max_words = max_words.max(key.split(' ').count());
            }
        }

        Ok(Self {
            synonyms,
            max_words,
        })
    }

    /// Look up a unit word, case-insensitively
    pub fn lookup(&self, word: &str) -> Option<CanonicalUnit> {
        let key = normalize_key(word);
        if key.is_empty() {
            return None;
        }
        if let Some(unit) = self.synonyms.get(&key) {
            return Some(*unit);
        }

        // "Tbsp." style abbreviations missing from the table
        key.strip_suffix('.')
            .and_then(|stripped| self.synonyms.get(stripped))
            .copied()
    }

    pub fn max_words(&self) -> usize {
        self.max_words
    }

    pub fn len(&self) -> usize {
        self.synonyms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.synonyms.is_empty()
    }
}

impl Default for UnitTable {
    fn default() -> Self {
        Self::new(DEFAULT_UNIT_SYNONYMS).expect("Default unit table should be valid")
    }
}

/// A unit found at the start of a phrase
#[derive(Debug, Clone, PartialEq)]
pub struct LeadingUnit<'a> {
    pub unit: CanonicalUnit,
    /// The unit words exactly as written
    pub token: &'a str,
    /// Everything after the unit words
    pub rest: &'a str,
}

/// Normalizes unit words against a synonym table
#[derive(Debug, Clone, Default)]
pub struct UnitNormalizer {
    table: UnitTable,
}

impl UnitNormalizer {
    pub fn new(table: UnitTable) -> Self {
        Self { table }
    }

    /// Canonical unit for a unit word, `None` when unknown
    pub fn normalize(&self, word: &str) -> Option<CanonicalUnit> {
        let unit = self.table.lookup(word);
        trace!("Normalized unit '{}' -> {:?}", word, unit);
        unit
    }

    /// Split a leading unit off a phrase, preferring the longest multi-word synonym
    ///
    /// A unit is only recognised when it is followed by more text, so
    /// `"cans"` alone stays an item name.
    pub fn split_leading_unit<'a>(&self, phrase: &'a str) -> Option<LeadingUnit<'a>> {
        let phrase = phrase.trim_start();
        let word_ends: Vec<usize> = word_end_offsets(phrase);

        for words in (1..=self.table.max_words().min(word_ends.len())).rev() {
            let end = word_ends[words - 1];
            let token = &phrase[..end];
            let rest = phrase[end..].trim_start();
            if rest.is_empty() {
                continue;
            }
            if let Some(unit) = self.table.lookup(token) {
                return Some(LeadingUnit { unit, token, rest });
            }
        }

        None
    }

    /// Two units are compatible when they are the same canonical unit or both absent
    pub fn compatible(a: Option<CanonicalUnit>, b: Option<CanonicalUnit>) -> bool {
        a == b
    }

    pub fn table(&self) -> &UnitTable {
        &self.table
    }
}

/// Byte offsets where each whitespace-separated word ends
fn word_end_offsets(phrase: &str) -> Vec<usize> {
    let mut ends = Vec::new();
    let mut in_word = false;

    for (idx, c) in phrase.char_indices() {
        if c.is_whitespace() {
            if in_word {
                ends.push(idx);
            }
            in_word = false;
        } else {
            in_word = true;
        }
    }
    if in_word {
        ends.push(phrase.len());
    }

    ends
}

fn normalize_key(word: &str) -> String {
    word.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_normalizer() -> UnitNormalizer {
        UnitNormalizer::default()
    }

    #[test]
    fn test_synonyms() {
        let normalizer = create_normalizer();
        assert_eq!(normalizer.normalize("cups"), Some(CanonicalUnit::Cup));
        assert_eq!(normalizer.normalize("c"), Some(CanonicalUnit::Cup));
        assert_eq!(normalizer.normalize("c."), Some(CanonicalUnit::Cup));
        assert_eq!(normalizer.normalize("tablespoons"), Some(CanonicalUnit::Tablespoon));
        assert_eq!(normalizer.normalize("lbs"), Some(CanonicalUnit::Pound));
        assert_eq!(normalizer.normalize("ml"), Some(CanonicalUnit::Milliliter));
        assert_eq!(normalizer.normalize("cloves"), Some(CanonicalUnit::Clove));
        assert_eq!(normalizer.normalize("fl oz"), Some(CanonicalUnit::Ounce));
    }

    #[test]
    fn test_case_insensitive() {
        let normalizer = create_normalizer();
        assert_eq!(normalizer.normalize("CUPS"), Some(CanonicalUnit::Cup));
        assert_eq!(normalizer.normalize("Tbsp"), Some(CanonicalUnit::Tablespoon));
        assert_eq!(normalizer.normalize("mL"), Some(CanonicalUnit::Milliliter));
        assert_eq!(normalizer.normalize("L"), Some(CanonicalUnit::Liter));
    }

    #[test]
    fn test_trailing_period() {
        let normalizer = create_normalizer();
        assert_eq!(normalizer.normalize("ozs."), Some(CanonicalUnit::Ounce));
        assert_eq!(normalizer.normalize("cans."), Some(CanonicalUnit::Can));
    }

    #[test]
    fn test_unknown_units() {
        let normalizer = create_normalizer();
        assert_eq!(normalizer.normalize("handful"), None);
        assert_eq!(normalizer.normalize("large"), None);
        assert_eq!(normalizer.normalize(""), None);
    }

    #[test]
    fn test_split_leading_unit() {
        let normalizer = create_normalizer();

        let split = normalizer.split_leading_unit("cups all-purpose flour").unwrap();
        assert_eq!(split.unit, CanonicalUnit::Cup);
        assert_eq!(split.token, "cups");
        assert_eq!(split.rest, "all-purpose flour");

        let split = normalizer.split_leading_unit("fl oz  cream").unwrap();
        assert_eq!(split.unit, CanonicalUnit::Ounce);
        assert_eq!(split.token, "fl oz");
        assert_eq!(split.rest, "cream");

        assert!(normalizer.split_leading_unit("large eggs").is_none());
        assert!(normalizer.split_leading_unit("garlic").is_none());
        assert!(normalizer.split_leading_unit("cans").is_none());
    }

    #[test]
    fn test_compatibility() {
        assert!(UnitNormalizer::compatible(Some(CanonicalUnit::Cup), Some(CanonicalUnit::Cup)));
        assert!(UnitNormalizer::compatible(None, None));
        assert!(!UnitNormalizer::compatible(Some(CanonicalUnit::Cup), None));
        assert!(!UnitNormalizer::compatible(
            Some(CanonicalUnit::Cup),
            Some(CanonicalUnit::Milliliter)
        ));
    }

    #[test]
    fn test_table_validation() {
        assert!(UnitTable::new(&[("cupz", &["cups"])]).is_err());
        assert!(UnitTable::new(&[("cup", &["c"]), ("can", &["c"])]).is_err());
        assert!(UnitTable::new(&[("cup", &["  "])]).is_err());

        let table = UnitTable::new(&[("cup", &["cups"])]).unwrap();
        assert_eq!(table.lookup("cup"), Some(CanonicalUnit::Cup));
        assert_eq!(table.lookup("tbsp"), None);
    }
}
