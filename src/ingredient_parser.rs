//! # Ingredient Parser
//!
//! This module turns free-text recipe lines into [`ParsedIngredient`] records.
//! It handles mixed numbers, fraction glyphs, ASCII fractions, decimals and
//! unit synonyms, and never fails: anything it cannot read becomes an
//! item-name-only record.
//!
//! ## Strategies
//!
//! Extraction is an ordered chain of independent strategies; the first one
//! that matches wins:
//!
//! 1. Mixed number: `"1 1/2 cups flour"`, `"2 ½ tbsp butter"`
//! 2. Compact glyph: `"1½ cups milk"`, `"¾ tsp salt"`
//! 3. Plain number or ASCII fraction: `"3 eggs"`, `"0.5 kg rice"`, `"1/2 cup sugar"`
//! 4. Fallback: the whole line is the item name
//!
//! ## Usage
//!
//! ```rust
//! use grocery_engine::ingredient_parser::IngredientParser;
//! use grocery_engine::ingredient_model::CanonicalUnit;
//!
//! let parser = IngredientParser::default();
//! let flour = parser.parse("1 1/2 cups flour", Some("bread")).unwrap();
//!
//! assert_eq!(flour.quantity_numeric, Some(1.5));
//! assert_eq!(flour.unit, Some(CanonicalUnit::Cup));
//! assert_eq!(flour.item_name, "flour");
//! ```

use crate::engine_errors::EngineError;
use crate::fraction_resolver::{FractionResolver, FractionTable};
use crate::ingredient_model::{ParsedIngredient, RawIngredientLine};
use crate::name_normalizer::{NameNormalizer, NameRules};
use crate::unit_normalizer::{UnitNormalizer, UnitTable};
use log::{debug, info, trace, warn};
use regex::Regex;
use std::fmt;

/// Which strategy produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    MixedNumber,
    CompactFraction,
    PlainNumber,
    Fallback,
}

/// Quantity token and the remaining text, as split by a strategy
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityMatch<'a> {
    pub kind: StrategyKind,
    /// Quantity as written, empty for the fallback
    pub quantity: &'a str,
    /// Unit words plus item name
    pub rest: &'a str,
}

/// One step of the extraction chain
pub trait ExtractionStrategy: fmt::Debug + Send + Sync {
    fn kind(&self) -> StrategyKind;

    /// Split `text` into a quantity token and the rest, or `None` when this strategy does not apply
    fn try_parse<'a>(&self, text: &'a str) -> Option<QuantityMatch<'a>>;
}

/// A strategy driven by a regex with `qty` and `rest` groups
#[derive(Debug)]
pub struct RegexStrategy {
    kind: StrategyKind,
    pattern: Regex,
    /// Rejects matches whose rest starts with this (the "-3" of "2-3", the "2" of "12")
    reject_rest: Option<Regex>,
}

impl RegexStrategy {
    fn new(kind: StrategyKind, pattern: &str, reject_rest: Option<&str>) -> Result<Self, EngineError> {
        Ok(Self {
            kind,
            pattern: Regex::new(pattern)?,
            reject_rest: reject_rest.map(Regex::new).transpose()?,
        })
    }

    /// `<int> <fraction-or-glyph> <rest>`
    pub fn mixed_number(fractions: &FractionTable) -> Result<Self, EngineError> {
        let glyphs = glyph_class(fractions);
        Self::new(
            StrategyKind::MixedNumber,
            &format!(r"(?s)^(?P<qty>[0-9]+\s+(?:[0-9]+[/⁄][0-9]+|{glyphs}))\s*(?P<rest>\S.*)$"),
            Some(r"^[0-9/⁄.]"),
        )
    }

    /// `<int?><glyph> <rest>`, e.g. `"1½"` or `"¾"`
    pub fn compact_fraction(fractions: &FractionTable) -> Result<Self, EngineError> {
        let glyphs = glyph_class(fractions);
        Self::new(
            StrategyKind::CompactFraction,
            &format!(r"(?s)^(?P<qty>[0-9]*{glyphs})\s*(?P<rest>\S.*)$"),
            Some(r"^[0-9/⁄.]"),
        )
    }

    /// `<int|decimal|n/d> <rest>`
    pub fn plain_number(fractions: &FractionTable) -> Result<Self, EngineError> {
        let glyphs = glyph_class(fractions);
        Self::new(
            StrategyKind::PlainNumber,
            r"(?s)^(?P<qty>[0-9]+[/⁄][0-9]+|[0-9]*\.[0-9]+|[0-9]+)\s*(?P<rest>\S.*)$",
            Some(&format!(r"^(?:[-–—]\s*[0-9]|[0-9/⁄.]|{glyphs})")),
        )
    }
}

impl ExtractionStrategy for RegexStrategy {
    fn kind(&self) -> StrategyKind {
        self.kind
    }

    fn try_parse<'a>(&self, text: &'a str) -> Option<QuantityMatch<'a>> {
        let captures = self.pattern.captures(text)?;
        let quantity = captures.name("qty")?.as_str();
        let rest = captures.name("rest")?.as_str();

        if let Some(reject) = &self.reject_rest {
            if reject.is_match(rest) {
                trace!("{:?} rejected '{}': ambiguous remainder '{}'", self.kind, text, rest);
                return None;
            }
        }

        Some(QuantityMatch {
            kind: self.kind,
            quantity,
            rest,
        })
    }
}

/// Always matches: the whole line is the item name
#[derive(Debug, Default)]
pub struct FallbackStrategy;

impl ExtractionStrategy for FallbackStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Fallback
    }

    fn try_parse<'a>(&self, text: &'a str) -> Option<QuantityMatch<'a>> {
        Some(QuantityMatch {
            kind: StrategyKind::Fallback,
            quantity: "",
            rest: text,
        })
    }
}

fn glyph_class(fractions: &FractionTable) -> String {
    format!("[{}]", regex::escape(&fractions.glyph_chars()))
}

/// Parses ingredient lines using the strategy chain and the normalizers
#[derive(Debug)]
pub struct IngredientParser {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
    fractions: FractionResolver,
    units: UnitNormalizer,
    names: NameNormalizer,
}

impl IngredientParser {
    /// Build a parser over custom vocabulary tables
    pub fn with_tables(
        fractions: FractionTable,
        units: UnitTable,
        rules: NameRules,
    ) -> Result<Self, EngineError> {
        if fractions.entries().is_empty() {
            return Err(EngineError::InvalidTable("fraction table is empty".to_string()));
        }

        let strategies: Vec<Box<dyn ExtractionStrategy>> = vec![
            Box::new(RegexStrategy::mixed_number(&fractions)?),
            Box::new(RegexStrategy::compact_fraction(&fractions)?),
            Box::new(RegexStrategy::plain_number(&fractions)?),
            Box::new(FallbackStrategy),
        ];

        Ok(Self {
            strategies,
            fractions: FractionResolver::new(fractions),
            units: UnitNormalizer::new(units),
            names: NameNormalizer::new(rules)?,
        })
    }

    /// The extraction chain, in priority order
    pub fn strategies(&self) -> &[Box<dyn ExtractionStrategy>] {
        &self.strategies
    }

    pub fn fraction_resolver(&self) -> &FractionResolver {
        &self.fractions
    }

    pub fn unit_normalizer(&self) -> &UnitNormalizer {
        &self.units
    }

    pub fn name_normalizer(&self) -> &NameNormalizer {
        &self.names
    }

    /// Parse one ingredient line
    ///
    /// Returns `None` for empty or whitespace-only input. Every other line
    /// yields a record, degraded to an item name when nothing else is found.
    pub fn parse(&self, text: &str, recipe_id: Option<&str>) -> Option<ParsedIngredient> {
        if text.trim().is_empty() {
            trace!("Skipping empty ingredient line");
            return None;
        }

        let ingredient = match self.try_parse(text) {
            Ok(ingredient) => ingredient,
            Err(e) => {
                warn!("Falling back to item name for '{}': {}", text.trim(), e);
                ParsedIngredient::new(text.trim()).with_original_text(text)
            }
        };

        Some(ParsedIngredient {
            recipe_id: recipe_id.map(str::to_string),
            ..ingredient
        })
    }

    /// Parse a raw line record
    pub fn parse_line(&self, line: &RawIngredientLine) -> Option<ParsedIngredient> {
        self.parse(&line.text, line.recipe_id.as_deref())
    }

    /// Parse multi-line recipe text, skipping blank lines
    pub fn parse_lines(&self, text: &str, recipe_id: Option<&str>) -> Vec<ParsedIngredient> {
        let ingredients: Vec<ParsedIngredient> = text
            .lines()
            .filter_map(|line| self.parse(line, recipe_id))
            .collect();

        info!(
            "Parsed {} ingredients from {} lines (recipe {:?})",
            ingredients.len(),
            text.lines().count(),
            recipe_id
        );
        ingredients
    }

    fn try_parse(&self, text: &str) -> Result<ParsedIngredient, EngineError> {
        let line = text.trim();

        let found = self
            .strategies
            .iter()
            .find_map(|strategy| strategy.try_parse(line))
            .ok_or_else(|| EngineError::MissingCapture(format!("no strategy matched '{line}'")))?;

        debug!(
            "Strategy {:?} split '{}' into quantity '{}' and rest '{}'",
            found.kind, line, found.quantity, found.rest
        );

        if found.quantity.is_empty() {
            return Ok(ParsedIngredient::new(line).with_original_text(text));
        }

        let (unit, item) = match self.units.split_leading_unit(found.rest) {
            Some(leading) => (Some(leading.unit), leading.rest),
            None => (None, found.rest),
        };

        let item_name = self.names.display_name(item);
        if item_name.is_empty() {
            return Err(EngineError::MissingCapture(format!("no item name in '{line}'")));
        }

        let quantity = collapse_whitespace(found.quantity);
        let value = self.fractions.resolve(&quantity);

        let mut ingredient = ParsedIngredient::new(&item_name).with_original_text(text);
        ingredient.quantity = quantity;
        if value > 0.0 {
            ingredient.quantity_numeric = Some(value);
        }
        ingredient.unit = unit;

        trace!("Parsed '{}' -> {:?}", line, ingredient);
        Ok(ingredient)
    }
}

impl Default for IngredientParser {
    fn default() -> Self {
        Self::with_tables(FractionTable::default(), UnitTable::default(), NameRules::default())
            .expect("Default parser tables should be valid")
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
