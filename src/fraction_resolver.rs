//! # Fraction Resolver
//!
//! Converts quantity tokens to decimal values: unicode vulgar-fraction glyphs
//! (`"½"`), ASCII fractions (`"1/2"`, also with the fraction slash `"1⁄2"`),
//! mixed numbers (`"1 1/2"`, `"1 ½"`, `"1½"`) and plain decimals (`"0.75"`).
//!
//! Resolution is fail-soft: anything unparseable resolves to `0.0`, which
//! callers read as "no numeric quantity found".

use crate::engine_errors::EngineError;
use log::trace;

/// Default vulgar-fraction glyphs and their values
pub const DEFAULT_FRACTION_GLYPHS: &[(char, u32, u32)] = &[
    ('⅛', 1, 8),
    ('¼', 1, 4),
    ('⅜', 3, 8),
    ('½', 1, 2),
    ('⅝', 5, 8),
    ('¾', 3, 4),
    ('⅞', 7, 8),
    ('⅓', 1, 3),
    ('⅔', 2, 3),
    ('⅙', 1, 6),
    ('⅚', 5, 6),
    ('⅕', 1, 5),
    ('⅖', 2, 5),
    ('⅗', 3, 5),
    ('⅘', 4, 5),
];

const FRACTION_SLASHES: [char; 2] = ['/', '⁄'];

/// A single glyph entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractionGlyph {
    pub glyph: char,
    pub numerator: u32,
    pub denominator: u32,
}

impl FractionGlyph {
    pub fn value(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

/// Lookup table from fraction glyphs to values
#[derive(Debug, Clone, PartialEq)]
pub struct FractionTable {
    glyphs: Vec<FractionGlyph>,
}

impl FractionTable {
    /// Build a table from `(glyph, numerator, denominator)` entries
    ///
    /// Rejects zero denominators, proper-fraction violations and duplicate glyphs.
    pub fn new(entries: &[(char, u32, u32)]) -> Result<Self, EngineError> {
        let mut glyphs: Vec<FractionGlyph> = Vec::with_capacity(entries.len());

        for &(glyph, numerator, denominator) in entries {
            if denominator == 0 {
                return Err(EngineError::InvalidTable(format!(
                    "glyph '{glyph}' has a zero denominator"
                )));
            }
            if numerator == 0 || numerator >= denominator {
                return Err(EngineError::InvalidTable(format!(
                    "glyph '{glyph}' is not a proper fraction ({numerator}/{denominator})"
                )));
            }
            if glyph.is_ascii() || glyph.is_whitespace() {
                return Err(EngineError::InvalidTable(format!(
                    "'{glyph}' cannot be used as a fraction glyph"
                )));
            }
            if glyphs.iter().any(|g| g.glyph == glyph) {
                return Err(EngineError::InvalidTable(format!("duplicate glyph '{glyph}'")));
            }
            glyphs.push(FractionGlyph {
                glyph,
                numerator,
                denominator,
            });
        }

        Ok(Self { glyphs })
    }

    /// Value of a single glyph
    pub fn glyph_value(&self, glyph: char) -> Option<f64> {
        self.glyphs.iter().find(|g| g.glyph == glyph).map(FractionGlyph::value)
    }

    /// The glyph whose value is closest to `fraction`, if within `epsilon`
    pub fn closest_glyph(&self, fraction: f64, epsilon: f64) -> Option<char> {
        self.glyphs
            .iter()
            .map(|g| (g.glyph, (g.value() - fraction).abs()))
            .filter(|(_, distance)| *distance <= epsilon)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(glyph, _)| glyph)
    }

    /// Check if a character is one of the table's glyphs
    pub fn is_glyph(&self, c: char) -> bool {
        self.glyphs.iter().any(|g| g.glyph == c)
    }

    /// All glyph characters, for building character classes
    pub fn glyph_chars(&self) -> String {
        self.glyphs.iter().map(|g| g.glyph).collect()
    }

    pub fn entries(&self) -> &[FractionGlyph] {
        &self.glyphs
    }
}

impl Default for FractionTable {
    fn default() -> Self {
        Self::new(DEFAULT_FRACTION_GLYPHS).expect("Default fraction table should be valid")
    }
}

/// Resolves quantity tokens against a fraction table
#[derive(Debug, Clone, Default)]
pub struct FractionResolver {
    table: FractionTable,
}

impl FractionResolver {
    pub fn new(table: FractionTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &FractionTable {
        &self.table
    }

    /// Resolve a quantity token to a decimal value, `0.0` when unparseable
    pub fn resolve(&self, token: &str) -> f64 {
        let token = token.trim();
        let value = self.resolve_mixed(token).unwrap_or(0.0);
        trace!("Resolved quantity token '{}' -> {}", token, value);
        value
    }

    /// Mixed numbers: `"<int> <fraction>"` or compact `"<int><glyph>"`
    fn resolve_mixed(&self, token: &str) -> Option<f64> {
        if token.is_empty() {
            return None;
        }

        let mut parts = token.split_whitespace();
        let first = parts.next()?;
        if let Some(second) = parts.next() {
            if parts.next().is_some() {
                return None;
            }
            let whole = parse_whole(first)?;
            let fractional = self.resolve_simple(second)?;
            return Some(whole + fractional);
        }

        // Compact form: digits immediately followed by a glyph
        let mut chars = token.chars();
        if let Some(last) = chars.next_back() {
            let head = chars.as_str();
            if !head.is_empty() && self.table.is_glyph(last) {
                let whole = parse_whole(head)?;
                return Some(whole + self.table.glyph_value(last)?);
            }
        }

        self.resolve_simple(token)
    }

    /// A lone glyph, an `n/d` fraction or a plain decimal
    fn resolve_simple(&self, token: &str) -> Option<f64> {
        let mut chars = token.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(value) = self.table.glyph_value(c) {
                return Some(value);
            }
        }

        if let Some((numerator, denominator)) = token.split_once(FRACTION_SLASHES) {
            let numerator: u64 = numerator.trim().parse().ok()?;
            let denominator: u64 = denominator.trim().parse().ok()?;
            if denominator == 0 {
                return None;
            }
            return Some(numerator as f64 / denominator as f64);
        }

        let value: f64 = token.parse().ok()?;
        (value.is_finite() && value >= 0.0).then_some(value)
    }
}

fn parse_whole(token: &str) -> Option<f64> {
    token.parse::<u64>().ok().map(|whole| whole as f64)
}
