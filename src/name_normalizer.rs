//! # Name Normalizer
//!
//! Produces two forms of an ingredient phrase:
//!
//! - a **canonical key** (lowercased, asides and descriptors stripped) used only
//!   for matching duplicates, never shown to the user
//! - a **display name** with case and connectives ("oil or butter") preserved
//!
//! ```rust
//! use grocery_engine::name_normalizer::NameNormalizer;
//!
//! let normalizer = NameNormalizer::default();
//! assert_eq!(normalizer.canonical_key("Fresh  Basil (about 1 bunch), chopped"), "basil");
//! assert_eq!(normalizer.display_name("Fresh  Basil (about 1 bunch), chopped"), "Basil");
//! ```

use crate::engine_errors::EngineError;
use log::trace;
use regex::Regex;

/// Vocabulary driving the strip rules
#[derive(Debug, Clone, PartialEq)]
pub struct NameRules {
    /// Verbs that introduce a trailing preparation clause after a comma
    pub prep_verbs: Vec<String>,
    /// Quality descriptors stripped from the start of a name
    pub leading_descriptors: Vec<String>,
    /// Articles and prepositions stripped from the start of a name
    pub leading_articles: Vec<String>,
    /// Connectives dropped when they appear between two other words
    pub stop_words: Vec<String>,
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Default for NameRules {
    fn default() -> Self {
        Self {
            prep_verbs: owned(&["chopped", "sliced", "diced", "minced", "grated", "crushed", "ground"]),
            leading_descriptors: owned(&["fresh", "dried", "frozen", "canned"]),
            leading_articles: owned(&["the", "of"]),
            stop_words: owned(&["and", "or", "with", "for", "in", "on", "at", "by"]),
        }
    }
}

/// Applies [`NameRules`] to ingredient phrases
#[derive(Debug, Clone)]
pub struct NameNormalizer {
    rules: NameRules,
    parenthetical: Regex,
    prep_clause: Regex,
    leading_descriptor: Regex,
    leading_article: Regex,
}

impl NameNormalizer {
    /// Compile the strip patterns for a rule set
    pub fn new(rules: NameRules) -> Result<Self, EngineError> {
        for (label, words) in [
            ("prep verb", &rules.prep_verbs),
            ("descriptor", &rules.leading_descriptors),
            ("article", &rules.leading_articles),
            ("stop word", &rules.stop_words),
        ] {
            if words.iter().any(|w| w.trim().is_empty() || w.contains(char::is_whitespace)) {
                return Err(EngineError::InvalidTable(format!(
                    "{label} entries must be single non-empty words"
                )));
            }
        }

        let parenthetical = Regex::new(r"\([^)]*(?:\)|$)")?;
        let prep_clause = Regex::new(&format!(
            r"(?i),\s*(?:{})\b.*$",
            alternation(&rules.prep_verbs)
        ))?;
        let leading_descriptor = Regex::new(&format!(
            r"(?i)^(?:{})\s+",
            alternation(&rules.leading_descriptors)
        ))?;
        let leading_article = Regex::new(&format!(
            r"(?i)^(?:(?:{})\s+)+",
            alternation(&rules.leading_articles)
        ))?;

        Ok(Self {
            rules,
            parenthetical,
            prep_clause,
            leading_descriptor,
            leading_article,
        })
    }

    /// Lowercased comparison key
    pub fn canonical_key(&self, raw: &str) -> String {
        let key = self.strip(&raw.to_lowercase(), true);
        trace!("Canonical key: '{}' -> '{}'", raw, key);
        key
    }

    /// Display form: original case kept, connective stop words kept
    pub fn display_name(&self, raw: &str) -> String {
        let name = self.strip(raw, false);
        trace!("Display name: '{}' -> '{}'", raw, name);
        name
    }

    pub fn rules(&self) -> &NameRules {
        &self.rules
    }

    fn strip(&self, raw: &str, drop_stop_words: bool) -> String {
        let collapsed = collapse_whitespace(raw);

        let mut name = self.parenthetical.replace_all(&collapsed, " ").into_owned();
        name = self.prep_clause.replace(&name, "").into_owned();
        name = collapse_whitespace(&name);
        name = self.leading_descriptor.replace(&name, "").into_owned();
        name = self.leading_article.replace(&name, "").into_owned();
        if drop_stop_words {
            name = self.drop_interior_stop_words(&name);
        }
        name = collapse_whitespace(&name)
            .trim_end_matches([',', ';', ':'])
            .trim_end()
            .to_string();

        if name.is_empty() {
            // Nothing but asides; keep the phrase rather than lose the line
            return collapsed;
        }
        name
    }

    fn drop_interior_stop_words(&self, name: &str) -> String {
        let words: Vec<&str> = name.split_whitespace().collect();
        let last = words.len().saturating_sub(1);

        words
            .iter()
            .enumerate()
            .filter(|(i, word)| {
                *i == 0
                    || *i == last
                    || !self.rules.stop_words.iter().any(|s| s.eq_ignore_ascii_case(word))
            })
            .map(|(_, word)| *word)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for NameNormalizer {
    fn default() -> Self {
        Self::new(NameRules::default()).expect("Default name rules should be valid")
    }
}

fn alternation(words: &[String]) -> String {
    if words.is_empty() {
        // matches nothing
        return r"[^\s\S]".to_string();
    }
    words
        .iter()
        .map(|w| regex::escape(w.trim()))
        .collect::<Vec<_>>()
        .join("|")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_normalizer() -> NameNormalizer {
        NameNormalizer::default()
    }

    #[test]
    fn test_lowercase_and_whitespace() {
        let normalizer = create_normalizer();
        assert_eq!(normalizer.canonical_key("  All-Purpose   Flour "), "all-purpose flour");
    }

    #[test]
    fn test_parenthetical_asides() {
        let normalizer = create_normalizer();
        assert_eq!(normalizer.canonical_key("butter (softened)"), "butter");
        assert_eq!(normalizer.canonical_key("milk (2% or whole) cold"), "milk cold");
        assert_eq!(normalizer.canonical_key("cream (heavy"), "cream");
    }

    #[test]
    fn test_prep_clause() {
        let normalizer = create_normalizer();
        assert_eq!(normalizer.canonical_key("onion, chopped"), "onion");
        assert_eq!(normalizer.canonical_key("garlic, minced finely"), "garlic");
        assert_eq!(normalizer.canonical_key("Parmesan, Grated"), "parmesan");
        // Only the fixed verb set starts a clause
        assert_eq!(normalizer.canonical_key("butter, softened"), "butter, softened");
    }

    #[test]
    fn test_leading_descriptor_and_article() {
        let normalizer = create_normalizer();
        assert_eq!(normalizer.canonical_key("fresh basil"), "basil");
        assert_eq!(normalizer.canonical_key("Frozen peas"), "peas");
        assert_eq!(normalizer.canonical_key("the zest"), "zest");
        assert_eq!(normalizer.canonical_key("of flour"), "flour");
        // Descriptors are only stripped at the start
        assert_eq!(normalizer.canonical_key("basil fresh"), "basil fresh");
    }

    #[test]
    fn test_stop_words() {
        let normalizer = create_normalizer();
        assert_eq!(normalizer.canonical_key("salt and pepper"), "salt pepper");
        assert_eq!(normalizer.canonical_key("bread for toasting"), "bread toasting");
        assert_eq!(normalizer.canonical_key("salt to taste"), "salt to taste");
        // Not surrounded by other words
        assert_eq!(normalizer.canonical_key("and"), "and");
    }

    #[test]
    fn test_display_name_keeps_case() {
        let normalizer = create_normalizer();
        assert_eq!(normalizer.display_name("Fresh Basil, chopped"), "Basil");
        assert_eq!(normalizer.display_name("Olive Oil (extra virgin)"), "Olive Oil");
        assert_eq!(normalizer.display_name("salt to taste"), "salt to taste");
    }

    #[test]
    fn test_display_name_keeps_connectives() {
        let normalizer = create_normalizer();
        assert_eq!(normalizer.display_name("oil or butter"), "oil or butter");
        assert_eq!(normalizer.display_name("Salt and Pepper"), "Salt and Pepper");
        assert_eq!(normalizer.canonical_key("oil or butter"), "oil butter");
    }

    #[test]
    fn test_only_asides_keeps_phrase() {
        let normalizer = create_normalizer();
        assert_eq!(normalizer.display_name("(optional)"), "(optional)");
    }

    #[test]
    fn test_custom_rules() {
        let rules = NameRules {
            leading_descriptors: vec!["organic".to_string()],
            ..NameRules::default()
        };
        let normalizer = NameNormalizer::new(rules).unwrap();
        assert_eq!(normalizer.canonical_key("organic kale"), "kale");
        assert_eq!(normalizer.canonical_key("fresh kale"), "fresh kale");
    }

    #[test]
    fn test_rules_validation() {
        let rules = NameRules {
            stop_words: vec!["and or".to_string()],
            ..NameRules::default()
        };
        assert!(NameNormalizer::new(rules).is_err());
    }
}
