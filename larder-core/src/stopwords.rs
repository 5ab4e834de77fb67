//! Filtering of generic non-ingredient words.
//!
//! Ingredient lists are full of connective tissue ("and", "contains", "may")
//! and generic descriptors ("natural", "flavor") that would otherwise dominate
//! any frequency ranking. This module removes them.

use std::collections::HashSet;

use crate::tokenize::{Token, MIN_TOKEN_LEN};

/// Words that show up constantly in ingredient lists without naming an
/// ingredient: conjunctions, prepositions, label boilerplate, and generic
/// descriptors.
const COMMON_WORDS: &[&str] = &[
    // Conjunctions / prepositions
    "and", "or", "the", "of", "in", "with", "from", "by", "for", "on", "at", "to", "as",
    // Label boilerplate
    "may", "contain", "contains", "including", "made", "using", "added", "per", "each",
    "less", "than", "more", "some", "other", "also",
    // Generic descriptors
    "natural", "artificial", "flavor", "flavoring", "flavour", "flavouring", "extract",
    "powder", "dried", "fresh",
];

/// A fixed denylist plus the minimum-length rule.
///
/// Filtering is deterministic and idempotent: applying it to an
/// already-filtered aggregate is a no-op.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    words: HashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::from_list(COMMON_WORDS)
    }
}

impl StopwordFilter {
    /// Build a filter from a custom word list. Matching is case-insensitive.
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            words: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Add a word to the denylist.
    pub fn add(&mut self, word: &str) {
        self.words.insert(word.to_lowercase());
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    /// Whether a token survives filtering: long enough and not denylisted.
    pub fn keeps(&self, token: &Token) -> bool {
        token.as_str().len() >= MIN_TOKEN_LEN && !self.is_stopword(token.as_str())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_list() {
        let filter = StopwordFilter::default();
        assert!(filter.is_stopword("and"));
        assert!(filter.is_stopword("Contains"));
        assert!(filter.is_stopword("flavor"));
        assert!(!filter.is_stopword("milk"));
    }

    #[test]
    fn test_keeps() {
        let filter = StopwordFilter::default();
        assert!(filter.keeps(&Token::parse("milk").unwrap()));
        assert!(filter.keeps(&Token::parse("citric acid").unwrap()));
        assert!(!filter.keeps(&Token::parse("and").unwrap()));
    }

    #[test]
    fn test_custom_list() {
        let mut filter = StopwordFilter::from_list(&["custom"]);
        assert!(filter.is_stopword("custom"));
        assert!(!filter.is_stopword("and"));

        filter.add("Extra");
        assert!(filter.is_stopword("extra"));
    }
}
