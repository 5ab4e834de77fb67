//! Ingredient text normalization.
//!
//! Turns raw ingredient blobs (e.g. "Water, Natural Flavor (Citric Acid), 2% Milk")
//! into cleaned lowercase tokens suitable for aggregation.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Minimum length for a token to be worth keeping.
pub const MIN_TOKEN_LEN: usize = 3;

/// A normalized ingredient candidate.
///
/// Invariant: lowercase ASCII letters and single interior spaces only,
/// at least [`MIN_TOKEN_LEN`] characters. Enforced by [`Token::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Clean a raw segment and build a token from it.
    ///
    /// Returns `None` if the segment collapses below [`MIN_TOKEN_LEN`]
    /// characters after cleaning. That is not an error: ingredient lists are
    /// full of segments like "2%" that simply carry no name.
    pub fn parse(raw: &str) -> Option<Token> {
        let cleaned = clean_segment(raw);
        if cleaned.len() < MIN_TOKEN_LEN {
            None
        } else {
            Some(Token(cleaned))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets set/map lookups take a plain &str.
impl Borrow<str> for Token {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Tokenize a raw ingredient blob.
///
/// Parenthetical content is lifted out as additional segments, the text is
/// split on commas and semicolons, and each segment is cleaned down to
/// lowercase letters and spaces. Multi-word segments emit the full phrase
/// plus each individual word of at least [`MIN_TOKEN_LEN`] characters, so
/// "citric acid" contributes "citric acid", "citric", and "acid".
///
/// Empty or all-noise input yields an empty sequence.
pub fn tokenize(raw: &str) -> impl Iterator<Item = Token> {
    segments(raw)
        .into_iter()
        .filter_map(|segment| Token::parse(&segment))
        .flat_map(expand)
}

/// Split a blob into candidate segments, lifting parenthetical content out
/// as extra segments rather than discarding it.
fn segments(raw: &str) -> Vec<String> {
    let mut outside = String::with_capacity(raw.len());
    let mut lifted = Vec::new();

    let mut rest = raw;
    while let Some(start) = rest.find('(') {
        outside.push_str(&rest[..start]);
        match rest[start + 1..].find(')') {
            Some(len) => {
                lifted.push(rest[start + 1..start + 1 + len].to_string());
                rest = &rest[start + 1 + len + 1..];
            }
            None => {
                // Unbalanced paren: treat the remainder as lifted content.
                lifted.push(rest[start + 1..].to_string());
                rest = "";
            }
        }
    }
    outside.push_str(rest);

    let mut segs: Vec<String> = outside.split([',', ';']).map(str::to_string).collect();
    for content in lifted {
        segs.extend(content.split([',', ';']).map(str::to_string));
    }
    segs
}

/// Strip everything outside ASCII letters and whitespace, collapse whitespace
/// runs to single spaces, trim, and lowercase.
fn clean_segment(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .map(|word| word.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Emit the full phrase plus its individual words for multi-word tokens.
fn expand(token: Token) -> Vec<Token> {
    if !token.as_str().contains(' ') {
        return vec![token];
    }

    let words: Vec<Token> = token
        .as_str()
        .split(' ')
        .filter(|word| word.len() >= MIN_TOKEN_LEN)
        .map(|word| Token(word.to_string()))
        .collect();

    let mut out = Vec::with_capacity(words.len() + 1);
    out.push(token);
    out.extend(words);
    out
}

/// Best-effort guess at whether a single word is English.
///
/// Rejects non-alphabetic strings, one-letter strings, short all-caps codes
/// (E numbers, abbreviations), and words with more than four consonants in a
/// row. This is a heuristic with no correctness contract; callers opt in.
pub fn looks_english(word: &str) -> bool {
    if word.len() < 2 || !word.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }

    if word.len() <= 4 && word.chars().all(|c| c.is_ascii_uppercase()) {
        return false;
    }

    let mut consonant_run = 0;
    for c in word.chars() {
        if matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u') {
            consonant_run = 0;
        } else {
            consonant_run += 1;
            if consonant_run > 4 {
                return false;
            }
        }
    }

    true
}
