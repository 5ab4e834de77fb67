//! Token aggregates: uniqueness set and frequency counts.
//!
//! Both modes grow monotonically during ingestion; removal only happens
//! through [`Aggregate::apply_filter`], which is reapplied before every
//! export so the aggregate invariant holds even if the stopword list grows
//! after ingestion.

use std::collections::{BTreeSet, HashMap};

use crate::stopwords::StopwordFilter;
use crate::tokenize::Token;

/// One row of a final export: the token, plus its count in frequency mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub token: Token,
    pub count: Option<u64>,
}

/// Common interface over the two aggregation modes.
pub trait Aggregate: Send {
    /// Record one occurrence of a token. Duplicate insertion is a no-op for
    /// the uniqueness set and an increment for the frequency map.
    fn insert(&mut self, token: Token);

    /// Remove every key the filter rejects. Idempotent.
    fn apply_filter(&mut self, filter: &StopwordFilter);

    /// Number of distinct tokens currently held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted export view: lexicographic for the uniqueness set, descending
    /// by count (ties broken lexicographically) for the frequency map.
    fn rows(&self) -> Vec<ExportRow>;
}

/// Deduplicating aggregate for "which ingredients exist" runs.
#[derive(Debug, Default)]
pub struct UniqueAggregate {
    tokens: BTreeSet<Token>,
}

impl UniqueAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.tokens.contains(word)
    }
}

impl Aggregate for UniqueAggregate {
    fn insert(&mut self, token: Token) {
        self.tokens.insert(token);
    }

    fn apply_filter(&mut self, filter: &StopwordFilter) {
        self.tokens.retain(|token| filter.keeps(token));
    }

    fn len(&self) -> usize {
        self.tokens.len()
    }

    fn rows(&self) -> Vec<ExportRow> {
        // BTreeSet iteration is already lexicographic.
        self.tokens
            .iter()
            .map(|token| ExportRow {
                token: token.clone(),
                count: None,
            })
            .collect()
    }
}

/// Counting aggregate for "which ingredients are most common" runs.
#[derive(Debug, Default)]
pub struct FrequencyAggregate {
    counts: HashMap<Token, u64>,
}

impl FrequencyAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// The `n` most frequent tokens, ranked.
    pub fn top(&self, n: usize) -> Vec<ExportRow> {
        let mut rows = self.rows();
        rows.truncate(n);
        rows
    }
}

impl Aggregate for FrequencyAggregate {
    fn insert(&mut self, token: Token) {
        *self.counts.entry(token).or_insert(0) += 1;
    }

    fn apply_filter(&mut self, filter: &StopwordFilter) {
        self.counts.retain(|token, _| filter.keeps(token));
    }

    fn len(&self) -> usize {
        self.counts.len()
    }

    fn rows(&self) -> Vec<ExportRow> {
        let mut rows: Vec<ExportRow> = self
            .counts
            .iter()
            .map(|(token, &count)| ExportRow {
                token: token.clone(),
                count: Some(count),
            })
            .collect();
        // Descending by count; ties broken alphabetically for deterministic output.
        rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.token.cmp(&b.token)));
        rows
    }
}
