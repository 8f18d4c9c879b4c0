//! Ranked result types.

use crate::scorer::Score;
use fzpick_core::CandidateName;

/// One row of a ranked result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub name: CandidateName,
    pub score: Score,
}

/// Up to K entries sorted by score descending, ties in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedResult {
    query: String,
    generation: u64,
    entries: Vec<RankedEntry>,
}

impl RankedResult {
    pub fn new(query: impl Into<String>, entries: Vec<RankedEntry>) -> Self {
        Self {
            query: query.into(),
            generation: 0,
            entries,
        }
    }

    pub fn empty(query: impl Into<String>) -> Self {
        Self::new(query, Vec::new())
    }

    pub(crate) fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    /// The query this result answers.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Session generation that produced this result; `0` outside a session.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RankedEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedEntry> + '_ {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Exactly `rows` names for fixed-height lists, padded with `""`.
    ///
    /// Truncates when the result holds more than `rows` entries.
    pub fn padded_names(&self, rows: usize) -> impl Iterator<Item = &str> + '_ {
        self.names()
            .chain(std::iter::repeat(""))
            .take(rows)
    }

    pub fn into_entries(self) -> Vec<RankedEntry> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a RankedResult {
    type Item = &'a RankedEntry;
    type IntoIter = std::slice::Iter<'a, RankedEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
