use crate::results::RankedEntry;
use crate::scorer::Score;
use fzpick_core::CandidateName;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Bounded min-heap of the best `k` candidates seen so far.
pub(super) struct TopK<'a> {
    k: usize,
    heap: BinaryHeap<Reverse<Ranked<'a>>>,
}

/// Orders by score, then earlier catalog position first.
struct Ranked<'a> {
    score: Score,
    index: usize,
    name: &'a CandidateName,
}

impl Ord for Ranked<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .cmp(&other.score)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for Ranked<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ranked<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked<'_> {}

impl<'a> TopK<'a> {
    pub(super) fn new(k: usize) -> Self {
        Self {
            k,
            heap: BinaryHeap::with_capacity(k.saturating_add(1).min(1024)),
        }
    }

    pub(super) fn offer(&mut self, score: Score, index: usize, name: &'a CandidateName) {
        if self.k == 0 {
            return;
        }
        let candidate = Ranked { score, index, name };
        if self.heap.len() < self.k {
            self.heap.push(Reverse(candidate));
            return;
        }
        // Later candidates lose ties, so only a strictly better one displaces the worst.
        let displaces = match self.heap.peek() {
            Some(Reverse(worst)) => candidate > *worst,
            None => true,
        };
        if displaces {
            self.heap.pop();
            self.heap.push(Reverse(candidate));
        }
    }

    /// Best first.
    pub(super) fn into_sorted(self) -> Vec<RankedEntry> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(ranked)| RankedEntry {
                name: ranked.name.clone(),
                score: ranked.score,
            })
            .collect()
    }
}
