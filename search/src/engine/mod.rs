mod top_k;

use crate::cancel::CancelToken;
use crate::error::RankInterrupt;
use crate::results::RankedResult;
use crate::scorer::{CancellableScorer, Score, Scorer, scorer_for};
use fzpick_core::{CandidateCatalog, SearchConfig};
use std::sync::Arc;
use std::time::Instant;
use top_k::TopK;
use tracing::{debug, trace};

/// Scores a catalog against a query and keeps the best K candidates.
///
/// The engine holds no per-request state, so one instance serves every pass
/// of a session.
#[derive(Clone)]
pub struct RankingEngine {
    scorer: Arc<dyn Scorer>,
    min_score: Score,
}

impl RankingEngine {
    pub fn new(scorer: Arc<dyn Scorer>) -> Self {
        Self {
            scorer,
            min_score: 0,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(scorer_for(config)).with_min_score(config.min_score)
    }

    /// Candidates scoring below `min_score` are left out of the result.
    pub fn with_min_score(mut self, min_score: Score) -> Self {
        self.min_score = min_score;
        self
    }

    /// Ranks `catalog` against `query`.
    ///
    /// An empty query yields an empty result without a scoring pass. The cancel
    /// token is checked before every candidate; once it is set the pass stops
    /// and returns [`RankInterrupt::Cancelled`] with no partial result.
    pub fn rank(
        &self,
        query: &str,
        catalog: &CandidateCatalog,
        k: usize,
        cancel: &CancelToken,
    ) -> Result<RankedResult, RankInterrupt> {
        if query.is_empty() {
            return Ok(RankedResult::empty(query));
        }
        if cancel.is_cancelled() {
            return Err(RankInterrupt::Cancelled);
        }

        let started = Instant::now();
        trace!(query, candidates = catalog.len(), k, "ranking pass started");

        let mut scorer = CancellableScorer::new(self.scorer.prepare(query)?, cancel);
        let mut top = TopK::new(k);

        for (index, name) in catalog.names().enumerate() {
            let score = match scorer.score(name) {
                Ok(score) => score,
                Err(interrupt) => {
                    trace!(query, scored = index, %interrupt, "ranking pass interrupted");
                    return Err(interrupt);
                }
            };
            if score >= self.min_score {
                top.offer(score, index, name);
            }
        }

        let entries = top.into_sorted();
        debug!(
            query,
            matched = entries.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "ranking pass finished"
        );
        Ok(RankedResult::new(query, entries))
    }
}

#[cfg(test)]
mod tests;
