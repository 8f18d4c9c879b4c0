//! Similarity primitives and the cancellation adapter.

mod nucleo_match;
mod ratio;

use crate::cancel::CancelToken;
use crate::error::{RankInterrupt, ScoreError};
use fzpick_core::{MAX_SCORE, ScorerKind, SearchConfig};
use std::sync::Arc;

pub use nucleo_match::NucleoScorer;
pub use ratio::WeightedRatio;

/// Similarity in `0..=100`. Zero is a valid, poor match.
pub type Score = u32;

/// Pluggable similarity primitive.
///
/// `prepare` runs once per ranking pass so per-query work (normalization,
/// pattern compilation) is not repeated for every candidate.
pub trait Scorer: Send + Sync {
    fn prepare<'a>(&'a self, query: &str) -> Result<Box<dyn QueryScorer + 'a>, ScoreError>;
}

/// A scorer bound to one query.
pub trait QueryScorer {
    fn score(&mut self, candidate: &str) -> Result<Score, ScoreError>;
}

impl<F> Scorer for F
where
    F: Fn(&str, &str) -> Result<Score, ScoreError> + Send + Sync,
{
    fn prepare<'a>(&'a self, query: &str) -> Result<Box<dyn QueryScorer + 'a>, ScoreError> {
        Ok(Box::new(FnQuery {
            scorer: self,
            query: query.to_owned(),
        }))
    }
}

struct FnQuery<'a, F> {
    scorer: &'a F,
    query: String,
}

impl<F> QueryScorer for FnQuery<'_, F>
where
    F: Fn(&str, &str) -> Result<Score, ScoreError>,
{
    fn score(&mut self, candidate: &str) -> Result<Score, ScoreError> {
        (self.scorer)(&self.query, candidate)
    }
}

/// Builds the scorer selected by `config.scorer`.
pub fn scorer_for(config: &SearchConfig) -> Arc<dyn Scorer> {
    match config.scorer {
        ScorerKind::WeightedRatio => Arc::new(WeightedRatio),
        ScorerKind::Nucleo => Arc::new(NucleoScorer::from_config(config)),
    }
}

/// Checks the cancel token before every comparison.
///
/// Cancellation surfaces as [`RankInterrupt::Cancelled`], never as a zero score,
/// so the caller abandons the whole pass instead of one candidate.
pub struct CancellableScorer<'a> {
    inner: Box<dyn QueryScorer + 'a>,
    cancel: &'a CancelToken,
}

impl<'a> CancellableScorer<'a> {
    pub fn new(inner: Box<dyn QueryScorer + 'a>, cancel: &'a CancelToken) -> Self {
        Self { inner, cancel }
    }

    pub fn score(&mut self, candidate: &str) -> Result<Score, RankInterrupt> {
        if self.cancel.is_cancelled() {
            return Err(RankInterrupt::Cancelled);
        }
        let score = self.inner.score(candidate)?;
        Ok(score.min(MAX_SCORE))
    }
}
