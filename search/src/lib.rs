//! Cancellable fuzzy ranking over a [`CandidateCatalog`].
//!
//! # Design
//!
//! - [`RankingEngine::rank`] scores every candidate in catalog order, checking the
//!   request's [`CancelToken`] before each comparison, and keeps a bounded top-K.
//! - [`SearchSession`] owns one background worker thread. Every query change bumps
//!   a generation counter and cancels the previous token; only a result whose
//!   generation is still current when it completes reaches the result callback.
//! - Scorers are pluggable through [`Scorer`]; [`WeightedRatio`] is the default.
//!
//! # Non-blocking API
//!
//! - `on_query_changed()`: supersedes in-flight work and schedules the new query
//! - `set_result_callback()` / `subscribe()`: receive ranked results
//! - `shutdown()`: cancels and joins the worker; nothing is delivered afterwards

mod cancel;
mod engine;
mod error;
mod results;
mod scorer;
mod session;

pub use cancel::CancelToken;
pub use engine::RankingEngine;
pub use error::{RankInterrupt, ScoreError, SearchError};
pub use fzpick_core::{CandidateCatalog, CatalogBuilder, CommandBinding, SearchConfig};
pub use results::{RankedEntry, RankedResult};
pub use scorer::{
    CancellableScorer, NucleoScorer, QueryScorer, Score, Scorer, WeightedRatio, scorer_for,
};
pub use session::{RankingRequest, SearchSession, SessionEvent, SessionState, build_session};
