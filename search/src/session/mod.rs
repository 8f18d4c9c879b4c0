//! Query-driven search session.
//!
//! One background worker per session runs ranking passes. The UI side only
//! touches the shared state under a short lock: bump the generation, cancel
//! the previous token, enqueue the new request. Completions are matched
//! against the current generation under the same lock, so a superseded or
//! cancelled pass can never deliver.

mod worker;

use crate::cancel::CancelToken;
use crate::engine::RankingEngine;
use crate::error::{RankInterrupt, SearchError};
use crate::results::RankedResult;
use crate::scorer::{Scorer, scorer_for};
use fzpick_core::{CandidateCatalog, CommandBinding, SearchConfig};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use tracing::{debug, trace, warn};
use worker::{Command, Worker};

type ResultCallback = Box<dyn Fn(RankedResult) + Send>;
type ErrorCallback = Box<dyn Fn(SearchError) + Send>;

/// A query handed to the worker.
#[derive(Debug, Clone)]
pub struct RankingRequest {
    pub query: String,
    pub generation: u64,
    pub cancel: CancelToken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Ranking(u64),
    /// Transient: the in-flight pass was cancelled and its successor is being dispatched.
    Cancelling(u64),
}

/// Event form of the session callbacks, see [`SearchSession::subscribe`].
#[derive(Debug)]
pub enum SessionEvent {
    Results(RankedResult),
    Failed(SearchError),
}

/// Creates a session with a catalog already loaded.
pub fn build_session(
    catalog: CandidateCatalog,
    config: &SearchConfig,
) -> Result<SearchSession, SearchError> {
    let session = SearchSession::new(config)?;
    session.load_catalog(catalog)?;
    Ok(session)
}

/// Serializes query changes into ranking passes, newest query wins.
///
/// Callbacks run on the worker thread (or on the caller's thread for the empty
/// query fast path) while the session lock is held. They must hand the result
/// off and return; calling back into the session from a callback, including
/// [`selection`](Self::selection) and [`binding`](Self::binding), deadlocks.
/// Use [`subscribe`](Self::subscribe) to resolve selections outside the lock.
pub struct SearchSession {
    shared: Arc<Shared>,
    commands: Sender<Command>,
    worker: Option<JoinHandle<()>>,
    result_limit: usize,
}

pub(crate) struct Shared {
    inner: Mutex<Inner>,
}

struct Inner {
    generation: u64,
    cancel: Option<CancelToken>,
    state: SessionState,
    catalog: Option<Arc<CandidateCatalog>>,
    on_result: Option<ResultCallback>,
    on_error: Option<ErrorCallback>,
    closed: bool,
}

/// Create operations.
impl SearchSession {
    /// Starts the worker. A catalog must be loaded before the first non-empty query.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        Self::with_scorer(config, scorer_for(config))
    }

    /// Like [`new`](Self::new) with a custom similarity primitive.
    pub fn with_scorer(
        config: &SearchConfig,
        scorer: Arc<dyn Scorer>,
    ) -> Result<Self, SearchError> {
        for problem in config.validate() {
            warn!(%problem, "invalid search config value, using default");
        }
        let config = config.with_defaults_for_invalid();

        let shared = Arc::new(Shared {
            inner: Mutex::new(Inner {
                generation: 0,
                cancel: None,
                state: SessionState::Idle,
                catalog: None,
                on_result: None,
                on_error: None,
                closed: false,
            }),
        });

        let (commands, receiver) = mpsc::channel();
        let engine = RankingEngine::new(scorer).with_min_score(config.min_score);
        let worker = Worker::new(
            engine,
            config.result_limit,
            config.debounce(),
            shared.clone(),
            receiver,
        )
        .spawn()?;

        debug!(
            result_limit = config.result_limit,
            scorer = %config.scorer,
            "search session started"
        );

        Ok(Self {
            shared,
            commands,
            worker: Some(worker),
            result_limit: config.result_limit,
        })
    }

    /// Installs the catalog. A session accepts exactly one; rebuilding the
    /// catalog requires a fresh session.
    pub fn load_catalog(&self, catalog: CandidateCatalog) -> Result<(), SearchError> {
        let mut inner = self.shared.inner.lock();
        if inner.closed {
            return Err(SearchError::SessionClosed);
        }
        if inner.catalog.is_some() {
            return Err(SearchError::CatalogAlreadyLoaded);
        }
        debug!(candidates = catalog.len(), "catalog loaded");
        inner.catalog = Some(Arc::new(catalog));
        Ok(())
    }

    pub fn set_result_callback(&self, callback: impl Fn(RankedResult) + Send + 'static) {
        self.shared.inner.lock().on_result = Some(Box::new(callback));
    }

    /// Receives scoring failures. The result callback still gets an empty
    /// result for the failed query.
    pub fn set_error_callback(&self, callback: impl Fn(SearchError) + Send + 'static) {
        self.shared.inner.lock().on_error = Some(Box::new(callback));
    }

    /// Routes results and errors into a channel owned by the caller's context.
    ///
    /// Replaces any callbacks set before.
    pub fn subscribe(&self) -> Receiver<SessionEvent> {
        let (tx, rx) = mpsc::channel();
        let error_tx = tx.clone();
        self.set_result_callback(move |result| {
            let _ = tx.send(SessionEvent::Results(result));
        });
        self.set_error_callback(move |error| {
            let _ = error_tx.send(SessionEvent::Failed(error));
        });
        rx
    }
}

/// Query operations.
impl SearchSession {
    /// Supersedes any in-flight pass and schedules `query`.
    ///
    /// Never waits for the previous pass to stop. An empty query clears the
    /// results immediately, on the calling thread, without scheduling a pass.
    pub fn on_query_changed(&self, query: &str) -> Result<(), SearchError> {
        let mut inner = self.shared.inner.lock();
        if inner.closed {
            return Err(SearchError::SessionClosed);
        }

        let catalog = if query.is_empty() {
            None
        } else {
            Some(inner.catalog.clone().ok_or(SearchError::CatalogNotReady)?)
        };

        inner.generation += 1;
        let generation = inner.generation;
        if let Some(previous) = inner.cancel.take() {
            previous.cancel();
        }
        if let SessionState::Ranking(previous) = inner.state {
            trace!(previous, generation, "superseding in-flight ranking");
            inner.state = SessionState::Cancelling(previous);
        }

        let Some(catalog) = catalog else {
            inner.state = SessionState::Idle;
            inner.deliver(RankedResult::empty(query).with_generation(generation));
            return Ok(());
        };

        let request = RankingRequest {
            query: query.to_owned(),
            generation,
            cancel: CancelToken::new(),
        };
        inner.cancel = Some(request.cancel.clone());
        inner.state = SessionState::Ranking(generation);

        if self.commands.send(Command::Rank { request, catalog }).is_err() {
            warn!(generation, "ranking worker is gone");
            inner.cancel = None;
            inner.state = SessionState::Idle;
            return Err(SearchError::SessionClosed);
        }
        Ok(())
    }

    /// Cancels in-flight work and joins the worker.
    ///
    /// Once this returns no callback fires again. Idempotent.
    pub fn shutdown(&mut self) {
        {
            let mut inner = self.shared.inner.lock();
            if !inner.closed {
                inner.closed = true;
                if let Some(token) = inner.cancel.take() {
                    token.cancel();
                }
                inner.state = SessionState::Idle;
                inner.on_result = None;
                inner.on_error = None;
            }
        }

        let _ = self.commands.send(Command::Shutdown);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("ranking worker panicked");
            }
            debug!("search session shut down");
        }
    }
}

/// Observers.
impl SearchSession {
    pub fn state(&self) -> SessionState {
        self.shared.inner.lock().state
    }

    pub fn generation(&self) -> u64 {
        self.shared.inner.lock().generation
    }

    pub fn result_limit(&self) -> usize {
        self.result_limit
    }

    pub fn is_closed(&self) -> bool {
        self.shared.inner.lock().closed
    }

    pub fn catalog(&self) -> Option<Arc<CandidateCatalog>> {
        self.shared.inner.lock().catalog.clone()
    }

    pub fn binding(&self, name: &str) -> Option<CommandBinding> {
        self.catalog()?.get(name).cloned()
    }

    /// Binding behind row `index` of `result`. Out-of-range rows, including
    /// presenter padding, yield `None`.
    pub fn selection(&self, result: &RankedResult, index: usize) -> Option<CommandBinding> {
        let entry = result.get(index)?;
        self.binding(entry.name.as_str())
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl Shared {
    /// Delivers a finished pass if it is still the current generation.
    pub(crate) fn complete(
        &self,
        request: &RankingRequest,
        outcome: Result<RankedResult, RankInterrupt>,
    ) {
        let mut inner = self.inner.lock();
        let stale = inner.closed
            || inner.generation != request.generation
            || request.cancel.is_cancelled();
        if stale {
            trace!(
                generation = request.generation,
                current = inner.generation,
                "discarding stale ranking"
            );
            return;
        }

        match outcome {
            Ok(result) => {
                inner.finish();
                inner.deliver(result.with_generation(request.generation));
            }
            Err(RankInterrupt::Cancelled) => {
                trace!(generation = request.generation, "ranking cancelled");
            }
            Err(RankInterrupt::Scoring(source)) => {
                warn!(query = %request.query, error = %source, "scoring failed, clearing results");
                inner.finish();
                inner.report(SearchError::Scoring {
                    query: request.query.clone(),
                    source,
                });
                let cleared = RankedResult::empty(request.query.as_str());
                inner.deliver(cleared.with_generation(request.generation));
            }
        }
    }
}

impl Inner {
    fn finish(&mut self) {
        self.state = SessionState::Idle;
        self.cancel = None;
    }

    fn deliver(&self, result: RankedResult) {
        if let Some(callback) = &self.on_result {
            callback(result);
        }
    }

    fn report(&self, error: SearchError) {
        if let Some(callback) = &self.on_error {
            callback(error);
        }
    }
}
