//! Background ranking worker.

use super::{RankingRequest, Shared};
use crate::engine::RankingEngine;
use fzpick_core::CandidateCatalog;
use std::io;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, trace};

pub(super) enum Command {
    Rank {
        request: RankingRequest,
        catalog: Arc<CandidateCatalog>,
    },
    Shutdown,
}

pub(super) struct Worker {
    engine: RankingEngine,
    result_limit: usize,
    debounce: Duration,
    shared: Arc<Shared>,
    commands: Receiver<Command>,
}

impl Worker {
    pub(super) fn new(
        engine: RankingEngine,
        result_limit: usize,
        debounce: Duration,
        shared: Arc<Shared>,
        commands: Receiver<Command>,
    ) -> Self {
        Self {
            engine,
            result_limit,
            debounce,
            shared,
            commands,
        }
    }

    pub(super) fn spawn(self) -> io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("fzpick-ranker".to_string())
            .spawn(move || self.run())
    }

    fn run(self) {
        while let Some((request, catalog)) = self.next_request() {
            if request.cancel.is_cancelled() {
                trace!(generation = request.generation, "skipping superseded request");
                continue;
            }
            let outcome = self.engine.rank(
                &request.query,
                &catalog,
                self.result_limit,
                &request.cancel,
            );
            self.shared.complete(&request, outcome);
        }
        debug!("ranking worker stopped");
    }

    /// Blocks for the next request and coalesces everything queued behind it,
    /// plus anything arriving within the debounce window, down to the newest.
    /// Returns `None` on shutdown.
    fn next_request(&self) -> Option<(RankingRequest, Arc<CandidateCatalog>)> {
        let mut latest = match self.commands.recv() {
            Ok(Command::Rank { request, catalog }) => (request, catalog),
            Ok(Command::Shutdown) | Err(_) => return None,
        };

        loop {
            let next = if self.debounce.is_zero() {
                match self.commands.try_recv() {
                    Ok(command) => Some(command),
                    Err(TryRecvError::Empty) => None,
                    Err(TryRecvError::Disconnected) => return None,
                }
            } else {
                match self.commands.recv_timeout(self.debounce) {
                    Ok(command) => Some(command),
                    Err(RecvTimeoutError::Timeout) => None,
                    Err(RecvTimeoutError::Disconnected) => return None,
                }
            };

            match next {
                None => return Some(latest),
                Some(Command::Shutdown) => return None,
                Some(Command::Rank { request, catalog }) => {
                    trace!(
                        dropped = latest.0.generation,
                        kept = request.generation,
                        "coalescing queued request"
                    );
                    latest = (request, catalog);
                }
            }
        }
    }
}
