use thiserror::Error;

/// Failure raised by a similarity primitive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    #[error("malformed query {query:?}: {reason}")]
    MalformedQuery { query: String, reason: String },

    #[error("malformed candidate {candidate:?}: {reason}")]
    MalformedCandidate { candidate: String, reason: String },
}

/// Early termination of a ranking pass.
///
/// `Cancelled` is the expected outcome of superseded work, not a failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RankInterrupt {
    #[error("ranking pass cancelled")]
    Cancelled,

    #[error(transparent)]
    Scoring(#[from] ScoreError),
}

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("ranking requested before the catalog was loaded")]
    CatalogNotReady,

    #[error("catalog already loaded; start a new session to rebuild it")]
    CatalogAlreadyLoaded,

    #[error("search session is shut down")]
    SessionClosed,

    #[error("scoring failed for query {query:?}: {source}")]
    Scoring {
        query: String,
        #[source]
        source: ScoreError,
    },

    #[error("failed to spawn ranking worker: {0}")]
    Spawn(#[from] std::io::Error),
}
