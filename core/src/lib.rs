//! Catalog model for fuzzy command lookup.
//!
//! A [`CandidateCatalog`](catalog::CandidateCatalog) maps unique candidate names to
//! [`CommandBinding`](types::CommandBinding)s. It is populated once by a host-specific
//! collector through [`CatalogBuilder`](catalog::CatalogBuilder) and is immutable
//! afterwards, so ranking passes never observe a partial catalog.

pub mod catalog;
pub mod error;
pub mod types;

pub use catalog::{CandidateCatalog, CatalogBuilder};
pub use error::{CatalogError, ConfigError};
pub use types::{
    Action, CandidateKind, CandidateName, CaseMatching, CommandBinding, MAX_SCORE, ScorerKind,
    SearchConfig,
};
