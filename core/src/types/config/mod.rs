mod search;

pub use search::{CaseMatching, MAX_SCORE, ScorerKind, SearchConfig};
