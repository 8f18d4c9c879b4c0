pub(crate) mod binding;
pub use binding::{Action, CandidateKind, CommandBinding, ENUM_ICON, STRUCT_ICON, SYMBOL_ICON};

pub(crate) mod config;
pub use config::{CaseMatching, MAX_SCORE, ScorerKind, SearchConfig};

pub(crate) mod name;
pub use name::{CandidateName, CandidateNameError};
