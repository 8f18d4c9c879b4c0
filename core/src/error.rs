use crate::types::CandidateNameError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("invalid candidate name: {0}")]
    InvalidName(#[from] CandidateNameError),
}

/// Errors that can occur when loading or saving config.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
