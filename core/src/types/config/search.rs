use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Highest score any scorer may produce.
pub const MAX_SCORE: u32 = 100;

/// Search session settings, persisted as fuzzy_search.toml.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Result cap (K). Fixed for the lifetime of a session.
    pub result_limit: usize,
    /// Candidates scoring below this are dropped. Inclusive.
    pub min_score: u32,
    pub scorer: ScorerKind,
    pub case_matching: CaseMatching,
    pub unicode_normalization: bool,
    /// Quiet period the worker waits for a newer query before scoring.
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            result_limit: default_result_limit(),
            min_score: 0,
            scorer: ScorerKind::default(),
            case_matching: CaseMatching::default(),
            unicode_normalization: true,
            debounce_ms: 0,
        }
    }
}

impl SearchConfig {
    /// Returns the config file path within the given data directory.
    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join("fuzzy_search.toml")
    }

    /// Loads config from a TOML file. Returns default config if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validates config values and returns list of validation errors.
    /// Returns empty vec if config is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.min_score > MAX_SCORE {
            errors.push(format!("min_score must be at most {MAX_SCORE}"));
        }

        errors
    }

    /// Returns a validated config, replacing invalid values with defaults.
    pub fn with_defaults_for_invalid(&self) -> Self {
        let defaults = Self::default();
        Self {
            min_score: if self.min_score > MAX_SCORE {
                defaults.min_score
            } else {
                self.min_score
            },
            ..self.clone()
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

fn default_result_limit() -> usize {
    10
}

/// Similarity primitive used to score candidates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorerKind {
    /// Weighted blend of plain, partial and token ratios.
    #[default]
    WeightedRatio,
    Nucleo,
}

impl fmt::Display for ScorerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScorerKind::WeightedRatio => write!(f, "weighted_ratio"),
            ScorerKind::Nucleo => write!(f, "nucleo"),
        }
    }
}

/// Case matching behavior for the nucleo scorer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseMatching {
    /// Always case sensitive.
    Sensitive,
    /// Always case insensitive.
    Insensitive,
    /// Smart case: case-insensitive unless query contains uppercase.
    #[default]
    Smart,
}
