use fzpick_core::{CaseMatching, ScorerKind, SearchConfig};
use tempfile::TempDir;

#[test]
fn test_load_missing_file_returns_defaults() {
    let temp = TempDir::new().unwrap();
    let path = SearchConfig::path(temp.path());

    let config = SearchConfig::load(&path).unwrap();

    assert_eq!(config, SearchConfig::default());
}

#[test]
fn test_save_then_load_preserves_values() {
    let temp = TempDir::new().unwrap();
    let path = SearchConfig::path(temp.path());
    let config = SearchConfig {
        result_limit: 25,
        min_score: 40,
        scorer: ScorerKind::Nucleo,
        case_matching: CaseMatching::Insensitive,
        unicode_normalization: false,
        debounce_ms: 30,
    };

    config.save(&path).unwrap();
    let loaded = SearchConfig::load(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn test_load_rejects_malformed_toml() {
    let temp = TempDir::new().unwrap();
    let path = SearchConfig::path(temp.path());
    std::fs::write(&path, "result_limit = \"ten\"").unwrap();

    let result = SearchConfig::load(&path);

    assert!(matches!(result, Err(fzpick_core::ConfigError::Parse(_))));
}
