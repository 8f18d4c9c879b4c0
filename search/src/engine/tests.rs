use super::*;
use crate::error::ScoreError;
use common::{catalog_of, engine_with, rank};
use fzpick_core::{CatalogBuilder, CommandBinding};
use std::sync::atomic::{AtomicUsize, Ordering};

mod common {
    use super::*;

    pub(super) fn catalog_of(names: &[&str]) -> CandidateCatalog {
        let mut builder = CatalogBuilder::new();
        for name in names {
            builder.insert(*name, CommandBinding::new(|| {})).unwrap();
        }
        builder.build()
    }

    pub(super) fn engine_with<F>(scorer: F) -> RankingEngine
    where
        F: Fn(&str, &str) -> Result<Score, ScoreError> + Send + Sync + 'static,
    {
        RankingEngine::new(Arc::new(scorer))
    }

    pub(super) fn rank(
        engine: &RankingEngine,
        query: &str,
        catalog: &CandidateCatalog,
        k: usize,
    ) -> Vec<(String, Score)> {
        engine
            .rank(query, catalog, k, &CancelToken::new())
            .unwrap()
            .iter()
            .map(|entry| (entry.name.to_string(), entry.score))
            .collect()
    }
}

mod ranking {
    use super::*;

    fn length_score(_: &str, candidate: &str) -> Result<Score, ScoreError> {
        Ok((candidate.len() as Score * 7) % 10)
    }

    #[test]
    fn test_matches_full_sort_truncated() {
        let names = [
            "a", "bb", "ccc", "dddd", "eeeee", "f", "gg", "hhh", "iiii", "jjjjj", "kkkkkk",
        ];
        let catalog = catalog_of(&names);
        let engine = engine_with(length_score);

        for k in [0, 1, 3, 5, names.len(), names.len() + 4] {
            let mut expected: Vec<(usize, String, Score)> = names
                .iter()
                .enumerate()
                .map(|(i, n)| (i, n.to_string(), length_score("", n).unwrap()))
                .collect();
            // Stable sort keeps catalog order among equal scores.
            expected.sort_by(|a, b| b.2.cmp(&a.2));
            let expected: Vec<(String, Score)> = expected
                .into_iter()
                .take(k)
                .map(|(_, n, s)| (n, s))
                .collect();

            assert_eq!(rank(&engine, "q", &catalog, k), expected, "k = {k}");
        }
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let catalog = catalog_of(&["first", "second", "third", "fourth"]);
        let engine = engine_with(|_: &str, _: &str| Ok(50));

        let ranked = rank(&engine, "q", &catalog, 2);

        assert_eq!(
            ranked,
            [("first".to_string(), 50), ("second".to_string(), 50)]
        );
    }

    #[test]
    fn test_reference_scenario() {
        let catalog = catalog_of(&["OpenFile", "CloseFile", "SaveAs", "Open"]);
        let engine = RankingEngine::from_config(&SearchConfig::default());

        let ranked = rank(&engine, "open", &catalog, 2);

        assert_eq!(
            ranked,
            [("Open".to_string(), 100), ("OpenFile".to_string(), 90)]
        );
    }

    #[test]
    fn test_min_score_filters_results() {
        let catalog = catalog_of(&["OpenFile", "CloseFile", "SaveAs", "Open"]);
        let engine = RankingEngine::from_config(&SearchConfig::default()).with_min_score(90);

        let ranked = rank(&engine, "open", &catalog, 10);

        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|(_, score)| *score >= 90));
    }

    #[test]
    fn test_repeated_query_is_deterministic() {
        let catalog = catalog_of(&["OpenFile", "CloseFile", "SaveAs", "Open", "Options"]);
        let engine = RankingEngine::from_config(&SearchConfig::default());

        let first = rank(&engine, "opn", &catalog, 3);
        let second = rank(&engine, "opn", &catalog, 3);

        assert_eq!(first, second);
    }
}

mod empty_query {
    use super::*;

    #[test]
    fn test_empty_query_skips_scoring() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let engine = engine_with(move |_: &str, _: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(100)
        });
        let catalog = catalog_of(&["a", "b"]);

        let result = engine.rank("", &catalog, 10, &CancelToken::new()).unwrap();

        assert!(result.is_empty());
        assert_eq!(result.query(), "");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}

mod cancellation {
    use super::*;

    #[test]
    fn test_cancelled_before_start_scores_nothing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let engine = engine_with(move |_: &str, _: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(100)
        });
        let catalog = catalog_of(&["a", "b"]);
        let cancel = CancelToken::new();
        cancel.cancel();

        let result = engine.rank("a", &catalog, 10, &cancel);

        assert_eq!(result, Err(RankInterrupt::Cancelled));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_cancel_mid_pass_stops_at_next_candidate() {
        let names: Vec<String> = (0..100).map(|i| format!("c{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let catalog = catalog_of(&refs);

        let cancel = CancelToken::new();
        let trigger = cancel.clone();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let engine = engine_with(move |_: &str, candidate: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            if candidate == "c5" {
                trigger.cancel();
            }
            Ok(10)
        });

        let result = engine.rank("c", &catalog, 10, &cancel);

        assert_eq!(result, Err(RankInterrupt::Cancelled));
        assert_eq!(calls.load(Ordering::SeqCst), 6);
    }
}

mod errors {
    use super::*;

    #[test]
    fn test_scoring_error_aborts_pass() {
        let engine = engine_with(|_: &str, candidate: &str| {
            if candidate == "bad" {
                Err(ScoreError::MalformedCandidate {
                    candidate: candidate.to_owned(),
                    reason: "unscorable".to_owned(),
                })
            } else {
                Ok(10)
            }
        });
        let catalog = catalog_of(&["good", "bad", "other"]);

        let result = engine.rank("q", &catalog, 10, &CancelToken::new());

        assert!(matches!(result, Err(RankInterrupt::Scoring(_))));
    }

    #[test]
    fn test_zero_scores_are_results_not_cancellation() {
        let engine = engine_with(|_: &str, _: &str| Ok(0));
        let catalog = catalog_of(&["a", "b"]);

        let ranked = rank(&engine, "q", &catalog, 10);

        assert_eq!(ranked, [("a".to_string(), 0), ("b".to_string(), 0)]);
    }
}
