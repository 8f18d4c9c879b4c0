use super::{QueryScorer, Score, Scorer};
use crate::error::ScoreError;
use fzpick_core::{CaseMatching, MAX_SCORE, SearchConfig};
use nucleo::pattern::{AtomKind, CaseMatching as NucleoCaseMatching, Normalization, Pattern};
use nucleo::{Config as NucleoConfig, Matcher, Utf32Str};

/// Subsequence matching with nucleo, rescaled to `0..=100` against the
/// score the query earns when matched against itself.
#[derive(Debug, Clone, Copy)]
pub struct NucleoScorer {
    case_matching: NucleoCaseMatching,
    normalization: Normalization,
}

impl Default for NucleoScorer {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}

impl NucleoScorer {
    pub fn from_config(config: &SearchConfig) -> Self {
        let case_matching = match config.case_matching {
            CaseMatching::Sensitive => NucleoCaseMatching::Respect,
            CaseMatching::Insensitive => NucleoCaseMatching::Ignore,
            CaseMatching::Smart => NucleoCaseMatching::Smart,
        };

        let normalization = if config.unicode_normalization {
            Normalization::Smart
        } else {
            Normalization::Never
        };

        Self {
            case_matching,
            normalization,
        }
    }
}

impl Scorer for NucleoScorer {
    fn prepare<'a>(&'a self, query: &str) -> Result<Box<dyn QueryScorer + 'a>, ScoreError> {
        // Literal atoms: no `^`, `$`, `!` or `'` syntax in command lookup.
        let pattern = Pattern::new(
            query,
            self.case_matching,
            self.normalization,
            AtomKind::Fuzzy,
        );
        let mut matcher = Matcher::new(NucleoConfig::DEFAULT);
        let mut buf = Vec::new();
        let perfect = pattern
            .score(Utf32Str::new(query, &mut buf), &mut matcher)
            .unwrap_or(0);

        Ok(Box::new(NucleoQuery {
            pattern,
            matcher,
            buf,
            perfect,
        }))
    }
}

struct NucleoQuery {
    pattern: Pattern,
    matcher: Matcher,
    buf: Vec<char>,
    perfect: u32,
}

impl QueryScorer for NucleoQuery {
    fn score(&mut self, candidate: &str) -> Result<Score, ScoreError> {
        if self.perfect == 0 {
            return Ok(0);
        }
        let haystack = Utf32Str::new(candidate, &mut self.buf);
        let raw = self
            .pattern
            .score(haystack, &mut self.matcher)
            .unwrap_or(0);

        let scaled = u64::from(raw) * u64::from(MAX_SCORE) / u64::from(self.perfect);
        Ok(scaled.min(u64::from(MAX_SCORE)) as Score)
    }
}
