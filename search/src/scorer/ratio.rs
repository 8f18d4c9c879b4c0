//! Weighted-ratio string similarity.
//!
//! Candidates and queries are normalized (lowercased, anything that is not a
//! letter or digit becomes a space, then trimmed) and compared with a blend
//! of four ratios:
//!
//! - `ratio`: indel similarity, `200 * lcs / (len_a + len_b)`
//! - `partial_ratio`: best `ratio` of the shorter string against any equally
//!   long window of the longer one
//! - token sort: `ratio` after sorting whitespace separated tokens
//! - token set: `ratio` between the shared tokens and each side's leftovers
//!
//! Partial variants only kick in when one string is at least 1.5x longer than
//! the other, and are scaled down (0.9, or 0.6 past 8x) so that whole matches
//! outrank substring matches.

use super::{QueryScorer, Score, Scorer};
use crate::error::ScoreError;
use std::collections::BTreeSet;

const UNBASE_SCALE: f64 = 0.95;
const PARTIAL_SCALE: f64 = 0.9;
const LONG_PARTIAL_SCALE: f64 = 0.6;

/// The default scorer. Deterministic and infallible.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedRatio;

impl WeightedRatio {
    /// One-off comparison; ranking passes go through [`Scorer::prepare`].
    pub fn score(query: &str, candidate: &str) -> Score {
        weighted_ratio(&normalize(query), &normalize(candidate))
    }
}

impl Scorer for WeightedRatio {
    fn prepare<'a>(&'a self, query: &str) -> Result<Box<dyn QueryScorer + 'a>, ScoreError> {
        Ok(Box::new(PreparedQuery {
            query: normalize(query),
        }))
    }
}

struct PreparedQuery {
    query: Vec<char>,
}

impl QueryScorer for PreparedQuery {
    fn score(&mut self, candidate: &str) -> Result<Score, ScoreError> {
        Ok(weighted_ratio(&self.query, &normalize(candidate)))
    }
}

fn normalize(s: &str) -> Vec<char> {
    let mapped: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .flat_map(char::to_lowercase)
        .collect();
    mapped.trim().chars().collect()
}

fn weighted_ratio(a: &[char], b: &[char]) -> Score {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let len_ratio = long.len() as f64 / short.len() as f64;
    let base = ratio(a, b);

    let best = if len_ratio < 1.5 {
        let token_sort = ratio(&sort_tokens(a), &sort_tokens(b));
        let token_set = token_set(a, b, ratio);
        base.max(token_sort * UNBASE_SCALE)
            .max(token_set * UNBASE_SCALE)
    } else {
        let scale = if len_ratio > 8.0 {
            LONG_PARTIAL_SCALE
        } else {
            PARTIAL_SCALE
        };
        let partial = partial_ratio(a, b);
        let token_sort = partial_ratio(&sort_tokens(a), &sort_tokens(b));
        let token_set = token_set(a, b, partial_ratio);
        base.max(partial * scale)
            .max(token_sort * UNBASE_SCALE * scale)
            .max(token_set * UNBASE_SCALE * scale)
    };

    best.round() as Score
}

fn ratio(a: &[char], b: &[char]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let lcs = lcs_len(a, b);
    200.0 * lcs as f64 / (a.len() + b.len()) as f64
}

fn partial_ratio(a: &[char], b: &[char]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let m = short.len();
    let n = long.len();

    let mut best = 0.0_f64;
    // Windows sliding in from the left edge, across, and out the right edge.
    for start in (1 - m as isize)..(n as isize) {
        let lo = start.max(0) as usize;
        let hi = (start + m as isize).min(n as isize) as usize;
        best = best.max(ratio(short, &long[lo..hi]));
        if best >= 100.0 {
            break;
        }
    }
    best
}

fn token_set(a: &[char], b: &[char], compare: fn(&[char], &[char]) -> f64) -> f64 {
    let tokens_a = tokens(a);
    let tokens_b = tokens(b);

    let shared: Vec<&String> = tokens_a.intersection(&tokens_b).collect();
    let only_a: Vec<&String> = tokens_a.difference(&tokens_b).collect();
    let only_b: Vec<&String> = tokens_b.difference(&tokens_a).collect();

    let sect = join(&shared);
    let combined_a = join_with(&sect, &only_a);
    let combined_b = join_with(&sect, &only_b);

    compare(&sect, &combined_a)
        .max(compare(&sect, &combined_b))
        .max(compare(&combined_a, &combined_b))
}

fn tokens(s: &[char]) -> BTreeSet<String> {
    s.iter()
        .collect::<String>()
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

fn sort_tokens(s: &[char]) -> Vec<char> {
    let text: String = s.iter().collect();
    let mut words: Vec<&str> = text.split_whitespace().collect();
    words.sort_unstable();
    words.join(" ").chars().collect()
}

fn join(words: &[&String]) -> Vec<char> {
    words
        .iter()
        .map(|w| w.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .collect()
}

fn join_with(prefix: &[char], rest: &[&String]) -> Vec<char> {
    let tail = join(rest);
    match (prefix.is_empty(), tail.is_empty()) {
        (true, _) => tail,
        (false, true) => prefix.to_vec(),
        (false, false) => {
            let mut out = prefix.to_vec();
            out.push(' ');
            out.extend(tail);
            out
        }
    }
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}
