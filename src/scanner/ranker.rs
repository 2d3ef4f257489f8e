use std::cmp::Ordering;

use super::momentum::ScoredSymbol;

/// Highest scores first, truncated to `top_n`.
///
/// The sort is stable, so equal scores keep their scan order. NaN scores sort
/// after every real number.
pub fn rank(mut scored: Vec<ScoredSymbol>, top_n: usize) -> Vec<ScoredSymbol> {
    scored.sort_by(|a, b| descending_nan_last(a.score, b.score));
    scored.truncate(top_n);
    scored
}

fn descending_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
