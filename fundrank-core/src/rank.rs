//! Ranking of scored funds
//!
//! Global invariants enforced:
//! - Output is non-increasing by score
//! - Equal scores keep their input order (stable sort)

use crate::record::ScoredFundRecord;

/// Number of funds shown when the caller does not ask for a count
pub const DEFAULT_TOP_N: i64 = 10;

/// Sort by score descending and keep the first `top_n`.
///
/// `top_n <= 0`, or a value past the end, keeps every record.
pub fn rank(mut scored: Vec<ScoredFundRecord>, top_n: i64) -> Vec<ScoredFundRecord> {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    let keep = effective_len(top_n, scored.len());
    scored.truncate(keep);
    scored
}

/// How many records a `top_n` request yields out of `available`
pub fn effective_len(top_n: i64, available: usize) -> usize {
    match usize::try_from(top_n) {
        Ok(n) if n > 0 => n.min(available),
        _ => available,
    }
}
