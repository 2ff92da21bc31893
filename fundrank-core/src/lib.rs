//! fundrank core library - cleaning, risk classification and ranking of mutual fund records

// Global invariants enforced in this crate:
// - Malformed field content never produces an error; it degrades to missing/"Unknown"
// - Only input that is not an array of objects is rejected
// - No global mutable state; every call works on its own input snapshot
// - Pipeline stages perform no I/O (the dataset module is the only file access)
// - Identical input yields identical output ordering

pub mod category;
pub mod clean;
pub mod compare;
pub mod config;
pub mod dataset;
pub mod parse;
pub mod rank;
pub mod record;
pub mod report;
pub mod risk;
pub mod scoring;

pub use clean::clean_records;
pub use config::ResolvedConfig;
pub use rank::{rank, DEFAULT_TOP_N};
pub use record::{
    parse_raw_records, CanonicalFundRecord, IngestError, RankedFund, RawFundRecord, RawValue,
    ScoredFundRecord,
};
pub use report::{render_clean_json, render_clean_text, render_csv, render_json, render_text};
pub use risk::{classify_risk, RiskLevel};
pub use scoring::{score_records, Imputation, ScoringConfig, ScoringWeights};

/// Score already-cleaned records and keep the best `top_n`
pub fn rank_clean(
    records: Vec<CanonicalFundRecord>,
    top_n: i64,
    config: &ScoringConfig,
) -> Vec<ScoredFundRecord> {
    let scored = score_records(records, config);
    let ranked = rank(scored, top_n);
    tracing::debug!(ranked = ranked.len(), top_n, "ranked fund records");
    ranked
}

/// Full pipeline: clean, deduplicate, score and rank raw records
pub fn rank_funds(raw: &[RawFundRecord], top_n: i64, config: &ScoringConfig) -> Vec<ScoredFundRecord> {
    rank_clean(clean_records(raw), top_n, config)
}

/// Full pipeline starting from a JSON dataset value
pub fn rank_json(
    dataset: &serde_json::Value,
    top_n: i64,
    config: &ScoringConfig,
) -> Result<Vec<ScoredFundRecord>, IngestError> {
    let raw = parse_raw_records(dataset)?;
    Ok(rank_funds(&raw, top_n, config))
}

/// Clean view starting from a JSON dataset value
pub fn clean_json(dataset: &serde_json::Value) -> Result<Vec<CanonicalFundRecord>, IngestError> {
    let raw = parse_raw_records(dataset)?;
    Ok(clean_records(&raw))
}
