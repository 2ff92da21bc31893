//! Composite fund scoring
//!
//! Each return column is min-max normalized across the whole record set and
//! the normalized columns are combined with fixed weights.
//!
//! Global invariants enforced:
//! - Scoring needs the complete record set (whole-column statistics)
//! - A column with no values or no variance contributes 0 to every record
//! - Missing values never score above the worst value seen (default imputation)
//! - Weights are scaled to sum to 1, so every score lies in [0, 1]

use crate::record::{CanonicalFundRecord, ScoredFundRecord};
use serde::{Deserialize, Serialize};

/// Weights applied to the normalized return columns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub five_year: f64,
    pub three_year: f64,
    pub one_year: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        ScoringWeights {
            five_year: 0.5,
            three_year: 0.3,
            one_year: 0.2,
        }
    }
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.five_year + self.three_year + self.one_year
    }

    /// Scale the weights so they sum to 1.
    ///
    /// Weights with a zero, negative or non-finite sum are returned unchanged.
    pub fn normalized(&self) -> ScoringWeights {
        let sum = self.sum();
        if !(sum > 0.0 && sum.is_finite()) {
            return *self;
        }
        ScoringWeights {
            five_year: self.five_year / sum,
            three_year: self.three_year / sum,
            one_year: self.one_year / sum,
        }
    }
}

/// How a missing value is filled before normalization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Imputation {
    /// Treat missing as the worst value seen in the column
    #[default]
    ColumnMinimum,
    /// Treat missing as the column average
    ColumnMean,
}

impl Imputation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Imputation::ColumnMinimum => "column-minimum",
            Imputation::ColumnMean => "column-mean",
        }
    }
}

/// Scoring parameters
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
    pub imputation: Imputation,
}

/// Weighted per-column contributions to a composite score
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub five_year: f64,
    pub three_year: f64,
    pub one_year: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.five_year + self.three_year + self.one_year
    }
}

/// Min-max normalize one column, imputing missing values first.
///
/// Returns one value in [0, 1] per input slot.
pub fn normalize_column(values: &[Option<f64>], imputation: Imputation) -> Vec<f64> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return vec![0.0; values.len()];
    }

    let fill = match imputation {
        Imputation::ColumnMinimum => present.iter().copied().fold(f64::INFINITY, f64::min),
        Imputation::ColumnMean => present.iter().sum::<f64>() / present.len() as f64,
    };
    let filled: Vec<f64> = values.iter().map(|v| v.unwrap_or(fill)).collect();

    let min = filled.iter().copied().fold(f64::INFINITY, f64::min);
    let max = filled.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if !(range > 0.0 && range.is_finite()) {
        return vec![0.0; values.len()];
    }

    filled.iter().map(|v| (v - min) / range).collect()
}

/// Per-record weighted contributions, or `None` for an empty record set
pub fn compute_breakdowns(
    records: &[CanonicalFundRecord],
    config: &ScoringConfig,
) -> Option<Vec<ScoreBreakdown>> {
    if records.is_empty() {
        return None;
    }

    let column = |get: fn(&CanonicalFundRecord) -> Option<f64>| {
        let values: Vec<Option<f64>> = records.iter().map(get).collect();
        normalize_column(&values, config.imputation)
    };
    let five_year = column(|r| r.cagr);
    let three_year = column(|r| r.three_year_return);
    let one_year = column(|r| r.one_year_return);

    let w = config.weights.normalized();
    Some(
        (0..records.len())
            .map(|i| ScoreBreakdown {
                five_year: w.five_year * five_year[i],
                three_year: w.three_year * three_year[i],
                one_year: w.one_year * one_year[i],
            })
            .collect(),
    )
}

/// Composite score per record, or `None` for an empty record set
pub fn compute_scores(records: &[CanonicalFundRecord], config: &ScoringConfig) -> Option<Vec<f64>> {
    compute_breakdowns(records, config)
        .map(|breakdowns| breakdowns.iter().map(ScoreBreakdown::total).collect())
}

/// Attach composite scores to canonical records, keeping their order
pub fn score_records(
    records: Vec<CanonicalFundRecord>,
    config: &ScoringConfig,
) -> Vec<ScoredFundRecord> {
    let breakdowns = match compute_breakdowns(&records, config) {
        Some(breakdowns) => breakdowns,
        None => return Vec::new(),
    };

    records
        .into_iter()
        .zip(breakdowns)
        .map(|(record, breakdown)| ScoredFundRecord {
            record,
            score: breakdown.total(),
            breakdown,
        })
        .collect()
}
