//! Fund record types
//!
//! Global invariants enforced:
//! - Raw records are never trusted: every field is optional and loosely typed
//! - Canonical records always carry a category and a risk label
//! - Missing numbers are `None`, never a sentinel float

use crate::risk::RiskLevel;
use crate::scoring::ScoreBreakdown;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A single loosely-typed field value as produced by the acquisition layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Convert a JSON value into a raw field value.
    ///
    /// `null` is absent. Strings and numbers keep their type; anything else
    /// is kept as its JSON text.
    pub fn from_json(value: &Value) -> Option<RawValue> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(RawValue::Text(s.clone())),
            Value::Number(n) => match n.as_f64() {
                Some(f) => Some(RawValue::Number(f)),
                None => Some(RawValue::Text(n.to_string())),
            },
            other => Some(RawValue::Text(other.to_string())),
        }
    }

    /// Display form of the value
    pub fn as_text(&self) -> String {
        match self {
            RawValue::Text(s) => s.clone(),
            RawValue::Number(n) => n.to_string(),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

/// Input contract violations
///
/// These indicate a caller bug, not bad data content: fund data that is
/// merely messy never produces an error.
#[derive(Debug, Error, PartialEq)]
pub enum IngestError {
    #[error("fund dataset must be a JSON array (got {found})")]
    NotAnArray { found: &'static str },
    #[error("fund record at index {index} must be a JSON object (got {found})")]
    NotAnObject { index: usize, found: &'static str },
}

/// Fund record as delivered by the acquisition collaborator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFundRecord {
    #[serde(default)]
    pub name: Option<RawValue>,
    #[serde(default)]
    pub category: Option<RawValue>,
    #[serde(default)]
    pub one_year_return: Option<RawValue>,
    #[serde(default)]
    pub three_year_return: Option<RawValue>,
    #[serde(default)]
    pub five_year_return: Option<RawValue>,
    #[serde(default)]
    pub expense_ratio: Option<RawValue>,
    #[serde(default)]
    pub aum: Option<RawValue>,
}

impl RawFundRecord {
    /// Build a raw record from one JSON element of the dataset.
    ///
    /// Unknown keys are ignored and missing keys are absent. The element
    /// itself must be an object.
    pub fn from_json(index: usize, value: &Value) -> Result<Self, IngestError> {
        let object = value.as_object().ok_or_else(|| IngestError::NotAnObject {
            index,
            found: json_kind(value),
        })?;
        let field = |key: &str| object.get(key).and_then(RawValue::from_json);

        Ok(RawFundRecord {
            name: field("name"),
            category: field("category"),
            one_year_return: field("one_year_return"),
            three_year_return: field("three_year_return"),
            five_year_return: field("five_year_return"),
            expense_ratio: field("expense_ratio"),
            aum: field("aum"),
        })
    }
}

/// Parse a whole dataset (a JSON array of objects) into raw records
pub fn parse_raw_records(value: &Value) -> Result<Vec<RawFundRecord>, IngestError> {
    let items = value.as_array().ok_or_else(|| IngestError::NotAnArray {
        found: json_kind(value),
    })?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| RawFundRecord::from_json(index, item))
        .collect()
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Cleaned, classified fund record (full clean view)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalFundRecord {
    pub name: String,
    pub category: String,
    pub risk: RiskLevel,
    pub one_year_return_raw: Option<RawValue>,
    pub three_year_return_raw: Option<RawValue>,
    pub five_year_return_raw: Option<RawValue>,
    pub expense_ratio_raw: Option<RawValue>,
    pub aum_raw: Option<RawValue>,
    pub one_year_return: Option<f64>,
    pub three_year_return: Option<f64>,
    /// Five-year return, used as the CAGR column
    pub cagr: Option<f64>,
    pub expense_ratio: Option<f64>,
    pub aum: Option<f64>,
}

/// Canonical record paired with its composite score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredFundRecord {
    #[serde(flatten)]
    pub record: CanonicalFundRecord,
    pub score: f64,
    #[serde(skip, default)]
    pub breakdown: ScoreBreakdown,
}

/// Ranked/export view of a scored fund
///
/// Field order is the export column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedFund {
    pub name: String,
    pub category: String,
    pub risk: RiskLevel,
    pub one_year_return: Option<RawValue>,
    pub three_year_return: Option<RawValue>,
    pub cagr: Option<RawValue>,
    pub expense_ratio: Option<RawValue>,
    pub aum: Option<RawValue>,
    pub score: f64,
}

/// Column header of the ranked/export view
pub const RANKED_FIELDS: &[&str] = &[
    "name",
    "category",
    "risk",
    "one_year_return",
    "three_year_return",
    "cagr",
    "expense_ratio",
    "aum",
    "score",
];

impl From<&ScoredFundRecord> for RankedFund {
    fn from(scored: &ScoredFundRecord) -> Self {
        let r = &scored.record;
        RankedFund {
            name: r.name.clone(),
            category: r.category.clone(),
            risk: r.risk,
            one_year_return: r.one_year_return_raw.clone(),
            three_year_return: r.three_year_return_raw.clone(),
            cagr: r.five_year_return_raw.clone(),
            expense_ratio: r.expense_ratio_raw.clone(),
            aum: r.aum_raw.clone(),
            score: scored.score,
        }
    }
}
