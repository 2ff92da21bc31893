//! Side-by-side lookup of two funds in the clean view

use crate::clean::name_key;
use crate::record::CanonicalFundRecord;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("fund not found: {}", .0.join(", "))]
    NotFound(Vec<String>),
}

/// The two looked-up funds
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundComparison {
    pub fund_a: CanonicalFundRecord,
    pub fund_b: CanonicalFundRecord,
}

/// Find a fund by name, ignoring case and surrounding whitespace
pub fn find_fund<'a>(records: &'a [CanonicalFundRecord], name: &str) -> Option<&'a CanonicalFundRecord> {
    let key = name_key(name);
    records.iter().find(|r| name_key(&r.name) == key)
}

/// Look up two funds; fails naming every fund that is missing
pub fn compare_funds(
    records: &[CanonicalFundRecord],
    fund_a: &str,
    fund_b: &str,
) -> Result<FundComparison, LookupError> {
    match (find_fund(records, fund_a), find_fund(records, fund_b)) {
        (Some(a), Some(b)) => Ok(FundComparison {
            fund_a: a.clone(),
            fund_b: b.clone(),
        }),
        (a, b) => {
            let mut missing = Vec::new();
            if a.is_none() {
                missing.push(fund_a.trim().to_string());
            }
            if b.is_none() {
                missing.push(fund_b.trim().to_string());
            }
            Err(LookupError::NotFound(missing))
        }
    }
}
