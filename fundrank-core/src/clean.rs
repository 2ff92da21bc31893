//! Record cleaning and deduplication
//!
//! Global invariants enforced:
//! - Per-record cleaning has no cross-record dependency
//! - Deduplication runs only after every record is cleaned
//! - First occurrence wins; survivors keep their input order

use crate::category::normalize_category;
use crate::parse::{parse_number, parse_percent};
use crate::record::{CanonicalFundRecord, RawFundRecord};
use crate::risk::{classify_risk, RiskLevel};
use rayon::prelude::*;
use std::collections::HashSet;

/// Clean one raw record into its canonical form
pub fn clean_record(raw: &RawFundRecord) -> CanonicalFundRecord {
    let name = raw
        .name
        .as_ref()
        .map(|n| n.as_text().trim().to_string())
        .unwrap_or_default();

    let normalized = normalize_category(raw.category.as_ref());
    // Label text keeps cap-size detail the canonical category loses
    let risk = match classify_risk(&normalized.label) {
        RiskLevel::Unknown => classify_risk(&normalized.category),
        level => level,
    };

    CanonicalFundRecord {
        name,
        category: normalized.category,
        risk,
        one_year_return_raw: raw.one_year_return.clone(),
        three_year_return_raw: raw.three_year_return.clone(),
        five_year_return_raw: raw.five_year_return.clone(),
        expense_ratio_raw: raw.expense_ratio.clone(),
        aum_raw: raw.aum.clone(),
        one_year_return: parse_percent(raw.one_year_return.as_ref()),
        three_year_return: parse_percent(raw.three_year_return.as_ref()),
        cagr: parse_percent(raw.five_year_return.as_ref()),
        expense_ratio: parse_number(raw.expense_ratio.as_ref()),
        aum: parse_number(raw.aum.as_ref()),
    }
}

/// Clean a raw dataset into the canonical full view
pub fn clean_records(raw: &[RawFundRecord]) -> Vec<CanonicalFundRecord> {
    let cleaned: Vec<CanonicalFundRecord> = raw.par_iter().map(clean_record).collect();
    let total = cleaned.len();
    let unique = dedup_by_name(cleaned);

    tracing::debug!(
        records = total,
        unique = unique.len(),
        duplicates = total - unique.len(),
        "cleaned fund records"
    );
    unique
}

/// Identity key used for deduplication
pub fn name_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Drop every record whose name key was already seen
pub fn dedup_by_name(records: Vec<CanonicalFundRecord>) -> Vec<CanonicalFundRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|record| seen.insert(name_key(&record.name)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RawValue;

    fn raw(name: &str, category: &str) -> RawFundRecord {
        RawFundRecord {
            name: Some(RawValue::from(name)),
            category: Some(RawValue::from(category)),
            ..Default::default()
        }
    }

    #[test]
    fn test_clean_record_fields() {
        let record = clean_record(&RawFundRecord {
            name: Some(RawValue::from("  Alpha Small Cap Fund ")),
            category: Some(RawValue::from("Very High Risk • Small Cap • 5")),
            one_year_return: Some(RawValue::from("10%")),
            three_year_return: Some(RawValue::from("NA")),
            five_year_return: Some(RawValue::from(30.0)),
            expense_ratio: Some(RawValue::from("0.65%")),
            aum: Some(RawValue::from("12,500")),
        });

        assert_eq!(record.name, "Alpha Small Cap Fund");
        assert_eq!(record.category, "Equity");
        assert_eq!(record.risk, RiskLevel::VeryHigh);
        assert_eq!(record.one_year_return, Some(10.0));
        assert_eq!(record.three_year_return, None);
        assert_eq!(record.three_year_return_raw, Some(RawValue::from("NA")));
        assert_eq!(record.cagr, Some(30.0));
        assert_eq!(record.expense_ratio, Some(0.65));
        assert_eq!(record.aum, Some(12500.0));
    }

    #[test]
    fn test_risk_uses_label_before_mapping() {
        let mid = clean_record(&raw("M", "High Risk • Mid Cap • 4"));
        assert_eq!(mid.category, "Equity");
        assert_eq!(mid.risk, RiskLevel::High);
    }

    #[test]
    fn test_risk_falls_back_to_canonical_category() {
        let gold = clean_record(&raw("G", "High Risk • Gold • 2"));
        assert_eq!(gold.category, "Commodities");
        assert_eq!(gold.risk, RiskLevel::VeryHigh);

        let elss = clean_record(&raw("T", "Tax Saver Fund"));
        assert_eq!(elss.category, "Equity");
        assert_eq!(elss.risk, RiskLevel::VeryHigh);
    }

    #[test]
    fn test_empty_record_defaults() {
        let record = clean_record(&RawFundRecord::default());
        assert_eq!(record.name, "");
        assert_eq!(record.category, "Unknown");
        assert_eq!(record.risk, RiskLevel::Unknown);
        assert_eq!(record.cagr, None);
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let cleaned = clean_records(&[
            raw("ABC Fund", "Debt"),
            raw("XYZ Fund", "Hybrid"),
            raw(" abc fund ", "Equity"),
        ]);
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned[0].name, "ABC Fund");
        assert_eq!(cleaned[0].category, "Debt");
        assert_eq!(cleaned[1].name, "XYZ Fund");
    }

    #[test]
    fn test_dedup_collapses_inner_whitespace() {
        let cleaned = clean_records(&[raw("ABC  Growth Fund", "Debt"), raw("abc growth fund", "Debt")]);
        assert_eq!(cleaned.len(), 1);
    }

    #[test]
    fn test_clean_preserves_input_order() {
        let input: Vec<RawFundRecord> = (0..50).map(|i| raw(&format!("Fund {i}"), "Debt")).collect();
        let cleaned = clean_records(&input);
        let names: Vec<String> = cleaned.iter().map(|r| r.name.clone()).collect();
        let expected: Vec<String> = (0..50).map(|i| format!("Fund {i}")).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_clean_empty_input() {
        assert!(clean_records(&[]).is_empty());
    }
}
