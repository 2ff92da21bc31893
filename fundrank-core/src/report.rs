//! Output rendering for the clean, ranked and export views
//!
//! Global invariants enforced:
//! - Output order is the order of the records passed in
//! - The export header row is fixed and always written

use crate::record::{CanonicalFundRecord, RankedFund, RawValue, ScoredFundRecord, RANKED_FIELDS};
use anyhow::{Context, Result};

/// Build the ranked/export view from scored records
pub fn ranked_view(scored: &[ScoredFundRecord]) -> Vec<RankedFund> {
    scored.iter().map(RankedFund::from).collect()
}

/// Render the ranked view as an aligned text table
pub fn render_text(scored: &[ScoredFundRecord]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<4} {:<8} {:<36} {:<14} {:<21} {:>8} {:>8} {:>8}  {}\n",
        "#", "SCORE", "NAME", "CATEGORY", "RISK", "1Y", "3Y", "5Y", "BREAKDOWN (5Y/3Y/1Y)"
    ));

    for (i, s) in scored.iter().enumerate() {
        let r = &s.record;
        output.push_str(&format!(
            "{:<4} {:<8} {:<36} {:<14} {:<21} {:>8} {:>8} {:>8}  {:.3}/{:.3}/{:.3}\n",
            i + 1,
            format!("{:.4}", s.score),
            truncate_or_pad(&r.name, 36),
            truncate_or_pad(&r.category, 14),
            r.risk.as_str(),
            display_raw(r.one_year_return_raw.as_ref()),
            display_raw(r.three_year_return_raw.as_ref()),
            display_raw(r.five_year_return_raw.as_ref()),
            s.breakdown.five_year,
            s.breakdown.three_year,
            s.breakdown.one_year,
        ));
    }

    output
}

/// Render the full clean view as an aligned text table
pub fn render_clean_text(records: &[CanonicalFundRecord]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<36} {:<14} {:<21} {:>8} {:>8} {:>8} {:>8} {:>12}\n",
        "NAME", "CATEGORY", "RISK", "1Y", "3Y", "CAGR", "EXPENSE", "AUM"
    ));

    for r in records {
        output.push_str(&format!(
            "{:<36} {:<14} {:<21} {:>8} {:>8} {:>8} {:>8} {:>12}\n",
            truncate_or_pad(&r.name, 36),
            truncate_or_pad(&r.category, 14),
            r.risk.as_str(),
            display_number(r.one_year_return),
            display_number(r.three_year_return),
            display_number(r.cagr),
            display_number(r.expense_ratio),
            display_number(r.aum),
        ));
    }

    output
}

/// Render the full clean view as JSON
pub fn render_clean_json(records: &[CanonicalFundRecord]) -> String {
    serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string())
}

/// Render the ranked view as JSON
pub fn render_json(scored: &[ScoredFundRecord]) -> String {
    serde_json::to_string_pretty(&ranked_view(scored)).unwrap_or_else(|_| "[]".to_string())
}

/// Render the ranked view as CSV with a fixed header row
pub fn render_csv(scored: &[ScoredFundRecord]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer
        .write_record(RANKED_FIELDS)
        .context("failed to write CSV header")?;
    for fund in ranked_view(scored) {
        writer
            .serialize(&fund)
            .with_context(|| format!("failed to write CSV row for {}", fund.name))?;
    }

    let bytes = writer.into_inner().context("failed to flush CSV output")?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

fn display_raw(value: Option<&RawValue>) -> String {
    match value {
        Some(v) => v.as_text().replace('\n', " ").trim().to_string(),
        None => "-".to_string(),
    }
}

fn display_number(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}

/// Truncate or pad string to fixed width
fn truncate_or_pad(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let head: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        format!("{:<width$}", s, width = width)
    }
}
