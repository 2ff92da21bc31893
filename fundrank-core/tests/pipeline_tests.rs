//! End-to-end tests for the clean and rank pipeline over fixture datasets

use fundrank_core::{
    clean_json, rank_json, render_csv, CanonicalFundRecord, Imputation, RiskLevel, ScoringConfig,
    DEFAULT_TOP_N,
};
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("tests")
        .join("fixtures")
        .join("funds")
        .join(name)
}

fn load_fixture(name: &str) -> serde_json::Value {
    let content = std::fs::read_to_string(fixture_path(name)).unwrap();
    serde_json::from_str(&content).unwrap()
}

fn find<'a>(records: &'a [CanonicalFundRecord], name: &str) -> &'a CanonicalFundRecord {
    records
        .iter()
        .find(|r| r.name == name)
        .unwrap_or_else(|| panic!("missing fund {name}"))
}

#[test]
fn test_two_funds_clean_view() {
    let cleaned = clean_json(&load_fixture("two_funds.json")).unwrap();
    assert_eq!(cleaned.len(), 2);

    assert_eq!(cleaned[0].name, "A Fund");
    assert_eq!(cleaned[0].category, "Equity");
    assert_eq!(cleaned[0].risk, RiskLevel::VeryHigh);
    assert_eq!(cleaned[0].cagr, Some(30.0));

    assert_eq!(cleaned[1].name, "B Fund");
    assert_eq!(cleaned[1].category, "Debt");
    assert_eq!(cleaned[1].risk, RiskLevel::Low);
    assert_eq!(cleaned[1].one_year_return, None);
}

#[test]
fn test_two_funds_ranking() {
    let ranked = rank_json(&load_fixture("two_funds.json"), 2, &ScoringConfig::default()).unwrap();
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].record.name, "A Fund");
    assert_eq!(ranked[1].record.name, "B Fund");
    assert!(ranked[0].score > ranked[1].score);
    // The one-year column has a single value, so it contributes nothing
    assert!((ranked[0].score - 0.8).abs() < 1e-9);
    assert_eq!(ranked[1].score, 0.0);
}

#[test]
fn test_scraped_sample_dedup_keeps_first() {
    let cleaned = clean_json(&load_fixture("scraped_sample.json")).unwrap();
    assert_eq!(cleaned.len(), 10);

    let quant = find(&cleaned, "Quant Small Cap Fund Direct Plan Growth");
    assert_eq!(quant.cagr, Some(44.6));
    assert_eq!(quant.one_year_return, Some(18.4));
    assert_eq!(quant.category, "Equity");
    assert!(cleaned.iter().all(|r| r.cagr != Some(99.0)));
}

#[test]
fn test_scraped_sample_categories_and_risk() {
    let cleaned = clean_json(&load_fixture("scraped_sample.json")).unwrap();

    let expected = [
        ("Parag Parikh Flexi Cap Fund Direct Growth", "Flexi Cap", RiskLevel::High),
        ("HDFC Balanced Advantage Fund Direct Plan Growth", "Hybrid", RiskLevel::Moderate),
        ("SBI Liquid Fund Direct Growth", "Debt", RiskLevel::Low),
        ("Nippon India Gold Savings Fund Direct Growth", "Commodities", RiskLevel::VeryHigh),
        ("New Fund Offer Direct Growth", "Unknown", RiskLevel::Unknown),
        ("ICICI Prudential Bluechip Fund Direct Growth", "Large Cap", RiskLevel::ModeratelyHigh),
        ("Mirae Asset ELSS Tax Saver Fund Direct Growth", "Equity", RiskLevel::VeryHigh),
        ("ICICI Prudential Technology Fund Direct Growth", "Sectoral/Thematic", RiskLevel::VeryHigh),
        ("", "Debt", RiskLevel::Low),
    ];
    for (name, category, risk) in expected {
        let record = find(&cleaned, name);
        assert_eq!(record.category, category, "{name}");
        assert_eq!(record.risk, risk, "{name}");
    }
}

#[test]
fn test_scraped_sample_numeric_fields() {
    let cleaned = clean_json(&load_fixture("scraped_sample.json")).unwrap();

    let gold = find(&cleaned, "Nippon India Gold Savings Fund Direct Growth");
    assert_eq!(gold.cagr, None);
    assert_eq!(gold.expense_ratio, None);
    assert_eq!(gold.aum, Some(2431.0));

    let bluechip = find(&cleaned, "ICICI Prudential Bluechip Fund Direct Growth");
    assert_eq!(bluechip.three_year_return, Some(17.9));
    assert_eq!(bluechip.aum, Some(63241.0));

    let nfo = find(&cleaned, "New Fund Offer Direct Growth");
    assert_eq!(nfo.one_year_return, None);
    assert_eq!(nfo.three_year_return, None);
    assert_eq!(nfo.cagr, None);
}

#[test]
fn test_scraped_sample_top_three() {
    let ranked = rank_json(&load_fixture("scraped_sample.json"), 3, &ScoringConfig::default()).unwrap();
    let names: Vec<&str> = ranked.iter().map(|s| s.record.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Quant Small Cap Fund Direct Plan Growth",
            "Parag Parikh Flexi Cap Fund Direct Growth",
            "HDFC Balanced Advantage Fund Direct Plan Growth",
        ]
    );
    assert!((ranked[0].score - 0.895).abs() < 1e-9);
}

#[test]
fn test_scraped_sample_ties_keep_input_order() {
    let ranked = rank_json(&load_fixture("scraped_sample.json"), 0, &ScoringConfig::default()).unwrap();
    assert_eq!(ranked.len(), 10);

    // Both funds without any usable value score 0; input order decides
    let tail: Vec<&str> = ranked[8..].iter().map(|s| s.record.name.as_str()).collect();
    assert_eq!(tail, vec!["New Fund Offer Direct Growth", ""]);
}

#[test]
fn test_mean_imputation_changes_missing_five_year() {
    let dataset = load_fixture("scraped_sample.json");
    let minimum = rank_json(&dataset, 0, &ScoringConfig::default()).unwrap();
    let mean = rank_json(
        &dataset,
        0,
        &ScoringConfig {
            imputation: Imputation::ColumnMean,
            ..Default::default()
        },
    )
    .unwrap();

    let gold_score = |ranked: &[fundrank_core::ScoredFundRecord]| {
        ranked
            .iter()
            .find(|s| s.record.name.starts_with("Nippon India Gold"))
            .map(|s| s.score)
            .unwrap()
    };
    assert!(gold_score(&mean) > gold_score(&minimum));
}

#[test]
fn test_default_top_n_export() {
    let ranked = rank_json(
        &load_fixture("scraped_sample.json"),
        DEFAULT_TOP_N,
        &ScoringConfig::default(),
    )
    .unwrap();
    let csv = render_csv(&ranked).unwrap();
    assert_eq!(csv.lines().count(), 11);
    assert!(csv
        .lines()
        .nth(1)
        .unwrap()
        .starts_with("Quant Small Cap Fund Direct Plan Growth,Equity,Very High Risk,"));
}
