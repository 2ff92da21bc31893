//! Configuration file support for fundrank
//!
//! Loads scoring and output settings from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.fundrankrc.json` in the working directory
//! 3. `fundrank.config.json` in the working directory
//!
//! All fields are optional. CLI flags take precedence over config file values.

use crate::rank::DEFAULT_TOP_N;
use crate::scoring::{Imputation, ScoringConfig, ScoringWeights};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the persisted latest dataset
pub const DEFAULT_DATASET_PATH: &str = "data/data.json";

/// Config file names, in discovery order
const CONFIG_FILE_NAMES: &[&str] = &[".fundrankrc.json", "fundrank.config.json"];

/// fundrank configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FundrankConfig {
    /// Custom column weights for the composite score
    #[serde(default)]
    pub weights: Option<WeightConfig>,

    /// Missing-value policy (default: column-minimum)
    #[serde(default)]
    pub imputation: Option<Imputation>,

    /// Number of funds in the ranked view (default: 10, 0 = all)
    #[serde(default)]
    pub top: Option<i64>,

    /// Path of the persisted latest dataset
    #[serde(default)]
    pub dataset: Option<PathBuf>,
}

/// Custom column weights
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeightConfig {
    /// Weight for the five-year return (default: 0.5)
    pub five_year: Option<f64>,
    /// Weight for the three-year return (default: 0.3)
    pub three_year: Option<f64>,
    /// Weight for the one-year return (default: 0.2)
    pub one_year: Option<f64>,
}

impl WeightConfig {
    /// Fill unset weights from the defaults and scale the result to sum to 1
    fn merged(&self) -> ScoringWeights {
        let defaults = ScoringWeights::default();
        ScoringWeights {
            five_year: self.five_year.unwrap_or(defaults.five_year),
            three_year: self.three_year.unwrap_or(defaults.three_year),
            one_year: self.one_year.unwrap_or(defaults.one_year),
        }
        .normalized()
    }
}

/// Resolved configuration with defaults filled in
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub scoring: ScoringConfig,
    pub top_n: i64,
    pub dataset_path: PathBuf,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl FundrankConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        if let Some(ref w) = self.weights {
            for (name, val) in [
                ("five_year", w.five_year),
                ("three_year", w.three_year),
                ("one_year", w.one_year),
            ] {
                if let Some(v) = val {
                    if !v.is_finite() || v < 0.0 {
                        anyhow::bail!("weights.{} must be non-negative (got {})", name, v);
                    }
                    if v > 1.0 {
                        anyhow::bail!("weights.{} must be at most 1.0 (got {})", name, v);
                    }
                }
            }

            let merged = w.merged();
            if merged.sum() <= 0.0 {
                anyhow::bail!("weights must not all be zero");
            }
        }

        if let Some(top) = self.top {
            if top < 0 {
                anyhow::bail!("top must be non-negative (got {})", top);
            }
        }

        Ok(())
    }

    /// Resolve config into the form used by the pipeline
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;

        let weights = self
            .weights
            .as_ref()
            .map(WeightConfig::merged)
            .unwrap_or_default();

        Ok(ResolvedConfig {
            scoring: ScoringConfig {
                weights,
                imputation: self.imputation.unwrap_or_default(),
            },
            top_n: self.top.unwrap_or(DEFAULT_TOP_N),
            dataset_path: self
                .dataset
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_PATH)),
            config_path: None,
        })
    }
}

impl ResolvedConfig {
    /// Build a ResolvedConfig with all defaults (no config file)
    pub fn defaults() -> Result<Self> {
        FundrankConfig::default().resolve()
    }
}

/// Discover and load a config file from the project root
///
/// Returns `None` if no config file is found (use defaults).
pub fn discover_config(project_root: &Path) -> Result<Option<(FundrankConfig, PathBuf)>> {
    for file_name in CONFIG_FILE_NAMES {
        let path = project_root.join(file_name);
        if path.exists() {
            let config = load_config_file(&path)?;
            return Ok(Some((config, path)));
        }
    }
    Ok(None)
}

/// Load config from an explicit file path
pub fn load_config_file(path: &Path) -> Result<FundrankConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: FundrankConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;

    Ok(config)
}

/// Load and resolve config for a project
///
/// If `config_path` is provided, loads from that file.
/// Otherwise, discovers config from the project root.
/// Returns default config if nothing is found.
pub fn load_and_resolve(project_root: &Path, config_path: Option<&Path>) -> Result<ResolvedConfig> {
    let (config, source_path) = if let Some(path) = config_path {
        let config = load_config_file(path)?;
        (config, Some(path.to_path_buf()))
    } else {
        match discover_config(project_root)? {
            Some((config, path)) => (config, Some(path)),
            None => (FundrankConfig::default(), None),
        }
    };

    let mut resolved = config.resolve()?;
    resolved.config_path = source_path;
    Ok(resolved)
}
