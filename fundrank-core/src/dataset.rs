//! Acquisition and latest-dataset storage boundary
//!
//! The cleaning and ranking pipeline never touches the filesystem; this
//! module is the collaborator side that produces raw records and keeps the
//! most recent dataset on disk.

use crate::record::{json_kind, parse_raw_records, RawFundRecord};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Result of one acquisition run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Acquisition {
    pub records: Vec<RawFundRecord>,
    /// Source entries that could not be turned into a record
    pub skipped: usize,
}

/// Producer of raw fund records
pub trait FundSource {
    fn acquire(&self) -> Result<Acquisition>;
}

/// Acquisition from a JSON dump (an array of fund objects)
///
/// Entries that are not objects are skipped and counted.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    /// Maximum number of records to keep (0 = no limit)
    limit: usize,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileSource {
            path: path.into(),
            limit: 0,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

impl FundSource for JsonFileSource {
    fn acquire(&self) -> Result<Acquisition> {
        let value = read_json(&self.path)?;
        let items = value.as_array().with_context(|| {
            format!(
                "expected a JSON array of funds in {} (got {})",
                self.path.display(),
                json_kind(&value)
            )
        })?;

        let mut acquisition = Acquisition::default();
        for (index, item) in items.iter().enumerate() {
            if self.limit > 0 && acquisition.records.len() >= self.limit {
                break;
            }
            match RawFundRecord::from_json(index, item) {
                Ok(record) => acquisition.records.push(record),
                Err(e) => {
                    tracing::warn!("skipping source entry: {}", e);
                    acquisition.skipped += 1;
                }
            }
        }
        Ok(acquisition)
    }
}

/// Load the most recently persisted dataset.
///
/// Returns `Ok(None)` when nothing has been persisted yet.
pub fn load_latest(path: &Path) -> Result<Option<Vec<RawFundRecord>>> {
    if !path.exists() {
        tracing::warn!("no fund dataset found at {}", path.display());
        return Ok(None);
    }

    let value = read_json(path)?;
    let records = parse_raw_records(&value)
        .with_context(|| format!("invalid fund dataset: {}", path.display()))?;
    Ok(Some(records))
}

/// Replace the persisted dataset
pub fn persist_latest(path: &Path, records: &[RawFundRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records).context("failed to serialize fund dataset")?;
    atomic_write(path, &json)
        .with_context(|| format!("failed to persist fund dataset: {}", path.display()))
}

/// Run an acquisition and persist its records as the latest dataset
pub fn refresh_latest(source: &dyn FundSource, path: &Path) -> Result<Acquisition> {
    let acquisition = source.acquire().context("fund acquisition failed")?;
    tracing::info!(
        scraped = acquisition.records.len(),
        skipped = acquisition.skipped,
        "acquisition finished"
    );

    persist_latest(path, &acquisition.records)?;
    tracing::info!(
        "updated {} with {} funds",
        path.display(),
        acquisition.records.len()
    );
    Ok(acquisition)
}

fn read_json(path: &Path) -> Result<serde_json::Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

/// Write data to file atomically using temp file + rename
pub fn atomic_write(path: &Path, contents: &str) -> Result<()> {
    use std::fs;
    use std::io::Write;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }

    let temp_path = path.with_extension("tmp");

    let mut file = fs::File::create(&temp_path)
        .with_context(|| format!("failed to create temp file: {}", temp_path.display()))?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("failed to write to temp file: {}", temp_path.display()))?;
    file.sync_all()
        .with_context(|| format!("failed to sync temp file: {}", temp_path.display()))?;
    drop(file);

    fs::rename(&temp_path, path)
        .with_context(|| format!("failed to rename temp file to: {}", path.display()))?;

    Ok(())
}
