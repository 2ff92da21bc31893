//! fundrank CLI - clean, rank and compare mutual fund datasets

#![deny(warnings)]

// Global invariants enforced:
// - Deterministic output ordering
// - Identical input yields byte-for-byte identical output
// - Logs go to stderr; stdout carries only the requested view

use anyhow::Context;
use clap::{Parser, Subcommand};
use fundrank_core::compare::compare_funds;
use fundrank_core::config::{self, ResolvedConfig};
use fundrank_core::dataset::{self, JsonFileSource};
use fundrank_core::{
    clean_records, rank_clean, render_clean_json, render_clean_text, render_csv, render_json,
    render_text, CanonicalFundRecord,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fundrank")]
#[command(about = "Normalize, risk-classify and rank scraped mutual fund data")]
#[command(version = env!("FUNDRANK_VERSION"))]
struct Cli {
    /// Path to config file (default: auto-discover)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every fund in the latest dataset, cleaned and deduplicated
    Clean {
        /// Path to the latest dataset (overrides config file)
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// Rank funds by composite return score
    Top {
        /// Path to the latest dataset (overrides config file)
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Number of funds to show, 0 for all (overrides config file)
        #[arg(long, allow_negative_numbers = true)]
        top: Option<i64>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Write the output to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Show two funds side by side
    Compare {
        /// Name of the first fund (case-insensitive)
        #[arg(long)]
        fund_a: String,

        /// Name of the second fund (case-insensitive)
        #[arg(long)]
        fund_b: String,

        /// Path to the latest dataset (overrides config file)
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "json")]
        format: OutputFormat,
    },
    /// Import a scraped JSON dump as the latest dataset
    Update {
        /// JSON dump produced by the scraper
        #[arg(long)]
        from: PathBuf,

        /// Path to the latest dataset (overrides config file)
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Keep at most this many records (default: all)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Validate or show the configuration
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without touching any dataset
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the resolved configuration (merged defaults + config file)
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, PartialEq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Csv,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Clean { dataset, format } => {
            let resolved = load_config(cli.config.as_deref())?;
            let dataset_path = dataset.unwrap_or(resolved.dataset_path);
            let records = load_clean_view(&dataset_path)?;

            match format {
                OutputFormat::Text => print!("{}", render_clean_text(&records)),
                OutputFormat::Json => println!("{}", render_clean_json(&records)),
                OutputFormat::Csv => {
                    anyhow::bail!("CSV format is only supported for the ranked view (use `top`)")
                }
            }
        }
        Commands::Top {
            dataset,
            top,
            format,
            output,
        } => {
            let resolved = load_config(cli.config.as_deref())?;

            // CLI flags override config file values
            let dataset_path = dataset.unwrap_or(resolved.dataset_path);
            let top_n = top.unwrap_or(resolved.top_n);

            let records = load_clean_view(&dataset_path)?;
            let ranked = rank_clean(records, top_n, &resolved.scoring);

            let rendered = match format {
                OutputFormat::Text => render_text(&ranked),
                OutputFormat::Json => format!("{}\n", render_json(&ranked)),
                OutputFormat::Csv => render_csv(&ranked).context("failed to render CSV export")?,
            };

            match output {
                Some(path) => {
                    dataset::atomic_write(&path, &rendered)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Wrote {} funds to {}", ranked.len(), path.display());
                }
                None => print!("{}", rendered),
            }
        }
        Commands::Compare {
            fund_a,
            fund_b,
            dataset,
            format,
        } => {
            let resolved = load_config(cli.config.as_deref())?;
            let dataset_path = dataset.unwrap_or(resolved.dataset_path);
            let records = load_clean_view(&dataset_path)?;

            let comparison = compare_funds(&records, &fund_a, &fund_b)?;
            match format {
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&comparison)
                        .context("failed to serialize comparison to JSON")?;
                    println!("{}", json);
                }
                OutputFormat::Text => {
                    print!(
                        "{}",
                        render_clean_text(&[comparison.fund_a, comparison.fund_b])
                    );
                }
                OutputFormat::Csv => {
                    anyhow::bail!("CSV format is only supported for the ranked view (use `top`)")
                }
            }
        }
        Commands::Update {
            from,
            dataset,
            limit,
        } => {
            if !from.exists() {
                anyhow::bail!("Path does not exist: {}", from.display());
            }

            let resolved = load_config(cli.config.as_deref())?;
            let dataset_path = dataset.unwrap_or(resolved.dataset_path);

            let source = JsonFileSource::new(&from).with_limit(limit.unwrap_or(0));
            let acquisition = dataset::refresh_latest(&source, &dataset_path)
                .with_context(|| format!("failed to import {}", from.display()))?;

            println!(
                "Imported {} funds into {} ({} skipped)",
                acquisition.records.len(),
                dataset_path.display(),
                acquisition.skipped
            );
        }
        Commands::Config { action } => match action {
            ConfigAction::Validate { path } => {
                let project_root = std::env::current_dir()?;
                let resolved = config::load_and_resolve(&project_root, path.as_deref());

                match resolved {
                    Ok(config) => {
                        if let Some(ref p) = config.config_path {
                            println!("Config valid: {}", p.display());
                        } else {
                            println!("No config file found. Using defaults.");
                        }
                    }
                    Err(e) => {
                        eprintln!("Config validation failed: {:#}", e);
                        std::process::exit(1);
                    }
                }
            }
            ConfigAction::Show { path } => {
                let project_root = std::env::current_dir()?;
                let resolved = config::load_and_resolve(&project_root, path.as_deref())
                    .context("failed to load configuration")?;
                print_config(&resolved);
            }
        },
    }

    Ok(())
}

/// Install the stderr log subscriber; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "fundrank=debug,fundrank_core=debug"
    } else {
        "fundrank=info,fundrank_core=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load configuration from the working directory or an explicit file
fn load_config(config_path: Option<&Path>) -> anyhow::Result<ResolvedConfig> {
    let project_root = std::env::current_dir()?;
    let resolved = config::load_and_resolve(&project_root, config_path)
        .context("failed to load configuration")?;

    if let Some(path) = &resolved.config_path {
        tracing::info!("using config: {}", path.display());
    }
    Ok(resolved)
}

/// Load the latest dataset and clean it
fn load_clean_view(dataset_path: &Path) -> anyhow::Result<Vec<CanonicalFundRecord>> {
    let raw = dataset::load_latest(dataset_path)?.ok_or_else(|| {
        anyhow::anyhow!(
            "no fund dataset found at {} (run `fundrank update --from <dump>` first)",
            dataset_path.display()
        )
    })?;
    Ok(clean_records(&raw))
}

fn print_config(resolved: &ResolvedConfig) {
    println!("Configuration:");
    if let Some(ref p) = resolved.config_path {
        println!("  Source: {}", p.display());
    } else {
        println!("  Source: defaults (no config file found)");
    }
    println!();
    println!("Weights:");
    println!("  five_year: {}", resolved.scoring.weights.five_year);
    println!("  three_year: {}", resolved.scoring.weights.three_year);
    println!("  one_year: {}", resolved.scoring.weights.one_year);
    println!();
    println!("Scoring:");
    println!("  imputation: {}", resolved.scoring.imputation.as_str());
    println!();
    println!("Output:");
    println!(
        "  top: {}",
        if resolved.top_n > 0 {
            resolved.top_n.to_string()
        } else {
            "all".to_string()
        }
    );
    println!("  dataset: {}", resolved.dataset_path.display());
}
