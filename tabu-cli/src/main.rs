//! tabu-catalog - batch tooling for the Tabu card catalog
//!
//! Every command reads or writes the two bundled artifacts, the catalog
//! (`Kelimeler.json`) and its provenance manifest (`Kelimeler.sources.json`).
//! User-facing summaries go to stdout, diagnostics and logs to stderr.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use tabu_core::alignment::AlignmentChecker;
use tabu_core::catalog::{read_json, write_json_atomic, Catalog, Difficulty};
use tabu_core::config::PipelineConfig;
use tabu_core::curator::Curator;
use tabu_core::generator::{Generator, WikidataSource};
use tabu_core::validator::CatalogValidator;
use tabu_core::PipelineError;

mod inspect_cli;

const DEFAULT_CATALOG: &str = "Tabu/Files/Kelimeler.json";
const DEFAULT_MANIFEST: &str = "Tabu/Files/Kelimeler.sources.json";

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "tabu-catalog",
    about = "Generate, curate and check the Tabu card catalog",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Set log level
    #[clap(long, default_value = "info", global = true)]
    log_level: LogLevel,

    /// YAML file overriding pipeline defaults
    #[clap(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
enum Command {
    /// Build a fresh catalog and manifest from Wikidata
    Generate {
        #[clap(default_value = DEFAULT_CATALOG)]
        catalog: PathBuf,

        #[clap(default_value = DEFAULT_MANIFEST)]
        manifest: PathBuf,
    },

    /// Re-clean an existing catalog
    Curate {
        #[clap(default_value = DEFAULT_CATALOG)]
        input: PathBuf,

        /// Destination, defaults to the input file
        output: Option<PathBuf>,
    },

    /// Check a catalog against every compliance rule
    Validate {
        #[clap(default_value = DEFAULT_CATALOG)]
        catalog: PathBuf,
    },

    /// Check that every catalog word has a manifest record
    #[clap(alias = "verify_sources_alignment")]
    VerifySourcesAlignment {
        #[clap(default_value = DEFAULT_CATALOG)]
        catalog: PathBuf,

        #[clap(default_value = DEFAULT_MANIFEST)]
        manifest: PathBuf,
    },

    /// Show the cards the app would load
    Inspect {
        #[clap(default_value = DEFAULT_CATALOG)]
        catalog: PathBuf,

        /// Restrict to a category (repeatable, order kept)
        #[clap(long = "category")]
        categories: Vec<String>,

        /// Restrict to one difficulty
        #[clap(long)]
        difficulty: Option<Difficulty>,

        /// Output the selected cards as JSON
        #[clap(long)]
        json: bool,
    },
}

/// Initialize tracing from the --log-level flag, or RUST_LOG when set
fn initialize_tracing(log_level: &LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_filter_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(&cli.log_level);

    let config = match PipelineConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };

    match cli.command {
        Command::Generate { catalog, manifest } => generate_command(&config, &catalog, &manifest).await,
        Command::Curate { input, output } => {
            let output = output.unwrap_or_else(|| input.clone());
            curate_command(&config, &input, &output)
        }
        Command::Validate { catalog } => validate_command(&config, &catalog),
        Command::VerifySourcesAlignment { catalog, manifest } => {
            alignment_command(&config, &catalog, &manifest)
        }
        Command::Inspect {
            catalog,
            categories,
            difficulty,
            json,
        } => inspect_cli::inspect_command(&catalog, &categories, difficulty, json),
    }
}

/// Report a pipeline error on stderr and exit non-zero
fn fail(err: &PipelineError) -> ! {
    match err {
        PipelineError::MalformedInput(message) => eprintln!("{message}"),
        PipelineError::CategoryIncomplete {
            category,
            found,
            target,
        } => eprintln!("Kategori için yeterli doğrulanabilir kayıt çekilemedi: {category} ({found}/{target})"),
        other => {
            error!("{}", other);
            eprintln!("Error: {}", error_chain(other));
        }
    }
    std::process::exit(1);
}

/// Display message followed by every source in the chain
fn error_chain(err: &PipelineError) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(&format!(": {cause}"));
        source = cause.source();
    }
    message
}

fn per_category_lines(catalog: &Catalog) -> Vec<String> {
    catalog
        .categories()
        .map(|(name, entries)| {
            format!("- {name}: {} ({})", entries.len(), catalog.difficulty_counts(name))
        })
        .collect()
}

async fn generate_command(config: &PipelineConfig, catalog_path: &Path, manifest_path: &Path) -> Result<()> {
    let source = WikidataSource::new(&config.fetch).unwrap_or_else(|e| fail(&e));

    let output = match Generator::new(config).run(&source).await {
        Ok(output) => output,
        Err(e) => fail(&e),
    };
    if let Err(e) = output.write(catalog_path, manifest_path) {
        fail(&e);
    }

    println!("Katalog üretildi: {}", catalog_path.display());
    println!("Kaynak özeti: {}", manifest_path.display());
    println!("Kategori sayısı: {}", output.catalog.category_count());
    println!("Toplam kart: {}", output.catalog.total_entries());
    for line in per_category_lines(&output.catalog) {
        println!("{line}");
    }
    Ok(())
}

fn curate_command(config: &PipelineConfig, input: &Path, output: &Path) -> Result<()> {
    let raw = read_json(input).unwrap_or_else(|e| fail(&e));
    let outcome = Curator::new(config).curate(&raw).unwrap_or_else(|e| fail(&e));

    if let Err(e) = write_json_atomic(output, &outcome.catalog) {
        fail(&e);
    }

    println!("Katalog düzenlendi: {}", output.display());
    println!("Kategori sayısı: {}", outcome.catalog.category_count());
    println!("Toplam kart: {}", outcome.catalog.total_entries());
    for (line, category) in per_category_lines(&outcome.catalog)
        .into_iter()
        .zip(outcome.catalog.category_names())
    {
        match outcome.stats.get(category) {
            Some(stats) => {
                debug!("'{}': {:?}", category, stats);
                println!("{line} {}", stats.drop_summary());
            }
            None => println!("{line}"),
        }
    }
    if !outcome.skipped_categories.is_empty() {
        println!(
            "Atlanan kategoriler (dizi değil): {}",
            outcome.skipped_categories.join(", ")
        );
    }
    Ok(())
}

fn validate_command(config: &PipelineConfig, catalog_path: &Path) -> Result<()> {
    let raw = read_json(catalog_path).unwrap_or_else(|e| fail(&e));
    let report = CatalogValidator::new(config)
        .validate(&raw)
        .unwrap_or_else(|e| fail(&e));

    if !report.is_valid() {
        for line in report.failure_lines(config.validation.display_limit) {
            eprintln!("{line}");
        }
        std::process::exit(1);
    }

    for line in report.success_lines(&catalog_path.display().to_string()) {
        println!("{line}");
    }
    Ok(())
}

fn alignment_command(config: &PipelineConfig, catalog_path: &Path, manifest_path: &Path) -> Result<()> {
    let catalog = read_json(catalog_path).unwrap_or_else(|e| fail(&e));
    let manifest = read_json(manifest_path).unwrap_or_else(|e| fail(&e));
    let report = AlignmentChecker::new(config)
        .check(&catalog, &manifest)
        .unwrap_or_else(|e| fail(&e));

    if !report.is_aligned() {
        for line in report.failure_lines(config.validation.display_limit) {
            eprintln!("{line}");
        }
        std::process::exit(1);
    }

    let catalog_display = catalog_path.display().to_string();
    let manifest_display = manifest_path.display().to_string();
    for line in report.success_lines(&catalog_display, &manifest_display) {
        println!("{line}");
    }
    Ok(())
}
