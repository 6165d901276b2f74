mod logging;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use extdata_checker::checker::create_default_registry;
use extdata_checker::config::{self, Settings};
use extdata_checker::manifest::load_manifest;
use extdata_checker::report::{render_json, render_table};
use extdata_checker::retrieval::HttpRetriever;
use extdata_checker::runner::{Summary, check_all};

#[derive(Parser)]
#[command(name = "extdata-checker")]
#[command(version, about = "Check whether externally hosted artifacts pinned in a manifest are still current")]
struct Cli {
    /// Settings file (defaults to $XDG_CONFIG_HOME/extdata-checker/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check every external source of a manifest
    Check {
        /// Path to the JSON manifest
        manifest: PathBuf,

        /// Print results as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Number of sources checked at the same time (overrides settings)
        #[arg(long)]
        jobs: Option<usize>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let settings = Settings::load(cli.config.as_deref())?;
    let log_path = config::log_path();
    let _guard = logging::init_logging(&log_path)
        .with_context(|| format!("Failed to set up logging at {}", log_path.display()))?;

    match cli.command {
        Command::Check {
            manifest,
            json,
            jobs,
        } => tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?
            .block_on(check_manifest(&settings, &manifest, json, jobs)),
    }
}

async fn check_manifest(
    settings: &Settings,
    manifest: &Path,
    json: bool,
    jobs: Option<usize>,
) -> anyhow::Result<ExitCode> {
    let items = load_manifest(manifest)?;
    tracing::info!("Loaded {} external source(s) from {}", items.len(), manifest.display());

    let retriever = Arc::new(HttpRetriever::new(&settings.http)?);
    let registry = create_default_registry(retriever, settings);
    let reports = check_all(&registry, items, jobs.unwrap_or(settings.jobs)).await;

    if json {
        println!("{}", render_json(&reports, chrono::Utc::now())?);
    } else {
        print!("{}", render_table(&reports));
    }

    if Summary::from_reports(&reports).has_failures() {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
