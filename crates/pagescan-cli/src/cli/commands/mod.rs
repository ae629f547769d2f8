//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod check;
mod config_cmd;
mod report;
mod scan;
mod select;
mod similarity;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use pagescan::Config;

pub use scan::ScanArgs;

#[derive(Parser)]
#[command(name = "pagescan")]
#[command(about = "OCR multi-page scans and drop duplicate page captures")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides the default location)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Recognize page images, drop duplicate pages, print the combined text
    Scan(ScanArgs),

    /// Re-run duplicate selection on captured per-page OCR results (JSON)
    Select {
        /// JSON file: an array of pages, or a report from `scan --json`
        results: PathBuf,
        /// Similarity threshold (0.0 - 1.0)
        #[arg(short, long)]
        threshold: Option<f64>,
        /// Print a machine-readable JSON report
        #[arg(long)]
        json: bool,
        /// Write the combined text to a file
        #[arg(long)]
        text_out: Option<PathBuf>,
    },

    /// Print the similarity score of two text files
    Similarity {
        /// First text file
        a: PathBuf,
        /// Second text file
        b: PathBuf,
        /// Also report whether the pair counts as near-duplicate pages
        #[arg(short, long)]
        threshold: Option<f64>,
    },

    /// Check OCR engine availability
    Check,

    /// Print the effective configuration as TOML
    Config,
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    tracing::debug!(
        "Using config from {}",
        config
            .source_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "defaults".to_string())
    );

    match cli.command {
        Commands::Scan(args) => scan::cmd_scan(config, args).await,
        Commands::Select {
            results,
            threshold,
            json,
            text_out,
        } => select::cmd_select(&config, &results, threshold, json, text_out.as_deref()),
        Commands::Similarity { a, b, threshold } => {
            similarity::cmd_similarity(&a, &b, threshold)
        }
        Commands::Check => check::cmd_check(&config),
        Commands::Config => config_cmd::cmd_config_show(&config),
    }
}
