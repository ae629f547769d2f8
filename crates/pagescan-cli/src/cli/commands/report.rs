//! Output shared by `scan` and `select`.

use std::path::Path;

use anyhow::Context;
use console::style;

use pagescan_analysis::ScanOutcome;

use crate::cli::helpers::{format_indices, one_line, truncate};
use crate::cli::icons::{dim_arrow, success, warn};

/// Print a scan outcome and optionally write the combined text to a file.
pub fn print_outcome(outcome: &ScanOutcome, json: bool, text_out: Option<&Path>) -> anyhow::Result<()> {
    if let Some(path) = text_out {
        std::fs::write(path, &outcome.combined_text)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    eprintln!(
        "{} {} pages: kept {}, removed {}",
        success(),
        outcome.pages.len(),
        format_indices(&outcome.kept_indices),
        format_indices(&outcome.removed_indices)
    );
    for page in &outcome.pages {
        let marker = if page.kept {
            style("kept").green()
        } else {
            style("dup ").dim()
        };
        eprintln!(
            "  {} {:>4}  {}  {:.2}  {}",
            dim_arrow(),
            page.original_index,
            marker,
            page.confidence,
            truncate(&one_line(&page.text), 60)
        );
        if let Some(ref failure) = page.failure {
            eprintln!("         {} {}", warn(), style(failure).yellow());
        }
    }

    if let Some(path) = text_out {
        eprintln!("{} Combined text written to {}", success(), path.display());
    } else {
        println!("{}", outcome.combined_text);
    }
    Ok(())
}
