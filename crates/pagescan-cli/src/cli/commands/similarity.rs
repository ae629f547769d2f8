//! Similarity of two text files, for tuning the dedup threshold.

use std::path::Path;

use anyhow::Context;
use console::style;

use pagescan::{similarity, DuplicateSelector};

pub fn cmd_similarity(a: &Path, b: &Path, threshold: Option<f64>) -> anyhow::Result<()> {
    let text_a =
        std::fs::read_to_string(a).with_context(|| format!("Failed to read {}", a.display()))?;
    let text_b =
        std::fs::read_to_string(b).with_context(|| format!("Failed to read {}", b.display()))?;

    let score = similarity(&text_a, &text_b);
    println!("{:.4}", score);

    if let Some(threshold) = threshold {
        let selector = DuplicateSelector::new(threshold)?;
        let verdict = if selector.exceeds_threshold(score) {
            style("near-duplicate").yellow()
        } else {
            style("distinct").green()
        };
        eprintln!("{} at threshold {:.2}", verdict, threshold);
    }
    Ok(())
}
