//! Progress display for a running scan.

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;

use pagescan_analysis::ScanEvent;

use super::icons;

fn page_bar(total_pages: usize) -> ProgressBar {
    let bar = ProgressBar::new(total_pages as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}")
        .map(|style| style.progress_chars("█▓░"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar.set_message("Running OCR...");
    bar
}

/// Drive a progress bar from scan events until the sender side closes.
pub async fn track_scan(mut events: mpsc::Receiver<ScanEvent>) {
    let mut bar: Option<ProgressBar> = None;

    while let Some(event) = events.recv().await {
        match event {
            ScanEvent::RunStarted { total_pages, .. } => {
                bar = Some(page_bar(total_pages));
            }
            ScanEvent::PageStarted { index } => {
                if let Some(ref bar) = bar {
                    bar.set_message(format!("page {}", index + 1));
                }
            }
            ScanEvent::PageCompleted { .. } => {
                if let Some(ref bar) = bar {
                    bar.inc(1);
                }
            }
            ScanEvent::PageFailed { index, error } => {
                if let Some(ref bar) = bar {
                    bar.println(format!("{} page {}: {}", icons::warn(), index + 1, error));
                    bar.inc(1);
                }
            }
            ScanEvent::OcrCompleted { .. } => {
                if let Some(bar) = bar.take() {
                    bar.finish_and_clear();
                }
            }
            ScanEvent::SelectionCompleted { .. } => {}
        }
    }

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
}
