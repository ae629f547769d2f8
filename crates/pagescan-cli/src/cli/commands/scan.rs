//! Full scan command: OCR, duplicate selection and publishing.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tokio::sync::mpsc;

use pagescan::{Config, RecognitionLevel};
use pagescan_analysis::{PageImage, ScanEvent, ScanService};

use super::report::print_outcome;
use crate::cli::progress::track_scan;

#[derive(Args, Debug, Default)]
pub struct ScanArgs {
    /// Page images in scan order
    pub images: Vec<PathBuf>,
    /// Similarity threshold (0.0 - 1.0)
    #[arg(short, long)]
    pub threshold: Option<f64>,
    /// Number of pages recognized concurrently (0 = number of CPUs)
    #[arg(short, long)]
    pub workers: Option<usize>,
    /// Per-page OCR timeout in seconds (0 disables)
    #[arg(long)]
    pub timeout: Option<u64>,
    /// Prefer speed over accuracy
    #[arg(long)]
    pub fast: bool,
    /// Disable dictionary-based language correction
    #[arg(long)]
    pub no_language_correction: bool,
    /// Recognition language (e.g., eng, deu+eng)
    #[arg(short, long)]
    pub language: Option<String>,
    /// Print a machine-readable JSON report
    #[arg(long)]
    pub json: bool,
    /// Write the combined text to a file
    #[arg(long)]
    pub text_out: Option<PathBuf>,
}

impl ScanArgs {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(threshold) = self.threshold {
            config.dedup.threshold = threshold;
        }
        if let Some(workers) = self.workers {
            config.ocr.workers = workers;
        }
        if let Some(timeout) = self.timeout {
            config.ocr.page_timeout_secs = timeout;
        }
        if self.fast {
            config.ocr.recognition_level = RecognitionLevel::Fast;
        }
        if self.no_language_correction {
            config.ocr.language_correction = false;
        }
        if let Some(ref language) = self.language {
            config.ocr.language = language.clone();
        }
    }
}

/// Scan page images and print the deduplicated text.
pub async fn cmd_scan(mut config: Config, args: ScanArgs) -> anyhow::Result<()> {
    args.apply(&mut config);
    config.validate()?;

    let service = ScanService::from_config(&config)?;
    let pages: Vec<PageImage> = args
        .images
        .iter()
        .map(|path| PageImage::from(path.as_path()))
        .collect();

    let (events, progress) = if args.json {
        (None, None)
    } else {
        let (event_tx, event_rx) = mpsc::channel::<ScanEvent>(100);
        (Some(event_tx), Some(tokio::spawn(track_scan(event_rx))))
    };

    let outcome = service.process(pages, events).await;
    if let Some(progress) = progress {
        let _ = progress.await;
    }
    let outcome = outcome.context("Scan failed")?;

    print_outcome(&outcome, args.json, args.text_out.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = ScanArgs {
            threshold: Some(0.75),
            workers: Some(8),
            timeout: Some(0),
            fast: true,
            no_language_correction: true,
            language: Some("fra".into()),
            ..ScanArgs::default()
        };
        let mut config = Config::default();
        args.apply(&mut config);

        assert_eq!(config.dedup.threshold, 0.75);
        assert_eq!(config.ocr.workers, 8);
        assert_eq!(config.ocr.page_timeout(), None);
        assert_eq!(config.ocr.recognition_level, RecognitionLevel::Fast);
        assert!(!config.ocr.language_correction);
        assert_eq!(config.ocr.language, "fra");
    }

    #[test]
    fn test_no_flags_keep_config() {
        let mut config = Config::default();
        ScanArgs::default().apply(&mut config);
        assert_eq!(config, Config::default());
    }
}
