//! Scan service.
//!
//! Runs OCR over the pages of one scan, drops near-duplicate pages and
//! publishes the combined text. Separated from UI concerns - emits events
//! for progress tracking.

mod coordinator;
mod types;

use anyhow::Context;
use tokio::sync::mpsc;

use pagescan::{publish, Config, DuplicateSelector, ScanError, SortedPageResults};

use crate::ocr::{create_engine, OcrEngine, PageImage};

pub use coordinator::OcrCoordinator;
pub use types::{PageSummary, ScanEvent, ScanOutcome};

/// Service for scanning multi-page documents.
pub struct ScanService {
    coordinator: OcrCoordinator,
    selector: DuplicateSelector,
}

impl ScanService {
    pub fn new(coordinator: OcrCoordinator, selector: DuplicateSelector) -> Self {
        Self {
            coordinator,
            selector,
        }
    }

    /// Build the engine, coordinator and selector described by `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let engine = create_engine(&config.ocr)
            .with_context(|| format!("Failed to create OCR engine '{}'", config.ocr.engine))?;
        if !engine.is_available() {
            tracing::warn!(
                "OCR engine {} may not be usable: {}",
                engine.engine_type(),
                engine.availability_hint()
            );
        }
        let selector = config
            .dedup
            .selector()
            .context("Invalid dedup configuration")?;
        Ok(Self::new(
            OcrCoordinator::from_config(engine, &config.ocr),
            selector,
        ))
    }

    /// Run the whole pipeline over `pages`, given in as-scanned order.
    pub async fn process(
        &self,
        pages: Vec<PageImage>,
        events: Option<mpsc::Sender<ScanEvent>>,
    ) -> Result<ScanOutcome, ScanError> {
        let results = self.coordinator.run(pages, events.clone()).await?;
        let outcome = self.select_and_publish(&results);

        if let Some(tx) = events {
            let _ = tx
                .send(ScanEvent::SelectionCompleted {
                    kept: outcome.kept_indices.len(),
                    removed: outcome.removed_indices.len(),
                })
                .await;
        }
        Ok(outcome)
    }

    /// Deduplicate already-recognized pages and publish the survivors.
    pub fn select_and_publish(&self, results: &SortedPageResults) -> ScanOutcome {
        let selection = self.selector.select(results);
        let published = publish(&selection.kept);
        ScanOutcome::new(results, &selection, published)
    }
}
