//! Scan service types and events.

use serde::Serialize;

use pagescan::{PageFailure, PublishedScan, Selection, SortedPageResults};

/// Events emitted during a scan.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanEvent {
    /// OCR run started
    RunStarted { total_pages: usize, workers: usize },
    /// Page acquired a worker and was handed to the engine
    PageStarted { index: usize },
    /// Page recognized
    PageCompleted { index: usize, confidence: f32 },
    /// Page resolved as failed
    PageFailed { index: usize, error: String },
    /// All pages resolved
    OcrCompleted { failed: usize },
    /// Duplicate selection finished
    SelectionCompleted { kept: usize, removed: usize },
}

/// Per-page line of a scan report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSummary {
    pub original_index: usize,
    pub text: String,
    pub confidence: f32,
    pub kept: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<PageFailure>,
}

/// Result of a full scan: OCR, duplicate selection and publishing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanOutcome {
    pub combined_text: String,
    /// False when the placeholder text was published.
    pub has_text: bool,
    pub kept_indices: Vec<usize>,
    pub removed_indices: Vec<usize>,
    /// Every page in original order, kept or not.
    pub pages: Vec<PageSummary>,
}

impl ScanOutcome {
    pub fn new(results: &SortedPageResults, selection: &Selection, published: PublishedScan) -> Self {
        let pages = results
            .iter()
            .map(|page| PageSummary {
                original_index: page.original_index(),
                text: page.text().to_string(),
                confidence: page.confidence(),
                kept: !selection.removed.contains(&page.original_index()),
                failure: page.failure().cloned(),
            })
            .collect();

        Self {
            combined_text: published.combined_text,
            has_text: published.has_text,
            kept_indices: published.kept_indices,
            removed_indices: selection.removed.iter().copied().collect(),
            pages,
        }
    }

    /// Number of pages whose recognition failed.
    pub fn failed_pages(&self) -> usize {
        self.pages.iter().filter(|p| p.failure.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagescan::{publish, DuplicateSelector, PageOcrResult};

    #[test]
    fn test_report_serializes_kept_flags_and_failures() {
        let results = SortedPageResults::from_sorted(vec![
            PageOcrResult::recognized(0, "Intro", 0.9),
            PageOcrResult::failed(1, PageFailure::Request("unreadable".into())),
        ])
        .unwrap();
        let selection = DuplicateSelector::default().select(&results);
        let published = publish(&selection.kept);
        let outcome = ScanOutcome::new(&results, &selection, published);

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["kept_indices"], serde_json::json!([0, 1]));
        assert_eq!(json["pages"][0]["kept"], true);
        assert!(json["pages"][0].get("failure").is_none());
        assert_eq!(json["pages"][1]["failure"]["kind"], "request");
        assert_eq!(json["pages"][1]["failure"]["detail"], "unreadable");
        assert_eq!(outcome.failed_pages(), 1);
    }
}
