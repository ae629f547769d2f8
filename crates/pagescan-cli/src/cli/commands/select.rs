//! Duplicate selection over previously captured OCR results.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use pagescan::{
    publish, Config, DuplicateSelector, PageFailure, PageOcrResult, ScanError, SortedPageResults,
};
use pagescan_analysis::ScanOutcome;

use super::report::print_outcome;

/// One page as captured by an earlier run.
#[derive(Debug, Deserialize)]
struct CapturedPage {
    original_index: usize,
    text: String,
    confidence: f32,
    #[serde(default)]
    failure: Option<PageFailure>,
}

impl From<CapturedPage> for PageOcrResult {
    fn from(page: CapturedPage) -> Self {
        match page.failure {
            Some(failure) => PageOcrResult::failed(page.original_index, failure),
            None => PageOcrResult::recognized(page.original_index, page.text, page.confidence),
        }
    }
}

/// Either a bare page array or a `scan --json` report.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CapturedInput {
    Pages(Vec<CapturedPage>),
    Report { pages: Vec<CapturedPage> },
}

fn parse_results(content: &str) -> anyhow::Result<SortedPageResults> {
    let pages = match serde_json::from_str::<CapturedInput>(content)
        .context("Expected a JSON array of {original_index, text, confidence} objects")?
    {
        CapturedInput::Pages(pages) | CapturedInput::Report { pages } => pages,
    };
    if pages.is_empty() {
        return Err(ScanError::EmptyInput.into());
    }
    let results = pages.into_iter().map(PageOcrResult::from).collect();
    Ok(SortedPageResults::from_unordered(results)?)
}

pub fn cmd_select(
    config: &Config,
    path: &Path,
    threshold: Option<f64>,
    json: bool,
    text_out: Option<&Path>,
) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let results = parse_results(&content)?;

    let selector = DuplicateSelector::new(threshold.unwrap_or(config.dedup.threshold))?;
    let selection = selector.select(&results);
    let published = publish(&selection.kept);
    let outcome = ScanOutcome::new(&results, &selection, published);

    print_outcome(&outcome, json, text_out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unordered_array() {
        let results = parse_results(
            r#"[
                {"original_index": 2, "text": "Goodbye", "confidence": 0.9},
                {"original_index": 0, "text": "Hello world", "confidence": 0.8},
                {"original_index": 1, "text": "Hello world", "confidence": 0.95}
            ]"#,
        )
        .unwrap();
        assert_eq!(results.indices(), vec![0, 1, 2]);

        let selection = DuplicateSelector::default().select(&results);
        assert_eq!(selection.kept_indices(), vec![1, 2]);
    }

    #[test]
    fn test_parse_scan_report_with_failure() {
        let results = parse_results(
            r#"{
                "combined_text": "ignored",
                "pages": [
                    {"original_index": 0, "text": "Intro", "confidence": 0.9, "kept": true},
                    {"original_index": 1, "text": "[Text recognition failed]", "confidence": 0.0,
                     "kept": true, "failure": {"kind": "timed_out", "detail": {"secs": 120, "nanos": 0}}}
                ]
            }"#,
        )
        .unwrap();
        assert!(results.as_slice()[1].is_failed());
    }

    #[test]
    fn test_duplicate_index_rejected() {
        let err = parse_results(
            r#"[
                {"original_index": 0, "text": "a", "confidence": 0.9},
                {"original_index": 0, "text": "b", "confidence": 0.9}
            ]"#,
        )
        .unwrap_err();
        assert_eq!(
            err.downcast_ref::<ScanError>(),
            Some(&ScanError::DuplicatePageIndex(0))
        );
    }

    #[test]
    fn test_empty_array_rejected() {
        let err = parse_results("[]").unwrap_err();
        assert_eq!(err.downcast_ref::<ScanError>(), Some(&ScanError::EmptyInput));
    }
}
