//! Run-level and per-page error types.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that abort an OCR run or reject malformed pipeline input.
///
/// Only `EmptyInput` can occur during a normal run; the ordering variants
/// guard the hand-off from the coordinator to the selector.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScanError {
    #[error("No pages supplied to the OCR run")]
    EmptyInput,

    #[error("Similarity threshold must be within [0.0, 1.0], got {0}")]
    InvalidThreshold(f64),

    #[error("Page index {0} appears more than once")]
    DuplicatePageIndex(usize),

    #[error("Page index {0} has no OCR result")]
    MissingPageIndex(usize),

    #[error("Page index {next} follows {previous}; results must be in ascending page order")]
    OutOfOrder { previous: usize, next: usize },
}

/// A per-page OCR failure.
///
/// These never abort a run. The page is resolved with sentinel text and zero
/// confidence, and the failure is kept on the result for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum PageFailure {
    /// The engine ran but failed or returned no usable observations.
    #[error("recognition failed: {0}")]
    Recognition(String),

    /// The engine could not be invoked for this page (unreadable or malformed image).
    #[error("request failed: {0}")]
    Request(String),

    /// The engine did not answer within the per-page timeout.
    #[error("recognition timed out after {0:?}")]
    TimedOut(Duration),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_failure_json_shape() {
        let json = serde_json::to_value(PageFailure::Request("missing file".into())).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "request", "detail": "missing file"}));

        let parsed: PageFailure = serde_json::from_str(
            r#"{"kind": "timed_out", "detail": {"secs": 30, "nanos": 0}}"#,
        )
        .unwrap();
        assert_eq!(parsed, PageFailure::TimedOut(Duration::from_secs(30)));
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ScanError::OutOfOrder { previous: 3, next: 1 }.to_string(),
            "Page index 1 follows 3; results must be in ascending page order"
        );
        assert_eq!(
            PageFailure::Recognition("worker panicked".into()).to_string(),
            "recognition failed: worker panicked"
        );
    }
}
