//! Combined text and kept-page indices for downstream document assembly.

use serde::Serialize;

use crate::models::PageOcrResult;

/// Separator placed between kept pages in the combined text.
pub const PAGE_BREAK: &str = "\n\n--- Page Break ---\n\n";

/// Display text used when no page produced any text.
pub const NO_TEXT_PLACEHOLDER: &str = "No text recognized.";

/// Published output of a scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishedScan {
    /// Kept page texts joined by [`PAGE_BREAK`], trimmed, or the placeholder.
    pub combined_text: String,
    /// Original indices of the kept pages, ascending. Selects the page images
    /// that go into the assembled document, in this order.
    pub kept_indices: Vec<usize>,
    /// False when `combined_text` is the placeholder. The placeholder is for
    /// display only and must not be compared against page text.
    pub has_text: bool,
}

/// Publish the kept pages.
pub fn publish(kept: &[PageOcrResult]) -> PublishedScan {
    let joined = kept
        .iter()
        .map(PageOcrResult::text)
        .collect::<Vec<_>>()
        .join(PAGE_BREAK);
    let trimmed = joined.trim();

    let (combined_text, has_text) = if trimmed.is_empty() {
        (NO_TEXT_PLACEHOLDER.to_string(), false)
    } else {
        (trimmed.to_string(), true)
    };

    PublishedScan {
        combined_text,
        kept_indices: kept.iter().map(PageOcrResult::original_index).collect(),
        has_text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PageFailure;
    use crate::models::RECOGNITION_FAILED_TEXT;

    #[test]
    fn test_pages_joined_with_page_break() {
        let kept = vec![
            PageOcrResult::recognized(1, "Hello world", 0.95),
            PageOcrResult::recognized(2, "Goodbye", 0.9),
        ];
        let published = publish(&kept);
        assert_eq!(
            published.combined_text,
            "Hello world\n\n--- Page Break ---\n\nGoodbye"
        );
        assert_eq!(published.kept_indices, vec![1, 2]);
        assert!(published.has_text);
    }

    #[test]
    fn test_outer_whitespace_trimmed() {
        let kept = vec![
            PageOcrResult::recognized(0, "  \nfirst", 0.9),
            PageOcrResult::recognized(1, "last\n\n", 0.9),
        ];
        let published = publish(&kept);
        assert_eq!(published.combined_text, "first\n\n--- Page Break ---\n\nlast");
    }

    #[test]
    fn test_blank_pages_yield_placeholder() {
        let kept = vec![PageOcrResult::recognized(0, "   ", 0.0)];
        let published = publish(&kept);
        assert_eq!(published.combined_text, NO_TEXT_PLACEHOLDER);
        assert_eq!(published.kept_indices, vec![0]);
        assert!(!published.has_text);

        let empty = publish(&[]);
        assert_eq!(empty.combined_text, NO_TEXT_PLACEHOLDER);
        assert!(empty.kept_indices.is_empty());
    }

    #[test]
    fn test_failed_pages_show_sentinel() {
        let kept = vec![
            PageOcrResult::recognized(0, "Cover", 0.9),
            PageOcrResult::failed(1, PageFailure::Request("unreadable".into())),
        ];
        let published = publish(&kept);
        assert!(published.combined_text.ends_with(RECOGNITION_FAILED_TEXT));
        assert_eq!(published.kept_indices, vec![0, 1]);
    }
}
