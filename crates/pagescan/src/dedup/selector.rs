//! Sequential keep/replace/discard selection over ordered page results.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, info};

use super::similarity::{similarity, similarity_upper_bound};
use crate::error::ScanError;
use crate::models::{PageOcrResult, SortedPageResults};

/// Similarity above which two pages are treated as the same physical page.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.90;

/// Outcome of a selection pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Selection {
    /// Surviving pages, strictly ascending by original index.
    pub kept: Vec<PageOcrResult>,
    /// Original indices dropped as near-duplicates.
    pub removed: BTreeSet<usize>,
}

impl Selection {
    /// Original indices of the kept pages, ascending.
    pub fn kept_indices(&self) -> Vec<usize> {
        self.kept.iter().map(PageOcrResult::original_index).collect()
    }
}

/// Collapses runs of near-duplicate pages to their highest-confidence copy.
///
/// Each page is compared with the most recently *kept* page rather than its
/// literal predecessor, so a page discarded as a duplicate never anchors a
/// later comparison. On equal confidence the earlier page wins.
///
/// Pages whose recognition failed are never considered duplicates: their
/// sentinel text says nothing about page content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DuplicateSelector {
    threshold: f64,
}

impl DuplicateSelector {
    /// Create a selector. `threshold` must lie within `[0.0, 1.0]`.
    pub fn new(threshold: f64) -> Result<Self, ScanError> {
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(ScanError::InvalidThreshold(threshold));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Select the pages to keep.
    pub fn select(&self, results: &SortedPageResults) -> Selection {
        let mut pages = results.iter();
        let Some(first) = pages.next() else {
            return Selection::default();
        };

        let mut kept = vec![first.clone()];
        let mut removed = BTreeSet::new();

        for current in pages {
            match kept.last_mut() {
                Some(last) if self.is_near_duplicate(last, current) => {
                    if current.confidence() > last.confidence() {
                        debug!(
                            "Page {} replaces near-duplicate page {} ({:.3} > {:.3} confidence)",
                            current.original_index(),
                            last.original_index(),
                            current.confidence(),
                            last.confidence()
                        );
                        removed.insert(last.original_index());
                        *last = current.clone();
                    } else {
                        debug!(
                            "Page {} discarded as near-duplicate of page {}",
                            current.original_index(),
                            last.original_index()
                        );
                        removed.insert(current.original_index());
                    }
                }
                _ => kept.push(current.clone()),
            }
        }

        info!(
            "Selected {} of {} pages ({} near-duplicates removed, threshold {:.2})",
            kept.len(),
            results.len(),
            removed.len(),
            self.threshold
        );

        Selection { kept, removed }
    }

    fn is_near_duplicate(&self, kept: &PageOcrResult, current: &PageOcrResult) -> bool {
        if kept.is_failed() || current.is_failed() {
            return false;
        }

        let bound = similarity_upper_bound(
            kept.text().chars().count(),
            current.text().chars().count(),
        );
        if bound <= self.threshold {
            return false;
        }

        let score = similarity(kept.text(), current.text());
        debug!(
            "Similarity between pages {} and {}: {:.3}",
            kept.original_index(),
            current.original_index(),
            score
        );
        self.exceeds_threshold(score)
    }

    /// Whether a similarity score marks two pages as near-duplicates.
    pub fn exceeds_threshold(&self, score: f64) -> bool {
        score > self.threshold
    }
}

impl Default for DuplicateSelector {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PageFailure;

    fn pages(texts: &[&str], confidences: &[f32]) -> SortedPageResults {
        let results = texts
            .iter()
            .zip(confidences)
            .enumerate()
            .map(|(i, (text, conf))| PageOcrResult::recognized(i, *text, *conf))
            .collect();
        SortedPageResults::from_sorted(results).unwrap()
    }

    fn assert_partition(selection: &Selection, total: usize) {
        let kept: BTreeSet<usize> = selection.kept_indices().into_iter().collect();
        assert!(kept.is_disjoint(&selection.removed));
        let union: BTreeSet<usize> = kept.union(&selection.removed).copied().collect();
        assert_eq!(union, (0..total).collect());
        let indices = selection.kept_indices();
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_threshold_validation() {
        assert!(DuplicateSelector::new(0.0).is_ok());
        assert!(DuplicateSelector::new(1.0).is_ok());
        assert_eq!(
            DuplicateSelector::new(1.5).unwrap_err(),
            ScanError::InvalidThreshold(1.5)
        );
        assert!(DuplicateSelector::new(-0.1).is_err());
        assert!(DuplicateSelector::new(f64::NAN).is_err());
        assert_eq!(DuplicateSelector::default().threshold(), 0.90);
    }

    #[test]
    fn test_empty_input() {
        let selection = DuplicateSelector::default().select(&SortedPageResults::default());
        assert!(selection.kept.is_empty());
        assert!(selection.removed.is_empty());
    }

    #[test]
    fn test_higher_confidence_duplicate_replaces_kept_page() {
        let input = pages(&["Hello world", "Hello world", "Goodbye"], &[0.8, 0.95, 0.9]);
        let selection = DuplicateSelector::default().select(&input);

        assert_eq!(selection.kept_indices(), vec![1, 2]);
        assert_eq!(selection.kept[0].text(), "Hello world");
        assert_eq!(selection.kept[0].confidence(), 0.95);
        assert_eq!(selection.kept[1].text(), "Goodbye");
        assert_eq!(selection.removed, BTreeSet::from([0]));
    }

    #[test]
    fn test_run_of_near_duplicates_collapses_to_one() {
        let input = pages(
            &[
                "The quick brown fox jumps over the lazy dog",
                "The quick brown fox jumps over the lazy dog.",
                "The quick brown fox jumped over the lazy dog",
            ],
            &[0.7, 0.9, 0.8],
        );
        let selection = DuplicateSelector::default().select(&input);

        assert_eq!(selection.kept_indices(), vec![1]);
        assert_eq!(selection.removed, BTreeSet::from([0, 2]));
    }

    #[test]
    fn test_comparison_chains_against_last_kept_page() {
        // Pages 1 and 2 each differ from page 0 by two edits (0.933), but from
        // each other by four (0.867). Page 1 is discarded, so page 2 must be
        // judged against page 0 and discarded too.
        let input = pages(
            &[
                "abcdefghijklmnopqrstuvwxyz0123",
                "XXcdefghijklmnopqrstuvwxyz0123",
                "abcdefghijklmnopqrstuvwxyz01YY",
            ],
            &[0.9, 0.5, 0.6],
        );
        let selection = DuplicateSelector::default().select(&input);

        assert_eq!(selection.kept_indices(), vec![0]);
        assert_eq!(selection.removed, BTreeSet::from([1, 2]));
    }

    #[test]
    fn test_dissimilar_pages_all_kept() {
        let input = pages(
            &["Chapter one", "A completely different page", "Appendix B: tables"],
            &[0.9, 0.4, 0.7],
        );
        let selection = DuplicateSelector::default().select(&input);

        assert_eq!(selection.kept, input.as_slice().to_vec());
        assert!(selection.removed.is_empty());
    }

    #[test]
    fn test_single_page_always_kept() {
        for text in ["", "anything at all"] {
            let input = pages(&[text], &[0.0]);
            let selection = DuplicateSelector::default().select(&input);
            assert_eq!(selection.kept_indices(), vec![0]);
            assert!(selection.removed.is_empty());
        }
    }

    #[test]
    fn test_equal_confidence_keeps_earlier_page() {
        let input = pages(&["Same text", "Same text"], &[0.8, 0.8]);
        let selection = DuplicateSelector::default().select(&input);
        assert_eq!(selection.kept_indices(), vec![0]);
        assert_eq!(selection.removed, BTreeSet::from([1]));
    }

    #[test]
    fn test_threshold_one_never_merges() {
        // The comparison is strict, so a score of exactly 1.0 does not exceed 1.0.
        let selector = DuplicateSelector::new(1.0).unwrap();
        let input = pages(&["Same text", "Same text", "Same texts"], &[0.5, 0.9, 0.9]);
        let selection = selector.select(&input);
        assert_eq!(selection.kept_indices(), vec![0, 1, 2]);
        assert!(selection.removed.is_empty());
    }

    #[test]
    fn test_threshold_zero_merges_any_overlap() {
        let selector = DuplicateSelector::new(0.0).unwrap();
        let input = pages(
            &["alpha page", "beta page", "gamma page", "delta page"],
            &[0.6, 0.9, 0.7, 0.95],
        );
        let selection = selector.select(&input);

        // Every surviving pair shares characters, so the chain reduces to the
        // single highest-confidence page.
        assert_eq!(selection.kept_indices(), vec![3]);
        assert_eq!(selection.removed, BTreeSet::from([0, 1, 2]));
    }

    #[test]
    fn test_threshold_zero_keeps_fully_disjoint_pages() {
        // Equal-length strings with no characters in common score exactly 0.0,
        // which does not exceed a 0.0 threshold.
        let selector = DuplicateSelector::new(0.0).unwrap();
        let input = pages(&["abc", "xyz"], &[0.5, 0.9]);
        let selection = selector.select(&input);
        assert_eq!(selection.kept_indices(), vec![0, 1]);
    }

    #[test]
    fn test_failed_pages_never_merge() {
        let results = vec![
            PageOcrResult::failed(0, PageFailure::Recognition("engine error".into())),
            PageOcrResult::failed(1, PageFailure::Recognition("engine error".into())),
            PageOcrResult::recognized(2, "Hello", 0.9),
        ];
        let input = SortedPageResults::from_sorted(results).unwrap();
        let selection = DuplicateSelector::default().select(&input);
        assert_eq!(selection.kept_indices(), vec![0, 1, 2]);
    }

    #[test]
    fn test_partition_and_order_hold_across_thresholds() {
        let input = pages(
            &[
                "Page A text",
                "Page A text",
                "Page B text body",
                "Page B text body.",
                "",
                "",
                "Page C",
                "Page A text",
            ],
            &[0.5, 0.6, 0.9, 0.3, 0.0, 0.0, 0.8, 0.99],
        );
        for threshold in [0.0, 0.25, 0.5, 0.75, 0.9, 0.99, 1.0] {
            let selection = DuplicateSelector::new(threshold).unwrap().select(&input);
            assert!(!selection.kept.is_empty());
            assert_partition(&selection, input.len());
        }
    }
}
