//! OCR run state and the ordered hand-off to selection.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::warn;

use super::page::PageOcrResult;
use crate::error::ScanError;

/// Aggregates per-page results for one OCR run.
///
/// Owned by a single collecting task; per-page workers hand their results to
/// it over a channel instead of writing shared state. A run is complete once
/// every page index in `0..page_count` has resolved.
#[derive(Debug)]
pub struct OcrRun {
    page_count: usize,
    pending: BTreeSet<usize>,
    results: BTreeMap<usize, PageOcrResult>,
}

impl OcrRun {
    /// Start a run over `page_count` pages.
    pub fn new(page_count: usize) -> Result<Self, ScanError> {
        if page_count == 0 {
            return Err(ScanError::EmptyInput);
        }
        Ok(Self {
            page_count,
            pending: (0..page_count).collect(),
            results: BTreeMap::new(),
        })
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Number of pages not yet resolved.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Indices of pages not yet resolved, ascending.
    pub fn pending_indices(&self) -> Vec<usize> {
        self.pending.iter().copied().collect()
    }

    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }

    /// Record a page result.
    ///
    /// Returns `true` only for the write that resolves the last pending page,
    /// so completion is observed exactly once. Results for unknown or
    /// already-resolved pages are dropped.
    pub fn record(&mut self, result: PageOcrResult) -> bool {
        let index = result.original_index();
        if !self.pending.remove(&index) {
            warn!(
                "Ignoring OCR result for page {} (unknown or already resolved)",
                index
            );
            return false;
        }
        self.results.insert(index, result);
        self.pending.is_empty()
    }

    /// Finish the run, yielding results in ascending page order.
    pub fn into_sorted(self) -> Result<SortedPageResults, ScanError> {
        if let Some(&missing) = self.pending.iter().next() {
            return Err(ScanError::MissingPageIndex(missing));
        }
        Ok(SortedPageResults(self.results.into_values().collect()))
    }
}

/// Page results in strictly ascending `original_index` order.
///
/// The only input the selector accepts, so the ordering invariant is checked
/// once at construction rather than assumed downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SortedPageResults(Vec<PageOcrResult>);

impl SortedPageResults {
    /// Accept results that are already strictly ascending by page index.
    pub fn from_sorted(results: Vec<PageOcrResult>) -> Result<Self, ScanError> {
        for pair in results.windows(2) {
            let previous = pair[0].original_index();
            let next = pair[1].original_index();
            if next == previous {
                return Err(ScanError::DuplicatePageIndex(next));
            }
            if next < previous {
                return Err(ScanError::OutOfOrder { previous, next });
            }
        }
        Ok(Self(results))
    }

    /// Sort results by page index. Fails if an index appears twice.
    pub fn from_unordered(mut results: Vec<PageOcrResult>) -> Result<Self, ScanError> {
        results.sort_by_key(PageOcrResult::original_index);
        Self::from_sorted(results)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageOcrResult> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[PageOcrResult] {
        &self.0
    }

    /// Page indices in ascending order.
    pub fn indices(&self) -> Vec<usize> {
        self.0.iter().map(PageOcrResult::original_index).collect()
    }
}
