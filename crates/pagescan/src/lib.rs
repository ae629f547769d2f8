//! pagescan - OCR page deduplication for multi-page scans.
//!
//! Core library: per-page OCR results, text similarity, near-duplicate page
//! selection and combined-text publishing. Running the OCR engines lives in
//! `pagescan-analysis`; this crate performs no I/O beyond loading config.

pub mod config;
pub mod dedup;
pub mod error;
pub mod models;

pub use config::{Config, ConfigError, DedupConfig, OcrConfig, RecognitionLevel};

pub use dedup::{
    publish, similarity, DuplicateSelector, PublishedScan, Selection,
    DEFAULT_SIMILARITY_THRESHOLD, NO_TEXT_PLACEHOLDER, PAGE_BREAK,
};
pub use error::{PageFailure, ScanError};
pub use models::{
    OcrRun, PageOcrResult, SortedPageResults, TextFragment, RECOGNITION_FAILED_TEXT,
};
