//! Near-duplicate page detection and result publishing.
//!
//! Pages are compared by OCR text using a normalized edit-distance score.
//! The selector walks pages in scan order and compares each one against the
//! most recently kept page, collapsing runs of near-identical captures to the
//! single highest-confidence copy.

mod publish;
mod selector;
mod similarity;

pub use publish::{publish, PublishedScan, NO_TEXT_PLACEHOLDER, PAGE_BREAK};
pub use selector::{DuplicateSelector, Selection, DEFAULT_SIMILARITY_THRESHOLD};
pub use similarity::similarity;
