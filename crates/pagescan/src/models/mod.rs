//! Domain models for one OCR run.

mod page;
mod run;

pub use page::{PageOcrResult, TextFragment, RECOGNITION_FAILED_TEXT};
pub use run::{OcrRun, SortedPageResults};
