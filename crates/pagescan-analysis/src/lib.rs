//! OCR engines and the concurrent per-page scan pipeline for pagescan.

pub mod ocr;
pub mod services;

pub use ocr::{
    create_engine, OcrEngine, OcrEngineType, OcrError, PageImage, RecognitionOptions,
    TesseractEngine,
};
pub use services::scan::{OcrCoordinator, PageSummary, ScanEvent, ScanOutcome, ScanService};
