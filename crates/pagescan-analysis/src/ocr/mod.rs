//! OCR engine boundary.
//!
//! Engines are synchronous: they take one page image and return the text
//! regions they recognized. The coordinator runs them on blocking threads.
//!
//! - **Tesseract**: command-line engine, CPU-based (default)

mod backend;
mod image;
mod tesseract;
mod tools;
mod tsv;

pub use backend::{create_engine, OcrEngine, OcrEngineType, OcrError, RecognitionOptions};
pub use image::PageImage;
pub use tesseract::TesseractEngine;
pub use tools::check_binary;
