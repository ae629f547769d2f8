//! OCR engine abstraction.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use pagescan::config::{OcrConfig, RecognitionLevel};
use pagescan::{PageFailure, TextFragment};

use super::image::PageImage;
use super::tesseract::TesseractEngine;

/// Errors from OCR engines.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Engine not available: {0}")]
    EngineNotAvailable(String),

    #[error("OCR failed: {0}")]
    RecognitionFailed(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("No text observations returned")]
    NoText,

    #[error("Engine did not finish within {0:?}")]
    TimedOut(Duration),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl OcrError {
    /// Classify this error as a per-page failure.
    ///
    /// Errors raised before the engine could look at the page are request
    /// failures; errors from the engine itself are recognition failures.
    pub fn into_page_failure(self) -> PageFailure {
        match self {
            OcrError::EngineNotAvailable(msg) => PageFailure::Request(msg),
            OcrError::InvalidImage(msg) => PageFailure::Request(msg),
            OcrError::Io(e) => PageFailure::Request(e.to_string()),
            OcrError::RecognitionFailed(msg) => PageFailure::Recognition(msg),
            OcrError::NoText => PageFailure::Recognition("no text observations".to_string()),
            OcrError::TimedOut(limit) => PageFailure::TimedOut(limit),
        }
    }
}

/// Available OCR engine types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OcrEngineType {
    /// Tesseract OCR via command-line.
    Tesseract,
}

impl OcrEngineType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OcrEngineType::Tesseract => "tesseract",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "tesseract" => Some(OcrEngineType::Tesseract),
            _ => None,
        }
    }

    pub fn all() -> &'static [OcrEngineType] {
        &[OcrEngineType::Tesseract]
    }
}

impl std::fmt::Display for OcrEngineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-request recognition options passed through to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionOptions {
    pub level: RecognitionLevel,
    pub language_correction: bool,
    pub language: String,
    /// Engines that run external processes kill them after this long.
    pub deadline: Option<Duration>,
}

impl Default for RecognitionOptions {
    fn default() -> Self {
        Self::from(&OcrConfig::default())
    }
}

impl From<&OcrConfig> for RecognitionOptions {
    fn from(config: &OcrConfig) -> Self {
        Self {
            level: config.recognition_level,
            language_correction: config.language_correction,
            language: config.language.clone(),
            deadline: config.page_timeout(),
        }
    }
}

/// Trait for OCR engines.
pub trait OcrEngine: Send + Sync {
    /// Get the engine type.
    fn engine_type(&self) -> OcrEngineType;

    /// Check if this engine is available (binaries installed, models present).
    fn is_available(&self) -> bool;

    /// Get a description of what's needed to make this engine available.
    fn availability_hint(&self) -> String;

    /// Recognize text on one page image.
    ///
    /// Returns recognized regions in engine order. An empty vector means the
    /// engine ran but found nothing. Called on a blocking thread, never from
    /// inside an async task.
    fn recognize(
        &self,
        image: &PageImage,
        options: &RecognitionOptions,
    ) -> Result<Vec<TextFragment>, OcrError>;
}

/// Create the engine named in the config.
pub fn create_engine(config: &OcrConfig) -> Result<Arc<dyn OcrEngine>, OcrError> {
    let engine_type = OcrEngineType::parse(&config.engine).ok_or_else(|| {
        OcrError::EngineNotAvailable(format!("unknown OCR engine '{}'", config.engine))
    })?;

    let engine: Arc<dyn OcrEngine> = match engine_type {
        OcrEngineType::Tesseract => Arc::new(TesseractEngine::new()),
    };
    Ok(engine)
}
