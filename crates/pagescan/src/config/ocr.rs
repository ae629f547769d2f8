//! OCR engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default per-page OCR timeout in seconds.
pub const DEFAULT_PAGE_TIMEOUT_SECS: u64 = 120;

/// Default number of pages recognized concurrently.
pub const DEFAULT_OCR_WORKERS: usize = 4;

/// Engine accuracy/speed trade-off, passed through to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecognitionLevel {
    Fast,
    #[default]
    Accurate,
}

impl RecognitionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecognitionLevel::Fast => "fast",
            RecognitionLevel::Accurate => "accurate",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "fast" => Some(RecognitionLevel::Fast),
            "accurate" => Some(RecognitionLevel::Accurate),
            _ => None,
        }
    }
}

impl std::fmt::Display for RecognitionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// OCR settings for a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Engine name (e.g., "tesseract").
    pub engine: String,
    /// Speed/accuracy trade-off.
    pub recognition_level: RecognitionLevel,
    /// Whether the engine may apply dictionary-based language correction.
    pub language_correction: bool,
    /// Recognition language (e.g., "eng", "deu+eng").
    pub language: String,
    /// Maximum pages recognized concurrently. 0 = number of CPUs.
    pub workers: usize,
    /// Per-page timeout in seconds. 0 disables the timeout.
    pub page_timeout_secs: u64,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            engine: "tesseract".to_string(),
            recognition_level: RecognitionLevel::Accurate,
            language_correction: true,
            language: "eng".to_string(),
            workers: DEFAULT_OCR_WORKERS,
            page_timeout_secs: DEFAULT_PAGE_TIMEOUT_SECS,
        }
    }
}

impl OcrConfig {
    /// Worker count with 0 resolved to the available parallelism.
    pub fn effective_workers(&self) -> usize {
        if self.workers > 0 {
            self.workers
        } else {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        }
    }

    pub fn page_timeout(&self) -> Option<Duration> {
        (self.page_timeout_secs > 0).then(|| Duration::from_secs(self.page_timeout_secs))
    }
}
