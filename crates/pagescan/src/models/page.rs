//! Per-page OCR result model.

use serde::{Deserialize, Serialize};

use crate::error::PageFailure;

/// Text placed on a page whose recognition failed.
pub const RECOGNITION_FAILED_TEXT: &str = "[Text recognition failed]";

/// One recognized text region as returned by an OCR engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    /// Top candidate string for the region.
    pub text: String,
    /// Recognition confidence (0.0 - 1.0).
    pub confidence: f32,
}

impl TextFragment {
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence,
        }
    }
}

/// OCR outcome for a single page of a scan.
///
/// Created once per page when its recognition resolves and never mutated
/// afterwards. Failed pages carry [`RECOGNITION_FAILED_TEXT`], zero confidence,
/// and the failure cause.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageOcrResult {
    original_index: usize,
    text: String,
    confidence: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    failure: Option<PageFailure>,
}

impl PageOcrResult {
    /// Result for a successfully recognized page. Confidence is clamped to `[0.0, 1.0]`.
    pub fn recognized(original_index: usize, text: impl Into<String>, confidence: f32) -> Self {
        Self {
            original_index,
            text: text.into(),
            confidence: clamp_confidence(confidence),
            failure: None,
        }
    }

    /// Build a page result from engine fragments.
    ///
    /// Fragment texts are joined with newlines in engine order. Confidence is
    /// the character-count-weighted mean of fragment confidences, or 0.0 when
    /// no characters were recognized.
    pub fn from_fragments(original_index: usize, fragments: &[TextFragment]) -> Self {
        let text = fragments
            .iter()
            .map(|f| f.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let mut weighted = 0.0f64;
        let mut total_chars = 0usize;
        for fragment in fragments {
            let chars = fragment.text.chars().count();
            weighted += f64::from(clamp_confidence(fragment.confidence)) * chars as f64;
            total_chars += chars;
        }
        let confidence = if total_chars == 0 {
            0.0
        } else {
            (weighted / total_chars as f64) as f32
        };

        Self::recognized(original_index, text, confidence)
    }

    /// Result for a page whose recognition failed.
    pub fn failed(original_index: usize, failure: PageFailure) -> Self {
        Self {
            original_index,
            text: RECOGNITION_FAILED_TEXT.to_string(),
            confidence: 0.0,
            failure: Some(failure),
        }
    }

    /// Position of the page in the as-scanned sequence.
    pub fn original_index(&self) -> usize {
        self.original_index
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    pub fn failure(&self) -> Option<&PageFailure> {
        self.failure.as_ref()
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }
}

fn clamp_confidence(confidence: f32) -> f32 {
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}
