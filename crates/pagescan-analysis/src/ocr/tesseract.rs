//! Tesseract OCR engine.
//!
//! Runs the `tesseract` command-line tool in TSV mode so that per-word
//! confidences are available.

use std::ffi::OsString;
use std::path::Path;

use tokio::process::Command;

use pagescan::config::RecognitionLevel;
use pagescan::TextFragment;

use super::backend::{OcrEngine, OcrEngineType, OcrError, RecognitionOptions};
use super::image::PageImage;
use super::tools::{check_binary, run_command};
use super::tsv::parse_tsv;

const TESSERACT_BIN: &str = "tesseract";

/// Tesseract OCR engine.
#[derive(Debug, Clone, Default)]
pub struct TesseractEngine;

impl TesseractEngine {
    pub fn new() -> Self {
        Self
    }

    /// Command-line arguments for one page.
    ///
    /// The recognition level is best-effort: the tesseract CLI has no real
    /// fast mode for a given traineddata, so `Fast` only skips the inverted
    /// image pass (`tessedit_do_invert=0`). Speed otherwise depends on the
    /// installed model (`tessdata_fast` vs `tessdata_best`).
    fn build_args(image_path: &Path, options: &RecognitionOptions) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            image_path.as_os_str().to_owned(),
            "stdout".into(),
            "-l".into(),
            options.language.clone().into(),
        ];
        if options.level == RecognitionLevel::Fast {
            args.extend(["-c", "tessedit_do_invert=0"].map(OsString::from));
        }
        if !options.language_correction {
            args.extend(
                ["-c", "load_system_dawg=0", "-c", "load_freq_dawg=0"].map(OsString::from),
            );
        }
        args.push("tsv".into());
        args
    }

    fn run_tesseract(
        &self,
        image_path: &Path,
        options: &RecognitionOptions,
    ) -> Result<Vec<TextFragment>, OcrError> {
        let mut command = Command::new(TESSERACT_BIN);
        command.args(Self::build_args(image_path, options));

        match run_command(command, options.deadline) {
            Ok(output) => {
                if output.status.success() {
                    Ok(parse_tsv(&String::from_utf8_lossy(&output.stdout)))
                } else {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    Err(OcrError::RecognitionFailed(format!(
                        "tesseract failed: {}",
                        stderr.trim()
                    )))
                }
            }
            Err(OcrError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Err(
                OcrError::EngineNotAvailable("tesseract not found (install tesseract-ocr)".into()),
            ),
            Err(e) => Err(e),
        }
    }
}

impl OcrEngine for TesseractEngine {
    fn engine_type(&self) -> OcrEngineType {
        OcrEngineType::Tesseract
    }

    fn is_available(&self) -> bool {
        check_binary(TESSERACT_BIN)
    }

    fn availability_hint(&self) -> String {
        if self.is_available() {
            "Tesseract is available".to_string()
        } else {
            "Tesseract not installed. Install with: apt install tesseract-ocr".to_string()
        }
    }

    fn recognize(
        &self,
        image: &PageImage,
        options: &RecognitionOptions,
    ) -> Result<Vec<TextFragment>, OcrError> {
        image.validate()?;
        image.with_local_path(|path| self.run_tesseract(path, options))
    }
}
