//! Page image inputs.

use std::io::Write;
use std::path::{Path, PathBuf};

use super::backend::OcrError;

/// One page image handed to an OCR engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageImage {
    /// Image file on disk.
    File(PathBuf),
    /// Encoded image bytes (PNG, JPEG, TIFF, ...).
    Encoded(Vec<u8>),
}

impl PageImage {
    /// Short label for logs and progress output.
    pub fn label(&self) -> String {
        match self {
            PageImage::File(path) => path.display().to_string(),
            PageImage::Encoded(bytes) => format!("<{} bytes>", bytes.len()),
        }
    }

    /// Sniff the content and return its file extension.
    ///
    /// Fails if the file is missing or the content is not a recognized image.
    pub fn validate(&self) -> Result<&'static str, OcrError> {
        let kind = match self {
            PageImage::File(path) => infer::get_from_path(path).map_err(|e| {
                OcrError::InvalidImage(format!("cannot read {}: {}", path.display(), e))
            })?,
            PageImage::Encoded(bytes) => infer::get(bytes),
        };

        match kind {
            Some(kind) if kind.matcher_type() == infer::MatcherType::Image => Ok(kind.extension()),
            Some(kind) => Err(OcrError::InvalidImage(format!(
                "{} is {}, not an image",
                self.label(),
                kind.mime_type()
            ))),
            None => Err(OcrError::InvalidImage(format!(
                "{} has unrecognized content",
                self.label()
            ))),
        }
    }

    /// Run `f` with a filesystem path to the image.
    ///
    /// Encoded images are written to a temporary file that lives until `f`
    /// returns.
    pub fn with_local_path<T, F>(&self, f: F) -> Result<T, OcrError>
    where
        F: FnOnce(&Path) -> Result<T, OcrError>,
    {
        match self {
            PageImage::File(path) => f(path),
            PageImage::Encoded(bytes) => {
                let extension = self.validate()?;
                let mut file = tempfile::Builder::new()
                    .prefix("pagescan-")
                    .suffix(&format!(".{}", extension))
                    .tempfile()?;
                file.write_all(bytes)?;
                file.flush()?;
                f(file.path())
            }
        }
    }
}

impl From<PathBuf> for PageImage {
    fn from(path: PathBuf) -> Self {
        PageImage::File(path)
    }
}

impl From<&Path> for PageImage {
    fn from(path: &Path) -> Self {
        PageImage::File(path.to_path_buf())
    }
}

impl From<Vec<u8>> for PageImage {
    fn from(bytes: Vec<u8>) -> Self {
        PageImage::Encoded(bytes)
    }
}
