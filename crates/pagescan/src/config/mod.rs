//! Configuration loading.
//!
//! Settings come from a TOML file (default `<config_dir>/pagescan/config.toml`)
//! with `PAGESCAN_*` environment variables applied on top. A missing file
//! yields the defaults.

mod ocr;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dedup::{DuplicateSelector, DEFAULT_SIMILARITY_THRESHOLD};
use crate::error::ScanError;

pub use ocr::{OcrConfig, RecognitionLevel, DEFAULT_OCR_WORKERS, DEFAULT_PAGE_TIMEOUT_SECS};

/// Config file name inside the config directory.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Near-duplicate detection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    /// Similarity above which adjacent surviving pages count as duplicates.
    pub threshold: f64,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

impl DedupConfig {
    pub fn selector(&self) -> Result<DuplicateSelector, ScanError> {
        DuplicateSelector::new(self.threshold)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dedup: DedupConfig,
    pub ocr: OcrConfig,
    /// File this config was loaded from, if any.
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Default config file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("pagescan").join(CONFIG_FILENAME))
    }

    /// Load config from `path` (or the default location), then apply
    /// environment overrides and validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_from_path(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from_path(&path)?,
                _ => {
                    tracing::debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a config file without applying environment overrides.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&content)?;
        config.source_path = Some(path.to_path_buf());
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Apply `PAGESCAN_*` overrides using `lookup` to read variables.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("PAGESCAN_THRESHOLD") {
            self.dedup.threshold = parse_override("PAGESCAN_THRESHOLD", &value)?;
        }
        if let Some(value) = lookup("PAGESCAN_WORKERS") {
            self.ocr.workers = parse_override("PAGESCAN_WORKERS", &value)?;
        }
        if let Some(value) = lookup("PAGESCAN_PAGE_TIMEOUT_SECS") {
            self.ocr.page_timeout_secs = parse_override("PAGESCAN_PAGE_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = lookup("PAGESCAN_LANGUAGE") {
            self.ocr.language = value.trim().to_string();
        }
        if let Some(value) = lookup("PAGESCAN_RECOGNITION_LEVEL") {
            self.ocr.recognition_level = RecognitionLevel::parse(&value).ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "PAGESCAN_RECOGNITION_LEVEL must be 'fast' or 'accurate', got '{}'",
                    value
                ))
            })?;
        }
        Ok(())
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.dedup.threshold;
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::Invalid(format!(
                "dedup.threshold must be within [0.0, 1.0], got {}",
                threshold
            )));
        }
        if self.ocr.language.is_empty() {
            return Err(ConfigError::Invalid("ocr.language must not be empty".into()));
        }
        if self.ocr.engine.is_empty() {
            return Err(ConfigError::Invalid("ocr.engine must not be empty".into()));
        }
        Ok(())
    }
}

fn parse_override<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("{} has invalid value '{}'", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.dedup.threshold, 0.90);
        assert_eq!(config.ocr.engine, "tesseract");
        assert_eq!(config.ocr.recognition_level, RecognitionLevel::Accurate);
        assert!(config.ocr.language_correction);
        assert_eq!(config.ocr.page_timeout(), Some(Duration::from_secs(120)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [dedup]
            threshold = 0.85

            [ocr]
            recognition_level = "fast"
            language_correction = false
            "#,
        )
        .unwrap();
        assert_eq!(config.dedup.threshold, 0.85);
        assert_eq!(config.ocr.recognition_level, RecognitionLevel::Fast);
        assert!(!config.ocr.language_correction);
        assert_eq!(config.ocr.language, "eng");
        assert_eq!(config.ocr.workers, DEFAULT_OCR_WORKERS);
    }

    #[test]
    fn test_unknown_recognition_level_rejected() {
        let err = Config::from_toml("[ocr]\nrecognition_level = \"turbo\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let config = Config::from_toml("[dedup]\nthreshold = 1.2\n").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("PAGESCAN_THRESHOLD", "0.8"),
            ("PAGESCAN_WORKERS", "0"),
            ("PAGESCAN_PAGE_TIMEOUT_SECS", "0"),
            ("PAGESCAN_LANGUAGE", "deu+eng"),
            ("PAGESCAN_RECOGNITION_LEVEL", "FAST"),
        ]);
        let mut config = Config::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.dedup.threshold, 0.8);
        assert!(config.ocr.effective_workers() >= 1);
        assert_eq!(config.ocr.page_timeout(), None);
        assert_eq!(config.ocr.language, "deu+eng");
        assert_eq!(config.ocr.recognition_level, RecognitionLevel::Fast);
    }

    #[test]
    fn test_invalid_env_override() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(|key| (key == "PAGESCAN_WORKERS").then(|| "many".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_load_from_path_records_source() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[ocr]\nworkers = 2\n").unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.ocr.workers, 2);
        assert_eq!(config.source_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            Config::load(Some(&missing)),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_toml_roundtrip_skips_source_path() {
        let mut config = Config::default();
        config.source_path = Some(PathBuf::from("/tmp/config.toml"));
        let text = config.to_toml().unwrap();
        assert!(!text.contains("source_path"));
        let parsed = Config::from_toml(&text).unwrap();
        assert_eq!(parsed.dedup, config.dedup);
        assert_eq!(parsed.ocr, config.ocr);
    }
}
