// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.
//
// Everything is resolved relative to a base directory: `$WORTWERK_HOME` when
// set, otherwise the directory holding the running executable. A packaged
// build therefore writes its documents and log next to the binary.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, WortwerkError};

/// Name of the persisted settings file inside the base directory.
pub const CONFIG_FILE: &str = "wortwerk.json";

/// Directory (under the base directory) that receives converted documents.
pub const OUTPUT_DIR_NAME: &str = "word_docs";

/// Log file name (under the base directory).
pub const LOG_FILE_NAME: &str = "wortwerk.log";

/// Default direct-text length below which a page is sent to OCR.
pub const DEFAULT_MIN_TEXT_THRESHOLD: usize = 30;

/// Default rasterisation resolution for OCR.
pub const DEFAULT_OCR_DPI: u32 = 300;

/// Default OCR language code.
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";

/// Which OCR engine to construct at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OcrEngineKind {
    /// First engine that initialises: Tesseract, then `ocrs`.
    #[default]
    Auto,
    /// Tesseract via `leptess`; honours language codes.
    Tesseract,
    /// Pure-Rust `ocrs` engine; Latin script only.
    Ocrs,
    /// Never run OCR; sparse pages keep their direct text.
    Disabled,
}

/// Persistent application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where converted `.docx` files are written.
    pub output_dir: PathBuf,
    /// Path of the application log file.
    pub log_file: PathBuf,
    /// Size in bytes at which the log file is rotated.
    pub log_max_bytes: u64,
    /// Number of rotated log files kept (`.1`, `.2`, ...).
    pub log_backups: usize,
    /// Pages with fewer direct-text characters than this are OCR'd.
    pub min_text_threshold: usize,
    /// Rendering resolution used before OCR.
    pub ocr_dpi: u32,
    /// Language used when the caller does not pick one.
    pub ocr_language: String,
    /// OCR engine selection.
    pub ocr_engine: OcrEngineKind,
    /// Directory with `ocrs` model files; `None` uses the ocrs cache dir.
    pub ocr_model_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_base_dir(base_dir())
    }
}

impl AppConfig {
    /// Defaults with every path rooted at `base`.
    pub fn for_base_dir(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self {
            output_dir: base.join(OUTPUT_DIR_NAME),
            log_file: base.join(LOG_FILE_NAME),
            log_max_bytes: 1_000_000,
            log_backups: 3,
            min_text_threshold: DEFAULT_MIN_TEXT_THRESHOLD,
            ocr_dpi: DEFAULT_OCR_DPI,
            ocr_language: DEFAULT_OCR_LANGUAGE.to_string(),
            ocr_engine: OcrEngineKind::Auto,
            ocr_model_dir: None,
        }
    }

    /// Load `wortwerk.json` from `base`, falling back to defaults when the
    /// file is absent or unreadable.
    pub fn load_or_default(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        let path = base.join(CONFIG_FILE);
        let data = match std::fs::read_to_string(&path) {
            Ok(data) => data,
            Err(_) => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Self::for_base_dir(base);
            }
        };
        let config = match Self::overlay(base, &data) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %path.display(), %err, "ignoring malformed config file");
                return Self::for_base_dir(base);
            }
        };
        match config.validate() {
            Ok(()) => config,
            Err(err) => {
                warn!(path = %path.display(), %err, "ignoring invalid config file");
                Self::for_base_dir(base)
            }
        }
    }

    /// Apply the keys present in `data` on top of the defaults for `base`.
    fn overlay(base: &Path, data: &str) -> Result<Self> {
        let mut merged = serde_json::to_value(Self::for_base_dir(base))?;
        let overrides: serde_json::Value = serde_json::from_str(data)?;
        let (Some(target), serde_json::Value::Object(source)) = (merged.as_object_mut(), overrides)
        else {
            return Err(WortwerkError::Config("config file must hold a JSON object".into()));
        };
        target.extend(source);
        Ok(serde_json::from_value(merged)?)
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.ocr_dpi == 0 {
            return Err(WortwerkError::Config("ocr_dpi must be greater than zero".into()));
        }
        if self.ocr_language.trim().is_empty() {
            return Err(WortwerkError::Config("ocr_language must not be empty".into()));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(WortwerkError::Config("output_dir must not be empty".into()));
        }
        Ok(())
    }

    /// Persist the settings as pretty JSON into `base`.
    pub fn save(&self, base: impl AsRef<Path>) -> Result<()> {
        let path = base.as_ref().join(CONFIG_FILE);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)?;
        Ok(())
    }
}

/// Resolve the base directory for output and logs.
pub fn base_dir() -> PathBuf {
    if let Some(home) = std::env::var_os("WORTWERK_HOME") {
        return PathBuf::from(home);
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_rooted_at_base() {
        let config = AppConfig::for_base_dir("/opt/wortwerk");
        assert_eq!(config.output_dir, PathBuf::from("/opt/wortwerk/word_docs"));
        assert_eq!(config.log_file, PathBuf::from("/opt/wortwerk/wortwerk.log"));
        assert_eq!(config.min_text_threshold, 30);
        assert_eq!(config.ocr_dpi, 300);
        assert_eq!(config.ocr_language, "eng");
        assert_eq!(config.log_max_bytes, 1_000_000);
        assert_eq!(config.log_backups, 3);
        assert_eq!(config.ocr_engine, OcrEngineKind::Auto);
    }

    #[test]
    fn engine_kind_uses_snake_case() {
        let json = serde_json::to_string(&OcrEngineKind::Tesseract).expect("serialize");
        assert_eq!(json, "\"tesseract\"");
        let kind: OcrEngineKind = serde_json::from_str("\"auto\"").expect("deserialize");
        assert_eq!(kind, OcrEngineKind::Auto);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = AppConfig::load_or_default(dir.path());
        assert_eq!(config.output_dir, dir.path().join(OUTPUT_DIR_NAME));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut config = AppConfig::for_base_dir(dir.path());
        config.min_text_threshold = 50;
        config.ocr_language = "eng+spa".into();
        config.ocr_engine = OcrEngineKind::Disabled;
        config.save(dir.path()).expect("save");

        let loaded = AppConfig::load_or_default(dir.path());
        assert_eq!(loaded.min_text_threshold, 50);
        assert_eq!(loaded.ocr_language, "eng+spa");
        assert_eq!(loaded.ocr_engine, OcrEngineKind::Disabled);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(CONFIG_FILE), r#"{ "ocr_dpi": 150 }"#).expect("write");
        let loaded = AppConfig::load_or_default(dir.path());
        assert_eq!(loaded.ocr_dpi, 150);
        assert_eq!(loaded.min_text_threshold, DEFAULT_MIN_TEXT_THRESHOLD);
        assert_eq!(loaded.output_dir, dir.path().join(OUTPUT_DIR_NAME));
    }

    #[test]
    fn malformed_file_is_ignored() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(CONFIG_FILE), "not json").expect("write");
        let loaded = AppConfig::load_or_default(dir.path());
        assert_eq!(loaded.ocr_dpi, DEFAULT_OCR_DPI);
    }

    #[test]
    fn zero_dpi_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(CONFIG_FILE), r#"{ "ocr_dpi": 0 }"#).expect("write");
        let loaded = AppConfig::load_or_default(dir.path());
        assert_eq!(loaded.ocr_dpi, DEFAULT_OCR_DPI);

        let mut config = AppConfig::for_base_dir(dir.path());
        config.ocr_dpi = 0;
        assert!(matches!(config.validate(), Err(WortwerkError::Config(_))));
    }
}
