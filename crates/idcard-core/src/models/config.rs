//! Configuration structures for the ID card pipeline.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{IdCardError, Result};

/// Main configuration for the idcard pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdCardConfig {
    /// Recognition engine configuration.
    pub ocr: OcrConfig,

    /// Input image validation.
    pub upload: UploadConfig,
}

/// Recognition engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "ch_rec.onnx".to_string(),
            dictionary: "ppocr_keys_v1.txt".to_string(),
        }
    }
}

impl OcrConfig {
    /// Get full path to a model file.
    pub fn model_path(&self, file_name: &str) -> PathBuf {
        self.model_dir.join(file_name)
    }
}

/// Limits applied to input images before recognition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Maximum accepted image size in bytes.
    pub max_upload_bytes: usize,

    /// Accepted file extensions (lowercase).
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: 8 * 1024 * 1024,
            allowed_extensions: vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()],
        }
    }
}

impl UploadConfig {
    /// Check an input image's extension, emptiness and size.
    pub fn validate(&self, field: &str, extension: &str, data: &[u8]) -> Result<()> {
        let invalid = |reason: String| IdCardError::InvalidUpload {
            field: field.to_string(),
            reason,
        };

        let extension = extension.to_lowercase();
        if !self.allowed_extensions.contains(&extension) {
            return Err(invalid("must be a JPEG or PNG image".to_string()));
        }
        if data.is_empty() {
            return Err(invalid("is empty".to_string()));
        }
        if data.len() > self.max_upload_bytes {
            return Err(invalid(format!(
                "exceeds {}MB limit",
                self.max_upload_bytes / (1024 * 1024)
            )));
        }
        Ok(())
    }
}

impl IdCardConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| IdCardError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply `IDCARD_OCR_*` environment overrides.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup("IDCARD_OCR_MODEL_DIR") {
            self.ocr.model_dir = PathBuf::from(dir);
        }
        if let Some(name) = lookup("IDCARD_OCR_DET_MODEL") {
            self.ocr.detection_model = name;
        }
        if let Some(name) = lookup("IDCARD_OCR_REC_MODEL") {
            self.ocr.recognition_model = name;
        }
        if let Some(name) = lookup("IDCARD_OCR_DICTIONARY") {
            self.ocr.dictionary = name;
        }
        debug!("Model directory: {}", self.ocr.model_dir.display());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: IdCardConfig =
            serde_json::from_str(r#"{"ocr": {"model_dir": "/opt/models"}}"#).unwrap();

        assert_eq!(config.ocr.model_dir, PathBuf::from("/opt/models"));
        assert_eq!(config.ocr.detection_model, "det.onnx");
        assert_eq!(config.upload, UploadConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = IdCardConfig::default();
        config.upload.max_upload_bytes = 1024;
        config.save(&path).unwrap();

        assert_eq!(IdCardConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_env_overrides() {
        let config = IdCardConfig::default().with_overrides(|key| match key {
            "IDCARD_OCR_MODEL_DIR" => Some("/srv/ocr".to_string()),
            "IDCARD_OCR_DICTIONARY" => Some("keys.txt".to_string()),
            _ => None,
        });

        assert_eq!(config.ocr.model_dir, PathBuf::from("/srv/ocr"));
        assert_eq!(config.ocr.dictionary, "keys.txt");
        assert_eq!(config.ocr.recognition_model, "ch_rec.onnx");
    }

    #[test]
    fn test_upload_validation() {
        let upload = UploadConfig::default();

        assert!(upload.validate("front_image", "PNG", b"data").is_ok());
        assert!(matches!(
            upload.validate("front_image", "gif", b"data"),
            Err(IdCardError::InvalidUpload { .. })
        ));
        assert!(upload.validate("back_image", "jpg", b"").is_err());

        let small = UploadConfig {
            max_upload_bytes: 2,
            ..UploadConfig::default()
        };
        assert!(small.validate("back_image", "jpg", b"ab").is_ok());
        assert!(small.validate("back_image", "jpg", b"abc").is_err());
    }
}
