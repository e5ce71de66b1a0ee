//! Error types for the idcard-core library.
//!
//! Field extraction itself never fails; these cover the recognizer and the
//! layers around the parser.

use thiserror::Error;

/// Main error type for the idcard library.
#[derive(Error, Debug)]
pub enum IdCardError {
    /// Recognition engine error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Rejected input image.
    #[error("invalid upload {field}: {reason}")]
    InvalidUpload { field: String, reason: String },

    /// Malformed detection dump or configuration file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by the recognition engine collaborator.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The engine could not be loaded or initialized.
    #[error("recognition engine unavailable: {0}")]
    EngineUnavailable(String),

    /// Image bytes could not be decoded.
    #[error("failed to decode image: {0}")]
    DecodeFailure(String),

    /// The engine failed while recognizing a decoded image.
    #[error("text recognition failed: {0}")]
    Recognition(String),
}

/// Result type for the idcard library.
pub type Result<T> = std::result::Result<T, IdCardError>;
