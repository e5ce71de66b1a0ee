//! Core library for Chinese resident ID card OCR.
//!
//! This crate provides:
//! - Normalization of raw recognizer detections into text lines
//! - Rule-based field extraction for both card sides, with per-field confidence
//! - A recognition engine interface, with a pure Rust engine behind `native`

pub mod card;
pub mod error;
pub mod models;
pub mod ocr;

pub use card::{analyze_id_card, extract_text_lines, CardAnalysis, CardParser, IdCardParser, Line};
pub use error::{IdCardError, OcrError, Result};
pub use models::card::{BackSideResult, Field, FieldResult, FrontSideResult, IdCardResult, RawText};
pub use models::config::IdCardConfig;
pub use ocr::{decode_image, OcrResult, RecognitionEngine, TextBox};
#[cfg(feature = "native")]
pub use ocr::PureOcrEngine;
