//! Flattening of raw recognizer output into recognized lines.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

/// Maximum nesting levels unwrapped while looking for detections.
const MAX_FLATTEN_DEPTH: usize = 32;

/// A single recognized text line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Text exactly as recognized.
    pub text: String,
    /// Text with spaces removed and colons unified.
    pub normalized: String,
    /// Recognition confidence (0.0 - 1.0).
    pub confidence: f64,
}

impl Line {
    pub fn new(text: impl Into<String>, confidence: f64) -> Self {
        let text = text.into();
        let normalized = normalize_text(&text);
        Self {
            text,
            normalized,
            confidence,
        }
    }

    /// Build a line from a single `[geometry, [text, score]]` detection.
    ///
    /// Returns `None` for anything that is not detection-shaped or has empty text.
    pub fn from_detection(value: &Value) -> Option<Self> {
        let (text, score) = detection_parts(value)?;
        if text.is_empty() {
            return None;
        }
        Some(Self::new(text, score))
    }
}

/// Remove spaces, map `:` to the full-width colon, and trim.
pub fn normalize_text(text: &str) -> String {
    text.replace(' ', "").replace(':', "：").trim().to_string()
}

fn detection_parts(value: &Value) -> Option<(&str, f64)> {
    match value.as_array()?.as_slice() {
        [_, payload] => match payload.as_array()?.as_slice() {
            [Value::String(text), Value::Number(score)] => Some((text.as_str(), score.as_f64()?)),
            _ => None,
        },
        _ => None,
    }
}

fn looks_like_detection(value: &Value) -> bool {
    detection_parts(value).is_some()
}

/// Flatten nested detections into an ordered list of lines.
///
/// Nesting levels are unwrapped until some element at the current level is
/// detection-shaped, until unwrapping stops changing anything, or until
/// [`MAX_FLATTEN_DEPTH`] levels have been removed.
pub fn normalize_detections(raw: &[Value]) -> Vec<Line> {
    let mut candidate: Vec<&Value> = raw.iter().collect();
    let mut depth = 0;

    while !candidate.is_empty() && !candidate.iter().any(|v| looks_like_detection(v)) {
        if depth >= MAX_FLATTEN_DEPTH {
            debug!("Stopped flattening detections at depth {}", depth);
            break;
        }

        let next_level: Vec<&Value> = candidate
            .iter()
            .filter_map(|v| v.as_array())
            .flatten()
            .collect();

        if next_level.is_empty() || next_level == candidate {
            break;
        }

        candidate = next_level;
        depth += 1;
    }

    let lines: Vec<Line> = candidate.into_iter().filter_map(Line::from_detection).collect();
    trace!("Normalized {} lines after {} flattening steps", lines.len(), depth);
    lines
}

/// Recognized display strings in detection order.
pub fn extract_text_lines(raw: &[Value]) -> Vec<String> {
    normalize_detections(raw).into_iter().map(|line| line.text).collect()
}
