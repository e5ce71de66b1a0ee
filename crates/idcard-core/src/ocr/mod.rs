//! Recognition engine interface and recognizer output types.
//!
//! The engine itself is an injected collaborator: anything implementing
//! [`RecognitionEngine`] (including plain closures) can feed the parser.

mod decode;
#[cfg(feature = "native")]
mod pure_engine;

pub use decode::decode_image;
#[cfg(feature = "native")]
pub use pure_engine::PureOcrEngine;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::card::line::Line;
use crate::error::OcrError;

/// A detected text box with its coordinates and content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    /// Bounding box coordinates (x1, y1, x2, y2, x3, y3, x4, y4) for quadrilateral.
    pub bbox: [f32; 8],

    /// Recognized text content.
    pub text: String,

    /// Recognition confidence score (0.0 - 1.0).
    pub score: f64,
}

impl TextBox {
    /// Raw detection in the `[geometry, [text, score]]` shape.
    pub fn to_detection(&self) -> Value {
        let points: Vec<[f32; 2]> = self.bbox.chunks(2).map(|p| [p[0], p[1]]).collect();
        json!([points, [self.text, self.score]])
    }
}

/// Result of running the recognizer on one image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrResult {
    /// Recognized text boxes, in the order the recognizer produced them.
    pub boxes: Vec<TextBox>,

    /// Full text (boxes joined with newlines).
    pub text: String,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,

    /// Image dimensions (width, height).
    pub image_size: (u32, u32),
}

impl OcrResult {
    /// Build a result from boxes, filling in the joined text.
    pub fn from_boxes(boxes: Vec<TextBox>, image_size: (u32, u32)) -> Self {
        let text = boxes
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            boxes,
            text,
            processing_time_ms: 0,
            image_size,
        }
    }

    /// Normalized lines, skipping boxes with empty text.
    pub fn lines(&self) -> Vec<Line> {
        self.boxes
            .iter()
            .filter(|b| !b.text.is_empty())
            .map(|b| Line::new(b.text.clone(), b.score))
            .collect()
    }

    /// Display strings of the non-empty boxes.
    pub fn text_lines(&self) -> Vec<String> {
        self.lines().into_iter().map(|l| l.text).collect()
    }

    /// Raw detections, as dumped by the CLI and accepted by the parser.
    pub fn to_detections(&self) -> Vec<Value> {
        self.boxes.iter().map(TextBox::to_detection).collect()
    }
}

/// Produces recognized text boxes from encoded image bytes.
pub trait RecognitionEngine {
    /// Recognize all text on one image.
    fn recognize(&self, image: &[u8]) -> Result<OcrResult, OcrError>;
}

impl<F> RecognitionEngine for F
where
    F: Fn(&[u8]) -> Result<OcrResult, OcrError>,
{
    fn recognize(&self, image: &[u8]) -> Result<OcrResult, OcrError> {
        self(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::line::normalize_detections;
    use pretty_assertions::assert_eq;

    fn text_box(text: &str, score: f64) -> TextBox {
        TextBox {
            bbox: [0.0, 0.0, 10.0, 0.0, 10.0, 5.0, 0.0, 5.0],
            text: text.to_string(),
            score,
        }
    }

    #[test]
    fn test_lines_skip_empty_boxes() {
        let result = OcrResult::from_boxes(
            vec![text_box("姓名 张三", 0.9), text_box("", 0.5)],
            (100, 60),
        );

        let lines = result.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].normalized, "姓名张三");
        assert_eq!(result.text, "姓名 张三\n");
    }

    #[test]
    fn test_detections_round_trip_through_normalizer() {
        let result = OcrResult::from_boxes(vec![text_box("住址:北京市", 0.75)], (100, 60));

        let lines = normalize_detections(&result.to_detections());
        assert_eq!(lines, result.lines());
    }

    #[test]
    fn test_closure_engine() {
        let engine = |bytes: &[u8]| -> Result<OcrResult, OcrError> {
            if bytes.is_empty() {
                return Err(OcrError::DecodeFailure("empty".to_string()));
            }
            Ok(OcrResult::from_boxes(vec![text_box("性别女", 0.9)], (1, 1)))
        };

        assert!(matches!(engine.recognize(b""), Err(OcrError::DecodeFailure(_))));
        assert_eq!(engine.recognize(b"png").unwrap().boxes.len(), 1);
    }
}
