//! ID card field extraction.

pub mod line;
mod parser;
pub mod rules;

pub use line::{extract_text_lines, normalize_detections, Line};
pub use parser::{CardParser, IdCardParser, Strategy};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::OcrError;
use crate::models::card::{IdCardResult, RawText};
use crate::ocr::RecognitionEngine;

/// Parsed fields together with the recognized text they came from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardAnalysis {
    pub result: IdCardResult,
    pub raw_text: RawText,
}

/// Recognize both sides of a card with `engine` and parse the fields.
///
/// Engine failures (unavailable engine, undecodable image) are passed
/// through unchanged; parsing itself cannot fail.
pub fn analyze_id_card<E>(
    engine: &E,
    front_image: &[u8],
    back_image: &[u8],
) -> Result<CardAnalysis, OcrError>
where
    E: RecognitionEngine + ?Sized,
{
    let front = engine.recognize(front_image)?;
    let back = engine.recognize(back_image)?;

    info!(
        "Recognized {} front and {} back text boxes",
        front.boxes.len(),
        back.boxes.len()
    );

    Ok(CardAnalysis {
        result: IdCardParser::new().parse_ocr(&front, &back),
        raw_text: RawText {
            front: front.text_lines(),
            back: back.text_lines(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::{OcrResult, TextBox};
    use pretty_assertions::assert_eq;

    fn text_box(text: &str) -> TextBox {
        TextBox {
            bbox: [0.0; 8],
            text: text.to_string(),
            score: 0.9,
        }
    }

    fn fake_engine(image: &[u8]) -> Result<OcrResult, OcrError> {
        let texts: &[&str] = match image {
            b"front" => &[
                "姓名张三",
                "性别男民族汉",
                "出生1990年01月01日",
                "公民身份号码110101199001011234",
            ],
            b"back" => &["签发机关北京市公安局", "有效期限2010.01.01-2030.01.01"],
            _ => return Err(OcrError::DecodeFailure("unknown image".to_string())),
        };
        Ok(OcrResult::from_boxes(texts.iter().map(|t| text_box(t)).collect(), (100, 60)))
    }

    #[test]
    fn test_analyze_with_injected_engine() {
        let analysis = analyze_id_card(&fake_engine, b"front", b"back").unwrap();

        assert_eq!(analysis.result.front.name.value.as_deref(), Some("张三"));
        assert_eq!(analysis.result.front.ethnicity.value.as_deref(), Some("汉"));
        assert_eq!(analysis.result.back.issuing_authority.value.as_deref(), Some("北京市公安局"));
        assert_eq!(analysis.raw_text.back.len(), 2);
        assert_eq!(analysis.raw_text.joined().0.lines().count(), 4);
    }

    #[test]
    fn test_engine_errors_pass_through() {
        let engine = |_: &[u8]| -> Result<OcrResult, OcrError> {
            Err(OcrError::EngineUnavailable("models missing".to_string()))
        };

        let err = analyze_id_card(&engine, b"front", b"back").unwrap_err();
        assert!(matches!(err, OcrError::EngineUnavailable(_)));

        let err = analyze_id_card(&fake_engine, b"front", b"garbage").unwrap_err();
        assert!(matches!(err, OcrError::DecodeFailure(_)));
    }
}
