//! ID card parser: runs each field's strategy table over a side's lines.

use serde_json::Value;
use tracing::{debug, info};

use crate::models::card::{BackSideResult, Field, FieldResult, FrontSideResult, IdCardResult};
use crate::ocr::OcrResult;

use super::line::{normalize_detections, Line};
use super::rules::{
    normalize_birth_date, BirthDateExtractor, EthnicityExtractor, Extraction, FieldExtractor,
    GenderExtractor, IdNumberExtractor, LabeledExtractor, PeriodExtractor,
};

/// One way of finding a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Label-independent scan for an ID number token.
    IdNumberScan,
    /// Label-independent scan for a complete date.
    BirthDateScan,
    /// Scan for 男/女, gender-labeled lines first.
    GenderScan,
    /// Inline `民族<value>` or a line ending in 族.
    EthnicityScan,
    /// Label-independent scan for a validity range.
    PeriodScan,
    /// Value after the label, or on the next line.
    Labeled,
    /// Value after the label plus absorbed follow-on lines.
    LabeledContinuation,
}

impl Strategy {
    /// Run this strategy for `field`.
    pub fn run<'a>(self, field: Field, lines: &'a [Line]) -> Extraction<'a> {
        match self {
            Strategy::IdNumberScan => IdNumberExtractor.extract(lines),
            Strategy::BirthDateScan => BirthDateExtractor.extract(lines),
            Strategy::GenderScan => GenderExtractor.extract(lines),
            Strategy::EthnicityScan => EthnicityExtractor.extract(lines),
            Strategy::PeriodScan => PeriodExtractor.extract(lines),
            Strategy::Labeled => LabeledExtractor::new(field).extract(lines),
            Strategy::LabeledContinuation => LabeledExtractor::new(field)
                .with_continuation(true)
                .extract(lines),
        }
    }
}

impl Field {
    /// Strategies tried for this field, highest priority first.
    pub fn strategies(self) -> &'static [Strategy] {
        match self {
            Field::Name | Field::IssuingAuthority => &[Strategy::Labeled],
            Field::Gender => &[Strategy::GenderScan, Strategy::Labeled],
            Field::Ethnicity => &[Strategy::EthnicityScan, Strategy::Labeled],
            Field::BirthDate => &[Strategy::BirthDateScan, Strategy::LabeledContinuation],
            Field::Address => &[Strategy::LabeledContinuation],
            Field::IdNumber => &[Strategy::IdNumberScan, Strategy::Labeled],
            Field::ValidPeriod => &[Strategy::PeriodScan, Strategy::Labeled],
        }
    }
}

/// Trait for ID card parsing.
pub trait CardParser {
    /// Parse both sides from raw, possibly nested, detections.
    fn parse(&self, front_raw: &[Value], back_raw: &[Value]) -> IdCardResult;

    /// Parse both sides from recognizer output.
    fn parse_ocr(&self, front: &OcrResult, back: &OcrResult) -> IdCardResult;
}

/// Rule-based ID card parser.
///
/// Stateless: every field scans the full line list of its side on its own,
/// so lines may feed several fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdCardParser;

impl IdCardParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse both sides from already normalized lines.
    pub fn parse_lines(&self, front: &[Line], back: &[Line]) -> IdCardResult {
        IdCardResult {
            front: self.front(front),
            back: self.back(back),
        }
    }

    /// Extract the portrait-side fields.
    pub fn front(&self, lines: &[Line]) -> FrontSideResult {
        FrontSideResult {
            name: self.extract_field(Field::Name, lines),
            gender: self.extract_field(Field::Gender, lines),
            ethnicity: self.extract_field(Field::Ethnicity, lines),
            birth_date: self.extract_field(Field::BirthDate, lines),
            address: self.extract_field(Field::Address, lines),
            id_number: self.extract_field(Field::IdNumber, lines),
        }
    }

    /// Extract the emblem-side fields.
    pub fn back(&self, lines: &[Line]) -> BackSideResult {
        BackSideResult {
            issuing_authority: self.extract_field(Field::IssuingAuthority, lines),
            valid_period: self.extract_field(Field::ValidPeriod, lines),
        }
    }

    /// Run a field's strategies in order until one yields a value.
    ///
    /// When none does, the last attempt is kept so that lines it consumed
    /// still count towards the confidence.
    pub fn extract_field(&self, field: Field, lines: &[Line]) -> FieldResult {
        let mut winner = None;
        let mut extraction = Extraction::none();

        for strategy in field.strategies() {
            extraction = strategy.run(field, lines);
            if extraction.is_success() {
                winner = Some(*strategy);
                break;
            }
        }

        let mut value = extraction.value.clone().filter(|v| !v.is_empty());
        if field == Field::BirthDate {
            value = value.and_then(|v| normalize_birth_date(&v));
        }

        debug!(
            field = field.key(),
            strategy = ?winner,
            lines = extraction.lines.len(),
            found = value.is_some(),
            "Extracted field"
        );

        FieldResult {
            value,
            confidence: extraction.confidence(),
        }
    }
}

impl CardParser for IdCardParser {
    fn parse(&self, front_raw: &[Value], back_raw: &[Value]) -> IdCardResult {
        let front = normalize_detections(front_raw);
        let back = normalize_detections(back_raw);

        info!("Parsing ID card from {} front and {} back lines", front.len(), back.len());

        self.parse_lines(&front, &back)
    }

    fn parse_ocr(&self, front: &OcrResult, back: &OcrResult) -> IdCardResult {
        self.parse_lines(&front.lines(), &back.lines())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn detection(text: &str) -> Value {
        detection_with(text, 0.9)
    }

    fn detection_with(text: &str, score: f64) -> Value {
        json!([[[0, 0], [1, 0], [1, 1], [0, 1]], [text, score]])
    }

    fn value(field: &FieldResult) -> Option<&str> {
        field.value.as_deref()
    }

    #[test]
    fn test_parse_expected_fields() {
        let front = vec![
            detection("姓名张三"),
            detection("性别男"),
            detection("民族汉"),
            detection("出生1990年01月01日"),
            detection("住址北京市朝阳区幸福路1号"),
            detection("公民身份号码110101199001011234"),
        ];
        let back = vec![
            detection("签发机关北京市公安局"),
            detection("有效期限2010.01.01-2030.01.01"),
        ];

        let result = IdCardParser::new().parse(&front, &back);

        assert_eq!(value(&result.front.name), Some("张三"));
        assert_eq!(value(&result.front.gender), Some("男"));
        assert_eq!(value(&result.front.ethnicity), Some("汉"));
        assert_eq!(value(&result.front.birth_date), Some("1990-01-01"));
        assert_eq!(value(&result.front.address), Some("北京市朝阳区幸福路1号"));
        assert_eq!(value(&result.front.id_number), Some("110101199001011234"));
        assert_eq!(value(&result.back.issuing_authority), Some("北京市公安局"));
        assert_eq!(value(&result.back.valid_period), Some("2010.01.01-2030.01.01"));
    }

    #[test]
    fn test_missing_fields_degrade() {
        let front = vec![detection("姓名：李四"), detection("公民身份号码：320000000000000000")];

        let result = IdCardParser::new().parse(&front, &[]);

        assert_eq!(value(&result.front.name), Some("李四"));
        assert_eq!(result.front.gender, FieldResult::missing());
        assert_eq!(result.back, BackSideResult::default());
    }

    #[test]
    fn test_empty_input() {
        let result = IdCardParser::new().parse(&[], &[]);
        assert_eq!(result, IdCardResult::default());
    }

    #[test]
    fn test_merged_gender_ethnicity_and_compact_date() {
        let front = vec![detection("性别男民族汉"), detection("出生19900101")];

        let result = IdCardParser::new().parse(&front, &[]);

        assert_eq!(value(&result.front.gender), Some("男"));
        assert_eq!(value(&result.front.ethnicity), Some("汉"));
        assert_eq!(value(&result.front.birth_date), Some("1990-01-01"));
    }

    #[test]
    fn test_verbose_birth_and_address_block() {
        let front = vec![
            detection("出生1990年1月1日"),
            detection("住址"),
            detection("江苏省南京市建邺区测试路123号"),
            detection("公民身份号码110101199001012345"),
        ];

        let result = IdCardParser::new().parse(&front, &[]);

        assert_eq!(value(&result.front.birth_date), Some("1990-01-01"));
        assert_eq!(value(&result.front.address), Some("江苏省南京市建邺区测试路123号"));
        assert_eq!(value(&result.front.id_number), Some("110101199001012345"));
    }

    #[test]
    fn test_noisy_ethnicity_label() {
        let front = vec![detection("姓名张三"), detection("性别男"), detection("民旅汉")];

        let result = IdCardParser::new().parse(&front, &[]);

        assert_eq!(value(&result.front.ethnicity), Some("汉"));
    }

    #[test]
    fn test_noisy_ethnicity_label_with_autonomous_region_address() {
        let front = vec![
            detection("姓名张三"),
            detection("性别男"),
            detection("民旅汉"),
            detection("住址广西壮族自治区南宁市"),
        ];

        let result = IdCardParser::new().parse(&front, &[]);

        assert_eq!(value(&result.front.ethnicity), Some("汉"));
        assert_eq!(value(&result.front.address), Some("广西壮族自治区南宁市"));
    }

    #[test]
    fn test_ethnicity_suffix_line_before_label_fallback() {
        let front = vec![
            detection("姓名张三"),
            detection("民旅满"),
            detection_with("男壮族", 0.7),
        ];

        let result = IdCardParser::new().parse(&front, &[]);

        assert_eq!(value(&result.front.ethnicity), Some("壮"));
        assert_eq!(result.front.ethnicity.confidence, Some(0.7));
    }

    #[test]
    fn test_split_birth_components() {
        let front = vec![
            detection("出生"),
            detection("1990"),
            detection("年01"),
            detection("月01 日"),
        ];

        let result = IdCardParser::new().parse(&front, &[]);

        assert_eq!(value(&result.front.birth_date), Some("1990-01-01"));
    }

    #[test]
    fn test_confidence_is_mean_of_consumed_lines() {
        let front = vec![detection_with("姓名", 0.8), detection_with("张三", 1.0)];

        let result = IdCardParser::new().parse(&front, &[]);

        assert_eq!(value(&result.front.name), Some("张三"));
        assert_eq!(result.front.name.confidence, Some(0.9));
    }

    #[test]
    fn test_unnormalizable_birth_date_keeps_confidence() {
        let front = vec![detection_with("出生不详", 0.6)];

        let result = IdCardParser::new().parse(&front, &[]);

        assert_eq!(result.front.birth_date.value, None);
        assert_eq!(result.front.birth_date.confidence, Some(0.6));
    }

    #[test]
    fn test_id_number_without_label() {
        let front = vec![detection("姓名张三"), detection("11010119900101123x")];

        let result = IdCardParser::new().parse(&front, &[]);

        assert_eq!(value(&result.front.id_number), Some("11010119900101123X"));
    }

    #[test]
    fn test_period_with_connector_glyph() {
        let back = vec![detection("有效期限"), detection("2015.03.12至2035.03.12")];

        let result = IdCardParser::new().parse(&[], &back);

        assert_eq!(value(&result.back.valid_period), Some("2015.03.12-2035.03.12"));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let front = vec![
            detection("姓名张三"),
            detection("住址北京市"),
            detection("朝阳区幸福路1号"),
        ];
        let before = front.clone();
        let parser = IdCardParser::new();

        let first = parser.parse(&front, &[]);
        let second = parser.parse(&front, &[]);

        assert_eq!(first, second);
        assert_eq!(front, before);
    }

    #[test]
    fn test_strategy_tables_cover_every_field() {
        for field in Field::ALL {
            assert!(!field.strategies().is_empty(), "{} has no strategy", field);
        }
    }
}
