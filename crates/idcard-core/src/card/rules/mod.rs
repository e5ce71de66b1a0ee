//! Rule-based field extractors for ID cards.

pub mod continuation;
pub mod dates;
pub mod ethnicity;
pub mod gender;
pub mod id_number;
pub mod labeled;
pub mod labels;
pub mod patterns;
pub mod period;

pub use continuation::{collect_following, should_stop};
pub use dates::{normalize_birth_date, BirthDateExtractor};
pub use ethnicity::{clean_ethnicity, EthnicityExtractor};
pub use gender::GenderExtractor;
pub use id_number::IdNumberExtractor;
pub use labeled::LabeledExtractor;
pub use labels::{label_match_length, match_field, match_label, LabelMatch};
pub use period::{normalize_period, PeriodExtractor};

use super::line::Line;

/// Trait for field extractors working on a side's recognized lines.
pub trait FieldExtractor {
    /// Scan `lines` for the field.
    fn extract<'a>(&self, lines: &'a [Line]) -> Extraction<'a>;
}

/// Outcome of one extraction attempt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction<'a> {
    /// Extracted value, if any.
    pub value: Option<String>,
    /// Lines that contributed to the value.
    pub lines: Vec<&'a Line>,
}

impl<'a> Extraction<'a> {
    pub fn new(value: impl Into<String>, lines: Vec<&'a Line>) -> Self {
        Self {
            value: Some(value.into()),
            lines,
        }
    }

    /// Nothing found and nothing consumed.
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether this attempt produced a usable (non-empty) value.
    pub fn is_success(&self) -> bool {
        self.value.as_deref().is_some_and(|v| !v.is_empty())
    }

    /// Mean confidence over the consumed lines.
    pub fn confidence(&self) -> Option<f64> {
        aggregate_confidence(&self.lines)
    }
}

/// Arithmetic mean of line confidences, `None` when no line contributed.
pub fn aggregate_confidence(lines: &[&Line]) -> Option<f64> {
    if lines.is_empty() {
        return None;
    }
    let total: f64 = lines.iter().map(|line| line.confidence).sum();
    Some(total / lines.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_confidence_mean() {
        let a = Line::new("姓名", 0.8);
        let b = Line::new("张三", 1.0);
        assert_eq!(aggregate_confidence(&[&a, &b]), Some(0.9));
    }

    #[test]
    fn test_aggregate_confidence_empty() {
        assert_eq!(aggregate_confidence(&[]), None);
    }

    #[test]
    fn test_empty_value_is_not_success() {
        let line = Line::new("族", 0.5);
        let extraction = Extraction::new("", vec![&line]);
        assert!(!extraction.is_success());
        assert_eq!(extraction.confidence(), Some(0.5));
    }
}
