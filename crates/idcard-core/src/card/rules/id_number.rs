//! Citizen ID number extraction.

use crate::card::line::Line;

use super::patterns::ID_NUMBER;
use super::{Extraction, FieldExtractor};

/// Finds the first 15-18 character digit/`X` run on any line, label or not.
pub struct IdNumberExtractor;

impl FieldExtractor for IdNumberExtractor {
    fn extract<'a>(&self, lines: &'a [Line]) -> Extraction<'a> {
        lines
            .iter()
            .find_map(|line| {
                ID_NUMBER
                    .find(&line.normalized)
                    .map(|m| Extraction::new(m.as_str().to_uppercase(), vec![line]))
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_labeled_id_number() {
        let lines = vec![Line::new("公民身份号码110101199001011234", 0.95)];
        let result = IdNumberExtractor.extract(&lines);

        assert_eq!(result.value.as_deref(), Some("110101199001011234"));
        assert_eq!(result.confidence(), Some(0.95));
    }

    #[test]
    fn test_unlabeled_lowercase_x() {
        let lines = vec![
            Line::new("住址北京市", 0.9),
            Line::new("11010119900101123x", 0.8),
        ];
        let result = IdNumberExtractor.extract(&lines);

        assert_eq!(result.value.as_deref(), Some("11010119900101123X"));
        assert_eq!(result.lines.len(), 1);
    }

    #[test]
    fn test_no_id_number() {
        let lines = vec![Line::new("姓名张三", 0.9)];
        assert_eq!(IdNumberExtractor.extract(&lines), Extraction::none());
    }
}
