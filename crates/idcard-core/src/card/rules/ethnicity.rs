//! Ethnicity extraction.

use crate::card::line::Line;

use super::patterns::{ETHNICITY_INLINE, ETHNICITY_LABEL, ETHNICITY_SUFFIX, GENDER_LABEL};
use super::{Extraction, FieldExtractor};

/// Reads `民族<value>` inline, or any line ending in 族 after stripping the
/// label and gender noise that OCR tends to merge into it.
pub struct EthnicityExtractor;

impl FieldExtractor for EthnicityExtractor {
    fn extract<'a>(&self, lines: &'a [Line]) -> Extraction<'a> {
        let inline = lines.iter().find_map(|line| {
            let caps = ETHNICITY_INLINE.captures(&line.normalized)?;
            let candidate = clean_ethnicity(&caps[1]);
            (!candidate.is_empty()).then(|| Extraction::new(candidate, vec![line]))
        });
        if let Some(found) = inline {
            return found;
        }

        lines
            .iter()
            .find(|line| line.normalized.ends_with(ETHNICITY_SUFFIX))
            .map(|line| Extraction::new(clean_ethnicity(&line.normalized), vec![line]))
            .unwrap_or_default()
    }
}

/// Strip label and gender noise around an ethnicity value.
pub fn clean_ethnicity(value: &str) -> String {
    let mut cleaned = value.replace(ETHNICITY_LABEL, "").trim().to_string();
    for noise in ["性别男", "性别女", GENDER_LABEL] {
        cleaned = cleaned.replace(noise, "");
    }

    let cleaned = cleaned
        .strip_prefix(['男', '女'])
        .unwrap_or(cleaned.as_str());
    let cleaned = cleaned.strip_suffix(ETHNICITY_SUFFIX).unwrap_or(cleaned);
    cleaned.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clean_ethnicity() {
        assert_eq!(clean_ethnicity("汉族"), "汉");
        assert_eq!(clean_ethnicity("性别男民族汉"), "汉");
        assert_eq!(clean_ethnicity("女回族"), "回");
        assert_eq!(clean_ethnicity("族"), "");
    }

    #[test]
    fn test_inline_from_merged_line() {
        let lines = vec![Line::new("性别男民族汉", 0.9)];
        let result = EthnicityExtractor.extract(&lines);

        assert_eq!(result.value.as_deref(), Some("汉"));
    }

    #[test]
    fn test_suffix_line_without_label() {
        let lines = vec![Line::new("姓名张三", 0.9), Line::new("男蒙古族", 0.7)];
        let result = EthnicityExtractor.extract(&lines);

        assert_eq!(result.value.as_deref(), Some("蒙古"));
        assert_eq!(result.confidence(), Some(0.7));
    }

    #[test]
    fn test_suffix_must_end_the_line() {
        let lines = vec![
            Line::new("住址广西壮族自治区南宁市", 0.9),
            Line::new("回族", 0.8),
        ];
        let result = EthnicityExtractor.extract(&lines);

        assert_eq!(result.value.as_deref(), Some("回"));
        assert_eq!(result.confidence(), Some(0.8));
    }

    #[test]
    fn test_suffix_inside_line_is_ignored() {
        let lines = vec![Line::new("宁夏回族自治区银川市", 0.9)];

        assert_eq!(EthnicityExtractor.extract(&lines), Extraction::none());
    }

    #[test]
    fn test_bare_suffix_yields_empty_value() {
        let lines = vec![Line::new("族", 0.4)];
        let result = EthnicityExtractor.extract(&lines);

        assert!(!result.is_success());
        assert_eq!(result.lines.len(), 1);
    }
}
