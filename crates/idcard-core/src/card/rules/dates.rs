//! Birth date extraction and normalization.

use crate::card::line::Line;

use super::patterns::BIRTH_DATE;
use super::{Extraction, FieldExtractor};

/// Scans every line for a complete date shape and normalizes the first one
/// that normalizes cleanly.
pub struct BirthDateExtractor;

impl FieldExtractor for BirthDateExtractor {
    fn extract<'a>(&self, lines: &'a [Line]) -> Extraction<'a> {
        lines
            .iter()
            .find_map(|line| {
                let found = BIRTH_DATE.find(&line.normalized)?;
                let date = normalize_birth_date(found.as_str())?;
                Some(Extraction::new(date, vec![line]))
            })
            .unwrap_or_default()
    }
}

/// Normalize a raw birth date candidate to `YYYY-MM-DD`.
///
/// Eight or more digits are read as a compact `YYYYMMDD`; otherwise the text
/// must split into exactly three parts on 年/月/`.`/`-`, which are zero-padded.
pub fn normalize_birth_date(value: &str) -> Option<String> {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() >= 8 {
        return Some(format!("{}-{}-{}", &digits[..4], &digits[4..6], &digits[6..8]));
    }

    let sanitized = value
        .replace(['年', '月', '.'], "-")
        .replace('日', "");
    let parts: Vec<&str> = sanitized.split('-').filter(|p| !p.is_empty()).collect();

    match parts.as_slice() {
        [year, month, day] => Some(format!("{:0>4}-{:0>2}-{:0>2}", year, month, day)),
        _ => None,
    }
}
