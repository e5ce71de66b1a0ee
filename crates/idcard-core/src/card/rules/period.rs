//! Validity period extraction.

use crate::card::line::Line;

use super::patterns::{PERIOD_CONNECTOR, VALID_PERIOD};
use super::{Extraction, FieldExtractor};

/// Finds a `date - date` or `date - 长期` range anywhere on the back side.
///
/// Layouts often print the label and the range on separate lines, so the
/// scan does not look at labels.
pub struct PeriodExtractor;

impl FieldExtractor for PeriodExtractor {
    fn extract<'a>(&self, lines: &'a [Line]) -> Extraction<'a> {
        lines
            .iter()
            .find_map(|line| {
                VALID_PERIOD
                    .find(&line.normalized)
                    .map(|m| Extraction::new(normalize_period(m.as_str()), vec![line]))
            })
            .unwrap_or_default()
    }
}

/// Rewrite a range to `YYYY.MM.DD-YYYY.MM.DD` style separators.
pub fn normalize_period(value: &str) -> String {
    let value = value.replace(['年', '月'], ".").replace('日', "");
    PERIOD_CONNECTOR
        .replace_all(&value, "-")
        .replace("..", ".")
}
