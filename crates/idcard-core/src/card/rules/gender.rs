//! Gender extraction.

use crate::card::line::Line;

use super::patterns::{GENDER_LABEL, GENDER_VALUE};
use super::{Extraction, FieldExtractor};

/// Looks for 男/女 on lines carrying the gender label first, then anywhere.
///
/// The wide pass covers cards where the label was garbled or the value was
/// recognized as a separate line.
pub struct GenderExtractor;

impl GenderExtractor {
    fn scan<'a>(mut lines: impl Iterator<Item = &'a Line>) -> Option<Extraction<'a>> {
        lines.find_map(|line| {
            GENDER_VALUE
                .find(&line.normalized)
                .map(|m| Extraction::new(m.as_str(), vec![line]))
        })
    }
}

impl FieldExtractor for GenderExtractor {
    fn extract<'a>(&self, lines: &'a [Line]) -> Extraction<'a> {
        Self::scan(lines.iter().filter(|l| l.normalized.contains(GENDER_LABEL)))
            .or_else(|| Self::scan(lines.iter()))
            .unwrap_or_default()
    }
}
