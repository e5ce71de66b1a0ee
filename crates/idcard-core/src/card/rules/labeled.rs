//! Label-anchored extraction.

use crate::card::line::Line;
use crate::models::card::Field;

use super::continuation::{collect_following, should_stop};
use super::labels::match_field;
use super::{Extraction, FieldExtractor};

/// Extracts the value printed after a field's label.
///
/// The text after the label is the value. With an empty remainder the next
/// line is taken instead, unless it carries an ID number or another label,
/// in which case scanning moves on to the next label line. With continuation
/// enabled, following lines are absorbed first (see [`collect_following`]).
pub struct LabeledExtractor {
    field: Field,
    continuation: bool,
}

impl LabeledExtractor {
    /// Single-line extraction for `field`.
    pub fn new(field: Field) -> Self {
        Self {
            field,
            continuation: false,
        }
    }

    /// Absorb follow-on lines into the value.
    pub fn with_continuation(mut self, continuation: bool) -> Self {
        self.continuation = continuation;
        self
    }
}

impl FieldExtractor for LabeledExtractor {
    fn extract<'a>(&self, lines: &'a [Line]) -> Extraction<'a> {
        for (idx, line) in lines.iter().enumerate() {
            let Some(matched) = match_field(line, self.field) else {
                continue;
            };
            let following = &lines[idx + 1..];
            let mut consumed = vec![line];

            if self.continuation {
                let (extra, extra_lines) =
                    collect_following(following, self.field, &matched.remainder);
                if !matched.remainder.is_empty() || !extra_lines.is_empty() {
                    consumed.extend(extra_lines);
                    return Extraction::new(matched.remainder + &extra, consumed);
                }
            } else if !matched.remainder.is_empty() {
                return Extraction::new(matched.remainder, consumed);
            }

            if let Some(next) = following.first() {
                if should_stop(next, self.field) {
                    continue;
                }
                consumed.push(next);
                return Extraction::new(next.normalized.clone(), consumed);
            }
        }

        Extraction::none()
    }
}
