//! Multi-line value continuation.
//!
//! A value may run over several detected lines (long addresses, dates split
//! into pieces). Following lines are absorbed until one of them opens a new
//! field region: it carries an ID number or starts with another field's label.
//! The label rule can cut an address short when an address line happens to
//! resemble another label under OCR noise.

use crate::card::line::Line;
use crate::models::card::Field;

use super::labels::{starts_with_label, starts_with_other_label};
use super::patterns::ID_NUMBER;

/// Digits in a complete YYYYMMDD birth date.
const BIRTH_DATE_DIGITS: usize = 8;

/// Whether `line` ends the value of `field`.
pub fn should_stop(line: &Line, field: Field) -> bool {
    ID_NUMBER.is_match(&line.normalized) || starts_with_other_label(line, field)
}

/// Absorb lines following a label line.
///
/// `initial` is the text already taken from the label line. Returns the
/// concatenated fragments and the lines they came from.
pub fn collect_following<'a>(
    lines: &'a [Line],
    field: Field,
    initial: &str,
) -> (String, Vec<&'a Line>) {
    let mut fragments = String::new();
    let mut collected = Vec::new();
    let mut digits = count_digits(initial);

    for follow in lines {
        // Checked before absorbing, so a label line already holding a full
        // date takes no further lines.
        if field == Field::BirthDate && digits >= BIRTH_DATE_DIGITS {
            break;
        }
        if starts_with_label(follow, field) {
            continue;
        }
        if should_stop(follow, field) {
            break;
        }

        collected.push(follow);
        fragments.push_str(&follow.normalized);
        digits += count_digits(&follow.normalized);
    }

    (fragments, collected)
}

fn count_digits(text: &str) -> usize {
    text.chars().filter(|c| c.is_ascii_digit()).count()
}
