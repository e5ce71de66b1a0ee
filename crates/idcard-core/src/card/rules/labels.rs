//! Field label tables and fuzzy prefix matching.

use crate::card::line::Line;
use crate::models::card::Field;

impl Field {
    /// Canonical labels printed on the card for this field, tried in order.
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            Field::Name => &["姓名"],
            Field::Gender => &["性别"],
            Field::Ethnicity => &["民族"],
            Field::BirthDate => &["出生", "出生日期"],
            Field::Address => &["住址"],
            Field::IdNumber => &["公民身份号码", "身份证号", "身份号码"],
            Field::IssuingAuthority => &["签发机关"],
            Field::ValidPeriod => &["有效期限", "有效期", "有效日期"],
        }
    }

    /// Number of same-position character substitutions tolerated in a label.
    pub fn tolerance(self) -> usize {
        match self {
            Field::Ethnicity | Field::BirthDate => 1,
            _ => 0,
        }
    }
}

/// A successful label match on a normalized line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMatch {
    /// Line text after the label and any leading colon.
    pub remainder: String,
    /// Number of characters covered by the label.
    pub length: usize,
}

/// Length of `label` if `text` starts with it, allowing up to `tolerance`
/// substituted characters at the same positions.
///
/// Insertions and deletions are never tolerated.
pub fn label_match_length(text: &str, label: &str, tolerance: usize) -> Option<usize> {
    let label_len = label.chars().count();
    let prefix: Vec<char> = text.chars().take(label_len).collect();
    if prefix.len() < label_len {
        return None;
    }

    let mismatches = prefix
        .iter()
        .zip(label.chars())
        .filter(|(left, right)| **left != *right)
        .count();

    if mismatches == 0 || (tolerance > 0 && mismatches <= tolerance) {
        Some(label_len)
    } else {
        None
    }
}

/// Match the first of `labels` that prefixes `text`.
pub fn match_label(text: &str, labels: &[&str], tolerance: usize) -> Option<LabelMatch> {
    labels.iter().find_map(|label| {
        let length = label_match_length(text, label, tolerance)?;
        let remainder = text
            .chars()
            .skip(length)
            .collect::<String>()
            .trim_start_matches(['：', ':'])
            .to_string();
        Some(LabelMatch { remainder, length })
    })
}

/// Match one of the field's labels against a line with the field's tolerance.
pub fn match_field(line: &Line, field: Field) -> Option<LabelMatch> {
    match_label(&line.normalized, field.labels(), field.tolerance())
}

/// Whether a line starts with one of the field's labels.
pub fn starts_with_label(line: &Line, field: Field) -> bool {
    match_field(line, field).is_some()
}

/// Whether a line starts with the label of any field other than `field`.
pub fn starts_with_other_label(line: &Line, field: Field) -> bool {
    Field::ALL
        .iter()
        .filter(|other| **other != field)
        .any(|other| starts_with_label(line, *other))
}
