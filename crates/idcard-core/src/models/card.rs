//! Structured ID card data models.

use serde::{Deserialize, Serialize};

/// A field printed on the ID card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Holder name (姓名).
    Name,
    /// Gender (性别).
    Gender,
    /// Ethnicity (民族).
    Ethnicity,
    /// Date of birth (出生).
    BirthDate,
    /// Registered address (住址).
    Address,
    /// Citizen ID number (公民身份号码).
    IdNumber,
    /// Issuing authority on the back side (签发机关).
    IssuingAuthority,
    /// Validity period on the back side (有效期限).
    ValidPeriod,
}

impl Field {
    /// Every field, front side first.
    pub const ALL: [Field; 8] = [
        Field::Name,
        Field::Gender,
        Field::Ethnicity,
        Field::BirthDate,
        Field::Address,
        Field::IdNumber,
        Field::IssuingAuthority,
        Field::ValidPeriod,
    ];

    /// Fields printed on the portrait side, in extraction order.
    pub const FRONT: [Field; 6] = [
        Field::Name,
        Field::Gender,
        Field::Ethnicity,
        Field::BirthDate,
        Field::Address,
        Field::IdNumber,
    ];

    /// Fields printed on the emblem side, in extraction order.
    pub const BACK: [Field; 2] = [Field::IssuingAuthority, Field::ValidPeriod];

    /// Snake-case key used in output documents.
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Gender => "gender",
            Field::Ethnicity => "ethnicity",
            Field::BirthDate => "birth_date",
            Field::Address => "address",
            Field::IdNumber => "id_number",
            Field::IssuingAuthority => "issuing_authority",
            Field::ValidPeriod => "valid_period",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A recognized value and the aggregate confidence of the lines it came from.
///
/// `confidence` is present whenever at least one line was consumed, even if
/// no usable value came out of those lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldResult {
    pub value: Option<String>,
    pub confidence: Option<f64>,
}

impl FieldResult {
    /// A field that was not recognized at all.
    pub fn missing() -> Self {
        Self::default()
    }

    /// Whether a value was recognized.
    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }
}

/// Fields on the portrait side of the card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrontSideResult {
    pub name: FieldResult,
    pub gender: FieldResult,
    pub ethnicity: FieldResult,
    pub birth_date: FieldResult,
    pub address: FieldResult,
    pub id_number: FieldResult,
}

/// Fields on the emblem side of the card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackSideResult {
    pub issuing_authority: FieldResult,
    pub valid_period: FieldResult,
}

/// Both sides of a parsed ID card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdCardResult {
    pub front: FrontSideResult,
    pub back: BackSideResult,
}

impl IdCardResult {
    /// Look up a field by name.
    pub fn field(&self, field: Field) -> &FieldResult {
        match field {
            Field::Name => &self.front.name,
            Field::Gender => &self.front.gender,
            Field::Ethnicity => &self.front.ethnicity,
            Field::BirthDate => &self.front.birth_date,
            Field::Address => &self.front.address,
            Field::IdNumber => &self.front.id_number,
            Field::IssuingAuthority => &self.back.issuing_authority,
            Field::ValidPeriod => &self.back.valid_period,
        }
    }

    /// Fields that could not be recognized.
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| !self.field(*f).is_present())
            .collect()
    }
}

/// Recognized display lines per side, kept for audit views.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawText {
    pub front: Vec<String>,
    pub back: Vec<String>,
}

impl RawText {
    /// Both sides joined with newlines, front first.
    pub fn joined(&self) -> (String, String) {
        (self.front.join("\n"), self.back.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_field_keys_match_serde() {
        for field in Field::ALL {
            let encoded = serde_json::to_string(&field).unwrap();
            assert_eq!(encoded, format!("\"{}\"", field.key()));
        }
    }

    #[test]
    fn test_missing_fields() {
        let mut result = IdCardResult::default();
        result.front.name = FieldResult {
            value: Some("张三".to_string()),
            confidence: Some(0.9),
        };

        let missing = result.missing_fields();
        assert_eq!(missing.len(), 7);
        assert!(!missing.contains(&Field::Name));
    }

    #[test]
    fn test_absent_values_serialize_as_null() {
        let json = serde_json::to_value(FieldResult::missing()).unwrap();
        assert_eq!(json, serde_json::json!({"value": null, "confidence": null}));
    }
}
