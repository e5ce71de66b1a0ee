//! Common regex patterns for ID card field extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Character closing an ethnicity value ("汉族", "回族").
pub const ETHNICITY_SUFFIX: char = '族';

/// Token present on lines carrying the gender field.
pub const GENDER_LABEL: &str = "性别";

/// Token present on lines carrying the ethnicity field.
pub const ETHNICITY_LABEL: &str = "民族";

lazy_static! {
    // 15-digit (first generation) and 18-digit resident ID numbers
    pub static ref ID_NUMBER: Regex = Regex::new(r"[0-9Xx]{15,18}").unwrap();

    // 1990年01月01日, 1990.1.1, 19900101
    pub static ref BIRTH_DATE: Regex = Regex::new(
        r"(19|20)\d{2}(?:\s*[年.-]\s*)?(1[0-2]|0?[1-9])(?:\s*[月.-]\s*)?(3[01]|[12]\d|0?[1-9])\s*日?"
    ).unwrap();

    // 2010.01.01-2030.01.01, 2010年01月01日至长期
    pub static ref VALID_PERIOD: Regex = Regex::new(
        r"(19|20)\d{2}[.年-](1[0-2]|0?[1-9])[.月-](3[01]|[12]\d|0?[1-9])日?\s*[-~到至—–－]\s*(长期|(19|20)\d{2}[.年-](1[0-2]|0?[1-9])[.月-](3[01]|[12]\d|0?[1-9])日?)"
    ).unwrap();

    pub static ref GENDER_VALUE: Regex = Regex::new(r"男|女").unwrap();

    pub static ref ETHNICITY_INLINE: Regex = Regex::new(
        r"民族[：:\s]*([\w\x{4e00}-\x{9fa5}]+)"
    ).unwrap();

    // Connectors between the two ends of a validity range
    pub static ref PERIOD_CONNECTOR: Regex = Regex::new(r"[到至~—–－]").unwrap();
}
