//! Mainland resident identity card numbers.

use std::borrow::Cow;

use chrono::NaiveDate;
use validator::ValidationError;

const WEIGHTS: [u32; 17] = [7, 9, 10, 5, 8, 4, 2, 1, 6, 3, 7, 9, 10, 5, 8, 4, 2];
const CHECK_CODES: [char; 11] = ['1', '0', 'X', '9', '8', '7', '6', '5', '4', '3', '2'];
const PROVINCES: [u32; 35] = [
    11, 12, 13, 14, 15, 21, 22, 23, 31, 32, 33, 34, 35, 36, 37, 41, 42, 43, 44, 45, 46, 50, 51,
    52, 53, 54, 61, 62, 63, 64, 65, 71, 81, 82, 91,
];

/// `validator` custom rule for ID card numbers.
///
/// Accepts the 18-character form (17 digits plus a mod-11 check character,
/// `X` in either case) and the legacy 15-digit form. Empty input passes.
pub fn validate_id_card(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || is_valid_id_card(value) {
        return Ok(());
    }
    Err(ValidationError::new("id_card").with_message(Cow::Borrowed("Invalid ID card number")))
}

/// Whether `value` is a well-formed ID card number.
pub fn is_valid_id_card(value: &str) -> bool {
    let value = value.trim();
    match value.len() {
        18 => is_valid_18(value),
        15 => is_valid_15(value),
        _ => false,
    }
}

fn is_valid_18(value: &str) -> bool {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() != 18 || !chars[..17].iter().all(char::is_ascii_digit) {
        return false;
    }
    if !has_known_province(value) || !has_valid_birth_date(&value[6..14]) {
        return false;
    }

    let sum: u32 = chars[..17]
        .iter()
        .zip(WEIGHTS)
        .map(|(c, w)| c.to_digit(10).unwrap_or(0) * w)
        .sum();
    let expected = CHECK_CODES[(sum % 11) as usize];
    chars[17].to_ascii_uppercase() == expected
}

fn is_valid_15(value: &str) -> bool {
    if !value.chars().all(|c| c.is_ascii_digit()) || !has_known_province(value) {
        return false;
    }
    has_valid_birth_date(&format!("19{}", &value[6..12]))
}

fn has_known_province(value: &str) -> bool {
    value[..2]
        .parse::<u32>()
        .is_ok_and(|code| PROVINCES.contains(&code))
}

fn has_valid_birth_date(yyyymmdd: &str) -> bool {
    let parsed = NaiveDate::parse_from_str(
        &format!("{}-{}-{}", &yyyymmdd[..4], &yyyymmdd[4..6], &yyyymmdd[6..8]),
        "%Y-%m-%d",
    );
    match parsed {
        Ok(date) => date <= chrono::Utc::now().date_naive(),
        Err(_) => false,
    }
}
