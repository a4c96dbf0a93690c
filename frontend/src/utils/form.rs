use chrono::NaiveDate;

use crate::api::ApiError;

pub fn parse_date(input: &str, err: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| ApiError::validation(err.to_string()))
}

pub fn optional_string(value: String) -> Option<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

pub fn required(value: String, err: &str) -> Result<String, ApiError> {
    optional_string(value).ok_or_else(|| ApiError::validation(err.to_string()))
}

/// Loose shape check; the server performs the real validation.
pub fn is_plausible_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    }
}

pub fn is_plausible_phone(value: &str) -> bool {
    let digits = value.chars().filter(char::is_ascii_digit).count();
    digits >= 6
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'))
}

pub fn parse_amount(input: &str, err: &str) -> Result<f64, ApiError> {
    input
        .trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| ApiError::validation(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_trims_and_rejects_blank() {
        assert_eq!(required(" 山田 ".into(), "x").unwrap(), "山田");
        assert_eq!(required("  ".into(), "必須").unwrap_err().error, "必須");
    }

    #[test]
    fn phone_shapes() {
        assert!(is_plausible_phone("+81 (3) 1234-5678"));
        assert!(!is_plausible_phone("12-34"));
        assert!(!is_plausible_phone("03-1234-abcd"));
    }

    #[test]
    fn email_shape_check() {
        assert!(is_plausible_email("hanako@example.com"));
        assert!(!is_plausible_email("hanako@example"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("ha nako@example.com"));
    }

    #[test]
    fn parse_amount_accepts_grouped_digits() {
        assert_eq!(parse_amount("300,000", "x").unwrap(), 300000.0);
        assert!(parse_amount("-1", "x").is_err());
        assert!(parse_amount("abc", "x").is_err());
    }
}
