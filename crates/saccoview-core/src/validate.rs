//! Field-level validation helpers
//!
//! Each helper takes the dotted field path it reports under and either
//! returns the normalized value or a [`FieldError`]. Validation never
//! mutates its input; normalization (trimming, whitespace collapsing,
//! parsing) happens on the returned value only.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use saccoview_utils::{clean, digits};
use std::str::FromStr;

use crate::error::FieldError;

/// Require a non-empty string; returns the cleaned value
pub fn require(field: &str, value: &str) -> Result<String, FieldError> {
    let cleaned = clean(value);
    if cleaned.is_empty() {
        Err(FieldError::new(field, "Required"))
    } else {
        Ok(cleaned)
    }
}

/// Optional string; empty input becomes None, otherwise cleaned
pub fn optional(value: &str) -> Option<String> {
    let cleaned = clean(value);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Require a phone number with at least 7 digits; returns the cleaned
/// input as entered (formatting is preserved, only emptiness and digit
/// count are checked)
pub fn require_phone(field: &str, value: &str) -> Result<String, FieldError> {
    let cleaned = require(field, value)?;
    if digits(&cleaned).len() < 7 {
        return Err(FieldError::new(field, "Must contain at least 7 digits"));
    }
    Ok(cleaned)
}

/// Parse a decimal number from form input
pub fn parse_decimal(field: &str, value: &str) -> Result<Decimal, FieldError> {
    let cleaned = clean(value);
    if cleaned.is_empty() {
        return Err(FieldError::new(field, "Required"));
    }
    Decimal::from_str(&cleaned)
        .map_err(|_| FieldError::new(field, format!("Not a valid number: {}", cleaned)))
}

/// Parse a non-negative decimal (incomes, balances)
pub fn non_negative_decimal(field: &str, value: &str) -> Result<Decimal, FieldError> {
    let parsed = parse_decimal(field, value)?;
    if parsed < Decimal::ZERO {
        return Err(FieldError::new(field, "Must not be negative"));
    }
    Ok(parsed)
}

/// Parse a percentage share within [0, 100]
pub fn share_percentage(field: &str, value: &str) -> Result<Decimal, FieldError> {
    let parsed = parse_decimal(field, value)?;
    if parsed < Decimal::ZERO || parsed > Decimal::from(100) {
        return Err(FieldError::new(field, "Must be between 0 and 100"));
    }
    Ok(parsed)
}

/// Parse a date in YYYY-MM-DD form that lies strictly in the past
pub fn past_date(field: &str, value: &str) -> Result<NaiveDate, FieldError> {
    let cleaned = clean(value);
    if cleaned.is_empty() {
        return Err(FieldError::new(field, "Required"));
    }
    let date = NaiveDate::parse_from_str(&cleaned, "%Y-%m-%d")
        .map_err(|_| FieldError::new(field, format!("Not a valid date: {}", cleaned)))?;
    if date >= Utc::now().date_naive() {
        return Err(FieldError::new(field, "Must be in the past"));
    }
    Ok(date)
}

/// Parse one of an enumerated vocabulary via its FromStr impl
pub fn parse_enum<T>(field: &str, value: &str) -> Result<T, FieldError>
where
    T: FromStr<Err = String>,
{
    let cleaned = clean(value);
    if cleaned.is_empty() {
        return Err(FieldError::new(field, "Required"));
    }
    cleaned.parse::<T>().map_err(|e| FieldError::new(field, e))
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Relationship;

    #[test]
    fn test_require() {
        assert_eq!(require("f", "  Jane  Doe ").unwrap(), "Jane Doe");
        let err = require("member.city", "   ").unwrap_err();
        assert_eq!(err.field, "member.city");
        assert_eq!(err.message, "Required");
    }

    #[test]
    fn test_optional() {
        assert_eq!(optional("  PO Box 12 "), Some("PO Box 12".to_string()));
        assert_eq!(optional("   "), None);
    }

    #[test]
    fn test_require_phone() {
        assert!(require_phone("f", "+256 700 123456").is_ok());
        assert!(require_phone("f", "12345").is_err());
        assert!(require_phone("f", "").is_err());
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("f", "12.50").unwrap(), Decimal::new(1250, 2));
        assert!(parse_decimal("f", "12,50").is_err());
        assert!(parse_decimal("f", "").is_err());
    }

    #[test]
    fn test_non_negative_decimal() {
        assert!(non_negative_decimal("f", "0").is_ok());
        assert!(non_negative_decimal("f", "-1").is_err());
    }

    #[test]
    fn test_share_percentage_bounds() {
        assert!(share_percentage("f", "0").is_ok());
        assert!(share_percentage("f", "100").is_ok());
        assert!(share_percentage("f", "33.34").is_ok());
        assert!(share_percentage("f", "100.01").is_err());
        assert!(share_percentage("f", "-0.5").is_err());
    }

    #[test]
    fn test_past_date() {
        assert!(past_date("f", "1990-05-20").is_ok());
        assert!(past_date("f", "2999-01-01").is_err());
        assert!(past_date("f", "not-a-date").is_err());
    }

    #[test]
    fn test_parse_enum() {
        assert_eq!(
            parse_enum::<Relationship>("f", "sibling").unwrap(),
            Relationship::Sibling
        );
        let err = parse_enum::<Relationship>("f", "COUSIN").unwrap_err();
        assert!(err.message.contains("Invalid relationship"));
    }
}
