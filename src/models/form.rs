//! Parse/validate helpers shared by the add and edit forms.
//!
//! Forms hold raw text exactly as typed; these helpers turn it into typed
//! record fields at the boundary.

use crate::errors::{AppError, AppResult};
use crate::utils::date;
use chrono::NaiveDate;

/// Non-blank text, trimmed.
pub fn required_text(field: &'static str, raw: &str) -> AppResult<String> {
    let t = raw.trim();
    if t.is_empty() {
        return Err(AppError::MissingField(field));
    }
    Ok(t.to_string())
}

/// Blank text becomes `None`.
pub fn optional_text(raw: &str) -> Option<String> {
    let t = raw.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

/// Monetary or numeric amount. A lone comma is accepted as decimal separator
/// (`1234,56`), thousands separators are not.
pub fn parse_amount(field: &'static str, raw: &str) -> AppResult<f64> {
    let t = raw.trim();
    if t.is_empty() {
        return Err(AppError::MissingField(field));
    }

    let normalized = if !t.contains('.') && t.matches(',').count() == 1 {
        t.replace(',', ".")
    } else {
        t.to_string()
    };

    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(AppError::InvalidNumber(format!("{field}: '{t}'"))),
    }
}

pub fn parse_form_date(field: &'static str, raw: &str) -> AppResult<NaiveDate> {
    let t = raw.trim();
    if t.is_empty() {
        return Err(AppError::MissingField(field));
    }
    date::parse_date(t).ok_or_else(|| AppError::InvalidDate(t.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_accept_dot_or_single_comma() {
        assert_eq!(parse_amount("ltv", "1234.5").unwrap(), 1234.5);
        assert_eq!(parse_amount("ltv", " 1234,5 ").unwrap(), 1234.5);
        assert_eq!(parse_amount("ltv", "-20").unwrap(), -20.0);
    }

    #[test]
    fn amounts_reject_garbage_and_blank() {
        assert!(matches!(
            parse_amount("ltv", "12abc"),
            Err(AppError::InvalidNumber(_))
        ));
        assert!(matches!(
            parse_amount("ltv", "1.234,56"),
            Err(AppError::InvalidNumber(_))
        ));
        assert!(matches!(
            parse_amount("ltv", "   "),
            Err(AppError::MissingField("ltv"))
        ));
        assert!(parse_amount("ltv", "NaN").is_err());
    }

    #[test]
    fn optional_text_collapses_blank() {
        assert_eq!(optional_text("  "), None);
        assert_eq!(optional_text(" Alpha "), Some("Alpha".into()));
    }
}
