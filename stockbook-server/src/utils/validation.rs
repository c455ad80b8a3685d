//! Input validation helpers
//!
//! Centralized text length constants and validation functions used by the
//! CRUD handlers before any store mutation.

use rust_decimal::Decimal;

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product name, category, customer name
pub const MAX_NAME_LEN: usize = 200;

/// SKU codes
pub const MAX_SKU_LEN: usize = 64;

/// Notes on reorders and orders
pub const MAX_NOTE_LEN: usize = 500;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Short identifiers: phone numbers, supplier names
pub const MAX_SHORT_TEXT_LEN: usize = 100;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate that a quantity is strictly positive.
pub fn validate_positive_quantity(value: i64, field: &str) -> Result<(), AppError> {
    if value < 1 {
        return Err(AppError::validation(format!(
            "{field} must be at least 1 (got {value})"
        )));
    }
    Ok(())
}

/// Validate that a count is non-negative.
pub fn validate_non_negative(value: i64, field: &str) -> Result<(), AppError> {
    if value < 0 {
        return Err(AppError::validation(format!(
            "{field} must not be negative (got {value})"
        )));
    }
    Ok(())
}

/// Validate that a money amount is non-negative.
pub fn validate_non_negative_amount(value: Decimal, field: &str) -> Result<(), AppError> {
    if value < Decimal::ZERO {
        return Err(AppError::validation(format!(
            "{field} must not be negative (got {value})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_required_text() {
        assert!(validate_required_text("  ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("Widget", "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn rejects_overlong_text() {
        let long = "x".repeat(MAX_SKU_LEN + 1);
        assert!(validate_required_text(&long, "sku", MAX_SKU_LEN).is_err());
        assert!(validate_optional_text(&Some(long), "notes", MAX_SKU_LEN).is_err());
        assert!(validate_optional_text(&None, "notes", MAX_SKU_LEN).is_ok());
    }

    #[test]
    fn quantity_bounds() {
        assert!(validate_positive_quantity(0, "quantity").is_err());
        assert!(validate_positive_quantity(1, "quantity").is_ok());
        assert!(validate_non_negative(0, "reorder_point").is_ok());
        assert!(validate_non_negative(-1, "reorder_point").is_err());
    }
}
