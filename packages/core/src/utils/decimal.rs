// Десятичные целые произвольной длины

use crate::error::ValidationError;
use num_bigint::BigUint;
use num_traits::Zero;

/// Parses an unsigned decimal integer of unbounded size.
///
/// Surrounding whitespace is ignored; signs, separators and other radixes are
/// rejected.
pub fn parse_unsigned(field: &'static str, raw: &str) -> Result<BigUint, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::MalformedInteger(field));
    }
    BigUint::parse_bytes(trimmed.as_bytes(), 10).ok_or(ValidationError::MalformedInteger(field))
}

/// Like [`parse_unsigned`], additionally rejecting zero.
pub fn parse_positive(field: &'static str, raw: &str) -> Result<BigUint, ValidationError> {
    let value = parse_unsigned(field, raw)?;
    if value.is_zero() {
        return Err(ValidationError::NonPositiveInteger(field));
    }
    Ok(value)
}
