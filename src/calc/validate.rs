use rust_decimal::Decimal;
use std::str::FromStr;

use super::ROUNDING;
use crate::error::ValidationError;

pub(crate) const MAX_COST: Decimal = Decimal::from_parts(999_999, 0, 0, false, 0);

/// The single gate for monetary input.
///
/// Blank input means zero. Anything else must be a plain decimal number
/// between 0 and [`MAX_COST`] inclusive; the bound is checked on the raw value
/// and the result is rounded half-up to cents.
pub(crate) fn validate_cost(input: &str) -> Result<Decimal, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }

    if !is_plain_decimal(trimmed) {
        return Err(ValidationError::NotANumber(trimmed.to_string()));
    }
    let value = Decimal::from_str(trimmed)
        .map_err(|_| ValidationError::NotANumber(trimmed.to_string()))?;

    if value.is_zero() {
        // "-0" and "0.000" both store as plain zero
        return Ok(Decimal::ZERO);
    }
    if value.is_sign_negative() {
        return Err(ValidationError::NegativeCost);
    }
    if value > MAX_COST {
        return Err(ValidationError::CostTooLarge { max: MAX_COST });
    }

    Ok(value.round_dp_with_strategy(2, ROUNDING))
}

/// Optional sign, digits, at most one `.`. No exponents or `_` separators.
fn is_plain_decimal(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let mut parts = unsigned.splitn(2, '.');
    let int_part = parts.next().unwrap_or("");
    let frac_part = parts.next().unwrap_or("");
    !(int_part.is_empty() && frac_part.is_empty())
        && int_part.bytes().all(|b| b.is_ascii_digit())
        && frac_part.bytes().all(|b| b.is_ascii_digit())
}

/// Reject blank text; return it trimmed.
pub(crate) fn validate_text(input: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyText(field));
    }
    Ok(trimmed.to_string())
}
