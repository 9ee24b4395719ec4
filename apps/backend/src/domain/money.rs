//! Monetary amounts stored as two-decimal fixed-point text.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::domain::{DomainError, ValidationKind};

/// Fractional digits kept for balances
pub const BALANCE_SCALE: u32 = 2;

/// Integer digits a balance may carry. Keeps the two fraction digits
/// representable and the text within the 32-character column.
pub const MAX_BALANCE_DIGITS: u32 = 26;

/// Parse a decimal amount from its textual form (`"12.345"`, `"5"`, `"1e3"`).
pub fn parse_amount(raw: &str) -> Result<Decimal, DomainError> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| {
            DomainError::validation(
                ValidationKind::InvalidBalance,
                format!("'{raw}' is not a valid amount"),
            )
        })
}

/// Round half away from zero to two places and render with exactly two digits.
///
/// Amounts of `10^MAX_BALANCE_DIGITS` or more (after rounding) are rejected.
pub fn format_balance(amount: Decimal) -> Result<String, DomainError> {
    let mut rounded =
        amount.round_dp_with_strategy(BALANCE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        // no "-0.00"
        rounded = Decimal::ZERO;
    }
    if rounded.abs() >= Decimal::from_i128_with_scale(10i128.pow(MAX_BALANCE_DIGITS), 0) {
        return Err(DomainError::validation(
            ValidationKind::InvalidBalance,
            format!("Amount must be below 1e{MAX_BALANCE_DIGITS}"),
        ));
    }
    rounded.rescale(BALANCE_SCALE);
    Ok(rounded.to_string())
}

/// `parse_amount` followed by `format_balance`.
pub fn normalize_balance(raw: &str) -> Result<String, DomainError> {
    parse_amount(raw).and_then(format_balance)
}
