use crate::error::RmcError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse an operator-entered number.
///
/// Handles formats like:
/// - "5" -> 5
/// - "2.75" -> 2.75
/// - "2,75" -> 2.75 (decimal comma)
/// - "" or whitespace -> None
pub fn parse_number(s: &str) -> Result<Option<Decimal>, RmcError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    let normalized = s.replace(',', ".");
    Decimal::from_str(&normalized)
        .map(Some)
        .map_err(|e| RmcError::InvalidNumber(format!("'{}': {}", s, e)))
}

/// Parse a required field, rejecting blanks and garbage.
pub fn parse_required(field: &'static str, s: &str) -> Result<Decimal, RmcError> {
    parse_number(s)?.ok_or(RmcError::MissingField(field))
}

/// Parse a number, substituting 0 for blank or non-numeric input.
pub fn parse_or_zero(s: &str) -> Decimal {
    match parse_number(s) {
        Ok(Some(v)) => v,
        Ok(None) => Decimal::ZERO,
        Err(e) => {
            tracing::warn!("treating {} as 0", e);
            Decimal::ZERO
        }
    }
}
