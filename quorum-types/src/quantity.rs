//! Helpers for the `0x`-prefixed hex quantities used throughout the JSON-RPC API.

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum QuantityError {
    #[error("quantity `{0}` is missing the `0x` prefix")]
    MissingPrefix(String),
    #[error("quantity `{0}` has no digits")]
    Empty(String),
    #[error("invalid quantity `{0}`: {1}")]
    Invalid(String, std::num::ParseIntError),
}

/// Parses a hex quantity such as `"0x1b4"` into a `u64`.
pub fn parse_u64(quantity: &str) -> Result<u64, QuantityError> {
    let digits = quantity
        .strip_prefix("0x")
        .ok_or_else(|| QuantityError::MissingPrefix(quantity.to_string()))?;
    if digits.is_empty() {
        return Err(QuantityError::Empty(quantity.to_string()));
    }
    u64::from_str_radix(digits, 16).map_err(|e| QuantityError::Invalid(quantity.to_string(), e))
}

/// Formats `n` as a hex quantity, e.g. for passing block numbers as parameters.
pub fn encode_u64(n: u64) -> String {
    format!("{:#x}", n)
}
