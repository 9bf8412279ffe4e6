//! Conversions for the API's loosely typed scalar fields.
//!
//! Monetary values arrive as decimal strings (sometimes as JSON numbers); they are
//! held as [`Decimal`] and never as `f64`. Addresses arrive as hex strings.

use std::str::FromStr;

use alloy_primitives::{Address, U256};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parse a hex address string into an alloy Address.
pub fn parse_address(s: &str) -> Option<Address> {
    Address::from_str(s.trim()).ok()
}

/// Parse a decimal from a string, accepting scientific notation.
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Parse an integer amount expressed in the asset's base units.
///
/// Only ASCII digits are accepted: no sign, no decimal point, no exponent. The
/// value must fit in a `U256`.
pub fn parse_base_units(s: &str) -> Option<U256> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    U256::from_str_radix(s, 10).ok()
}

fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => parse_decimal(s),
        Value::Number(n) => parse_decimal(&n.to_string()),
        _ => None,
    }
}

/// Deserialize an optional decimal that may be a string, a number, null or absent.
///
/// Null and absent give `None`; any other value that is not a decimal is an error.
pub fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<Value> = Option::deserialize(deserializer)?;
    opt.map(|value| {
        decimal_from_value(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid decimal: {}", value)))
    })
    .transpose()
}

/// Deserialize an optional address. Null and absent give `None`.
pub fn deserialize_optional_address<'de, D>(deserializer: D) -> Result<Option<Address>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    opt.map(|s| {
        parse_address(&s).ok_or_else(|| serde::de::Error::custom(format!("Invalid address: {}", s)))
    })
    .transpose()
}

/// Deserialize a required address.
pub fn deserialize_address<'de, D>(deserializer: D) -> Result<Address, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = String::deserialize(deserializer)?;
    parse_address(&s).ok_or_else(|| serde::de::Error::custom(format!("Invalid address: {}", s)))
}

/// Deserialize an optional string that the remote sometimes sends as a number.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match opt {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
