//! Currency, percentage and truncation helpers shared by the formatters.

use rust_decimal::Decimal;

/// Placeholder for values the remote did not report.
pub const MISSING: &str = "N/A";

pub fn format_usd(value: Option<Decimal>) -> String {
    match value {
        Some(v) if v.is_sign_negative() && !v.is_zero() => format!("-${:.2}", v.abs()),
        Some(v) => format!("${:.2}", v),
        None => MISSING.to_string(),
    }
}

/// An APY fraction as a percentage, `0.0539` -> `5.39%`.
pub fn format_apy(apy: Option<Decimal>) -> String {
    match apy {
        Some(v) => format!("{:.2}%", v * Decimal::ONE_HUNDRED),
        None => MISSING.to_string(),
    }
}

/// Cut `text` to `max` characters, marking the cut with `...`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// Keep the first six and last four characters of an address.
pub fn truncate_address(addr: &str) -> String {
    let chars: Vec<char> = addr.chars().collect();
    if chars.len() > 10 {
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        addr.to_string()
    }
}

pub fn or_missing(value: Option<&str>) -> String {
    value.unwrap_or(MISSING).to_string()
}
