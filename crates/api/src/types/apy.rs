//! APY figures and lookback intervals.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::scalars::deserialize_optional_decimal;

/// Lookback window the remote averages APY over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ApyInterval {
    #[serde(rename = "1day")]
    OneDay,
    #[default]
    #[serde(rename = "7day")]
    SevenDay,
    #[serde(rename = "30day")]
    ThirtyDay,
}

impl ApyInterval {
    pub const ALL: [ApyInterval; 3] = [
        ApyInterval::OneDay,
        ApyInterval::SevenDay,
        ApyInterval::ThirtyDay,
    ];

    /// Wire value, e.g. `7day`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApyInterval::OneDay => "1day",
            ApyInterval::SevenDay => "7day",
            ApyInterval::ThirtyDay => "30day",
        }
    }
}

impl fmt::Display for ApyInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApyInterval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1day" | "1d" => Ok(ApyInterval::OneDay),
            "7day" | "7d" => Ok(ApyInterval::SevenDay),
            "30day" | "30d" => Ok(ApyInterval::ThirtyDay),
            _ => Err(format!("Unknown APY interval: {} (expected 1day, 7day or 30day)", s)),
        }
    }
}

/// APY breakdown. Values are fractions: `0.05` is 5%.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Apy {
    /// Yield from the underlying strategy.
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub base: Option<Decimal>,
    /// Yield from incentive rewards.
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub reward: Option<Decimal>,
    /// Base plus reward.
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub total: Option<Decimal>,
}

impl Apy {
    /// Total APY, summing the components when the remote omitted the total.
    pub fn total_or_sum(&self) -> Option<Decimal> {
        self.total.or(match (self.base, self.reward) {
            (Some(b), Some(r)) => Some(b + r),
            (Some(b), None) => Some(b),
            (None, Some(r)) => Some(r),
            (None, None) => None,
        })
    }
}

/// APY as sent by the remote: either one flat breakdown or one per interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApyField {
    ByInterval(BTreeMap<String, Apy>),
    Flat(Apy),
}

impl ApyField {
    /// Breakdown for `interval`.
    ///
    /// A flat breakdown is returned as is. A per-interval map without the
    /// requested interval gives `None`; no other interval is substituted.
    pub fn for_interval(&self, interval: ApyInterval) -> Option<&Apy> {
        match self {
            ApyField::Flat(apy) => Some(apy),
            ApyField::ByInterval(map) => map.get(interval.as_str()),
        }
    }

    /// Total APY for the default interval.
    pub fn total(&self) -> Option<Decimal> {
        self.for_interval(ApyInterval::default())
            .and_then(Apy::total_or_sum)
    }
}
