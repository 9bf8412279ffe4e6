//! Historical APY samples for one vault.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::apy::Apy;
use super::scalars::{deserialize_optional_decimal, deserialize_optional_string};
use super::vault::Tvl;

/// One historical sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalApyPoint {
    /// Unix timestamp in seconds.
    pub timestamp: u64,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub block_number: Option<String>,
    #[serde(default)]
    pub apy: Option<Apy>,
    #[serde(default)]
    pub tvl: Option<Tvl>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub share_price: Option<Decimal>,
}

impl HistoricalApyPoint {
    pub fn total_apy(&self) -> Option<Decimal> {
        self.apy.as_ref().and_then(Apy::total_or_sum)
    }

    pub fn tvl_usd(&self) -> Option<Decimal> {
        self.tvl.as_ref().and_then(|t| t.usd)
    }
}
