//! Asset types: a user's balance snapshot and a vault's underlying asset.

use alloy_primitives::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::network::{NetworkField, NetworkRef};
use super::scalars::{
    deserialize_optional_address, deserialize_optional_decimal, deserialize_optional_string,
};

/// A user's holding of one asset on one network, as fetched.
///
/// Returned by the idle-assets endpoint and embedded in deposit-option responses.
/// Every field other than the symbol is optional on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetBalance {
    /// Token contract address.
    #[serde(default, deserialize_with = "deserialize_optional_address")]
    pub address: Option<Address>,
    /// Token symbol, e.g. "USDC".
    #[serde(default)]
    pub symbol: String,
    /// Token name.
    #[serde(default)]
    pub name: Option<String>,
    /// Token decimals.
    #[serde(default)]
    pub decimals: Option<u8>,
    /// Balance in the token's own units, as a decimal string.
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub balance_native: Option<String>,
    /// Balance valued in USD.
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub balance_usd: Option<Decimal>,
    /// Network the balance is held on.
    #[serde(default)]
    pub network: Option<NetworkField>,
}

impl AssetBalance {
    /// USD value, treating a missing value as zero.
    pub fn usd_value(&self) -> Decimal {
        self.balance_usd.unwrap_or(Decimal::ZERO)
    }

    /// Upper-cased symbol used as the ranking key.
    pub fn symbol_key(&self) -> String {
        self.symbol.to_ascii_uppercase()
    }

    /// Network reference carried by the record, if any.
    pub fn network_ref(&self) -> Option<NetworkRef> {
        self.network.as_ref().and_then(NetworkField::network_ref)
    }

    /// Whether this balance is on the same chain as `other`.
    ///
    /// Unresolvable references compare by their surface form.
    pub fn is_on(&self, other: &NetworkRef) -> bool {
        match self.network_ref() {
            Some(own) => match (own.resolve(), other.resolve()) {
                (Ok(a), Ok(b)) => a == b,
                _ => own == *other,
            },
            None => false,
        }
    }
}

/// The underlying asset of a vault.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultAsset {
    #[serde(default, deserialize_with = "deserialize_optional_address")]
    pub address: Option<Address>,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub decimals: Option<u8>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub asset_price_in_usd: Option<Decimal>,
}
