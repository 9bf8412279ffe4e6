//! Portfolio records: positions, idle balances and best deposit options.

use alloy_primitives::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::apy::ApyField;
use super::asset::AssetBalance;
use super::network::{NetworkField, NetworkRef};
use super::scalars::deserialize_address;
use super::vault::{DepositOption, Protocol};

/// A user's position in one vault.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// The vault's contract address.
    #[serde(deserialize_with = "deserialize_address")]
    pub address: Address,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub network: Option<NetworkField>,
    #[serde(default)]
    pub protocol: Option<Protocol>,
    /// The deposited asset and the position's value in it.
    #[serde(default)]
    pub asset: Option<AssetBalance>,
    #[serde(default)]
    pub apy: Option<ApyField>,
}

impl Position {
    pub fn network_ref(&self) -> Option<NetworkRef> {
        self.network.as_ref().and_then(NetworkField::network_ref)
    }

    /// USD value of the position, zero when unknown.
    pub fn usd_value(&self) -> Decimal {
        self.asset
            .as_ref()
            .map_or(Decimal::ZERO, AssetBalance::usd_value)
    }

    pub fn total_apy(&self) -> Option<Decimal> {
        self.apy.as_ref().and_then(ApyField::total)
    }
}

/// One held asset together with the vaults it could be deposited into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBalance {
    pub asset: AssetBalance,
    #[serde(default)]
    pub deposit_options: Vec<DepositOption>,
}

/// Body of the best-deposit-options endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositOptionsResponse {
    #[serde(default)]
    pub user_balances: Vec<UserBalance>,
}

impl DepositOptionsResponse {
    /// Total number of candidate options across every asset.
    pub fn option_count(&self) -> usize {
        self.user_balances
            .iter()
            .map(|b| b.deposit_options.len())
            .sum()
    }
}
