//! Detailed vault records, used both for vault listings and as deposit options.

use alloy_primitives::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::apy::{ApyField, ApyInterval};
use super::asset::VaultAsset;
use super::network::{NetworkField, NetworkRef};
use super::scalars::{deserialize_address, deserialize_optional_decimal, deserialize_optional_string};

/// Protocol a vault belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Protocol {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Total value locked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tvl {
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub usd: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub native: Option<String>,
}

/// A vault as described by the detailed-vaults endpoints.
///
/// The same record shape is returned as a candidate under each asset of a
/// best-deposit-options response, so it doubles as the deposit option type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedVault {
    /// The vault's contract address.
    #[serde(deserialize_with = "deserialize_address")]
    pub address: Address,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub network: Option<NetworkField>,
    #[serde(default)]
    pub protocol: Option<Protocol>,
    #[serde(default)]
    pub apy: Option<ApyField>,
    #[serde(default)]
    pub tvl: Option<Tvl>,
    /// The vault's underlying asset.
    #[serde(default)]
    pub asset: Option<VaultAsset>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_transactional: Option<bool>,
    #[serde(default)]
    pub is_app_featured: Option<bool>,
}

/// A candidate vault for depositing a particular asset.
pub type DepositOption = DetailedVault;

impl DetailedVault {
    /// Network reference carried by the record.
    pub fn network_ref(&self) -> Option<NetworkRef> {
        self.network.as_ref().and_then(NetworkField::network_ref)
    }

    /// Canonical short name when the network resolves, else whatever the remote sent.
    pub fn network_name(&self) -> Option<String> {
        match self.network_ref().map(|r| r.resolve()) {
            Some(Ok(network)) => Some(network.name().to_string()),
            _ => self.network.as_ref().and_then(NetworkField::display_name),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown Vault")
    }

    pub fn protocol_name(&self) -> Option<&str> {
        self.protocol.as_ref().and_then(|p| p.name.as_deref())
    }

    /// Symbol of the underlying asset.
    pub fn asset_symbol(&self) -> Option<&str> {
        self.asset
            .as_ref()
            .map(|a| a.symbol.as_str())
            .filter(|s| !s.is_empty())
    }

    /// Total APY for the default interval.
    pub fn total_apy(&self) -> Option<Decimal> {
        self.apy.as_ref().and_then(ApyField::total)
    }

    /// Total APY for a specific interval.
    pub fn total_apy_for(&self, interval: ApyInterval) -> Option<Decimal> {
        self.apy
            .as_ref()
            .and_then(|apy| apy.for_interval(interval))
            .and_then(|apy| apy.total_or_sum())
    }

    pub fn tvl_usd(&self) -> Option<Decimal> {
        self.tvl.as_ref().and_then(|t| t.usd)
    }
}
