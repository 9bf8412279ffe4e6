//! Transaction construction requests and the opaque descriptors returned for them.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::network::NetworkRef;

/// Action a transaction performs on a vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionAction {
    Deposit,
    Redeem,
    ClaimRewards,
}

impl TransactionAction {
    /// Path segment used by the transactions endpoint.
    pub fn as_path_segment(&self) -> &'static str {
        match self {
            TransactionAction::Deposit => "deposit",
            TransactionAction::Redeem => "redeem",
            TransactionAction::ClaimRewards => "claim-rewards",
        }
    }

}

impl fmt::Display for TransactionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path_segment())
    }
}

impl FromStr for TransactionAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "deposit" => Ok(TransactionAction::Deposit),
            "redeem" | "withdraw" => Ok(TransactionAction::Redeem),
            "claim-rewards" | "claim" => Ok(TransactionAction::ClaimRewards),
            other => Err(format!(
                "Unknown action: {} (expected deposit, redeem or claim-rewards)",
                other
            )),
        }
    }
}

/// A fully resolved request for the transactions endpoint.
///
/// Built by the transaction builder after validation; the network is already
/// expressed in the form the gateway requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub action: TransactionAction,
    pub user: Address,
    pub network: NetworkRef,
    pub vault: Address,
    pub asset_address: Address,
    /// Integer amount in the asset's base units, sent without scaling.
    pub amount: Option<U256>,
    pub simulate: bool,
    /// Redeem the whole position. Only ever set on redeem requests.
    pub all: bool,
}

impl TransactionRequest {
    /// Path below the API root, e.g. `/v2/transactions/deposit/{user}/{network}/{vault}`.
    pub fn path(&self) -> String {
        format!(
            "/v2/transactions/{}/{}/{}/{}",
            self.action.as_path_segment(),
            self.user,
            self.network,
            self.vault
        )
    }

    /// Query pairs in the order the endpoint documents them.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("assetAddress", self.asset_address.to_string())];
        if let Some(amount) = &self.amount {
            query.push(("amount", amount.to_string()));
        }
        query.push(("simulate", self.simulate.to_string()));
        if self.action == TransactionAction::Redeem {
            query.push(("all", self.all.to_string()));
        }
        query
    }
}

/// The remote's answer to a transaction request.
///
/// Opaque to this crate: it is handed to an external signer untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionDescriptor(pub Value);

impl TransactionDescriptor {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}
