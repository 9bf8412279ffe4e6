//! Errors raised while preparing a transaction request.

use alloy_primitives::Address;
use thiserror::Error;
use vaults_rs_api::TransactionAction;

/// Validation failures detected before any remote call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The vault's network is not in the network table.
    #[error("Unknown network {network} for vault {vault}")]
    UnknownNetwork { network: String, vault: Address },

    /// No asset address was given and none could be taken from the balance.
    #[error("No asset address for {action} into {vault} on {network}{}", symbol_suffix(.symbol))]
    MissingAssetAddress {
        action: TransactionAction,
        vault: Address,
        network: String,
        symbol: Option<String>,
    },

    /// The amount is not a positive integer in base units.
    #[error("Invalid amount {amount:?} for {action}: {reason}")]
    InvalidAmount {
        action: TransactionAction,
        amount: String,
        reason: String,
    },

    /// The action needs an amount and none was given.
    #[error("Missing amount for {action}")]
    MissingAmount { action: TransactionAction },

    /// `all` was requested on an action other than redeem.
    #[error("'all' is only valid for redeem, not {action}")]
    AllRequiresRedeem { action: TransactionAction },
}

fn symbol_suffix(symbol: &Option<String>) -> String {
    symbol
        .as_ref()
        .map(|s| format!(" (asset {})", s))
        .unwrap_or_default()
}

/// Result type alias for transaction preparation.
pub type Result<T> = std::result::Result<T, BuildError>;
