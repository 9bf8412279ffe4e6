//! Type definitions for the vaults API.

pub mod apy;
pub mod asset;
pub mod historical;
pub mod network;
pub mod payload;
pub mod portfolio;
pub mod scalars;
pub mod transaction;
pub mod vault;

pub use alloy_chains::NamedChain;
pub use apy::{Apy, ApyField, ApyInterval};
pub use asset::{AssetBalance, VaultAsset};
pub use historical::HistoricalApyPoint;
pub use network::{Network, NetworkField, NetworkForm, NetworkInfo, NetworkRef, NETWORKS};
pub use payload::ApiPayload;
pub use portfolio::{DepositOptionsResponse, Position, UserBalance};
pub use transaction::{TransactionAction, TransactionDescriptor, TransactionRequest};
pub use vault::{DepositOption, DetailedVault, Protocol, Tvl};
