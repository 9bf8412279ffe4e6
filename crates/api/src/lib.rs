//! Vaults API Rust Library
//!
//! A typed client for a yield-vault data API in the style of vaults.fyi: vault
//! listings, historical APY, user positions, idle assets, best deposit options and
//! transaction construction.
//!
//! # Example
//!
//! ```no_run
//! use vaults_rs_api::{ClientConfig, RankingOptions, VaultFilters, VaultGateway, VaultsClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), vaults_rs_api::ApiError> {
//!     // Reads VAULTS_FYI_API_KEY (and optionally VAULTS_FYI_API_URL)
//!     let client = VaultsClient::with_config(ClientConfig::from_env())?;
//!
//!     let filters = VaultFilters::builder()
//!         .allowed_assets(["USDC", "USDT"])
//!         .min_usd_asset_value_threshold(rust_decimal::Decimal::from(10))
//!         .build()?;
//!
//!     let user = "0xdB79e7E9e1412457528e40db9fCDBe69f558777d".parse().unwrap();
//!     let balances = client
//!         .get_deposit_options(user, &filters, &RankingOptions::default())
//!         .await?;
//!     for balance in &balances {
//!         println!("{}: {} options", balance.asset.symbol, balance.deposit_options.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Networks
//!
//! Networks are accepted as short names (`mainnet`, `base`) or CAIP-2 ids
//! (`eip155:8453`). See [`NetworkRef`] and the fixed table in [`NETWORKS`].
//!
//! # Error Handling
//!
//! All errors are reported through [`ApiError`]. Non-2xx responses and bodies of an
//! unexpected shape are [`ApiError::Remote`]; use [`ApiError::is_retryable()`] to
//! decide whether to try again. The client itself never retries.

pub mod client;
pub mod error;
pub mod filters;
pub mod gateway;
pub mod types;

// Re-export main types at crate root
pub use client::{ClientConfig, VaultsClient, API_KEY_ENV, API_URL_ENV, DEFAULT_API_URL};
pub use error::{ApiError, FilterDimension, Result};
pub use filters::{
    FilterSubject, HistoricalQuery, Page, PageRequest, RankingOptions, VaultFilters,
    VaultFiltersBuilder,
};
pub use gateway::VaultGateway;
pub use types::{
    ApiPayload, Apy, ApyField, ApyInterval, AssetBalance, DepositOption, DepositOptionsResponse,
    DetailedVault, HistoricalApyPoint, NamedChain, Network, NetworkField, NetworkForm, NetworkRef,
    Position, Protocol, TransactionAction, TransactionDescriptor, TransactionRequest, Tvl,
    UserBalance, VaultAsset, NETWORKS,
};
