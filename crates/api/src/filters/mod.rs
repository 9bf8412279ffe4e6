//! Filters and query options for vault requests.
//!
//! - **[`VaultFilters`]**: validated allow/deny filters, sent to the remote as query
//!   parameters and re-applied locally by [`VaultFilters::matches`]
//! - **[`PageRequest`]**, **[`HistoricalQuery`]**, **[`RankingOptions`]**: per-endpoint
//!   options
//!
//! # Example
//!
//! ```no_run
//! # use vaults_rs_api::*;
//! # async fn example() -> Result<()> {
//! let client = VaultsClient::with_config(ClientConfig::from_env())?;
//! let filters = VaultFilters::builder()
//!     .allowed_networks(["mainnet", "base"])
//!     .allowed_assets(["USDC"])
//!     .only_transactional(true)
//!     .build()?;
//! let page = client.list_vaults(&filters, PageRequest::new(0, 20)).await?;
//! for vault in page.items.iter().filter(|v| filters.matches(*v)) {
//!     println!("{}", vault.display_name());
//! }
//! # Ok(())
//! # }
//! ```

pub mod query_options;
pub mod vault_filters;

pub use query_options::{HistoricalQuery, Page, PageRequest, RankingOptions};
pub use vault_filters::{FilterSubject, VaultFilters, VaultFiltersBuilder};
