//! The remote query gateway contract.

use alloy_primitives::Address;
use async_trait::async_trait;

use crate::error::Result;
use crate::filters::{HistoricalQuery, Page, PageRequest, RankingOptions, VaultFilters};
use crate::types::{
    AssetBalance, DetailedVault, HistoricalApyPoint, NetworkForm, NetworkRef, Position,
    TransactionDescriptor, TransactionRequest, UserBalance,
};

/// Typed access to the vault data API.
///
/// Each method is exactly one remote round trip. Implementations never retry,
/// cache or walk pages on their own; a non-2xx status or a body that does not
/// have the expected shape is an [`ApiError::Remote`](crate::ApiError::Remote).
///
/// [`VaultsClient`](crate::VaultsClient) is the HTTP implementation. Tests and
/// embedders can supply their own.
#[async_trait]
pub trait VaultGateway: Send + Sync {
    /// Surface form this gateway expects network path segments in.
    fn network_form(&self) -> NetworkForm;

    /// One page of the detailed vault listing.
    async fn list_vaults(&self, filters: &VaultFilters, page: PageRequest)
        -> Result<Page<DetailedVault>>;

    async fn get_vault(&self, network: &NetworkRef, vault: Address) -> Result<DetailedVault>;

    async fn get_historical_apy(
        &self,
        network: &NetworkRef,
        vault: Address,
        query: &HistoricalQuery,
    ) -> Result<Page<HistoricalApyPoint>>;

    async fn get_positions(&self, user: Address, filters: &VaultFilters) -> Result<Vec<Position>>;

    /// Each held asset with the remote's ranked candidate vaults.
    async fn get_deposit_options(
        &self,
        user: Address,
        filters: &VaultFilters,
        ranking: &RankingOptions,
    ) -> Result<Vec<UserBalance>>;

    /// Assets the user holds but has not deposited anywhere.
    async fn get_idle_assets(&self, user: Address, filters: &VaultFilters)
        -> Result<Vec<AssetBalance>>;

    /// Ask the remote to construct a transaction. The request's network must
    /// already be in [`network_form`](Self::network_form).
    async fn build_transaction(&self, request: &TransactionRequest)
        -> Result<TransactionDescriptor>;
}
