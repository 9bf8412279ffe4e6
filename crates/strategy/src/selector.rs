//! Best-deposit-option selection for one or many users.

use alloy_primitives::Address;
use futures::future::join_all;
use tracing::{info, warn};
use vaults_rs_api::{
    ApiError, AssetBalance, RankingOptions, UserBalance, VaultFilters, VaultGateway,
};

use crate::ranker::{rank_deposit_options, RankedDepositOptions};

/// Result of selection for one user in a batch.
#[derive(Debug)]
pub enum SelectionOutcome {
    /// At least one asset with options survived ranking.
    Ranked(RankedDepositOptions),
    /// The user holds nothing that passed the filters.
    NoData,
    /// A remote call failed.
    Failed(ApiError),
}

impl SelectionOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, SelectionOutcome::Failed(_))
    }
}

/// Selection outcome tagged with the user it belongs to.
#[derive(Debug)]
pub struct UserSelection {
    pub user: Address,
    pub outcome: SelectionOutcome,
}

/// Fill fields the deposit-options response left empty from the user's idle
/// asset list.
///
/// An idle asset is a match when its symbol agrees and, if both records name a
/// network, the networks agree too.
pub fn merge_idle_assets(balances: Vec<UserBalance>, idle: &[AssetBalance]) -> Vec<UserBalance> {
    balances
        .into_iter()
        .map(|mut balance| {
            let symbol = balance.asset.symbol_key();
            let own_network = balance.asset.network_ref();
            let found = idle.iter().find(|candidate| {
                candidate.symbol_key() == symbol
                    && match (&own_network, candidate.network_ref()) {
                        (Some(own), Some(_)) => candidate.is_on(own),
                        _ => true,
                    }
            });

            if let Some(found) = found {
                let asset = &mut balance.asset;
                if asset.address.is_none() {
                    asset.address = found.address;
                }
                if asset.name.is_none() {
                    asset.name.clone_from(&found.name);
                }
                if asset.decimals.is_none() {
                    asset.decimals = found.decimals;
                }
                if asset.balance_native.is_none() {
                    asset.balance_native.clone_from(&found.balance_native);
                }
                if asset.balance_usd.is_none() {
                    asset.balance_usd = found.balance_usd;
                }
                if asset.network.is_none() {
                    asset.network.clone_from(&found.network);
                }
            }
            balance
        })
        .collect()
}

/// Fetch a user's idle assets and deposit options concurrently, merge them and
/// rank the result.
///
/// # Errors
///
/// Returns the first remote error; nothing is ranked from a partial fetch.
pub async fn select_deposit_options<G: VaultGateway + ?Sized>(
    gateway: &G,
    user: Address,
    filters: &VaultFilters,
    ranking: &RankingOptions,
) -> Result<RankedDepositOptions, ApiError> {
    let (idle, balances) = tokio::try_join!(
        gateway.get_idle_assets(user, filters),
        gateway.get_deposit_options(user, filters, ranking),
    )?;

    let balances = merge_idle_assets(balances, &idle);
    let ranked = rank_deposit_options(&balances, filters, ranking);
    info!(
        "Ranked deposit options for {}: {} of {} assets retained",
        user,
        ranked.len(),
        balances.len()
    );
    Ok(ranked)
}

/// Run [`select_deposit_options`] for many users at once.
///
/// One user's failure is recorded in their outcome and never affects the others.
/// Outcomes come back in the order of `users`.
pub async fn select_for_users<G: VaultGateway + ?Sized>(
    gateway: &G,
    users: &[Address],
    filters: &VaultFilters,
    ranking: &RankingOptions,
) -> Vec<UserSelection> {
    let futures = users.iter().map(|&user| async move {
        let outcome = match select_deposit_options(gateway, user, filters, ranking).await {
            Ok(ranked) if ranked.is_empty() => SelectionOutcome::NoData,
            Ok(ranked) => SelectionOutcome::Ranked(ranked),
            Err(e) => {
                warn!("Deposit option selection failed for {}: {}", user, e);
                SelectionOutcome::Failed(e)
            }
        };
        UserSelection { user, outcome }
    });

    join_all(futures).await
}
