//! Deposit-option ranking.
//!
//! Turns the per-asset candidate lists of a best-deposit-options response into a
//! filtered, ordered and capped selection per asset symbol. Everything here is a
//! pure function of its inputs.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use vaults_rs_api::{
    ApyInterval, AssetBalance, DepositOption, RankingOptions, UserBalance, VaultFilters,
};

/// A deposit option paired with the held balance it was offered for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedOption {
    pub option: DepositOption,
    pub asset: AssetBalance,
}

/// Ranked options keyed by upper-cased asset symbol, best option first.
pub type RankedDepositOptions = BTreeMap<String, Vec<RankedOption>>;

fn desc_missing_last(a: Option<Decimal>, b: Option<Decimal>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Total order on deposit options: APY descending, then TVL descending, then
/// vault address ascending. Missing APY or TVL sorts after any present value.
///
/// Options at the same address on different networks are ordered by network so
/// the order stays total.
pub fn compare_options(a: &DepositOption, b: &DepositOption, interval: ApyInterval) -> Ordering {
    desc_missing_last(a.total_apy_for(interval), b.total_apy_for(interval))
        .then_with(|| desc_missing_last(a.tvl_usd(), b.tvl_usd()))
        .then_with(|| a.address.cmp(&b.address))
        .then_with(|| a.network_name().cmp(&b.network_name()))
}

fn meets_min_apy(option: &DepositOption, ranking: &RankingOptions) -> bool {
    match ranking.min_apy {
        Some(min) => option
            .total_apy_for(ranking.apy_interval)
            .is_some_and(|apy| apy >= min),
        None => true,
    }
}

/// Rank the deposit options of every held asset.
///
/// 1. Balances below the USD value floor, and assets rejected by the asset
///    allow/deny lists, are dropped. Always-returned assets skip the floor and the
///    allow list.
/// 2. Each remaining asset's options are filtered with [`VaultFilters::matches`]
///    ([`VaultFilters::matches_always_returned`] for always-returned assets) and
///    the ranking's minimum APY.
/// 3. Options are sorted with [`compare_options`].
/// 4. Each list is cut to `max_vaults_per_asset`.
/// 5. An always-returned asset whose list the cut emptied gets its best option
///    back.
///
/// Balances sharing a symbol (the same token on several networks) are merged
/// under one key, each option staying paired with its own balance. Assets with
/// no surviving option are left out, except always-returned ones, which are
/// kept with an empty list. The inputs are not modified.
pub fn rank_deposit_options(
    balances: &[UserBalance],
    filters: &VaultFilters,
    ranking: &RankingOptions,
) -> RankedDepositOptions {
    let mut ranked = RankedDepositOptions::new();

    for balance in balances {
        let symbol = balance.asset.symbol_key();
        let always = filters.is_always_returned(&symbol);

        if !always
            && (!filters.meets_value_floor(balance.asset.usd_value()) || !filters.allows_asset(&symbol))
        {
            continue;
        }
        if always && filters.denies_asset(&symbol) {
            continue;
        }

        let candidates = balance
            .deposit_options
            .iter()
            .filter(|option| {
                if always {
                    filters.matches_always_returned(*option)
                } else {
                    filters.matches(*option)
                }
            })
            .filter(|option| meets_min_apy(option, ranking))
            .map(|option| RankedOption {
                option: option.clone(),
                asset: balance.asset.clone(),
            });

        ranked.entry(symbol).or_default().extend(candidates);
    }

    let cap = filters.max_vaults_per_asset();
    ranked.retain(|symbol, options| {
        options.sort_by(|a, b| compare_options(&a.option, &b.option, ranking.apy_interval));

        let best = options.first().cloned();
        if let Some(max) = cap {
            options.truncate(max);
        }

        if filters.is_always_returned(symbol) {
            if options.is_empty() {
                options.extend(best);
            }
            true
        } else {
            !options.is_empty()
        }
    });

    ranked
}

/// Regroup ranked options into per-balance records, the shape the ranker takes
/// as input.
pub fn into_user_balances(ranked: &RankedDepositOptions) -> Vec<UserBalance> {
    let mut balances: Vec<UserBalance> = Vec::new();
    for options in ranked.values() {
        for entry in options {
            match balances.iter_mut().find(|b| b.asset == entry.asset) {
                Some(balance) => balance.deposit_options.push(entry.option.clone()),
                None => balances.push(UserBalance {
                    asset: entry.asset.clone(),
                    deposit_options: vec![entry.option.clone()],
                }),
            }
        }
    }
    balances
}
