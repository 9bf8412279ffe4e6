//! Deposit-option selection and transaction construction for vaults-rs.
//!
//! Built on the [`VaultGateway`](vaults_rs_api::VaultGateway) contract, so any
//! gateway implementation (the HTTP client or an in-memory one) can drive it.
//!
//! - [`rank_deposit_options`]: pure ranking of a user's candidate vaults per asset
//! - [`select_deposit_options`] / [`select_for_users`]: fetch, merge and rank
//! - [`TransactionBuilder`]: validate an intent and request a transaction descriptor

mod builder;
mod error;
mod ranker;
mod selector;
#[cfg(test)]
mod testing;

pub use builder::{
    TransactionBuilder, TransactionContext, TransactionFailure, TransactionIntent,
    TransactionOutcome, VaultTarget,
};
pub use error::{BuildError, Result};
pub use ranker::{
    compare_options, into_user_balances, rank_deposit_options, RankedDepositOptions,
    RankedOption,
};
pub use selector::{
    merge_idle_assets, select_deposit_options, select_for_users, SelectionOutcome, UserSelection,
};
