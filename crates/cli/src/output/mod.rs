//! Output formatting for CLI results.
//!
//! Every formatter is a pure function from fetched data to a string; currency,
//! percentage and truncation rules live in [`format`].

pub mod format;
pub mod portfolio;
pub mod transaction;
pub mod vaults;

pub use portfolio::{format_deposit_options, format_idle_assets, format_positions};
pub use transaction::{format_payload, format_transaction, format_transaction_failure};
pub use vaults::{format_historical_table, format_vault_detail, format_vaults_table};
