//! Command implementations.

pub mod portfolio;
pub mod transaction;
pub mod vaults;

use anyhow::Result;
use serde::Serialize;
use tracing::debug;
use vaults_rs_api::{ApiPayload, ClientConfig, VaultsClient};

use crate::cli::OutputFormat;
use crate::output::format_payload;

pub use portfolio::{
    run_deposit_options, run_events, run_idle_assets, run_positions, run_returns, run_tx_context,
};
pub use transaction::{run_best_deposit, run_tx};
pub use vaults::{run_benchmarks, run_historical, run_list, run_vault};

/// Build the HTTP client; fails before any request when the key is missing.
fn connect(config: &ClientConfig) -> Result<VaultsClient> {
    Ok(VaultsClient::with_config(config.clone())?)
}

/// Print `table` or the JSON form of `value`, depending on `format`.
fn emit<T: Serialize>(format: OutputFormat, value: &T, table: impl FnOnce() -> String) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("{}", table());
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value)?;
            println!("{}", json);
        }
    }
    Ok(())
}

/// Print a payload whose shape is not modelled.
fn emit_payload(format: OutputFormat, payload: &ApiPayload) -> Result<()> {
    match payload.item_count() {
        Some(count) => debug!("Payload with {} items", count),
        None => debug!("Payload properties: {}", payload.property_names().join(", ")),
    }
    emit(format, payload, || format_payload(payload))
}
