//! Tables for a user's deposit options, positions and idle assets.

use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};
use vaults_rs_api::{ApyInterval, AssetBalance, NetworkField, Position};
use vaults_rs_strategy::RankedDepositOptions;

use super::format::{format_apy, format_usd, or_missing, truncate, MISSING};

#[derive(Tabled)]
struct DepositOptionRow {
    #[tabled(rename = "Asset")]
    asset: String,
    #[tabled(rename = "Balance USD")]
    balance_usd: String,
    #[tabled(rename = "Network")]
    network: String,
    #[tabled(rename = "Vault Name")]
    name: String,
    #[tabled(rename = "Protocol")]
    protocol: String,
    #[tabled(rename = "APY")]
    apy: String,
}

#[derive(Tabled)]
struct PositionRow {
    #[tabled(rename = "Network")]
    network: String,
    #[tabled(rename = "Protocol")]
    protocol: String,
    #[tabled(rename = "Vault Name")]
    name: String,
    #[tabled(rename = "Asset")]
    asset: String,
    #[tabled(rename = "Balance USD")]
    balance_usd: String,
    #[tabled(rename = "APY")]
    apy: String,
}

#[derive(Tabled)]
struct IdleAssetRow {
    #[tabled(rename = "Asset")]
    asset: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Balance USD")]
    balance_usd: String,
    #[tabled(rename = "Network")]
    network: String,
}

fn network_label(network: Option<&NetworkField>) -> String {
    network
        .and_then(NetworkField::display_name)
        .unwrap_or_else(|| MISSING.to_string())
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::left()));
    table.to_string()
}

/// One row per ranked option, assets in symbol order and options in rank order.
pub fn format_deposit_options(ranked: &RankedDepositOptions, interval: ApyInterval) -> String {
    let rows: Vec<DepositOptionRow> = ranked
        .values()
        .flatten()
        .map(|entry| DepositOptionRow {
            asset: entry.asset.symbol.clone(),
            balance_usd: format_usd(entry.asset.balance_usd),
            network: entry
                .option
                .network_name()
                .unwrap_or_else(|| MISSING.to_string()),
            name: truncate(entry.option.display_name(), 18),
            protocol: or_missing(entry.option.protocol_name()),
            apy: format_apy(entry.option.total_apy_for(interval)),
        })
        .collect();

    if rows.is_empty() {
        return "No deposit options available.".to_string();
    }
    render(rows)
}

pub fn format_positions(positions: &[Position]) -> String {
    if positions.is_empty() {
        return "No active positions found.".to_string();
    }

    let rows: Vec<PositionRow> = positions
        .iter()
        .map(|pos| PositionRow {
            network: network_label(pos.network.as_ref()),
            protocol: or_missing(pos.protocol.as_ref().and_then(|p| p.name.as_deref())),
            name: truncate(pos.name.as_deref().unwrap_or("Unknown Vault"), 16),
            asset: or_missing(pos.asset.as_ref().map(|a| a.symbol.as_str())),
            balance_usd: format_usd(pos.asset.as_ref().and_then(|a| a.balance_usd)),
            apy: format_apy(pos.total_apy()),
        })
        .collect();

    render(rows)
}

pub fn format_idle_assets(assets: &[AssetBalance]) -> String {
    if assets.is_empty() {
        return "No idle assets found.".to_string();
    }

    let rows: Vec<IdleAssetRow> = assets
        .iter()
        .map(|asset| IdleAssetRow {
            asset: asset.symbol.clone(),
            balance: asset
                .balance_native
                .as_ref()
                .map(|native| format!("{} {}", native, asset.symbol))
                .unwrap_or_else(|| MISSING.to_string()),
            balance_usd: format_usd(asset.balance_usd),
            network: network_label(asset.network.as_ref()),
        })
        .collect();

    render(rows)
}
