//! Vault list, vault detail and historical APY output.

use colored::Colorize;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};
use vaults_rs_api::{Apy, ApyField, ApyInterval, DetailedVault, HistoricalApyPoint};

use super::format::{format_apy, format_usd, or_missing, truncate, truncate_address, MISSING};

#[derive(Tabled)]
struct VaultRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Network")]
    network: String,
    #[tabled(rename = "Protocol")]
    protocol: String,
    #[tabled(rename = "Asset")]
    asset: String,
    #[tabled(rename = "APY")]
    apy: String,
    #[tabled(rename = "TVL (USD)")]
    tvl_usd: String,
}

#[derive(Tabled)]
struct HistoricalRow {
    #[tabled(rename = "Timestamp")]
    timestamp: u64,
    #[tabled(rename = "Block")]
    block: String,
    #[tabled(rename = "APY")]
    apy: String,
    #[tabled(rename = "TVL (USD)")]
    tvl_usd: String,
}

fn apy_line(label: &str, apy: &Apy) -> String {
    format!(
        "  {:<14}{} (base {}, reward {})\n",
        label,
        format_apy(apy.total_or_sum()),
        format_apy(apy.base),
        format_apy(apy.reward)
    )
}

fn yes_no(flag: Option<bool>) -> &'static str {
    match flag {
        Some(true) => "Yes",
        Some(false) => "No",
        None => MISSING,
    }
}

pub fn format_vaults_table(vaults: &[DetailedVault], interval: ApyInterval) -> String {
    if vaults.is_empty() {
        return "No vaults found.".to_string();
    }

    let rows: Vec<VaultRow> = vaults
        .iter()
        .map(|v| VaultRow {
            name: truncate(v.display_name(), 30),
            address: truncate_address(&v.address.to_string()),
            network: v.network_name().unwrap_or_else(|| MISSING.to_string()),
            protocol: or_missing(v.protocol_name()),
            asset: or_missing(v.asset_symbol()),
            apy: format_apy(v.total_apy_for(interval)),
            tvl_usd: format_usd(v.tvl_usd()),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::left()));

    table.to_string()
}

pub fn format_vault_detail(vault: &DetailedVault) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", "=".repeat(60)));
    output.push_str(&format!("{}\n", vault.display_name().bold()));
    output.push_str(&format!("{}\n\n", "=".repeat(60)));

    output.push_str(&format!("{}\n", "Basic Info".cyan().bold()));
    output.push_str(&format!("  Address:       {}\n", vault.address));
    output.push_str(&format!(
        "  Network:       {}\n",
        vault.network_name().as_deref().unwrap_or(MISSING)
    ));
    let protocol = vault.protocol.as_ref();
    output.push_str(&format!("  Protocol:      {}\n", or_missing(vault.protocol_name())));
    if let Some(product) = protocol.and_then(|p| p.product.as_deref()) {
        output.push_str(&format!("  Product:       {}\n", product));
    }
    if let Some(version) = protocol.and_then(|p| p.version.as_deref()) {
        output.push_str(&format!("  Version:       {}\n", version));
    }
    output.push_str(&format!("  Transactional: {}\n", yes_no(vault.is_transactional)));
    output.push_str(&format!("  Featured:      {}\n", yes_no(vault.is_app_featured)));
    if !vault.tags.is_empty() {
        output.push_str(&format!("  Tags:          {}\n", vault.tags.join(", ")));
    }
    output.push('\n');

    if let Some(asset) = &vault.asset {
        output.push_str(&format!("{}\n", "Asset".cyan().bold()));
        output.push_str(&format!("  Symbol:   {}\n", asset.symbol));
        if let Some(address) = asset.address {
            output.push_str(&format!("  Address:  {}\n", address));
        }
        if let Some(decimals) = asset.decimals {
            output.push_str(&format!("  Decimals: {}\n", decimals));
        }
        if let Some(price) = asset.asset_price_in_usd {
            output.push_str(&format!("  Price:    {}\n", format_usd(Some(price))));
        }
        output.push('\n');
    }

    output.push_str(&format!("{}\n", "Yield & Liquidity".cyan().bold()));
    match &vault.apy {
        Some(ApyField::ByInterval(by_interval)) => {
            for interval in ApyInterval::ALL {
                if let Some(apy) = by_interval.get(interval.as_str()) {
                    output.push_str(&apy_line(&format!("APY {}:", interval), apy));
                }
            }
        }
        Some(ApyField::Flat(apy)) => output.push_str(&apy_line("APY:", apy)),
        None => output.push_str(&format!("  {:<14}{}\n", "APY:", MISSING)),
    }
    output.push_str(&format!("  {:<14}{}\n", "TVL:", format_usd(vault.tvl_usd())));

    output
}

pub fn format_historical_table(points: &[HistoricalApyPoint]) -> String {
    if points.is_empty() {
        return "No historical data found.".to_string();
    }

    let rows: Vec<HistoricalRow> = points
        .iter()
        .map(|p| HistoricalRow {
            timestamp: p.timestamp,
            block: or_missing(p.block_number.as_deref()),
            apy: format_apy(p.total_apy()),
            tvl_usd: format_usd(p.tvl_usd()),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::left()));

    table.to_string()
}
