//! Vault listing, detail, historical and benchmark commands.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use tracing::{debug, info};
use vaults_rs_api::{ClientConfig, HistoricalQuery, PageRequest, VaultGateway};

use super::{connect, emit, emit_payload};
use crate::cli::{BenchmarksArgs, HistoricalArgs, ListArgs, OutputFormat, VaultArgs};
use crate::output::{format_historical_table, format_vault_detail, format_vaults_table};

pub async fn run_list(args: &ListArgs, config: &ClientConfig, format: OutputFormat) -> Result<()> {
    let filters = args.filters.to_filters()?;
    let client = connect(config)?;

    let mut request = PageRequest::new(args.page, args.per_page);
    let mut vaults = Vec::new();
    loop {
        let page = client.list_vaults(&filters, request).await?;
        debug!("Page {}: {} vaults", request.page, page.items.len());
        vaults.extend(page.items);
        match page.next_page {
            Some(next) if args.all_pages && next > request.page => {
                request = PageRequest::new(next, args.per_page);
            }
            _ => break,
        }
    }

    // Disallowed tags are not sent to the API
    vaults.retain(|v| filters.matches(v));
    info!("Listing {} vaults", vaults.len());

    emit(format, &vaults, || format_vaults_table(&vaults, args.interval))
}

pub async fn run_vault(args: &VaultArgs, config: &ClientConfig, format: OutputFormat) -> Result<()> {
    let client = connect(config)?;
    let vault = client.get_vault(&args.network, args.address).await?;
    emit(format, &vault, || format_vault_detail(&vault))
}

pub async fn run_historical(
    args: &HistoricalArgs,
    config: &ClientConfig,
    format: OutputFormat,
) -> Result<()> {
    let query = match args.days {
        Some(days) => {
            let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
            HistoricalQuery::last_days(now, days)
        }
        None => HistoricalQuery::new(),
    }
    .apy_interval(args.interval)
    .page(PageRequest::new(args.page, args.per_page));
    query.validate()?;

    let client = connect(config)?;
    let page = client
        .get_historical_apy(&args.network, args.address, &query)
        .await?;
    if let Some(next) = page.next_page {
        info!("More samples available from page {}", next);
    }

    emit(format, &page.items, || format_historical_table(&page.items))
}

pub async fn run_benchmarks(
    args: &BenchmarksArgs,
    config: &ClientConfig,
    format: OutputFormat,
) -> Result<()> {
    let client = connect(config)?;
    let payload = client.get_benchmarks(args.network.as_ref()).await?;
    emit_payload(format, &payload)
}
