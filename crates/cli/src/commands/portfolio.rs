//! Portfolio commands: positions, idle assets, ranked deposit options and
//! per-vault user history.

use anyhow::{bail, Result};
use serde_json::{json, Value};
use tracing::warn;
use vaults_rs_api::{ClientConfig, DepositOptionsResponse, PageRequest, VaultGateway};
use vaults_rs_strategy::{into_user_balances, select_for_users, SelectionOutcome, UserSelection};

use super::{connect, emit, emit_payload};
use crate::cli::{DepositOptionsArgs, EventsArgs, OutputFormat, UserArgs, UserVaultArgs};
use crate::output::{format_deposit_options, format_idle_assets, format_positions};

pub async fn run_positions(args: &UserArgs, config: &ClientConfig, format: OutputFormat) -> Result<()> {
    let filters = args.filters.to_filters()?;
    let client = connect(config)?;
    let positions = client.get_positions(args.user, &filters).await?;
    emit(format, &positions, || format_positions(&positions))
}

pub async fn run_idle_assets(
    args: &UserArgs,
    config: &ClientConfig,
    format: OutputFormat,
) -> Result<()> {
    let filters = args.filters.to_filters()?;
    let client = connect(config)?;
    let assets = client.get_idle_assets(args.user, &filters).await?;
    emit(format, &assets, || format_idle_assets(&assets))
}

fn selection_json(selection: &UserSelection) -> Value {
    match &selection.outcome {
        SelectionOutcome::Ranked(ranked) => {
            let response = DepositOptionsResponse {
                user_balances: into_user_balances(ranked),
            };
            json!({ "user": selection.user, "status": "ranked", "result": response })
        }
        SelectionOutcome::NoData => json!({ "user": selection.user, "status": "noData" }),
        SelectionOutcome::Failed(e) => {
            json!({ "user": selection.user, "status": "failed", "error": e.to_string() })
        }
    }
}

pub async fn run_deposit_options(
    args: &DepositOptionsArgs,
    config: &ClientConfig,
    format: OutputFormat,
) -> Result<()> {
    let filters = args.ranking.to_filters(&args.filters)?;
    let ranking = args.ranking.to_ranking();
    let client = connect(config)?;

    let selections = select_for_users(&client, &args.users, &filters, &ranking).await;

    match format {
        OutputFormat::Table => {
            for selection in &selections {
                if args.users.len() > 1 {
                    println!("User: {}", selection.user);
                }
                match &selection.outcome {
                    SelectionOutcome::Ranked(ranked) => {
                        println!("{}", format_deposit_options(ranked, ranking.apy_interval));
                    }
                    SelectionOutcome::NoData => println!("No deposit options available."),
                    SelectionOutcome::Failed(e) => println!("Query failed: {}", e),
                }
            }
        }
        OutputFormat::Json => {
            let values: Vec<Value> = selections.iter().map(selection_json).collect();
            let json = if values.len() == 1 {
                serde_json::to_string_pretty(&values[0])?
            } else {
                serde_json::to_string_pretty(&values)?
            };
            println!("{}", json);
        }
    }

    let failed = selections.iter().filter(|s| s.outcome.is_failed()).count();
    if failed > 0 {
        warn!("{} of {} users failed", failed, selections.len());
        bail!("Deposit option query failed for {} of {} users", failed, selections.len());
    }
    Ok(())
}

pub async fn run_returns(
    args: &UserVaultArgs,
    config: &ClientConfig,
    format: OutputFormat,
) -> Result<()> {
    let client = connect(config)?;
    let payload = client
        .get_vault_total_returns(args.user, &args.network, args.vault)
        .await?;
    emit_payload(format, &payload)
}

pub async fn run_events(args: &EventsArgs, config: &ClientConfig, format: OutputFormat) -> Result<()> {
    let client = connect(config)?;
    let target = &args.target;
    let payload = client
        .get_vault_holder_events(
            target.user,
            &target.network,
            target.vault,
            PageRequest::new(args.page, args.per_page),
        )
        .await?;
    emit_payload(format, &payload)
}

pub async fn run_tx_context(
    args: &UserVaultArgs,
    config: &ClientConfig,
    format: OutputFormat,
) -> Result<()> {
    let client = connect(config)?;
    let payload = client
        .get_transactions_context(args.user, &args.network, args.vault)
        .await?;
    emit_payload(format, &payload)
}
