//! Transaction commands: build one transaction, or rank and build in one go.

use anyhow::{bail, Result};
use tracing::info;
use vaults_rs_api::{ClientConfig, TransactionAction};
use vaults_rs_strategy::{
    compare_options, select_deposit_options, RankedOption, TransactionBuilder, TransactionIntent,
    TransactionOutcome, VaultTarget,
};

use super::{connect, emit};
use crate::cli::{BestDepositArgs, OutputFormat, TxArgs};
use crate::output::{format_transaction, format_transaction_failure};

/// Print a built descriptor, or print the failure and exit non-zero.
fn report(outcome: TransactionOutcome, format: OutputFormat) -> Result<()> {
    match outcome {
        TransactionOutcome::Built(descriptor) => {
            emit(format, &descriptor, || format_transaction(&descriptor))
        }
        TransactionOutcome::Failed(failure) => {
            emit(format, &failure, || format_transaction_failure(&failure))?;
            bail!("{}: {}", failure.message, failure.error)
        }
    }
}

pub async fn run_tx(args: &TxArgs, config: &ClientConfig, format: OutputFormat) -> Result<()> {
    let client = connect(config)?;

    let target = VaultTarget {
        network: args.network.clone(),
        address: args.vault,
    };
    let mut intent = TransactionIntent::new(args.action, args.user, target)
        .asset_address(args.asset)
        .simulate(args.simulate)
        .all(args.all);
    if let Some(amount) = &args.amount {
        intent = intent.amount(amount);
    }

    let outcome = TransactionBuilder::new(&client).build(&intent).await?;
    report(outcome, format)
}

pub async fn run_best_deposit(
    args: &BestDepositArgs,
    config: &ClientConfig,
    format: OutputFormat,
) -> Result<()> {
    let filters = args.ranking.to_filters(&args.filters)?;
    let ranking = args.ranking.to_ranking();
    let client = connect(config)?;

    let ranked = select_deposit_options(&client, args.user, &filters, &ranking).await?;
    let mut candidates: Vec<&RankedOption> = ranked.values().flatten().collect();
    candidates.sort_by(|a, b| compare_options(&a.option, &b.option, ranking.apy_interval));

    if candidates.is_empty() {
        bail!("No deposit options available for {}", args.user);
    }
    let Some(chosen) = candidates.get(args.rank as usize - 1) else {
        bail!(
            "Only {} deposit options available, cannot pick rank {}",
            candidates.len(),
            args.rank
        );
    };
    info!(
        "Depositing {} {} into {} ({})",
        args.amount,
        chosen.asset.symbol,
        chosen.option.display_name(),
        chosen.option.address
    );

    let intent = TransactionIntent::from_option(TransactionAction::Deposit, args.user, chosen)?
        .amount(&args.amount)
        .simulate(args.simulate);
    let outcome = TransactionBuilder::new(&client).build(&intent).await?;
    report(outcome, format)
}
