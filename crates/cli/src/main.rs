//! Vaults CLI - query yield vaults, rank deposit options and build transactions.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::{
    run_benchmarks, run_best_deposit, run_deposit_options, run_events, run_historical,
    run_idle_assets, run_list, run_positions, run_returns, run_tx, run_tx_context, run_vault,
};

/// Logs go to stderr so stdout carries only command output.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = cli.client_config();
    let format = cli.format;

    match &cli.command {
        Commands::List(args) => run_list(args, &config, format).await?,
        Commands::Vault(args) => run_vault(args, &config, format).await?,
        Commands::Historical(args) => run_historical(args, &config, format).await?,
        Commands::Positions(args) => run_positions(args, &config, format).await?,
        Commands::IdleAssets(args) => run_idle_assets(args, &config, format).await?,
        Commands::DepositOptions(args) => run_deposit_options(args, &config, format).await?,
        Commands::Tx(args) => run_tx(args, &config, format).await?,
        Commands::BestDeposit(args) => run_best_deposit(args, &config, format).await?,
        Commands::Benchmarks(args) => run_benchmarks(args, &config, format).await?,
        Commands::Returns(args) => run_returns(args, &config, format).await?,
        Commands::Events(args) => run_events(args, &config, format).await?,
        Commands::TxContext(args) => run_tx_context(args, &config, format).await?,
    }

    Ok(())
}
