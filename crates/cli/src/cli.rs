//! CLI argument definitions using clap.

use alloy_primitives::Address;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use vaults_rs_api::{
    ApiError, ApyInterval, ClientConfig, NetworkForm, NetworkRef, RankingOptions,
    TransactionAction, VaultFilters, API_KEY_ENV, API_URL_ENV,
};

/// Vaults CLI - rank deposit options and build vault transactions
#[derive(Parser, Debug)]
#[command(name = "vaults")]
#[command(about = "CLI tool for querying yield vaults and building vault transactions", long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// API base URL
    #[arg(long, global = true, env = API_URL_ENV)]
    pub api_url: Option<String>,

    /// API key
    #[arg(long, global = true, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Send networks to the API as CAIP-2 ids instead of short names
    #[arg(long, global = true)]
    pub caip2: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Client configuration from the global flags.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new();
        if let Some(url) = &self.api_url {
            config = config.with_api_url(url.as_str());
        }
        if let Some(key) = &self.api_key {
            config = config.with_api_key(key.as_str());
        }
        if self.caip2 {
            config = config.with_network_form(NetworkForm::Caip2);
        }
        config
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List vaults matching the filters
    List(ListArgs),
    /// Show one vault in detail
    Vault(VaultArgs),
    /// Historical APY and TVL of one vault
    Historical(HistoricalArgs),
    /// A user's vault positions
    Positions(UserArgs),
    /// A user's idle (undeposited) assets
    IdleAssets(UserArgs),
    /// Best deposit options for a user's idle assets, ranked per asset
    DepositOptions(DepositOptionsArgs),
    /// Build a deposit, redeem or claim-rewards transaction
    Tx(TxArgs),
    /// Rank a user's deposit options and build a deposit into the chosen one
    BestDeposit(BestDepositArgs),
    /// Benchmark APYs
    Benchmarks(BenchmarksArgs),
    /// Lifetime returns of a user's position in one vault
    Returns(UserVaultArgs),
    /// A user's deposit and withdrawal events in one vault
    Events(EventsArgs),
    /// Balances, allowances and available actions of a user in one vault
    TxContext(UserVaultArgs),
}

/// Filters shared by the listing and portfolio commands.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Only these networks (short name or CAIP-2, repeatable or comma separated)
    #[arg(long = "network", value_delimiter = ',')]
    pub networks: Vec<String>,

    /// Exclude these networks
    #[arg(long = "exclude-network", value_delimiter = ',')]
    pub excluded_networks: Vec<String>,

    /// Only these asset symbols
    #[arg(long = "asset", value_delimiter = ',')]
    pub assets: Vec<String>,

    /// Exclude these asset symbols
    #[arg(long = "exclude-asset", value_delimiter = ',')]
    pub excluded_assets: Vec<String>,

    /// Only these protocols
    #[arg(long = "protocol", value_delimiter = ',')]
    pub protocols: Vec<String>,

    /// Exclude these protocols
    #[arg(long = "exclude-protocol", value_delimiter = ',')]
    pub excluded_protocols: Vec<String>,

    /// Only vaults carrying one of these tags
    #[arg(long = "tag", value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Exclude vaults carrying any of these tags
    #[arg(long = "exclude-tag", value_delimiter = ',')]
    pub excluded_tags: Vec<String>,

    /// Minimum TVL in USD (inclusive)
    #[arg(long)]
    pub min_tvl: Option<Decimal>,

    /// Maximum TVL in USD (inclusive)
    #[arg(long)]
    pub max_tvl: Option<Decimal>,

    /// Only vaults that support transactions through the API
    #[arg(long)]
    pub transactional: bool,

    /// Only editorially featured vaults
    #[arg(long)]
    pub featured: bool,
}

impl FilterArgs {
    pub fn builder(&self) -> vaults_rs_api::VaultFiltersBuilder {
        let mut builder = VaultFilters::builder()
            .allowed_networks(&self.networks)
            .disallowed_networks(&self.excluded_networks)
            .allowed_assets(&self.assets)
            .disallowed_assets(&self.excluded_assets)
            .allowed_protocols(&self.protocols)
            .disallowed_protocols(&self.excluded_protocols)
            .allowed_tags(&self.tags)
            .disallowed_tags(&self.excluded_tags)
            .only_transactional(self.transactional)
            .only_app_featured(self.featured);
        if let Some(min) = self.min_tvl {
            builder = builder.min_tvl(min);
        }
        if let Some(max) = self.max_tvl {
            builder = builder.max_tvl(max);
        }
        builder
    }

    pub fn to_filters(&self) -> Result<VaultFilters, ApiError> {
        self.builder().build()
    }
}

/// Options for ranking a user's deposit options.
#[derive(Args, Debug)]
pub struct RankingArgs {
    /// Ignore assets whose balance is worth less than this many USD
    #[arg(long)]
    pub min_usd_value: Option<Decimal>,

    /// Keep at most this many vaults per asset
    #[arg(long)]
    pub max_per_asset: Option<usize>,

    /// Assets always shown, whatever their balance
    #[arg(long = "always-return", value_delimiter = ',')]
    pub always_return: Vec<String>,

    /// Minimum total APY as a fraction (0.05 = 5%)
    #[arg(long)]
    pub min_apy: Option<Decimal>,

    /// APY window used for ranking
    #[arg(long, default_value = "7day")]
    pub interval: ApyInterval,
}

impl RankingArgs {
    pub fn to_filters(&self, filters: &FilterArgs) -> Result<VaultFilters, ApiError> {
        let mut builder = filters
            .builder()
            .always_return_assets(&self.always_return);
        if let Some(floor) = self.min_usd_value {
            builder = builder.min_usd_asset_value_threshold(floor);
        }
        if let Some(max) = self.max_per_asset {
            builder = builder.max_vaults_per_asset(max);
        }
        builder.build()
    }

    pub fn to_ranking(&self) -> RankingOptions {
        let ranking = RankingOptions::new().apy_interval(self.interval);
        match self.min_apy {
            Some(min_apy) => ranking.min_apy(min_apy),
            None => ranking,
        }
    }
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Page to fetch (0-based)
    #[arg(long, default_value = "0")]
    pub page: u32,

    /// Vaults per page
    #[arg(long, default_value = "50")]
    pub per_page: u32,

    /// Keep fetching until the last page
    #[arg(long)]
    pub all_pages: bool,

    /// APY window shown in the table
    #[arg(long, default_value = "7day")]
    pub interval: ApyInterval,
}

#[derive(Parser, Debug)]
pub struct VaultArgs {
    /// Network the vault is on (e.g. mainnet, base, eip155:8453)
    pub network: NetworkRef,

    /// Vault address
    pub address: Address,
}

#[derive(Parser, Debug)]
pub struct HistoricalArgs {
    /// Network the vault is on
    pub network: NetworkRef,

    /// Vault address
    pub address: Address,

    /// APY window of each sample
    #[arg(long, default_value = "7day")]
    pub interval: ApyInterval,

    /// Only samples from the last N days
    #[arg(long)]
    pub days: Option<u64>,

    /// Page to fetch (0-based)
    #[arg(long, default_value = "0")]
    pub page: u32,

    /// Samples per page
    #[arg(long, default_value = "50")]
    pub per_page: u32,
}

#[derive(Parser, Debug)]
pub struct UserArgs {
    /// User wallet address
    pub user: Address,

    #[command(flatten)]
    pub filters: FilterArgs,
}

#[derive(Parser, Debug)]
pub struct DepositOptionsArgs {
    /// User wallet addresses; each user is ranked independently
    #[arg(required = true, num_args = 1..)]
    pub users: Vec<Address>,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub ranking: RankingArgs,
}

#[derive(Parser, Debug)]
pub struct TxArgs {
    /// deposit, redeem or claim-rewards
    pub action: TransactionAction,

    /// User wallet address
    pub user: Address,

    /// Network the vault is on
    pub network: NetworkRef,

    /// Vault address
    pub vault: Address,

    /// Amount in the asset's base units (e.g. 1000000 for 1 USDC)
    #[arg(long)]
    pub amount: Option<String>,

    /// Address of the asset being deposited or redeemed
    #[arg(long)]
    pub asset: Address,

    /// Request a dry-run descriptor
    #[arg(long)]
    pub simulate: bool,

    /// Redeem the whole position (redeem only)
    #[arg(long)]
    pub all: bool,
}

#[derive(Parser, Debug)]
pub struct BestDepositArgs {
    /// User wallet address
    pub user: Address,

    /// Amount in the asset's base units
    #[arg(long)]
    pub amount: String,

    /// Which option to deposit into, counting from the best (1-based)
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub rank: u32,

    /// Request a dry-run descriptor
    #[arg(long)]
    pub simulate: bool,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub ranking: RankingArgs,
}

#[derive(Parser, Debug)]
pub struct UserVaultArgs {
    /// User wallet address
    pub user: Address,

    /// Network the vault is on
    pub network: NetworkRef,

    /// Vault address
    pub vault: Address,
}

#[derive(Parser, Debug)]
pub struct EventsArgs {
    #[command(flatten)]
    pub target: UserVaultArgs,

    /// Page to fetch (0-based)
    #[arg(long, default_value = "0")]
    pub page: u32,

    /// Events per page
    #[arg(long, default_value = "50")]
    pub per_page: u32,
}

#[derive(Parser, Debug)]
pub struct BenchmarksArgs {
    /// Only this network
    #[arg(long)]
    pub network: Option<NetworkRef>,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}
