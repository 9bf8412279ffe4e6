//! In-memory gateway and record constructors for unit tests.

use std::sync::Mutex;

use alloy_primitives::Address;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use vaults_rs_api::{
    ApiError, Apy, ApyField, AssetBalance, DepositOption, DetailedVault, HistoricalApyPoint,
    HistoricalQuery, NetworkField, NetworkForm, NetworkRef, Page, PageRequest, Position, Protocol,
    RankingOptions, Result, TransactionDescriptor, TransactionRequest, UserBalance, VaultAsset,
    VaultFilters, VaultGateway,
};

/// A USDC-like balance on mainnet.
pub fn balance(symbol: &str, usd: Decimal) -> AssetBalance {
    AssetBalance {
        address: Some(Address::repeat_byte(0xa0)),
        symbol: symbol.to_string(),
        name: None,
        decimals: Some(6),
        balance_native: Some("1000000".to_string()),
        balance_usd: Some(usd),
        network: Some(NetworkField::Plain("mainnet".to_string())),
    }
}

/// A transactional mainnet vault for `symbol`.
pub fn option(byte: u8, symbol: &str, apy: Option<Decimal>) -> DepositOption {
    DepositOption {
        address: Address::repeat_byte(byte),
        name: Some(format!("{} vault", symbol)),
        network: Some(NetworkField::Plain("mainnet".to_string())),
        protocol: Some(Protocol {
            name: Some("aave".to_string()),
            ..Protocol::default()
        }),
        apy: apy.map(|total| {
            ApyField::Flat(Apy {
                total: Some(total),
                ..Apy::default()
            })
        }),
        tvl: None,
        asset: Some(VaultAsset {
            address: None,
            symbol: symbol.to_string(),
            name: None,
            decimals: Some(6),
            asset_price_in_usd: None,
        }),
        tags: vec![],
        is_transactional: Some(true),
        is_app_featured: None,
    }
}

fn unavailable() -> ApiError {
    ApiError::Remote {
        status_code: 503,
        body: "service unavailable".to_string(),
    }
}

/// Serves canned portfolio data and records every transaction request.
pub struct RecordingGateway {
    form: NetworkForm,
    idle_assets: Vec<AssetBalance>,
    deposit_options: Vec<UserBalance>,
    failing: Vec<Address>,
    empty: Vec<Address>,
    rejection: Option<(u16, String)>,
    requests: Mutex<Vec<TransactionRequest>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self {
            form: NetworkForm::ShortName,
            idle_assets: Vec::new(),
            deposit_options: Vec::new(),
            failing: Vec::new(),
            empty: Vec::new(),
            rejection: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_network_form(mut self, form: NetworkForm) -> Self {
        self.form = form;
        self
    }

    pub fn with_idle_assets(mut self, assets: Vec<AssetBalance>) -> Self {
        self.idle_assets = assets;
        self
    }

    pub fn with_deposit_options(mut self, balances: Vec<UserBalance>) -> Self {
        self.deposit_options = balances;
        self
    }

    /// Every call for `user` fails with a 503.
    pub fn failing_for(mut self, user: Address) -> Self {
        self.failing.push(user);
        self
    }

    /// Every call for `user` returns no data.
    pub fn empty_for(mut self, user: Address) -> Self {
        self.empty.push(user);
        self
    }

    /// Transaction requests are answered with this status and body.
    pub fn rejecting_transactions(mut self, status_code: u16, body: &str) -> Self {
        self.rejection = Some((status_code, body.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<TransactionRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn check_user(&self, user: Address) -> Result<bool> {
        if self.failing.contains(&user) {
            return Err(unavailable());
        }
        Ok(!self.empty.contains(&user))
    }
}

#[async_trait]
impl VaultGateway for RecordingGateway {
    fn network_form(&self) -> NetworkForm {
        self.form
    }

    async fn list_vaults(&self, _: &VaultFilters, _: PageRequest) -> Result<Page<DetailedVault>> {
        Ok(Page {
            items: Vec::new(),
            next_page: None,
        })
    }

    async fn get_vault(&self, _: &NetworkRef, _: Address) -> Result<DetailedVault> {
        Err(unavailable())
    }

    async fn get_historical_apy(
        &self,
        _: &NetworkRef,
        _: Address,
        _: &HistoricalQuery,
    ) -> Result<Page<HistoricalApyPoint>> {
        Err(unavailable())
    }

    async fn get_positions(&self, _: Address, _: &VaultFilters) -> Result<Vec<Position>> {
        Ok(Vec::new())
    }

    async fn get_deposit_options(
        &self,
        user: Address,
        _: &VaultFilters,
        _: &RankingOptions,
    ) -> Result<Vec<UserBalance>> {
        if self.check_user(user)? {
            Ok(self.deposit_options.clone())
        } else {
            Ok(Vec::new())
        }
    }

    async fn get_idle_assets(&self, user: Address, _: &VaultFilters) -> Result<Vec<AssetBalance>> {
        if self.check_user(user)? {
            Ok(self.idle_assets.clone())
        } else {
            Ok(Vec::new())
        }
    }

    async fn build_transaction(&self, request: &TransactionRequest) -> Result<TransactionDescriptor> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some((status_code, body)) = &self.rejection {
            return Err(ApiError::Remote {
                status_code: *status_code,
                body: body.clone(),
            });
        }
        let descriptor: Value = json!({
            "currentActionIndex": 0,
            "actions": [{ "name": request.action.as_path_segment(), "tx": { "to": request.vault.to_string() } }]
        });
        Ok(TransactionDescriptor(descriptor))
    }
}
