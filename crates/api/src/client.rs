//! HTTP client for the vaults API.

use std::env;

use alloy_primitives::Address;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::{ApiError, Result};
use crate::filters::{HistoricalQuery, Page, PageRequest, RankingOptions, VaultFilters};
use crate::gateway::VaultGateway;
use crate::types::{
    ApiPayload, AssetBalance, DepositOptionsResponse, DetailedVault, HistoricalApyPoint,
    NetworkForm, NetworkRef, Position, TransactionDescriptor, TransactionRequest, UserBalance,
};

/// Default vaults API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.vaults.fyi";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "VAULTS_FYI_API_KEY";

/// Environment variable overriding the API URL.
pub const API_URL_ENV: &str = "VAULTS_FYI_API_URL";

/// Header the API key is sent in.
const API_KEY_HEADER: &str = "x-api-key";

/// Query keys the portfolio endpoints understand.
const POSITION_KEYS: &[&str] = &["allowedNetworks", "disallowedNetworks", "allowedProtocols", "disallowedProtocols"];
const IDLE_ASSET_KEYS: &[&str] = &[
    "allowedNetworks",
    "disallowedNetworks",
    "allowedAssets",
    "disallowedAssets",
    "minUsdAssetValueThreshold",
];

/// Configuration for [`VaultsClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL.
    pub api_url: String,
    /// API key; required to construct a client.
    pub api_key: Option<String>,
    /// Network form the API expects in paths and filters.
    pub network_form: NetworkForm,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            network_form: NetworkForm::default(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `VAULTS_FYI_API_KEY` and `VAULTS_FYI_API_URL`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(key) = env::var(API_KEY_ENV) {
            config.api_key = Some(key);
        }
        if let Ok(url) = env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_url = url;
            }
        }
        config
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_network_form(mut self, form: NetworkForm) -> Self {
        self.network_form = form;
        self
    }
}

/// A response body with its status, decoded lazily.
struct RawResponse {
    status_code: u16,
    body: String,
}

impl RawResponse {
    fn payload(&self) -> std::result::Result<ApiPayload, String> {
        serde_json::from_str::<Value>(&self.body)
            .map(ApiPayload::from_value)
            .map_err(|e| e.to_string())
    }

    fn malformed(self, reason: &str) -> ApiError {
        warn!(
            "Malformed response body (status {}): {}",
            self.status_code, reason
        );
        ApiError::Remote {
            status_code: self.status_code,
            body: self.body,
        }
    }

    fn into_page<T: DeserializeOwned>(self) -> Result<Page<T>> {
        let decoded = self.payload().and_then(|payload| {
            let next_page = payload.next_page();
            payload
                .into_items()
                .map(|items| Page { items, next_page })
        });
        decoded.map_err(|reason| self.malformed(&reason))
    }

    fn into_items<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        self.into_page().map(|page| page.items)
    }

    fn into_object<T: DeserializeOwned>(self) -> Result<T> {
        let decoded = self.payload().and_then(ApiPayload::into_object);
        decoded.map_err(|reason| self.malformed(&reason))
    }

    fn into_payload(self) -> Result<ApiPayload> {
        match self.payload() {
            Ok(payload) => Ok(payload),
            Err(reason) => Err(self.malformed(&reason)),
        }
    }
}

/// HTTP implementation of [`VaultGateway`].
///
/// # Example
///
/// ```no_run
/// use vaults_rs_api::{ClientConfig, VaultGateway, VaultsClient, NetworkRef};
///
/// # async fn example() -> vaults_rs_api::Result<()> {
/// let client = VaultsClient::with_config(ClientConfig::new().with_api_key("my-key"))?;
/// let vault = client
///     .get_vault(&NetworkRef::parse("mainnet"), "0xBEEF01735c132Ada46AA9aA4c54623cAA92A64CB".parse().unwrap())
///     .await?;
/// println!("{}", vault.display_name());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct VaultsClient {
    http_client: Client,
    base_url: Url,
    api_key: String,
    network_form: NetworkForm,
}

impl VaultsClient {
    /// Create a client.
    ///
    /// # Errors
    ///
    /// - [`ApiError::MissingApiKey`] when no non-blank key is configured.
    /// - [`ApiError::InvalidUrl`] when the API URL does not parse.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ApiError::MissingApiKey)?;
        let base_url = Url::parse(config.api_url.trim())
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", config.api_url, e)))?;

        Ok(Self {
            http_client: Client::new(),
            base_url,
            api_key,
            network_form: config.network_form,
        })
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Express a caller-supplied network in this API's form.
    fn path_network(&self, network: &NetworkRef) -> Result<NetworkRef> {
        network.normalize(self.network_form)
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<RawResponse> {
        debug!("GET {} ({} query params)", path, query.len());
        let response = self
            .http_client
            .get(self.url(path))
            .header(API_KEY_HEADER, &self.api_key)
            .query(query)
            .send()
            .await?;

        let status_code = response.status().as_u16();
        let success = response.status().is_success();
        let body = response.text().await?;
        debug!("GET {} -> {} ({} bytes)", path, status_code, body.len());

        if !success {
            return Err(ApiError::Remote { status_code, body });
        }
        Ok(RawResponse { status_code, body })
    }

    fn scoped_query(&self, filters: &VaultFilters, keys: &[&str]) -> Vec<(&'static str, String)> {
        filters
            .to_query_in(self.network_form)
            .into_iter()
            .filter(|(k, _)| keys.contains(k))
            .collect()
    }

    /// Benchmark APYs per network.
    pub async fn get_benchmarks(&self, network: Option<&NetworkRef>) -> Result<ApiPayload> {
        let mut query = Vec::new();
        if let Some(network) = network {
            query.push(("network", self.path_network(network)?.to_string()));
        }
        self.get("/v1/benchmarks", &query).await?.into_payload()
    }

    /// Lifetime returns of a user's position in one vault.
    pub async fn get_vault_total_returns(
        &self,
        user: Address,
        network: &NetworkRef,
        vault: Address,
    ) -> Result<ApiPayload> {
        let path = format!(
            "/v2/portfolio/returns/{}/{}/{}",
            user,
            self.path_network(network)?,
            vault
        );
        self.get(&path, &[]).await?.into_payload()
    }

    /// Deposit and withdrawal events of a user in one vault.
    pub async fn get_vault_holder_events(
        &self,
        user: Address,
        network: &NetworkRef,
        vault: Address,
        page: PageRequest,
    ) -> Result<ApiPayload> {
        let path = format!(
            "/v2/portfolio/events/{}/{}/{}",
            user,
            self.path_network(network)?,
            vault
        );
        self.get(&path, &page.to_query()).await?.into_payload()
    }

    /// What the user could do in a vault right now: balances, allowances and
    /// available actions.
    pub async fn get_transactions_context(
        &self,
        user: Address,
        network: &NetworkRef,
        vault: Address,
    ) -> Result<ApiPayload> {
        let path = format!(
            "/v2/transactions/context/{}/{}/{}",
            user,
            self.path_network(network)?,
            vault
        );
        self.get(&path, &[]).await?.into_payload()
    }
}

#[async_trait]
impl VaultGateway for VaultsClient {
    fn network_form(&self) -> NetworkForm {
        self.network_form
    }

    async fn list_vaults(
        &self,
        filters: &VaultFilters,
        page: PageRequest,
    ) -> Result<Page<DetailedVault>> {
        let mut query = page.to_query();
        query.extend(filters.to_query_in(self.network_form));
        self.get("/v2/detailed-vaults", &query).await?.into_page()
    }

    async fn get_vault(&self, network: &NetworkRef, vault: Address) -> Result<DetailedVault> {
        let path = format!(
            "/v2/detailed-vaults/{}/{}",
            self.path_network(network)?,
            vault
        );
        self.get(&path, &[]).await?.into_object()
    }

    async fn get_historical_apy(
        &self,
        network: &NetworkRef,
        vault: Address,
        query: &HistoricalQuery,
    ) -> Result<Page<HistoricalApyPoint>> {
        query.validate()?;
        let path = format!(
            "/v2/historical/{}/{}",
            self.path_network(network)?,
            vault
        );
        self.get(&path, &query.to_query()).await?.into_page()
    }

    async fn get_positions(&self, user: Address, filters: &VaultFilters) -> Result<Vec<Position>> {
        let path = format!("/v2/portfolio/positions/{}", user);
        let query = self.scoped_query(filters, POSITION_KEYS);
        self.get(&path, &query).await?.into_items()
    }

    async fn get_deposit_options(
        &self,
        user: Address,
        filters: &VaultFilters,
        ranking: &RankingOptions,
    ) -> Result<Vec<UserBalance>> {
        let path = format!("/v2/portfolio/best-deposit-options/{}", user);
        let mut query = filters.to_query_in(self.network_form);
        query.extend(ranking.to_query());
        let response: DepositOptionsResponse = self.get(&path, &query).await?.into_object()?;
        debug!(
            "Deposit options for {}: {} assets, {} options",
            user,
            response.user_balances.len(),
            response.option_count()
        );
        Ok(response.user_balances)
    }

    async fn get_idle_assets(
        &self,
        user: Address,
        filters: &VaultFilters,
    ) -> Result<Vec<AssetBalance>> {
        let path = format!("/v2/portfolio/idle-assets/{}", user);
        let query = self.scoped_query(filters, IDLE_ASSET_KEYS);
        self.get(&path, &query).await?.into_items()
    }

    async fn build_transaction(
        &self,
        request: &TransactionRequest,
    ) -> Result<TransactionDescriptor> {
        let raw = self.get(&request.path(), &request.to_query()).await?;
        match raw.payload() {
            Ok(payload) => Ok(TransactionDescriptor(payload.into_value())),
            Err(reason) => Err(raw.malformed(&reason)),
        }
    }
}
