//! Validated vault filters.

use std::collections::BTreeSet;

use rust_decimal::Decimal;

use crate::error::{ApiError, FilterDimension, Result};
use crate::types::network::{NetworkForm, NetworkRef};
use crate::types::vault::DetailedVault;

/// Anything [`VaultFilters`] can be evaluated against.
///
/// Every accessor may report a missing value; see [`VaultFilters::matches`] for how
/// missing values are treated.
pub trait FilterSubject {
    fn network(&self) -> Option<NetworkRef>;
    fn asset_symbol(&self) -> Option<&str>;
    fn protocol(&self) -> Option<&str>;
    fn tags(&self) -> &[String];
    fn tvl_usd(&self) -> Option<Decimal>;
    fn is_transactional(&self) -> Option<bool>;
    fn is_app_featured(&self) -> Option<bool>;
}

impl FilterSubject for DetailedVault {
    fn network(&self) -> Option<NetworkRef> {
        self.network_ref()
    }

    fn asset_symbol(&self) -> Option<&str> {
        DetailedVault::asset_symbol(self)
    }

    fn protocol(&self) -> Option<&str> {
        self.protocol_name()
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn tvl_usd(&self) -> Option<Decimal> {
        DetailedVault::tvl_usd(self)
    }

    fn is_transactional(&self) -> Option<bool> {
        self.is_transactional
    }

    fn is_app_featured(&self) -> Option<bool> {
        self.is_app_featured
    }
}

/// Canonical comparison key for a network value: the short name when the network
/// is known, otherwise the value as written.
fn network_key(value: &str) -> String {
    let reference = NetworkRef::parse(value);
    match reference.resolve() {
        Ok(network) => network.name().to_string(),
        Err(_) => reference.to_string(),
    }
}

fn asset_key(value: &str) -> String {
    value.trim().to_ascii_uppercase()
}

fn lower_key(value: &str) -> String {
    value.trim().to_ascii_lowercase()
}

fn normalized(values: &[String], key: fn(&str) -> String) -> BTreeSet<String> {
    values
        .iter()
        .filter(|v| !v.trim().is_empty())
        .map(|v| key(v))
        .collect()
}

fn check_conflict(
    dimension: FilterDimension,
    allowed: &BTreeSet<String>,
    disallowed: &BTreeSet<String>,
) -> Result<()> {
    let values: Vec<String> = allowed.intersection(disallowed).cloned().collect();
    if values.is_empty() {
        Ok(())
    } else {
        Err(ApiError::ConflictingFilter { dimension, values })
    }
}

/// Allow/deny check for one dimension. A missing value passes only when there is
/// no allow-list to satisfy.
fn dimension_passes(
    allowed: &BTreeSet<String>,
    disallowed: &BTreeSet<String>,
    value: Option<String>,
) -> bool {
    match value {
        Some(v) => (allowed.is_empty() || allowed.contains(&v)) && !disallowed.contains(&v),
        None => allowed.is_empty(),
    }
}

/// A validated set of vault filters.
///
/// Built through [`VaultFilters::builder`], which rejects contradictory input, so a
/// value of this type never holds a value in both the allow and deny set of a
/// dimension. All comparisons are case-insensitive: asset symbols are held
/// upper-cased, protocols and tags lower-cased, networks as canonical short names.
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use vaults_rs_api::VaultFilters;
///
/// let filters = VaultFilters::builder()
///     .allowed_networks(["mainnet", "eip155:8453"])
///     .allowed_assets(["usdc"])
///     .min_tvl(Decimal::from(1_000_000))
///     .build()
///     .unwrap();
///
/// assert!(filters.allowed_assets().contains("USDC"));
/// assert!(filters.allowed_networks().contains("base"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VaultFilters {
    allowed_networks: BTreeSet<String>,
    disallowed_networks: BTreeSet<String>,
    allowed_assets: BTreeSet<String>,
    disallowed_assets: BTreeSet<String>,
    allowed_protocols: BTreeSet<String>,
    disallowed_protocols: BTreeSet<String>,
    allowed_tags: BTreeSet<String>,
    disallowed_tags: BTreeSet<String>,
    min_tvl: Option<Decimal>,
    max_tvl: Option<Decimal>,
    only_transactional: bool,
    only_app_featured: bool,
    min_usd_asset_value_threshold: Option<Decimal>,
    max_vaults_per_asset: Option<usize>,
    always_return_assets: BTreeSet<String>,
}

impl VaultFilters {
    /// Start building a filter set.
    pub fn builder() -> VaultFiltersBuilder {
        VaultFiltersBuilder::default()
    }

    /// Filters that let everything through.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn allowed_networks(&self) -> &BTreeSet<String> {
        &self.allowed_networks
    }

    pub fn disallowed_networks(&self) -> &BTreeSet<String> {
        &self.disallowed_networks
    }

    pub fn allowed_assets(&self) -> &BTreeSet<String> {
        &self.allowed_assets
    }

    pub fn disallowed_assets(&self) -> &BTreeSet<String> {
        &self.disallowed_assets
    }

    pub fn allowed_protocols(&self) -> &BTreeSet<String> {
        &self.allowed_protocols
    }

    pub fn disallowed_protocols(&self) -> &BTreeSet<String> {
        &self.disallowed_protocols
    }

    pub fn allowed_tags(&self) -> &BTreeSet<String> {
        &self.allowed_tags
    }

    pub fn disallowed_tags(&self) -> &BTreeSet<String> {
        &self.disallowed_tags
    }

    pub fn min_tvl(&self) -> Option<Decimal> {
        self.min_tvl
    }

    pub fn max_tvl(&self) -> Option<Decimal> {
        self.max_tvl
    }

    pub fn only_transactional(&self) -> bool {
        self.only_transactional
    }

    pub fn only_app_featured(&self) -> bool {
        self.only_app_featured
    }

    pub fn min_usd_asset_value_threshold(&self) -> Option<Decimal> {
        self.min_usd_asset_value_threshold
    }

    pub fn max_vaults_per_asset(&self) -> Option<usize> {
        self.max_vaults_per_asset
    }

    pub fn always_return_assets(&self) -> &BTreeSet<String> {
        &self.always_return_assets
    }

    /// Whether `symbol` is listed as always-returned.
    pub fn is_always_returned(&self, symbol: &str) -> bool {
        self.always_return_assets.contains(&asset_key(symbol))
    }

    /// Asset-level allow/deny check on a held asset's symbol.
    pub fn allows_asset(&self, symbol: &str) -> bool {
        dimension_passes(
            &self.allowed_assets,
            &self.disallowed_assets,
            Some(asset_key(symbol)),
        )
    }

    /// Whether the asset symbol is explicitly disallowed.
    pub fn denies_asset(&self, symbol: &str) -> bool {
        self.disallowed_assets.contains(&asset_key(symbol))
    }

    /// Whether a USD value clears the minimum value threshold (inclusive).
    pub fn meets_value_floor(&self, usd_value: Decimal) -> bool {
        self.min_usd_asset_value_threshold
            .is_none_or(|threshold| usd_value >= threshold)
    }

    /// Whether `candidate` satisfies every filter.
    ///
    /// For each dimension the value must be in the allow-set (when it is non-empty)
    /// and not in the deny-set. A candidate missing a value fails any dimension with
    /// a non-empty allow-set. Missing TVL fails when either bound is set, and a
    /// missing flag fails `only_transactional` / `only_app_featured`.
    pub fn matches<S: FilterSubject + ?Sized>(&self, candidate: &S) -> bool {
        self.matches_inner(candidate, true)
    }

    /// Like [`matches`](Self::matches) but ignoring the asset allow-set.
    ///
    /// Used for options of always-returned assets, which are kept even when not
    /// in the asset allow-list. The asset deny-set still applies.
    pub fn matches_always_returned<S: FilterSubject + ?Sized>(&self, candidate: &S) -> bool {
        self.matches_inner(candidate, false)
    }

    fn matches_inner<S: FilterSubject + ?Sized>(&self, candidate: &S, check_asset_allow: bool) -> bool {
        let network = candidate.network().map(|r| match r.resolve() {
            Ok(network) => network.name().to_string(),
            Err(_) => r.to_string(),
        });
        if !dimension_passes(&self.allowed_networks, &self.disallowed_networks, network) {
            return false;
        }

        let asset = candidate.asset_symbol().map(asset_key);
        let asset_ok = if check_asset_allow {
            dimension_passes(&self.allowed_assets, &self.disallowed_assets, asset)
        } else {
            asset.is_none_or(|a| !self.disallowed_assets.contains(&a))
        };
        if !asset_ok {
            return false;
        }

        let protocol = candidate.protocol().map(lower_key);
        if !dimension_passes(&self.allowed_protocols, &self.disallowed_protocols, protocol) {
            return false;
        }

        if !self.tags_pass(candidate.tags()) {
            return false;
        }

        if self.min_tvl.is_some() || self.max_tvl.is_some() {
            let Some(tvl) = candidate.tvl_usd() else {
                return false;
            };
            if self.min_tvl.is_some_and(|min| tvl < min) || self.max_tvl.is_some_and(|max| tvl > max) {
                return false;
            }
        }

        if self.only_transactional && candidate.is_transactional() != Some(true) {
            return false;
        }
        if self.only_app_featured && candidate.is_app_featured() != Some(true) {
            return false;
        }

        true
    }

    fn tags_pass(&self, tags: &[String]) -> bool {
        let tags: BTreeSet<String> = tags.iter().map(|t| lower_key(t)).collect();
        if !self.allowed_tags.is_empty() && self.allowed_tags.is_disjoint(&tags) {
            return false;
        }
        self.disallowed_tags.is_disjoint(&tags)
    }

    /// Query pairs with networks in short-name form.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        self.to_query_in(NetworkForm::ShortName)
    }

    /// Query pairs with networks expressed in `form`.
    ///
    /// Multi-valued filters repeat their key once per value. Disallowed tags have
    /// no remote parameter and are only applied by [`matches`](Self::matches).
    pub fn to_query_in(&self, form: NetworkForm) -> Vec<(&'static str, String)> {
        let network_value = |name: &String| match NetworkRef::parse(name).normalize(form) {
            Ok(r) => r.to_string(),
            Err(_) => name.clone(),
        };

        let mut query = Vec::new();
        query.extend(self.allowed_networks.iter().map(|n| ("allowedNetworks", network_value(n))));
        query.extend(self.disallowed_networks.iter().map(|n| ("disallowedNetworks", network_value(n))));
        query.extend(self.allowed_assets.iter().map(|a| ("allowedAssets", a.clone())));
        query.extend(self.disallowed_assets.iter().map(|a| ("disallowedAssets", a.clone())));
        query.extend(self.allowed_protocols.iter().map(|p| ("allowedProtocols", p.clone())));
        query.extend(self.disallowed_protocols.iter().map(|p| ("disallowedProtocols", p.clone())));
        if let Some(min) = self.min_tvl {
            query.push(("minTvl", min.normalize().to_string()));
        }
        if let Some(max) = self.max_tvl {
            query.push(("maxTvl", max.normalize().to_string()));
        }
        if self.only_transactional {
            query.push(("onlyTransactional", "true".to_string()));
        }
        if self.only_app_featured {
            query.push(("onlyAppFeatured", "true".to_string()));
        }
        query.extend(self.allowed_tags.iter().map(|t| ("tags", t.clone())));
        if let Some(threshold) = self.min_usd_asset_value_threshold {
            query.push(("minUsdAssetValueThreshold", threshold.normalize().to_string()));
        }
        query.extend(self.always_return_assets.iter().map(|a| ("alwaysReturnAssets", a.clone())));
        if let Some(max) = self.max_vaults_per_asset {
            query.push(("maxVaultsPerAsset", max.to_string()));
        }
        query
    }
}

/// Builder for [`VaultFilters`].
///
/// Setters for multi-valued filters extend the existing set, so they can be called
/// repeatedly.
#[derive(Debug, Clone, Default)]
pub struct VaultFiltersBuilder {
    allowed_networks: Vec<String>,
    disallowed_networks: Vec<String>,
    allowed_assets: Vec<String>,
    disallowed_assets: Vec<String>,
    allowed_protocols: Vec<String>,
    disallowed_protocols: Vec<String>,
    allowed_tags: Vec<String>,
    disallowed_tags: Vec<String>,
    min_tvl: Option<Decimal>,
    max_tvl: Option<Decimal>,
    only_transactional: bool,
    only_app_featured: bool,
    min_usd_asset_value_threshold: Option<Decimal>,
    max_vaults_per_asset: Option<usize>,
    always_return_assets: Vec<String>,
}

fn extend<I, S>(target: &mut Vec<String>, values: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    target.extend(values.into_iter().map(Into::into));
}

impl VaultFiltersBuilder {
    /// Allow only these networks, by short name or CAIP-2 id.
    pub fn allowed_networks<I, S>(mut self, networks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend(&mut self.allowed_networks, networks);
        self
    }

    pub fn disallowed_networks<I, S>(mut self, networks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend(&mut self.disallowed_networks, networks);
        self
    }

    /// Allow only these asset symbols.
    pub fn allowed_assets<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend(&mut self.allowed_assets, symbols);
        self
    }

    pub fn disallowed_assets<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend(&mut self.disallowed_assets, symbols);
        self
    }

    pub fn allowed_protocols<I, S>(mut self, protocols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend(&mut self.allowed_protocols, protocols);
        self
    }

    pub fn disallowed_protocols<I, S>(mut self, protocols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend(&mut self.disallowed_protocols, protocols);
        self
    }

    /// Require at least one of these tags.
    pub fn allowed_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend(&mut self.allowed_tags, tags);
        self
    }

    /// Reject vaults carrying any of these tags. Applied client-side only.
    pub fn disallowed_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend(&mut self.disallowed_tags, tags);
        self
    }

    /// Minimum TVL in USD (inclusive).
    pub fn min_tvl(mut self, usd: Decimal) -> Self {
        self.min_tvl = Some(usd);
        self
    }

    /// Maximum TVL in USD (inclusive).
    pub fn max_tvl(mut self, usd: Decimal) -> Self {
        self.max_tvl = Some(usd);
        self
    }

    pub fn only_transactional(mut self, only: bool) -> Self {
        self.only_transactional = only;
        self
    }

    pub fn only_app_featured(mut self, only: bool) -> Self {
        self.only_app_featured = only;
        self
    }

    /// Drop held assets worth less than this many USD.
    pub fn min_usd_asset_value_threshold(mut self, usd: Decimal) -> Self {
        self.min_usd_asset_value_threshold = Some(usd);
        self
    }

    pub fn max_vaults_per_asset(mut self, max: usize) -> Self {
        self.max_vaults_per_asset = Some(max);
        self
    }

    /// Assets reported regardless of the value threshold and asset allow-list.
    pub fn always_return_assets<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend(&mut self.always_return_assets, symbols);
        self
    }

    /// Normalize and validate.
    ///
    /// # Errors
    ///
    /// - [`ApiError::ConflictingFilter`] when a value is both allowed and disallowed
    ///   on one dimension, or an always-returned asset is disallowed.
    /// - [`ApiError::InvalidRange`] when `min_tvl > max_tvl`.
    pub fn build(self) -> Result<VaultFilters> {
        let filters = VaultFilters {
            allowed_networks: normalized(&self.allowed_networks, network_key),
            disallowed_networks: normalized(&self.disallowed_networks, network_key),
            allowed_assets: normalized(&self.allowed_assets, asset_key),
            disallowed_assets: normalized(&self.disallowed_assets, asset_key),
            allowed_protocols: normalized(&self.allowed_protocols, lower_key),
            disallowed_protocols: normalized(&self.disallowed_protocols, lower_key),
            allowed_tags: normalized(&self.allowed_tags, lower_key),
            disallowed_tags: normalized(&self.disallowed_tags, lower_key),
            min_tvl: self.min_tvl,
            max_tvl: self.max_tvl,
            only_transactional: self.only_transactional,
            only_app_featured: self.only_app_featured,
            min_usd_asset_value_threshold: self.min_usd_asset_value_threshold,
            max_vaults_per_asset: self.max_vaults_per_asset,
            always_return_assets: normalized(&self.always_return_assets, asset_key),
        };

        check_conflict(
            FilterDimension::Network,
            &filters.allowed_networks,
            &filters.disallowed_networks,
        )?;
        check_conflict(
            FilterDimension::Asset,
            &filters.allowed_assets,
            &filters.disallowed_assets,
        )?;
        check_conflict(
            FilterDimension::Protocol,
            &filters.allowed_protocols,
            &filters.disallowed_protocols,
        )?;
        check_conflict(
            FilterDimension::Tag,
            &filters.allowed_tags,
            &filters.disallowed_tags,
        )?;
        check_conflict(
            FilterDimension::Asset,
            &filters.always_return_assets,
            &filters.disallowed_assets,
        )?;

        if let (Some(min), Some(max)) = (filters.min_tvl, filters.max_tvl) {
            if min > max {
                return Err(ApiError::InvalidRange { min, max });
            }
        }

        Ok(filters)
    }
}
