//! Transaction construction.
//!
//! A [`TransactionIntent`] is what a caller wants to do; [`TransactionBuilder::prepare`]
//! validates it into a [`TransactionRequest`] without any I/O, and
//! [`TransactionBuilder::build`] sends that request through a [`VaultGateway`].
//! The returned descriptor is handed to an external signer as is.

use alloy_primitives::{Address, U256};
use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};
use vaults_rs_api::types::scalars::parse_base_units;
use vaults_rs_api::{
    ApiError, AssetBalance, NetworkRef, TransactionAction, TransactionDescriptor,
    TransactionRequest, VaultGateway,
};

use crate::error::{BuildError, Result};
use crate::ranker::RankedOption;

/// The vault a transaction targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultTarget {
    pub network: NetworkRef,
    pub address: Address,
}

/// What a caller wants to do, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionIntent {
    pub action: TransactionAction,
    pub user: Address,
    pub vault: VaultTarget,
    /// Integer amount in the asset's base units, exactly as given.
    pub amount: Option<String>,
    /// Asset to use; takes precedence over the balance's address.
    pub asset_address: Option<Address>,
    /// The held balance the intent is about, if known.
    pub balance: Option<AssetBalance>,
    pub simulate: bool,
    /// Redeem the whole position.
    pub all: bool,
}

impl TransactionIntent {
    pub fn new(action: TransactionAction, user: Address, vault: VaultTarget) -> Self {
        Self {
            action,
            user,
            vault,
            amount: None,
            asset_address: None,
            balance: None,
            simulate: false,
            all: false,
        }
    }

    /// Intent targeting a ranked deposit option, carrying the balance it was
    /// ranked for.
    ///
    /// # Errors
    ///
    /// [`BuildError::UnknownNetwork`] when the option names no network.
    pub fn from_option(action: TransactionAction, user: Address, ranked: &RankedOption) -> Result<Self> {
        let network = ranked
            .option
            .network_ref()
            .ok_or_else(|| BuildError::UnknownNetwork {
                network: "(none)".to_string(),
                vault: ranked.option.address,
            })?;

        let target = VaultTarget {
            network,
            address: ranked.option.address,
        };
        Ok(Self::new(action, user, target).balance(ranked.asset.clone()))
    }

    pub fn amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    pub fn asset_address(mut self, asset: Address) -> Self {
        self.asset_address = Some(asset);
        self
    }

    pub fn balance(mut self, balance: AssetBalance) -> Self {
        self.balance = Some(balance);
        self
    }

    pub fn simulate(mut self, simulate: bool) -> Self {
        self.simulate = simulate;
        self
    }

    pub fn all(mut self, all: bool) -> Self {
        self.all = all;
        self
    }
}

/// Parameters of a failed request, echoed back in [`TransactionFailure`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionContext {
    pub action: TransactionAction,
    pub user: Address,
    pub network: String,
    pub vault: Address,
    pub asset_address: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    pub simulate: bool,
}

impl From<&TransactionRequest> for TransactionContext {
    fn from(request: &TransactionRequest) -> Self {
        Self {
            action: request.action,
            user: request.user,
            network: request.network.to_string(),
            vault: request.vault,
            asset_address: request.asset_address,
            amount: request.amount.map(|a| a.to_string()),
            simulate: request.simulate,
        }
    }
}

/// Structured record of a transaction the remote refused to construct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFailure {
    /// Always `false`.
    pub success: bool,
    pub message: String,
    /// The remote's error, as text.
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    pub context: TransactionContext,
}

impl TransactionFailure {
    fn from_api_error(error: &ApiError, request: &TransactionRequest) -> Self {
        let status_code = match error {
            ApiError::Remote { status_code, .. } => Some(*status_code),
            _ => None,
        };
        Self {
            success: false,
            message: "Transaction generation failed".to_string(),
            error: error.to_string(),
            status_code,
            context: TransactionContext::from(request),
        }
    }
}

/// Result of one transaction construction attempt that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionOutcome {
    Built(TransactionDescriptor),
    Failed(TransactionFailure),
}

impl TransactionOutcome {
    pub fn is_built(&self) -> bool {
        matches!(self, TransactionOutcome::Built(_))
    }
}

fn invalid_amount(action: TransactionAction, raw: &str, reason: &str) -> BuildError {
    BuildError::InvalidAmount {
        action,
        amount: raw.to_string(),
        reason: reason.to_string(),
    }
}

/// Structural check only: digits, fits in a `U256`. Zero is accepted here.
fn validate_amount(action: TransactionAction, raw: &str) -> Result<U256> {
    if raw.is_empty() {
        return Err(invalid_amount(action, raw, "must not be empty"));
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid_amount(action, raw, "must be an integer in base units"));
    }
    parse_base_units(raw).ok_or_else(|| invalid_amount(action, raw, "does not fit in 256 bits"))
}

/// An amount that is actually sent: present and non-zero.
fn required_amount(action: TransactionAction, raw: Option<&str>, parsed: Option<U256>) -> Result<U256> {
    let value = parsed.ok_or(BuildError::MissingAmount { action })?;
    if value.is_zero() {
        return Err(invalid_amount(action, raw.unwrap_or_default(), "must be greater than zero"));
    }
    Ok(value)
}

/// Builds transactions through a gateway.
pub struct TransactionBuilder<'a, G: ?Sized> {
    gateway: &'a G,
}

impl<'a, G: VaultGateway + ?Sized> TransactionBuilder<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    /// Validate an intent into a request. No I/O.
    ///
    /// - The network is re-expressed in the gateway's form.
    /// - The asset is the explicit address, else the address of the balance when it
    ///   is on the vault's network.
    /// - The amount must be a base-unit integer that fits in 256 bits. It is
    ///   required, and must be non-zero, for deposit and for redeem without `all`;
    ///   for redeem with `all` and for claim-rewards it is checked when given and
    ///   then left out.
    ///
    /// # Errors
    ///
    /// Any [`BuildError`] variant; see their docs.
    pub fn prepare(&self, intent: &TransactionIntent) -> Result<TransactionRequest> {
        let action = intent.action;
        if intent.all && action != TransactionAction::Redeem {
            return Err(BuildError::AllRequiresRedeem { action });
        }

        let network = intent
            .vault
            .network
            .normalize(self.gateway.network_form())
            .map_err(|_| BuildError::UnknownNetwork {
                network: intent.vault.network.to_string(),
                vault: intent.vault.address,
            })?;

        let from_balance = intent
            .balance
            .as_ref()
            .filter(|b| b.network_ref().is_none() || b.is_on(&network))
            .and_then(|b| b.address);
        let asset_address = intent
            .asset_address
            .or(from_balance)
            .ok_or_else(|| BuildError::MissingAssetAddress {
                action,
                vault: intent.vault.address,
                network: network.to_string(),
                symbol: intent.balance.as_ref().map(AssetBalance::symbol_key),
            })?;

        let parsed = intent
            .amount
            .as_deref()
            .map(|raw| validate_amount(action, raw))
            .transpose()?;

        let raw = intent.amount.as_deref();
        let amount = match action {
            TransactionAction::Deposit => Some(required_amount(action, raw, parsed)?),
            TransactionAction::Redeem if !intent.all => Some(required_amount(action, raw, parsed)?),
            TransactionAction::Redeem | TransactionAction::ClaimRewards => None,
        };

        Ok(TransactionRequest {
            action,
            user: intent.user,
            network,
            vault: intent.vault.address,
            asset_address,
            amount,
            simulate: intent.simulate,
            all: intent.all,
        })
    }

    /// Validate, then ask the gateway for a transaction descriptor.
    ///
    /// A remote failure is not an `Err`: it comes back as
    /// [`TransactionOutcome::Failed`] with the request's parameters attached.
    ///
    /// # Errors
    ///
    /// Validation failures from [`prepare`](Self::prepare); the gateway is not
    /// called in that case.
    pub async fn build(&self, intent: &TransactionIntent) -> Result<TransactionOutcome> {
        let request = self.prepare(intent)?;
        debug!("Building {} transaction: {}", request.action, request.path());

        match self.gateway.build_transaction(&request).await {
            Ok(descriptor) => {
                info!(
                    "Built {} transaction for vault {} on {}",
                    request.action, request.vault, request.network
                );
                Ok(TransactionOutcome::Built(descriptor))
            }
            Err(e) => {
                warn!(
                    "Remote rejected {} transaction for vault {}: {}",
                    request.action, request.vault, e
                );
                Ok(TransactionOutcome::Failed(TransactionFailure::from_api_error(
                    &e, &request,
                )))
            }
        }
    }

    /// Build several transactions concurrently. Results keep the input order and
    /// one failure never stops the others.
    pub async fn build_all(&self, intents: &[TransactionIntent]) -> Vec<Result<TransactionOutcome>> {
        join_all(intents.iter().map(|intent| self.build(intent))).await
    }
}
