//! Error types for the vaults API client.

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

/// A dimension of [`VaultFilters`](crate::filters::VaultFilters) that has paired
/// allow/deny sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterDimension {
    Network,
    Asset,
    Protocol,
    Tag,
}

impl fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterDimension::Network => "network",
            FilterDimension::Asset => "asset",
            FilterDimension::Protocol => "protocol",
            FilterDimension::Tag => "tag",
        };
        f.write_str(name)
    }
}

/// Errors that can occur when using the vaults API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failed before a response was received.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote returned a non-2xx status or a body that does not match the
    /// expected shape.
    #[error("Remote error (status {status_code}): {body}")]
    Remote { status_code: u16, body: String },

    /// Failed to parse a value on our side of the boundary.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// No API key was configured.
    #[error("Missing API key: set VAULTS_FYI_API_KEY or configure one explicitly")]
    MissingApiKey,

    /// Invalid API base URL.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Invalid address format.
    #[error("Invalid address format: {0}")]
    InvalidAddress(String),

    /// The network is not present in the chain table.
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    /// Allow and deny sets overlap for one filter dimension.
    #[error("Conflicting {dimension} filter: {values:?} both allowed and disallowed")]
    ConflictingFilter {
        dimension: FilterDimension,
        values: Vec<String>,
    },

    /// A numeric range has its lower bound above its upper bound.
    #[error("Invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: Decimal, max: Decimal },
}

impl ApiError {
    /// Whether a caller-supplied retry policy could reasonably try again.
    ///
    /// The client itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Request(e) => e.is_timeout() || e.is_connect(),
            ApiError::Remote { status_code, .. } => *status_code == 429 || *status_code >= 500,
            _ => false,
        }
    }
}

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;
