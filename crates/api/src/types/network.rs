//! Network identifiers and the fixed short-name ↔ chain-id table.
//!
//! The API accepts a network either by its short name (`"mainnet"`) or as a CAIP-2
//! string (`"eip155:1"`). [`NetworkRef`] keeps whichever surface form the caller or
//! the remote used; [`Network`] is the canonical identity both forms resolve to.

use std::fmt;
use std::str::FromStr;

use alloy_chains::NamedChain;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ApiError, Result};

/// Prefix of CAIP-2 identifiers for EVM chains.
pub const CAIP2_PREFIX: &str = "eip155:";

/// Every network the API knows, by the short name used in API paths.
///
/// Each short name and each chain id appears exactly once, so the table can be read
/// in both directions.
pub const NETWORKS: &[(&str, NamedChain)] = &[
    ("mainnet", NamedChain::Mainnet),
    ("base", NamedChain::Base),
    ("arbitrum", NamedChain::Arbitrum),
    ("optimism", NamedChain::Optimism),
    ("polygon", NamedChain::Polygon),
    ("gnosis", NamedChain::Gnosis),
    ("unichain", NamedChain::Unichain),
    ("celo", NamedChain::Celo),
    ("worldchain", NamedChain::World),
    ("berachain", NamedChain::Berachain),
    ("ink", NamedChain::Ink),
    ("bsc", NamedChain::BinanceSmartChain),
    ("avalanche", NamedChain::Avalanche),
    ("sonic", NamedChain::Sonic),
    ("linea", NamedChain::Linea),
    ("scroll", NamedChain::Scroll),
    ("hyperliquid", NamedChain::Hyperliquid),
];

/// Alternative spellings accepted on input. Never produced on output.
const ALIASES: &[(&str, &str)] = &[
    ("ethereum", "mainnet"),
    ("eth", "mainnet"),
    ("arb", "arbitrum"),
    ("op", "optimism"),
    ("matic", "polygon"),
];

/// Surface form a network identifier takes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NetworkForm {
    /// Short name such as `mainnet`.
    #[default]
    ShortName,
    /// CAIP-2 string such as `eip155:1`.
    Caip2,
}

/// A canonical network: one row of [`NETWORKS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Network {
    name: &'static str,
    chain: NamedChain,
}

impl Network {
    /// Look up a network by short name or alias (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_ascii_lowercase();
        let canonical = ALIASES
            .iter()
            .find(|(alias, _)| *alias == lower)
            .map_or(lower.as_str(), |(_, target)| *target);

        NETWORKS
            .iter()
            .find(|(n, _)| *n == canonical)
            .map(|(name, chain)| Network {
                name: *name,
                chain: *chain,
            })
    }

    /// Look up a network by numeric chain id.
    pub fn from_chain_id(chain_id: u64) -> Option<Self> {
        NETWORKS
            .iter()
            .find(|(_, chain)| u64::from(*chain) == chain_id)
            .map(|(name, chain)| Network {
                name: *name,
                chain: *chain,
            })
    }

    /// Short name used in API paths.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Numeric EIP-155 chain id.
    pub fn chain_id(&self) -> u64 {
        u64::from(self.chain)
    }

    /// The underlying named chain.
    pub fn chain(&self) -> NamedChain {
        self.chain
    }

    /// CAIP-2 identifier, e.g. `eip155:8453`.
    pub fn caip2(&self) -> String {
        format!("{}{}", CAIP2_PREFIX, self.chain_id())
    }

    /// Express this network in the given surface form.
    pub fn to_ref(&self, form: NetworkForm) -> NetworkRef {
        match form {
            NetworkForm::ShortName => NetworkRef::Name(self.name.to_string()),
            NetworkForm::Caip2 => NetworkRef::Caip2(self.chain_id()),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A network as written by a caller or returned by the remote.
///
/// Parsing never fails: an unknown name or chain id is only rejected when the
/// reference is [resolved](NetworkRef::resolve).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NetworkRef {
    /// Short name form (stored lower-cased).
    Name(String),
    /// CAIP-2 form, holding the numeric chain id.
    Caip2(u64),
}

impl NetworkRef {
    /// Parse either surface form.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        if let Some(id) = trimmed
            .strip_prefix(CAIP2_PREFIX)
            .and_then(|rest| rest.parse::<u64>().ok())
        {
            return NetworkRef::Caip2(id);
        }
        NetworkRef::Name(trimmed.to_ascii_lowercase())
    }

    /// Resolve to the canonical network through the fixed table.
    pub fn resolve(&self) -> Result<Network> {
        let found = match self {
            NetworkRef::Name(name) => Network::from_name(name),
            NetworkRef::Caip2(id) => Network::from_chain_id(*id),
        };
        found.ok_or_else(|| ApiError::UnknownNetwork(self.to_string()))
    }

    /// Resolve and re-express in `form`.
    ///
    /// Idempotent: normalizing an already normalized reference returns it unchanged.
    pub fn normalize(&self, form: NetworkForm) -> Result<NetworkRef> {
        Ok(self.resolve()?.to_ref(form))
    }

    /// The surface form this reference is written in.
    pub fn form(&self) -> NetworkForm {
        match self {
            NetworkRef::Name(_) => NetworkForm::ShortName,
            NetworkRef::Caip2(_) => NetworkForm::Caip2,
        }
    }
}

impl FromStr for NetworkRef {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(NetworkRef::parse(s))
    }
}

impl From<Network> for NetworkRef {
    fn from(network: Network) -> Self {
        network.to_ref(NetworkForm::ShortName)
    }
}

impl fmt::Display for NetworkRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkRef::Name(name) => f.write_str(name),
            NetworkRef::Caip2(id) => write!(f, "{}{}", CAIP2_PREFIX, id),
        }
    }
}

impl Serialize for NetworkRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NetworkRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(NetworkRef::parse(&s))
    }
}

/// Network as it appears inside remote records: either a bare string or an object.
///
/// The remote is inconsistent about which it sends, so both are accepted and
/// [`NetworkField::network_ref`] resolves either into one reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NetworkField {
    Plain(String),
    Detailed(NetworkInfo),
}

/// Object form of a network field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub chain_id: Option<u64>,
    #[serde(default)]
    pub network_caip: Option<String>,
}

impl NetworkField {
    /// Best reference the record carries: chain id, then CAIP-2 string, then name.
    pub fn network_ref(&self) -> Option<NetworkRef> {
        match self {
            NetworkField::Plain(s) if s.trim().is_empty() => None,
            NetworkField::Plain(s) => Some(NetworkRef::parse(s)),
            NetworkField::Detailed(info) => info
                .chain_id
                .map(NetworkRef::Caip2)
                .or_else(|| info.network_caip.as_deref().map(NetworkRef::parse))
                .or_else(|| {
                    info.name
                        .as_deref()
                        .filter(|n| !n.trim().is_empty())
                        .map(NetworkRef::parse)
                }),
        }
    }

    /// Human readable name, falling back to the canonical short name.
    pub fn display_name(&self) -> Option<String> {
        match self {
            NetworkField::Plain(s) => Some(s.clone()),
            NetworkField::Detailed(NetworkInfo { name: Some(name), .. }) => Some(name.clone()),
            NetworkField::Detailed(_) => self
                .network_ref()
                .and_then(|r| r.resolve().ok())
                .map(|n| n.name().to_string()),
        }
    }
}
