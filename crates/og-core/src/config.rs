use crate::ThisError;
use candid::{CandidType, Principal};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

pub const IC_HOST: &str = "https://ic0.app";
pub const LOCAL_HOST: &str = "http://localhost:4943";

///
/// ConfigError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum ConfigError {
    #[error("metadata canister id is not configured (CANISTER_ID_OG_BACKEND)")]
    MissingCanisterId,

    #[error("invalid metadata canister id '{value}': {reason}")]
    InvalidCanisterId { value: String, reason: String },

    #[error("unknown network '{0}', expected 'ic' or 'local'")]
    UnknownNetwork(String),
}

///
/// Network
/// Deployment target the gallery talks to.
///

#[derive(CandidType, Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Network {
    Ic,
    #[default]
    Local,
}

impl Network {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ic => "ic",
            Self::Local => "local",
        }
    }

    /// Parse a `DFX_NETWORK` value; an unset variable means a local replica.
    pub fn from_dfx_network(dfx_network: Option<&str>) -> Result<Self, ConfigError> {
        match dfx_network.map(str::trim) {
            Some("ic") => Ok(Self::Ic),
            Some("local" | "") | None => Ok(Self::Local),
            Some(other) => Err(ConfigError::UnknownNetwork(other.to_string())),
        }
    }

    #[must_use]
    pub const fn host(self) -> &'static str {
        match self {
            Self::Ic => IC_HOST,
            Self::Local => LOCAL_HOST,
        }
    }

    /// Non-mainnet replicas sign with a key the agent must fetch first.
    #[must_use]
    pub const fn requires_root_key(self) -> bool {
        matches!(self, Self::Local)
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// GalleryConfig
///

#[derive(CandidType, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GalleryConfig {
    pub network: Network,
    pub host: String,
    pub metadata_canister: Principal,
}

impl GalleryConfig {
    #[must_use]
    pub fn new(network: Network, metadata_canister: Principal) -> Self {
        Self {
            network,
            host: network.host().to_string(),
            metadata_canister,
        }
    }

    /// Config baked in at build time from `DFX_NETWORK` and
    /// `CANISTER_ID_OG_BACKEND`.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_parts(
            option_env!("DFX_NETWORK"),
            option_env!("CANISTER_ID_OG_BACKEND"),
        )
    }

    /// Build-time config with init-argument overrides applied.
    pub fn from_build_env_with(
        network_override: Option<&str>,
        canister_override: Option<Principal>,
    ) -> Result<Self, ConfigError> {
        Self::with_overrides(
            option_env!("DFX_NETWORK"),
            option_env!("CANISTER_ID_OG_BACKEND"),
            network_override,
            canister_override,
        )
    }

    pub fn from_parts(
        dfx_network: Option<&str>,
        canister_id: Option<&str>,
    ) -> Result<Self, ConfigError> {
        Self::with_overrides(dfx_network, canister_id, None, None)
    }

    /// Build-time values, each replaced by its override when present.
    pub fn with_overrides(
        dfx_network: Option<&str>,
        canister_id: Option<&str>,
        network_override: Option<&str>,
        canister_override: Option<Principal>,
    ) -> Result<Self, ConfigError> {
        let network = Network::from_dfx_network(network_override.or(dfx_network))?;
        let metadata_canister = match canister_override {
            Some(pid) => pid,
            None => parse_canister_id(canister_id)?,
        };

        Ok(Self::new(network, metadata_canister))
    }
}

fn parse_canister_id(value: Option<&str>) -> Result<Principal, ConfigError> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingCanisterId)?;

    Principal::from_text(value).map_err(|err| ConfigError::InvalidCanisterId {
        value: value.to_string(),
        reason: err.to_string(),
    })
}

///
/// TESTS
///
