//! Poller settings loaded from `settings.json`.
//!
//! The file is re-read at the start of every poll cycle, so every accessor here
//! is cheap and side-effect free.

use alloy_primitives::{
    utils::{parse_units, Unit},
    Address, U256,
};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

/// Default alert threshold, in whole tokens.
pub const DEFAULT_THRESHOLD: &str = "0.002";

/// Default token decimals (WETH).
pub const DEFAULT_DECIMALS: u8 = 18;

/// Default token label used in logs and alerts.
pub const DEFAULT_SYMBOL: &str = "WETH";

/// Default pause between two address checks.
pub const DEFAULT_ADDRESS_DELAY_SECS: u64 = 1;

/// Default pause between two sweeps (12 hours).
pub const DEFAULT_CYCLE_INTERVAL_SECS: u64 = 12 * 60 * 60;

#[derive(Error, Debug)]
pub enum SettingsError {
    /// The settings file could not be read
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid JSON or misses a required field
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Token decimals outside of what a `uint256` can scale
    #[error("invalid token decimals: {0}")]
    Decimals(u8),

    /// Threshold is not a non-negative decimal amount
    #[error("invalid alert threshold {threshold:?}: {reason}")]
    Threshold { threshold: String, reason: String },
}

/// Top-level poller settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// JSON-RPC endpoint url
    pub base_rpc_url: String,

    /// Telegram bot token
    pub telegram_bot_token: String,

    /// Telegram chat receiving the alerts
    pub telegram_chat_id: i64,

    /// Token contract queried for balances
    pub weth_contract_address: Address,

    /// File holding the watched addresses, one per line
    pub addresses_file: PathBuf,

    #[serde(default)]
    pub alert: AlertSettings,

    #[serde(default)]
    pub schedule: ScheduleSettings,

    /// Port for the Prometheus exporter, read once at startup
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

impl Settings {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self =
            serde_json::from_str(&contents).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;

        Ok(settings)
    }

    /// Check the derived values so a bad file fails at load time instead of
    /// halfway through a sweep.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.alert.threshold_units()?;
        Ok(())
    }
}

/// Threshold alert parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertSettings {
    /// Balances strictly above this amount are reported
    pub threshold: String,

    /// Fixed-point scale of the token
    pub decimals: u8,

    /// Token label
    pub symbol: String,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD.to_string(),
            decimals: DEFAULT_DECIMALS,
            symbol: DEFAULT_SYMBOL.to_string(),
        }
    }
}

impl AlertSettings {
    /// Token unit matching `decimals`.
    pub fn unit(&self) -> Result<Unit, SettingsError> {
        Unit::new(self.decimals).ok_or(SettingsError::Decimals(self.decimals))
    }

    /// Threshold converted to raw token units.
    pub fn threshold_units(&self) -> Result<U256, SettingsError> {
        self.unit()?;

        let invalid = |reason: String| SettingsError::Threshold {
            threshold: self.threshold.clone(),
            reason,
        };

        let threshold = self.threshold.trim();
        if threshold.starts_with('-') {
            return Err(invalid("must not be negative".to_string()));
        }

        let raw = parse_units(threshold, self.decimals).map_err(|e| invalid(e.to_string()))?;
        Ok(raw.into())
    }
}

/// Sleep durations of the poll loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleSettings {
    /// Pause after each address check, throttles RPC calls
    pub address_delay_secs: u64,

    /// Pause between two sweeps
    pub cycle_interval_secs: u64,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            address_delay_secs: DEFAULT_ADDRESS_DELAY_SECS,
            cycle_interval_secs: DEFAULT_CYCLE_INTERVAL_SECS,
        }
    }
}

impl ScheduleSettings {
    pub const fn address_delay(&self) -> Duration {
        Duration::from_secs(self.address_delay_secs)
    }

    pub const fn cycle_interval(&self) -> Duration {
        Duration::from_secs(self.cycle_interval_secs)
    }
}
