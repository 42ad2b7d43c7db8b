//! Balance poller.
//!
//! Every cycle reloads the settings and the address list, reconnects to the
//! chain, sweeps all addresses once and then sleeps. Setup failures end the
//! loop; everything that goes wrong for a single address is absorbed by the
//! sweep.

pub mod metrics;

use crate::metrics::Metrics;
use alloy_provider::RootProvider;
use balance::{Alert, AlertPolicy, ContractCaller, ProviderCaller, Report, Sweep, SweepConfig};
use client::ClientError;
use config::{load_addresses, AddressListError, Settings, SettingsError};
use notify::{Notifier, TelegramNotifier};
use std::{
    convert::Infallible,
    future::Future,
    path::PathBuf,
    time::{Duration, Instant},
};
use thiserror::Error;
use tokio::time::sleep;
use tracing::info;

/// Settings file, relative to the working directory.
pub const SETTINGS_FILE: &str = "settings.json";

/// Errors that stop the poller.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Addresses(#[from] AddressListError),

    #[error("failed to connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: ClientError,
    },
}

/// Source of the chain connection and the alert channel for a cycle.
pub trait Backend: Send + Sync {
    type Caller: ContractCaller;
    type Notifier: Notifier;

    /// Open a fresh chain connection.
    fn connect(
        &self,
        rpc_url: &str,
    ) -> impl Future<Output = Result<Self::Caller, ClientError>> + Send;

    /// Build the notifier from the credentials of the current settings.
    fn notifier(&self, settings: &Settings) -> Self::Notifier;
}

/// JSON-RPC provider and Telegram bot.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveBackend;

impl Backend for LiveBackend {
    type Caller = ProviderCaller<RootProvider>;
    type Notifier = TelegramNotifier;

    async fn connect(&self, rpc_url: &str) -> Result<Self::Caller, ClientError> {
        let provider = client::connect(rpc_url).await?;
        Ok(ProviderCaller::new(provider))
    }

    fn notifier(&self, settings: &Settings) -> Self::Notifier {
        TelegramNotifier::new(settings.telegram_bot_token.clone(), settings.telegram_chat_id)
    }
}

/// Build the sweep parameters from loaded settings.
pub fn sweep_config(settings: &Settings) -> Result<SweepConfig, SettingsError> {
    Ok(SweepConfig {
        contract: settings.weth_contract_address,
        policy: AlertPolicy {
            threshold: settings.alert.threshold_units()?,
            unit: settings.alert.unit()?,
            symbol: settings.alert.symbol.clone(),
        },
        address_delay: settings.schedule.address_delay(),
    })
}

/// Outcome of one completed cycle.
#[derive(Debug, Clone)]
pub struct CycleSummary {
    pub reports: Vec<Report>,
    /// Sleep before the next cycle, from the settings of this cycle
    pub next_cycle_in: Duration,
}

impl CycleSummary {
    pub fn checked(&self) -> usize {
        self.reports.len()
    }

    pub fn failed(&self) -> usize {
        self.reports.iter().filter(|r| r.outcome.is_failure()).count()
    }

    pub fn alerts_sent(&self) -> usize {
        self.count_alerts(|alert| matches!(alert, Alert::Sent))
    }

    pub fn alerts_failed(&self) -> usize {
        self.count_alerts(|alert| matches!(alert, Alert::Failed(_)))
    }

    fn count_alerts(&self, f: impl Fn(&Alert) -> bool) -> usize {
        self.reports
            .iter()
            .filter_map(|r| r.outcome.alert())
            .filter(|alert| f(alert))
            .count()
    }
}

pub struct Poller<B> {
    settings_path: PathBuf,
    backend: B,
    metrics: Metrics,
}

impl<B> Poller<B>
where
    B: Backend,
{
    pub fn new(settings_path: impl Into<PathBuf>, backend: B) -> Self {
        Self {
            settings_path: settings_path.into(),
            backend,
            metrics: Metrics::new(),
        }
    }

    /// Load settings and addresses, connect, and sweep once.
    pub async fn run_cycle(&self) -> Result<CycleSummary, SetupError> {
        let settings = Settings::from_file(&self.settings_path)?;
        let config = sweep_config(&settings)?;

        info!("Loaded settings:");
        info!("  RPC URL: {}", settings.base_rpc_url);
        info!("  Contract: {}", settings.weth_contract_address);
        info!(
            "  Threshold: {} {}",
            settings.alert.threshold, settings.alert.symbol
        );

        let addresses = load_addresses(&settings.addresses_file)?;
        info!(
            "Loaded {} addresses from {}",
            addresses.len(),
            settings.addresses_file.display()
        );

        let caller = self
            .backend
            .connect(&settings.base_rpc_url)
            .await
            .map_err(|source| SetupError::Connect {
                url: settings.base_rpc_url.clone(),
                source,
            })?;
        let notifier = self.backend.notifier(&settings);

        let sweep = Sweep::new(caller, notifier, config);
        let reports = sweep.run(&addresses).await;

        Ok(CycleSummary {
            reports,
            next_cycle_in: settings.schedule.cycle_interval(),
        })
    }

    /// Run cycles until a setup error occurs.
    pub async fn run(&self) -> Result<Infallible, SetupError> {
        loop {
            let started = Instant::now();

            let summary = match self.run_cycle().await {
                Ok(summary) => summary,
                Err(e) => {
                    self.metrics.record_cycle(false, started.elapsed());
                    return Err(e);
                }
            };

            self.metrics.record_sweep(&summary);
            self.metrics.record_cycle(true, started.elapsed());

            info!(
                checked = summary.checked(),
                failed = summary.failed(),
                alerts_sent = summary.alerts_sent(),
                alerts_failed = summary.alerts_failed(),
                "Sweep complete"
            );
            info!(
                "Waiting {:?} before checking balances again...",
                summary.next_cycle_in
            );

            sleep(summary.next_cycle_in).await;
        }
    }
}
