//! One pass over the watched addresses.
//!
//! Addresses are checked strictly one after another. A failure for one address
//! is logged and recorded in its [`Report`]; it never stops the pass.

use crate::{Amount, BalanceMonitor, CheckError, ContractCaller};
use alloy_primitives::{utils::Unit, Address, U256};
use notify::Notifier;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// When and how to raise a balance alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertPolicy {
    /// Alert when the raw balance is strictly greater than this
    pub threshold: U256,
    /// Fixed-point unit of the token
    pub unit: Unit,
    /// Token label used in logs and messages
    pub symbol: String,
}

impl AlertPolicy {
    pub fn exceeds(&self, raw: U256) -> bool {
        raw > self.threshold
    }

    pub fn message(&self, address: &str, amount: &Amount) -> String {
        format!(
            "Alamat: {}, Saldo {}: {} {}",
            address, self.symbol, amount, self.symbol
        )
    }
}

/// Parameters of a sweep.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Token contract queried for every address
    pub contract: Address,
    pub policy: AlertPolicy,
    /// Pause after each address
    pub address_delay: Duration,
}

/// What happened to the alert of a checked address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    /// Balance at or below the threshold
    NotTriggered,
    Sent,
    /// Notifier error, logged and otherwise ignored
    Failed(String),
}

/// Result of checking one address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Checked { amount: Amount, alert: Alert },
    /// Rpc error or revert. Also used for a malformed address, in which case
    /// no call was sent.
    CallFailed(String),
    /// Return data was not a single `uint256`
    DecodeFailed(String),
}

impl Outcome {
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::CallFailed(_) | Self::DecodeFailed(_))
    }

    pub const fn alert(&self) -> Option<&Alert> {
        match self {
            Self::Checked { alert, .. } => Some(alert),
            _ => None,
        }
    }
}

/// Per-address entry of a sweep, in list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// The address exactly as listed
    pub address: String,
    pub outcome: Outcome,
}

/// Checks a list of holders against one token contract and alerts on large
/// balances.
pub struct Sweep<C, N> {
    monitor: BalanceMonitor<C>,
    notifier: N,
    config: SweepConfig,
}

impl<C, N> Sweep<C, N>
where
    C: ContractCaller,
    N: Notifier,
{
    pub const fn new(caller: C, notifier: N, config: SweepConfig) -> Self {
        Self {
            monitor: BalanceMonitor::new(caller),
            notifier,
            config,
        }
    }

    /// Check every address once, in order, and return one report per address.
    pub async fn run(&self, addresses: &[String]) -> Vec<Report> {
        let total = addresses.len();
        let mut reports = Vec::with_capacity(total);

        for (i, address) in addresses.iter().enumerate() {
            info!("Checking address {} of {}: {}", i + 1, total, address);

            let outcome = self.check(address).await;
            let checked = matches!(outcome, Outcome::Checked { .. });
            reports.push(Report {
                address: address.clone(),
                outcome,
            });

            // Failed addresses move on without the pause.
            if checked {
                sleep(self.config.address_delay).await;
            }
        }

        reports
    }

    /// Read the balance of a single address and alert if it is above the
    /// threshold.
    pub async fn check(&self, address: &str) -> Outcome {
        let holder = match address.parse::<Address>() {
            Ok(holder) => holder,
            Err(e) => {
                let err = CheckError::InvalidAddress {
                    input: address.to_string(),
                    reason: e.to_string(),
                };
                warn!("Failed to check balance for {}: {}", address, err);
                return Outcome::CallFailed(err.to_string());
            }
        };

        let balance = match self.monitor.query_erc20(self.config.contract, holder).await {
            Ok(balance) => balance,
            Err(err @ CheckError::Decode(_)) => {
                warn!("Failed to decode balance for {}: {}", address, err);
                return Outcome::DecodeFailed(err.to_string());
            }
            Err(err) => {
                warn!("Failed to check balance for {}: {}", address, err);
                return Outcome::CallFailed(err.to_string());
            }
        };

        let policy = &self.config.policy;
        let amount = Amount::new(balance.amount, policy.unit);
        info!(
            holder = %balance.holder,
            token = %balance.asset,
            "Address: {}, {} balance: {} {}",
            address,
            policy.symbol,
            amount,
            policy.symbol
        );

        let alert = if policy.exceeds(balance.amount) {
            self.alert(address, &amount).await
        } else {
            Alert::NotTriggered
        };

        Outcome::Checked { amount, alert }
    }

    async fn alert(&self, address: &str, amount: &Amount) -> Alert {
        let message = self.config.policy.message(address, amount);

        match self.notifier.send(&message).await {
            Ok(()) => {
                info!("Alert sent for {}", address);
                Alert::Sent
            }
            Err(e) => {
                warn!("Failed to send alert for {}: {:#}", address, e);
                Alert::Failed(format!("{:#}", e))
            }
        }
    }
}
