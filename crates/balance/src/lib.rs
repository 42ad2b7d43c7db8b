//! Token balance checks for a list of holders.
//!
//! This crate provides the contract-call capability used to read balances,
//! exact conversion of raw token units into decimal amounts, and the
//! [`sweep::Sweep`] that walks the watched addresses and raises threshold
//! alerts.

pub mod amount;
pub mod caller;
pub mod monitor;
pub mod sweep;

pub use amount::Amount;
pub use caller::ProviderCaller;
pub use monitor::BalanceMonitor;
pub use sweep::{Alert, AlertPolicy, Outcome, Report, Sweep, SweepConfig};

use alloy_primitives::{Address, Bytes, U256};
use std::future::Future;
use thiserror::Error;

/// Represents a token balance read at the latest block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balance {
    /// The address holding the balance
    pub holder: Address,
    /// The token contract address
    pub asset: Address,
    /// The raw balance amount
    pub amount: U256,
}

/// Failure to read a single balance.
#[derive(Error, Debug)]
pub enum CheckError {
    /// The holder string is not a 20 byte hex address
    #[error("invalid address {input:?}: {reason}")]
    InvalidAddress { input: String, reason: String },

    /// The rpc call failed or the contract reverted
    #[error("contract call failed: {0}")]
    Call(String),

    /// The call succeeded but the return data is not a `uint256`
    #[error("failed to decode balance: {0}")]
    Decode(#[from] alloy_sol_types::Error),
}

/// Trait for read-only contract calls.
pub trait ContractCaller: Send + Sync {
    /// Execute `input` against `to` at the latest block and return the raw
    /// return data.
    fn call(
        &self,
        to: Address,
        input: Bytes,
    ) -> impl Future<Output = eyre::Result<Bytes>> + Send;
}

impl<T> ContractCaller for &T
where
    T: ContractCaller,
{
    fn call(
        &self,
        to: Address,
        input: Bytes,
    ) -> impl Future<Output = eyre::Result<Bytes>> + Send {
        (**self).call(to, input)
    }
}
