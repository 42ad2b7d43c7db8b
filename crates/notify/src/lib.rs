//! Alert delivery.
//!
//! The poller only needs one capability from a notification channel: push a
//! plain-text message. Delivery is best effort and never retried.

pub mod telegram;

pub use telegram::{NotifyError, TelegramNotifier};

use std::future::Future;

/// Trait for sending alert messages.
pub trait Notifier: Send + Sync {
    /// Send a single plain-text message.
    fn send(&self, message: &str) -> impl Future<Output = eyre::Result<()>> + Send;
}

impl<T> Notifier for &T
where
    T: Notifier,
{
    fn send(&self, message: &str) -> impl Future<Output = eyre::Result<()>> + Send {
        (**self).send(message)
    }
}
