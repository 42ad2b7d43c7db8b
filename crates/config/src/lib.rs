//! Configuration for the balance poller.
//!
//! This crate provides:
//! - `settings.json` loading and validation
//! - Alert and schedule defaults
//! - Address list file parsing

pub mod addresses;
pub mod settings;

pub use addresses::{load_addresses, parse_addresses, AddressListError};
pub use settings::{AlertSettings, ScheduleSettings, Settings, SettingsError};
