//! Exact decimal rendering of raw token amounts.

use alloy_primitives::{
    utils::{ParseUnits, Unit},
    U256,
};
use std::fmt;

/// A raw token amount together with the token's fixed-point unit.
///
/// Displays as `raw / 10^decimals` without rounding: every digit of a
/// `uint256` survives, trailing fractional zeros are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount {
    raw: U256,
    unit: Unit,
}

impl Amount {
    pub const fn new(raw: U256, unit: Unit) -> Self {
        Self { raw, unit }
    }

    /// Amount of an 18 decimals token.
    pub const fn ether(raw: U256) -> Self {
        Self::new(raw, Unit::ETHER)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = ParseUnits::U256(self.raw).format_units(self.unit);
        let trimmed = if formatted.contains('.') {
            formatted.trim_end_matches('0').trim_end_matches('.')
        } else {
            formatted.as_str()
        };
        f.write_str(trimmed)
    }
}
