//! Contract bindings for the watched token.
//!
//! The interface is fixed for the lifetime of the process and generated with
//! alloy's `sol!` macro. Only `balanceOf` is called by the poller; the rest of
//! the WETH9 surface is kept so call data and logs can be decoded against the
//! full published interface.

pub mod token;
