//! Shared utilities for the wallet.

pub mod keys;
pub mod stagers;
