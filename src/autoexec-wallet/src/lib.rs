//! Stylus wallet that forwards calls through an owner-managed blacklist and can run
//! pre-approved calls on its own behalf once a block height has passed.

#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
#![cfg_attr(not(any(test, feature = "export-abi")), no_std)]

extern crate alloc;

pub mod constants;
pub mod engine;
pub mod errors;
pub mod forwarder;
pub mod interfaces;
pub mod utils;
pub mod wallet;

#[cfg(test)]
mod testing;

pub use wallet::Wallet;
