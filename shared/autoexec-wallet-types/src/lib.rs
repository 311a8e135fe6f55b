//! Types shared between the Stylus wallet and its off-chain tooling.
//!
//! Nothing here touches hostio: the wallet contract implements [`PolicyStore`] over
//! Stylus storage and [`CallForwarder`] over raw calls, tests use in-memory versions.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod calls;
pub mod errors;
pub mod events;
pub mod rules;
pub mod store;

pub use calls::{CallData, DeferredCall, Selector, SELECTOR_LEN};
pub use errors::WalletError;
pub use events::WalletEvent;
pub use rules::{PolicyRule, RuleKey, StagedCall, TriggerPolicy};
pub use store::{CallForwarder, PolicyStore};
