//! Wallet state machine, independent of Stylus storage and hostio.
//!
//! Operations borrow a [`PolicyStore`], perform every check and state write, and only
//! then hand the outbound call to a [`CallForwarder`]. Events are journaled so the
//! caller can emit them once the engine is done with the store.

mod access;
mod deferred;
mod gateway;
mod policy;


use alloc::vec::Vec;

use autoexec_wallet_types::{PolicyStore, WalletEvent};

pub struct WalletEngine<'a, S: PolicyStore> {
    store: &'a mut S,
    events: Vec<WalletEvent>,
}

impl<'a, S: PolicyStore> WalletEngine<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self {
            store,
            events: Vec::new(),
        }
    }

    pub fn events(&self) -> &[WalletEvent] {
        &self.events
    }

    /// Releases the store and returns the journaled events.
    pub fn into_events(self) -> Vec<WalletEvent> {
        self.events
    }

    fn record(&mut self, event: WalletEvent) {
        self.events.push(event);
    }
}
