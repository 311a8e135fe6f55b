use alloc::vec::Vec;

use stylus_sdk::alloy_primitives::Address;

use autoexec_wallet_types::{CallForwarder, DeferredCall, PolicyStore, WalletError, WalletEvent};

use super::WalletEngine;

impl<S: PolicyStore> WalletEngine<'_, S> {
    /// Runs a staged call from the wallet once `block_number` reached its expiry block.
    ///
    /// Anyone may trigger. The blacklists are not consulted: the call was approved when
    /// its rule was set. The one-shot mark is written before the call goes out.
    pub fn auto_execute<F: CallForwarder>(
        &mut self,
        forwarder: &mut F,
        caller: Address,
        block_number: u64,
        call: &DeferredCall,
    ) -> Result<Vec<u8>, WalletError> {
        let mut staged = self.store.staged(call).ok_or(WalletError::NothingStaged)?;
        if !staged.is_eligible(block_number) {
            return Err(WalletError::NotYetEligible);
        }
        if staged.triggered {
            return Err(WalletError::AlreadyTriggered);
        }

        if !self.store.trigger_policy().rearms() {
            staged.triggered = true;
            self.store.put_staged(call, &staged);
        }
        self.record(WalletEvent::AutoExecuted {
            call: call.clone(),
            caller,
        });

        forwarder
            .forward(call.target, call.payload.as_slice())
            .map_err(|_| WalletError::CallExecutionFailed)
    }

    /// [`Self::auto_execute`] for the call most recently staged towards `target`.
    pub fn auto_execute_latest<F: CallForwarder>(
        &mut self,
        forwarder: &mut F,
        caller: Address,
        block_number: u64,
        target: Address,
    ) -> Result<Vec<u8>, WalletError> {
        let call = self
            .store
            .latest_staged_for(target)
            .ok_or(WalletError::NothingStaged)?;
        self.auto_execute(forwarder, caller, block_number, &call)
    }
}
