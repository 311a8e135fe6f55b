use stylus_sdk::alloy_primitives::Address;

use autoexec_wallet_types::{PolicyStore, WalletError, WalletEvent};

use super::WalletEngine;

impl<S: PolicyStore> WalletEngine<'_, S> {
    pub fn is_allowed_to_configure(&self, caller: Address) -> bool {
        caller == self.store.owner() || self.store.is_configurator(caller)
    }

    pub(super) fn ensure_owner(&self, caller: Address) -> Result<(), WalletError> {
        if caller != self.store.owner() {
            return Err(WalletError::NotOwner);
        }
        Ok(())
    }

    pub(super) fn ensure_allowed(&self, caller: Address) -> Result<(), WalletError> {
        if !self.is_allowed_to_configure(caller) {
            return Err(WalletError::NotAllowed);
        }
        Ok(())
    }

    /// Grants `delegate` the right to configure rules and send transactions.
    pub fn approve_for_configure(
        &mut self,
        caller: Address,
        delegate: Address,
    ) -> Result<(), WalletError> {
        self.ensure_owner(caller)?;
        self.store.set_configurator(delegate, true);
        self.record(WalletEvent::ApprovalGranted { delegate });
        Ok(())
    }

    /// Withdraws a grant. Revoking an address that was never approved emits nothing.
    pub fn revoke_for_configure(
        &mut self,
        caller: Address,
        delegate: Address,
    ) -> Result<(), WalletError> {
        self.ensure_owner(caller)?;
        if !self.store.is_configurator(delegate) {
            return Ok(());
        }
        self.store.set_configurator(delegate, false);
        self.record(WalletEvent::ApprovalRevoked { delegate });
        Ok(())
    }
}
