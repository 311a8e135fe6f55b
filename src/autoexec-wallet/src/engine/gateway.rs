use alloc::vec::Vec;

use stylus_sdk::alloy_primitives::Address;

use autoexec_wallet_types::{CallData, CallForwarder, PolicyStore, RuleKey, Selector, WalletError};

use super::WalletEngine;

impl<S: PolicyStore> WalletEngine<'_, S> {
    /// Rejects `data` to `target` if any rule covers it. Exact rules are checked first.
    pub fn check_outbound(&self, target: Address, data: &[u8]) -> Result<(), WalletError> {
        let exact = RuleKey::Action {
            target,
            call_data: CallData::from(data),
        };
        if self.store.has_rule(&exact) {
            return Err(WalletError::CallNotAllowed);
        }

        // Payloads shorter than a selector can only be matched exactly.
        if let Some(selector) = Selector::of(data) {
            if self.store.has_rule(&RuleKey::Function { target, selector }) {
                return Err(WalletError::FunctionBanned);
            }
        }
        Ok(())
    }

    /// Policy-checked call from the wallet. Writes no state.
    pub fn make_transaction<F: CallForwarder>(
        &mut self,
        forwarder: &mut F,
        caller: Address,
        target: Address,
        data: &[u8],
    ) -> Result<Vec<u8>, WalletError> {
        self.ensure_allowed(caller)?;
        self.check_outbound(target, data)?;

        forwarder
            .forward(target, data)
            .map_err(|_| WalletError::CallExecutionFailed)
    }
}
