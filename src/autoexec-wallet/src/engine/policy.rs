use alloc::vec::Vec;

use stylus_sdk::alloy_primitives::{Address, U256};

use autoexec_wallet_types::{
    CallData, DeferredCall, PolicyRule, PolicyStore, RuleKey, Selector, StagedCall, WalletError,
    WalletEvent,
};

use super::WalletEngine;

impl<S: PolicyStore> WalletEngine<'_, S> {
    /// Bans byte-identical `call_data` to `target` and stages `auto_execute`.
    pub fn set_blacklisted_action(
        &mut self,
        caller: Address,
        target: Address,
        call_data: CallData,
        expiry_block: U256,
        auto_execute: DeferredCall,
    ) -> Result<(), WalletError> {
        self.set_rule(
            caller,
            RuleKey::Action { target, call_data },
            PolicyRule {
                expiry_block,
                auto_execute,
            },
        )
    }

    /// Bans every call to `target` carrying `selector` and stages `auto_execute`.
    pub fn set_blacklisted_function(
        &mut self,
        caller: Address,
        target: Address,
        selector: Selector,
        expiry_block: U256,
        auto_execute: DeferredCall,
    ) -> Result<(), WalletError> {
        self.set_rule(
            caller,
            RuleKey::Function { target, selector },
            PolicyRule {
                expiry_block,
                auto_execute,
            },
        )
    }

    /// Upserts `rule` under `key`. An overwritten rule withdraws from its old staged call.
    pub fn set_rule(
        &mut self,
        caller: Address,
        key: RuleKey,
        rule: PolicyRule,
    ) -> Result<(), WalletError> {
        self.ensure_allowed(caller)?;

        if let Some(previous) = self.store.rule(&key) {
            self.unstage(&key, &previous.auto_execute);
        }

        self.store.put_rule(&key, &rule);
        self.stage(key.clone(), &rule);

        self.record(WalletEvent::PolicyRuleSet {
            key,
            expiry_block: rule.expiry_block,
        });
        Ok(())
    }

    /// Removes the rule under `key` and withdraws it from its staged call.
    ///
    /// Returns whether a rule existed.
    pub fn clear_rule(&mut self, caller: Address, key: RuleKey) -> Result<bool, WalletError> {
        self.ensure_allowed(caller)?;

        let Some(previous) = self.store.rule(&key) else {
            return Ok(false);
        };
        self.unstage(&key, &previous.auto_execute);
        self.store.remove_rule(&key);

        self.record(WalletEvent::PolicyRuleCleared { key });
        Ok(true)
    }

    /// Stages the rule's call, or joins `key` to the rules already staging it.
    fn stage(&mut self, key: RuleKey, rule: &PolicyRule) {
        let call = &rule.auto_execute;
        let mut staged = self.store.staged(call).unwrap_or(StagedCall {
            expiry_block: rule.expiry_block,
            triggered: false,
            stagers: Vec::new(),
        });
        staged.add_stager(key);
        staged.expiry_block = rule.expiry_block;
        staged.triggered = false;
        self.store.put_staged(call, &staged);
        self.store.note_staged(call);
    }

    /// Withdraws `key` from `call`. The call stays staged under the most recent
    /// remaining rule, with that rule's expiry block.
    fn unstage(&mut self, key: &RuleKey, call: &DeferredCall) {
        let Some(mut staged) = self.store.staged(call) else {
            return;
        };
        if !staged.is_staged_by(key) {
            return;
        }
        match staged.remove_stager(key).cloned() {
            None => self.store.remove_staged(call),
            Some(survivor) => {
                if let Some(rule) = self.store.rule(&survivor) {
                    staged.expiry_block = rule.expiry_block;
                }
                self.store.put_staged(call, &staged);
            }
        }
    }
}
