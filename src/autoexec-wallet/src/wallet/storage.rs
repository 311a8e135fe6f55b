//! [`PolicyStore`] over the wallet's Stylus storage.

use stylus_sdk::{
    alloy_primitives::{Address, FixedBytes, U256},
    storage::{Erase, StorageMap},
};

use autoexec_wallet_types::{
    DeferredCall, PolicyRule, PolicyStore, RuleKey, StagedCall, TriggerPolicy,
};

use super::{StoredRule, Wallet};
use crate::utils::{
    keys::{rule_key, staged_call_key},
    stagers::{decode_stagers, encode_stagers},
};

type RuleTable = StorageMap<FixedBytes<32>, StoredRule>;

impl Wallet {
    fn rule_table(&self, key: &RuleKey) -> &RuleTable {
        match key {
            RuleKey::Action { .. } => &self.action_rules,
            RuleKey::Function { .. } => &self.function_rules,
        }
    }

    fn rule_table_mut(&mut self, key: &RuleKey) -> &mut RuleTable {
        match key {
            RuleKey::Action { .. } => &mut self.action_rules,
            RuleKey::Function { .. } => &mut self.function_rules,
        }
    }
}

impl PolicyStore for Wallet {
    fn owner(&self) -> Address {
        self.owner.get()
    }

    fn trigger_policy(&self) -> TriggerPolicy {
        TriggerPolicy::from_rearm_flag(self.rearm.get())
    }

    fn is_configurator(&self, who: Address) -> bool {
        self.configurators.get(who)
    }

    fn set_configurator(&mut self, who: Address, approved: bool) {
        self.configurators.insert(who, approved);
    }

    fn rule(&self, key: &RuleKey) -> Option<PolicyRule> {
        let stored = self.rule_table(key).getter(rule_key(key));
        if !stored.active.get() {
            return None;
        }
        Some(PolicyRule {
            expiry_block: stored.expiry_block.get(),
            auto_execute: DeferredCall::new(stored.auto_target.get(), stored.auto_payload.get_bytes()),
        })
    }

    fn has_rule(&self, key: &RuleKey) -> bool {
        self.rule_table(key).getter(rule_key(key)).active.get()
    }

    fn put_rule(&mut self, key: &RuleKey, rule: &PolicyRule) {
        let slot = rule_key(key);
        let mut stored = self.rule_table_mut(key).setter(slot);
        stored.active.set(true);
        stored.expiry_block.set(rule.expiry_block);
        stored.auto_target.set(rule.auto_execute.target);
        stored.auto_payload.set_bytes(rule.auto_execute.payload.as_slice());
    }

    fn remove_rule(&mut self, key: &RuleKey) {
        let slot = rule_key(key);
        let mut stored = self.rule_table_mut(key).setter(slot);
        stored.active.set(false);
        stored.expiry_block.set(U256::ZERO);
        stored.auto_target.set(Address::ZERO);
        stored.auto_payload.erase();
    }

    fn staged(&self, call: &DeferredCall) -> Option<StagedCall> {
        let stored = self.staged_calls.getter(staged_call_key(call));
        if !stored.active.get() {
            return None;
        }
        Some(StagedCall {
            expiry_block: stored.expiry_block.get(),
            triggered: stored.triggered.get(),
            stagers: decode_stagers(&stored.stagers.get_bytes())?,
        })
    }

    fn put_staged(&mut self, call: &DeferredCall, staged: &StagedCall) {
        let mut stored = self.staged_calls.setter(staged_call_key(call));
        stored.active.set(true);
        stored.triggered.set(staged.triggered);
        stored.expiry_block.set(staged.expiry_block);
        stored.target.set(call.target);
        stored.payload.set_bytes(call.payload.as_slice());
        stored.stagers.set_bytes(encode_stagers(&staged.stagers));
    }

    fn remove_staged(&mut self, call: &DeferredCall) {
        {
            let mut stored = self.staged_calls.setter(staged_call_key(call));
            stored.active.set(false);
            stored.triggered.set(false);
            stored.expiry_block.set(U256::ZERO);
            stored.target.set(Address::ZERO);
            stored.payload.erase();
            stored.stagers.erase();
        }

        // Entries further down are skipped on read; only the tail is dropped here.
        let mut history = self.staged_history.setter(call.target);
        while let Some(top) = history.len().checked_sub(1).and_then(|i| history.get(i)) {
            if self.staged_calls.getter(top).active.get() {
                break;
            }
            history.pop();
        }
    }

    fn note_staged(&mut self, call: &DeferredCall) {
        let key = staged_call_key(call);
        let mut history = self.staged_history.setter(call.target);
        let top = history.len().checked_sub(1).and_then(|i| history.get(i));
        if top != Some(key) {
            history.push(key);
        }
    }

    fn latest_staged_for(&self, target: Address) -> Option<DeferredCall> {
        let history = self.staged_history.getter(target);
        (0..history.len())
            .rev()
            .filter_map(|i| history.get(i))
            .map(|key| self.staged_calls.getter(key))
            .find(|stored| stored.active.get())
            .map(|stored| DeferredCall::new(stored.target.get(), stored.payload.get_bytes()))
    }
}
