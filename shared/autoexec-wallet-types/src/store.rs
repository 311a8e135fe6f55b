use alloc::vec::Vec;

use alloy_primitives::Address;

use crate::{
    calls::DeferredCall,
    rules::{PolicyRule, RuleKey, StagedCall, TriggerPolicy},
};

/// Wallet state: ownership, delegation, rules and staged calls.
///
/// Implemented over Stylus storage on-chain and over ordered maps off-chain.
pub trait PolicyStore {
    fn owner(&self) -> Address;

    fn trigger_policy(&self) -> TriggerPolicy;

    fn is_configurator(&self, who: Address) -> bool;

    fn set_configurator(&mut self, who: Address, approved: bool);

    fn rule(&self, key: &RuleKey) -> Option<PolicyRule>;

    /// Whether a rule exists for `key`. Hot path of every outbound call.
    fn has_rule(&self, key: &RuleKey) -> bool {
        self.rule(key).is_some()
    }

    fn put_rule(&mut self, key: &RuleKey, rule: &PolicyRule);

    fn remove_rule(&mut self, key: &RuleKey);

    fn staged(&self, call: &DeferredCall) -> Option<StagedCall>;

    fn put_staged(&mut self, call: &DeferredCall, staged: &StagedCall);

    /// Removes `call` from the registry and from its target's staging history.
    fn remove_staged(&mut self, call: &DeferredCall);

    /// Appends `call` to the staging history of `call.target`.
    fn note_staged(&mut self, call: &DeferredCall);

    /// Most recently staged call towards `target` that is still staged.
    fn latest_staged_for(&self, target: Address) -> Option<DeferredCall>;
}

/// Performs the wallet's outbound calls.
pub trait CallForwarder {
    /// Call `target` with `data` from the wallet. `Err` carries the callee's revert data.
    fn forward(&mut self, target: Address, data: &[u8]) -> Result<Vec<u8>, Vec<u8>>;
}
