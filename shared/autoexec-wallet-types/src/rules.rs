use alloc::vec::Vec;

use alloy_primitives::{Address, U256};

use crate::calls::{CallData, DeferredCall, Selector};

/// Identity of a blacklist rule.
///
/// The two kinds live in independent tables: a call can be blocked by either.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleKey {
    /// Blocks calls to `target` whose call data is byte-identical to `call_data`.
    Action { target: Address, call_data: CallData },
    /// Blocks every call to `target` carrying `selector`, whatever the arguments.
    Function { target: Address, selector: Selector },
}

impl RuleKey {
    pub fn target(&self) -> Address {
        match self {
            RuleKey::Action { target, .. } | RuleKey::Function { target, .. } => *target,
        }
    }

    /// Matcher bytes as reported in events (full call data or the selector).
    pub fn matcher(&self) -> &[u8] {
        match self {
            RuleKey::Action { call_data, .. } => call_data.as_slice(),
            RuleKey::Function { selector, .. } => selector.as_slice(),
        }
    }
}

/// A blacklist entry together with the call it stages for later execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicyRule {
    /// Block height from which `auto_execute` may be triggered.
    pub expiry_block: U256,
    pub auto_execute: DeferredCall,
}

/// A deferred call waiting in the registry.
///
/// Several rules may stage the same call. It stays staged while any of them is active
/// and uses the expiry block of the most recent one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StagedCall {
    pub expiry_block: U256,
    pub triggered: bool,
    /// Rules staging the call, oldest first.
    pub stagers: Vec<RuleKey>,
}

impl StagedCall {
    pub fn is_eligible(&self, block_number: u64) -> bool {
        U256::from(block_number) >= self.expiry_block
    }

    pub fn is_staged_by(&self, key: &RuleKey) -> bool {
        self.stagers.contains(key)
    }

    /// Moves `key` to the most recent position.
    pub fn add_stager(&mut self, key: RuleKey) {
        self.stagers.retain(|k| *k != key);
        self.stagers.push(key);
    }

    /// Drops `key`; returns the rule now most recent, if any remains.
    pub fn remove_stager(&mut self, key: &RuleKey) -> Option<&RuleKey> {
        self.stagers.retain(|k| k != key);
        self.stagers.last()
    }
}

/// What happens to a staged call once it has been triggered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TriggerPolicy {
    /// The call runs once; later attempts fail.
    #[default]
    OneShot,
    /// The call stays armed and can be triggered again.
    Rearm,
}

impl TriggerPolicy {
    pub fn from_rearm_flag(rearm: bool) -> Self {
        if rearm {
            TriggerPolicy::Rearm
        } else {
            TriggerPolicy::OneShot
        }
    }

    pub fn rearms(self) -> bool {
        matches!(self, TriggerPolicy::Rearm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn staged_call_is_eligible_from_expiry_block() {
        let staged = StagedCall {
            expiry_block: U256::from(1000u64),
            triggered: false,
            stagers: vec![RuleKey::Function {
                target: Address::ZERO,
                selector: Selector([1, 2, 3, 4]),
            }],
        };
        assert!(!staged.is_eligible(999));
        assert!(staged.is_eligible(1000));
        assert!(staged.is_eligible(1001));
    }

    #[test]
    fn huge_expiry_is_never_eligible() {
        let staged = StagedCall {
            expiry_block: U256::MAX,
            triggered: false,
            stagers: vec![RuleKey::Action {
                target: Address::ZERO,
                call_data: CallData(vec![0xde, 0xad]),
            }],
        };
        assert!(!staged.is_eligible(u64::MAX));
    }

    #[test]
    fn matcher_reports_selector_or_full_payload() {
        let action = RuleKey::Action {
            target: Address::ZERO,
            call_data: CallData(vec![1, 2, 3, 4, 5]),
        };
        let function = RuleKey::Function {
            target: Address::ZERO,
            selector: Selector([1, 2, 3, 4]),
        };
        assert_eq!(action.matcher(), &[1, 2, 3, 4, 5]);
        assert_eq!(function.matcher(), &[1, 2, 3, 4]);
    }

    #[test]
    fn stagers_keep_most_recent_last() {
        let first = RuleKey::Function {
            target: Address::ZERO,
            selector: Selector([1, 2, 3, 4]),
        };
        let second = RuleKey::Action {
            target: Address::ZERO,
            call_data: CallData(vec![9]),
        };
        let mut staged = StagedCall {
            expiry_block: U256::ZERO,
            triggered: false,
            stagers: vec![first.clone()],
        };

        staged.add_stager(second.clone());
        staged.add_stager(first.clone());
        assert_eq!(staged.stagers, vec![second.clone(), first.clone()]);

        assert_eq!(staged.remove_stager(&first), Some(&second));
        assert!(!staged.is_staged_by(&first));
        assert_eq!(staged.remove_stager(&second), None);
    }
}
