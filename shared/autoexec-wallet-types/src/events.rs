use alloy_primitives::{Address, U256};

use crate::{calls::DeferredCall, rules::RuleKey};

/// Observable effects of a wallet operation, in emission order.
///
/// The contract maps each variant onto its Solidity event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalletEvent {
    ApprovalGranted { delegate: Address },
    ApprovalRevoked { delegate: Address },
    PolicyRuleSet { key: RuleKey, expiry_block: U256 },
    PolicyRuleCleared { key: RuleKey },
    AutoExecuted { call: DeferredCall, caller: Address },
}
