use alloy_primitives::{Address, U256};

use autoexec_wallet_types::{CallData, DeferredCall, RuleKey, Selector};

use crate::encoder::selector;

/// A `setBlacklisted*` call under construction.
///
/// Starts with expiry block zero and a staged call to the zero address with no
/// payload; set both before encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleRequest {
    pub key: RuleKey,
    pub expiry_block: U256,
    pub auto_execute: DeferredCall,
}

impl RuleRequest {
    fn with_key(key: RuleKey) -> Self {
        Self {
            key,
            expiry_block: U256::ZERO,
            auto_execute: DeferredCall::new(Address::ZERO, CallData::default()),
        }
    }

    /// Exact-call ban on `(target, call_data)`.
    pub fn action(target: Address, call_data: impl Into<CallData>) -> Self {
        Self::with_key(RuleKey::Action {
            target,
            call_data: call_data.into(),
        })
    }

    /// Selector ban on `(target, selector)`.
    pub fn function(target: Address, selector: Selector) -> Self {
        Self::with_key(RuleKey::Function { target, selector })
    }

    /// Selector ban from a signature such as `safeTransferFrom(address,address,uint256)`.
    pub fn function_signature(target: Address, signature: &str) -> Self {
        Self::function(target, selector(signature))
    }

    pub fn expires_at(mut self, block: U256) -> Self {
        self.expiry_block = block;
        self
    }

    pub fn then_call(mut self, target: Address, payload: impl Into<CallData>) -> Self {
        self.auto_execute = DeferredCall::new(target, payload);
        self
    }
}
