//! Stylus entrypoint of the auto-executing policy wallet.
//!
//! Design notes:
//! - The owner (and any configurator it approves) manages two blacklists: exact call data
//!   per target, and function selectors per target.
//! - Every rule stages one call the wallet will make on its own behalf once the rule's
//!   expiry block is reached. Anyone can trigger it; the blacklists do not apply to it.
//! - All checks and writes happen in [`WalletEngine`] before the single outbound call.

use alloc::{vec, vec::Vec};

use stylus_sdk::{
    abi::Bytes,
    alloy_primitives::{Address, FixedBytes, U256},
    prelude::*,
    stylus_core::log,
};

use autoexec_wallet_types::{
    CallData, DeferredCall, PolicyRule, PolicyStore, RuleKey, Selector, WalletError, WalletEvent,
};

mod storage;

use crate::{
    constants::ERC721_RECEIVED,
    engine::WalletEngine,
    forwarder::OnchainForwarder,
    interfaces::{AutoExecuted, ApprovalGranted, ApprovalRevoked, PolicyRuleCleared, PolicyRuleSet},
};

sol_storage! {
    #[entrypoint]
    pub struct Wallet {
        address owner;

        /// Staged calls stay armed after running when set.
        bool rearm;

        mapping(address => bool) configurators;

        /// keccak256(target || callData) => rule.
        mapping(bytes32 => StoredRule) action_rules;

        /// keccak256(target || selector) => rule.
        mapping(bytes32 => StoredRule) function_rules;

        /// keccak256(autoTarget || autoPayload) => staged call.
        mapping(bytes32 => StoredCall) staged_calls;

        /// Target => keys of calls staged towards it, in staging order.
        mapping(address => bytes32[]) staged_history;
    }

    pub struct StoredRule {
        bool active;
        uint256 expiry_block;
        address auto_target;
        bytes auto_payload;
    }

    pub struct StoredCall {
        bool active;
        bool triggered;
        uint256 expiry_block;
        address target;
        bytes payload;
        /// Rules staging the call, see `utils::stagers`.
        bytes stagers;
    }
}

#[public]
impl Wallet {
    #[constructor]
    pub fn constructor(&mut self, owner: Address, rearm: bool) {
        if owner == Address::ZERO {
            panic!("Invalid owner");
        }
        self.owner.set(owner);
        self.rearm.set(rearm);
    }

    pub fn owner(&self) -> Address {
        self.owner.get()
    }

    /// Whether staged calls can run more than once.
    pub fn rearms_after_trigger(&self) -> bool {
        self.rearm.get()
    }

    pub fn is_allowed_to_configure(&self, caller: Address) -> bool {
        caller == self.owner.get() || self.configurators.get(caller)
    }

    pub fn approve_for_configure(&mut self, delegate: Address) -> Result<(), WalletError> {
        let caller = self.vm().msg_sender();
        self.run(|engine| engine.approve_for_configure(caller, delegate))
    }

    pub fn revoke_for_configure(&mut self, delegate: Address) -> Result<(), WalletError> {
        let caller = self.vm().msg_sender();
        self.run(|engine| engine.revoke_for_configure(caller, delegate))
    }

    pub fn set_blacklisted_actions(
        &mut self,
        target: Address,
        data: Bytes,
        expiry_block: U256,
        auto_target: Address,
        auto_data: Bytes,
    ) -> Result<(), WalletError> {
        let caller = self.vm().msg_sender();
        self.run(|engine| {
            engine.set_blacklisted_action(
                caller,
                target,
                CallData(data.0),
                expiry_block,
                DeferredCall::new(auto_target, auto_data.0),
            )
        })
    }

    pub fn set_blacklisted_contract_function(
        &mut self,
        target: Address,
        selector: FixedBytes<4>,
        expiry_block: U256,
        auto_target: Address,
        auto_data: Bytes,
    ) -> Result<(), WalletError> {
        let caller = self.vm().msg_sender();
        self.run(|engine| {
            engine.set_blacklisted_function(
                caller,
                target,
                Selector::from(selector),
                expiry_block,
                DeferredCall::new(auto_target, auto_data.0),
            )
        })
    }

    pub fn clear_blacklisted_actions(
        &mut self,
        target: Address,
        data: Bytes,
    ) -> Result<(), WalletError> {
        let caller = self.vm().msg_sender();
        let key = RuleKey::Action {
            target,
            call_data: CallData(data.0),
        };
        self.run(|engine| engine.clear_rule(caller, key).map(|_| ()))
    }

    pub fn clear_blacklisted_contract_function(
        &mut self,
        target: Address,
        selector: FixedBytes<4>,
    ) -> Result<(), WalletError> {
        let caller = self.vm().msg_sender();
        let key = RuleKey::Function {
            target,
            selector: Selector::from(selector),
        };
        self.run(|engine| engine.clear_rule(caller, key).map(|_| ()))
    }

    /// `(active, expiryBlock, autoTarget, autoPayload)` of the exact rule on `(target, data)`.
    pub fn blacklisted_action(&self, target: Address, data: Bytes) -> (bool, U256, Address, Bytes) {
        Self::describe_rule(self.rule(&RuleKey::Action {
            target,
            call_data: CallData(data.0),
        }))
    }

    /// `(active, expiryBlock, autoTarget, autoPayload)` of the selector rule on `(target, selector)`.
    pub fn blacklisted_contract_function(
        &self,
        target: Address,
        selector: FixedBytes<4>,
    ) -> (bool, U256, Address, Bytes) {
        Self::describe_rule(self.rule(&RuleKey::Function {
            target,
            selector: Selector::from(selector),
        }))
    }

    /// `(staged, triggered, expiryBlock)` of the deferred call `(target, payload)`.
    pub fn staged_call(&self, target: Address, payload: Bytes) -> (bool, bool, U256) {
        match self.staged(&DeferredCall::new(target, payload.0)) {
            Some(staged) => (true, staged.triggered, staged.expiry_block),
            None => (false, false, U256::ZERO),
        }
    }

    pub fn make_transaction(&mut self, target: Address, data: Bytes) -> Result<Bytes, WalletError> {
        let caller = self.vm().msg_sender();
        self.run(|engine| engine.make_transaction(&mut OnchainForwarder, caller, target, &data.0))
            .map(Bytes::from)
    }

    pub fn auto_execute_to(&mut self, target: Address, data: Bytes) -> Result<Bytes, WalletError> {
        let caller = self.vm().msg_sender();
        let block_number = self.vm().block_number();
        let call = DeferredCall::new(target, data.0);
        self.run(|engine| engine.auto_execute(&mut OnchainForwarder, caller, block_number, &call))
            .map(Bytes::from)
    }

    /// `autoExecuteTo(address)`: triggers the call most recently staged towards `target`.
    #[selector(name = "autoExecuteTo")]
    pub fn auto_execute_latest(&mut self, target: Address) -> Result<Bytes, WalletError> {
        let caller = self.vm().msg_sender();
        let block_number = self.vm().block_number();
        self.run(|engine| {
            engine.auto_execute_latest(&mut OnchainForwarder, caller, block_number, target)
        })
        .map(Bytes::from)
    }

    /// Accepts ERC-721 tokens sent with `safeTransferFrom`.
    #[selector(name = "onERC721Received")]
    pub fn on_erc721_received(
        &mut self,
        _operator: Address,
        _from: Address,
        _token_id: U256,
        _data: Bytes,
    ) -> FixedBytes<4> {
        ERC721_RECEIVED
    }
}

impl Wallet {
    /// Runs one engine operation against storage, then emits what it journaled.
    fn run<T>(
        &mut self,
        op: impl FnOnce(&mut WalletEngine<'_, Self>) -> Result<T, WalletError>,
    ) -> Result<T, WalletError> {
        let mut engine = WalletEngine::new(self);
        let out = op(&mut engine)?;
        let events = engine.into_events();
        self.emit_all(events);
        Ok(out)
    }

    fn emit_all(&self, events: Vec<WalletEvent>) {
        for event in events {
            match event {
                WalletEvent::ApprovalGranted { delegate } => {
                    log(self.vm(), ApprovalGranted { delegate })
                }
                WalletEvent::ApprovalRevoked { delegate } => {
                    log(self.vm(), ApprovalRevoked { delegate })
                }
                WalletEvent::PolicyRuleSet { key, expiry_block } => log(
                    self.vm(),
                    PolicyRuleSet {
                        target: key.target(),
                        selectorOrData: key.matcher().to_vec().into(),
                        expiryBlock: expiry_block,
                    },
                ),
                WalletEvent::PolicyRuleCleared { key } => log(
                    self.vm(),
                    PolicyRuleCleared {
                        target: key.target(),
                        selectorOrData: key.matcher().to_vec().into(),
                    },
                ),
                WalletEvent::AutoExecuted { call, caller } => log(
                    self.vm(),
                    AutoExecuted {
                        target: call.target,
                        caller,
                        payload: call.payload.0.into(),
                    },
                ),
            }
        }
    }

    fn describe_rule(rule: Option<PolicyRule>) -> (bool, U256, Address, Bytes) {
        match rule {
            Some(rule) => (
                true,
                rule.expiry_block,
                rule.auto_execute.target,
                Bytes::from(rule.auto_execute.payload.0),
            ),
            None => (false, U256::ZERO, Address::ZERO, Bytes::from(Vec::new())),
        }
    }
}
