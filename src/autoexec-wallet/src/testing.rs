//! In-memory store and a small simulated chain for engine tests.
//!
//! `Harness::transact` snapshots state and restores it on error, mirroring the
//! all-or-nothing semantics of a reverted transaction.

use std::collections::{BTreeMap, BTreeSet};

use stylus_sdk::{
    alloy_primitives::{address, Address, U256},
    alloy_sol_types::{sol, SolCall},
};

use autoexec_wallet_types::{
    CallData, CallForwarder, DeferredCall, PolicyRule, PolicyStore, RuleKey, Selector, StagedCall,
    TriggerPolicy, WalletError, WalletEvent,
};

use crate::engine::WalletEngine;

pub const OWNER: Address = address!("1000000000000000000000000000000000000001");
pub const USER: Address = address!("1000000000000000000000000000000000000002");
pub const USER2: Address = address!("1000000000000000000000000000000000000003");
pub const WALLET: Address = address!("2000000000000000000000000000000000000001");
pub const COUNTER: Address = address!("3000000000000000000000000000000000000001");
pub const OTHER_COUNTER: Address = address!("3000000000000000000000000000000000000002");
pub const NFT: Address = address!("4000000000000000000000000000000000000001");
pub const GAME: Address = address!("5000000000000000000000000000000000000001");

sol! {
    interface ICounter {
        function incrementCount(uint256 value) external;
    }

    interface INft {
        function safeTransferFrom(address from, address to, uint256 id) external;
    }

    interface IGame {
        function Attack(uint256 value) external;
    }
}

pub fn increment_count(value: u64) -> Vec<u8> {
    ICounter::incrementCountCall {
        value: U256::from(value),
    }
    .abi_encode()
}

pub fn safe_transfer_from(from: Address, to: Address, id: u64) -> Vec<u8> {
    INft::safeTransferFromCall {
        from,
        to,
        id: U256::from(id),
    }
    .abi_encode()
}

pub fn attack(value: u64) -> Vec<u8> {
    IGame::AttackCall {
        value: U256::from(value),
    }
    .abi_encode()
}

pub fn safe_transfer_selector() -> Selector {
    Selector(INft::safeTransferFromCall::SELECTOR)
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    pub owner: Address,
    pub trigger: TriggerPolicy,
    pub configurators: BTreeSet<Address>,
    pub rules: BTreeMap<RuleKey, PolicyRule>,
    pub staged: BTreeMap<DeferredCall, StagedCall>,
    /// Staged calls per target, in staging order.
    pub history: BTreeMap<Address, Vec<DeferredCall>>,
}

impl MemoryStore {
    pub fn new(owner: Address, trigger: TriggerPolicy) -> Self {
        Self {
            owner,
            trigger,
            ..Self::default()
        }
    }
}

impl PolicyStore for MemoryStore {
    fn owner(&self) -> Address {
        self.owner
    }

    fn trigger_policy(&self) -> TriggerPolicy {
        self.trigger
    }

    fn is_configurator(&self, who: Address) -> bool {
        self.configurators.contains(&who)
    }

    fn set_configurator(&mut self, who: Address, approved: bool) {
        if approved {
            self.configurators.insert(who);
        } else {
            self.configurators.remove(&who);
        }
    }

    fn rule(&self, key: &RuleKey) -> Option<PolicyRule> {
        self.rules.get(key).cloned()
    }

    fn put_rule(&mut self, key: &RuleKey, rule: &PolicyRule) {
        self.rules.insert(key.clone(), rule.clone());
    }

    fn remove_rule(&mut self, key: &RuleKey) {
        self.rules.remove(key);
    }

    fn staged(&self, call: &DeferredCall) -> Option<StagedCall> {
        self.staged.get(call).cloned()
    }

    fn put_staged(&mut self, call: &DeferredCall, staged: &StagedCall) {
        self.staged.insert(call.clone(), staged.clone());
    }

    fn remove_staged(&mut self, call: &DeferredCall) {
        self.staged.remove(call);
        if let Some(history) = self.history.get_mut(&call.target) {
            history.retain(|c| c != call);
        }
    }

    fn note_staged(&mut self, call: &DeferredCall) {
        let history = self.history.entry(call.target).or_default();
        history.retain(|c| c != call);
        history.push(call.clone());
    }

    fn latest_staged_for(&self, target: Address) -> Option<DeferredCall> {
        self.history
            .get(&target)?
            .iter()
            .rev()
            .find(|call| self.staged.contains_key(*call))
            .cloned()
    }
}

/// Counter, NFT and game contracts as seen from the wallet.
#[derive(Clone, Debug, Default)]
pub struct MockChain {
    pub counts: BTreeMap<Address, U256>,
    pub nft_owners: BTreeMap<U256, Address>,
    pub attacks: u64,
    pub calls: Vec<(Address, Vec<u8>)>,
}

impl MockChain {
    pub fn count(&self, counter: Address) -> U256 {
        self.counts.get(&counter).copied().unwrap_or_default()
    }

    pub fn mint(&mut self, to: Address, id: u64) {
        self.nft_owners.insert(U256::from(id), to);
    }

    pub fn nft_balance(&self, holder: Address) -> usize {
        self.nft_owners.values().filter(|o| **o == holder).count()
    }
}

impl CallForwarder for MockChain {
    fn forward(&mut self, target: Address, data: &[u8]) -> Result<Vec<u8>, Vec<u8>> {
        self.calls.push((target, data.to_vec()));
        let sender = WALLET;

        if target == COUNTER || target == OTHER_COUNTER {
            let call = ICounter::incrementCountCall::abi_decode(data, true)
                .map_err(|_| b"bad call".to_vec())?;
            *self.counts.entry(target).or_default() += call.value;
            return Ok(Vec::new());
        }
        if target == NFT {
            let call = INft::safeTransferFromCall::abi_decode(data, true)
                .map_err(|_| b"bad call".to_vec())?;
            if call.from != sender || self.nft_owners.get(&call.id) != Some(&call.from) {
                return Err(b"ERC721: caller is not token owner".to_vec());
            }
            self.nft_owners.insert(call.id, call.to);
            return Ok(Vec::new());
        }
        if target == GAME {
            IGame::AttackCall::abi_decode(data, true).map_err(|_| b"bad call".to_vec())?;
            if self.nft_balance(sender) == 0 {
                return Err(b"no nft".to_vec());
            }
            self.attacks += 1;
            return Ok(Vec::new());
        }
        Err(Vec::new())
    }
}

/// Wallet state plus simulated chain, driven one transaction at a time.
pub struct Harness {
    pub store: MemoryStore,
    pub chain: MockChain,
    pub block: u64,
    /// Events of the last successful transaction.
    pub events: Vec<WalletEvent>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_trigger(TriggerPolicy::OneShot)
    }

    pub fn with_trigger(trigger: TriggerPolicy) -> Self {
        Self {
            store: MemoryStore::new(OWNER, trigger),
            chain: MockChain::default(),
            block: 1,
            events: Vec::new(),
        }
    }

    pub fn mine(&mut self, blocks: u64) {
        self.block += blocks;
    }

    pub fn transact<T>(
        &mut self,
        op: impl FnOnce(&mut WalletEngine<'_, MemoryStore>, &mut MockChain, u64) -> Result<T, WalletError>,
    ) -> Result<T, WalletError> {
        let store_before = self.store.clone();
        let chain_before = self.chain.clone();
        let block = self.block;

        let result = {
            let mut engine = WalletEngine::new(&mut self.store);
            op(&mut engine, &mut self.chain, block).map(|out| (out, engine.into_events()))
        };
        self.block += 1;

        match result {
            Ok((out, events)) => {
                self.events = events;
                Ok(out)
            }
            Err(err) => {
                self.store = store_before;
                self.chain = chain_before;
                self.events.clear();
                Err(err)
            }
        }
    }

    pub fn approve(&mut self, caller: Address, delegate: Address) -> Result<(), WalletError> {
        self.transact(|engine, _, _| engine.approve_for_configure(caller, delegate))
    }

    pub fn set_action(
        &mut self,
        caller: Address,
        target: Address,
        data: Vec<u8>,
        expiry_block: u64,
        auto: DeferredCall,
    ) -> Result<(), WalletError> {
        self.transact(|engine, _, _| {
            engine.set_blacklisted_action(caller, target, CallData(data), U256::from(expiry_block), auto)
        })
    }

    pub fn set_function(
        &mut self,
        caller: Address,
        target: Address,
        selector: Selector,
        expiry_block: u64,
        auto: DeferredCall,
    ) -> Result<(), WalletError> {
        self.transact(|engine, _, _| {
            engine.set_blacklisted_function(caller, target, selector, U256::from(expiry_block), auto)
        })
    }

    pub fn make_transaction(
        &mut self,
        caller: Address,
        target: Address,
        data: &[u8],
    ) -> Result<Vec<u8>, WalletError> {
        self.transact(|engine, chain, _| engine.make_transaction(chain, caller, target, data))
    }

    pub fn auto_execute(
        &mut self,
        caller: Address,
        call: &DeferredCall,
    ) -> Result<Vec<u8>, WalletError> {
        self.transact(|engine, chain, block| engine.auto_execute(chain, caller, block, call))
    }
}
