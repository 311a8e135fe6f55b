//! Storage keys for the rule tables and the staged-call registry.
//!
//! Every key is `keccak256(address || bytes)`. The address is fixed-width, so distinct
//! `(address, bytes)` pairs never collide on the preimage.

use alloc::vec::Vec;

use stylus_sdk::alloy_primitives::{keccak256, Address, FixedBytes};

use autoexec_wallet_types::{DeferredCall, RuleKey};

fn address_scoped(address: Address, bytes: &[u8]) -> FixedBytes<32> {
    let mut buf = Vec::with_capacity(20 + bytes.len());
    buf.extend_from_slice(address.as_slice());
    buf.extend_from_slice(bytes);
    keccak256(buf)
}

/// Key of a rule inside its own table (action and function rules use separate mappings).
pub fn rule_key(key: &RuleKey) -> FixedBytes<32> {
    address_scoped(key.target(), key.matcher())
}

/// Key of a staged call in the deferred registry.
pub fn staged_call_key(call: &DeferredCall) -> FixedBytes<32> {
    address_scoped(call.target, call.payload.as_slice())
}
