//! Byte layout of the rules staging a call, as kept in one storage `bytes` slot.
//!
//! Each entry is `kind (1) || target (20) || matcher_len (u32 BE) || matcher`, where
//! kind 0 is an exact-action rule and kind 1 a selector rule.

use alloc::vec::Vec;

use stylus_sdk::alloy_primitives::Address;

use autoexec_wallet_types::{CallData, RuleKey, Selector};

const KIND_ACTION: u8 = 0;
const KIND_FUNCTION: u8 = 1;

pub fn encode_stagers(stagers: &[RuleKey]) -> Vec<u8> {
    let mut buf = Vec::new();
    for key in stagers {
        let kind = match key {
            RuleKey::Action { .. } => KIND_ACTION,
            RuleKey::Function { .. } => KIND_FUNCTION,
        };
        let matcher = key.matcher();
        buf.push(kind);
        buf.extend_from_slice(key.target().as_slice());
        buf.extend_from_slice(&(matcher.len() as u32).to_be_bytes());
        buf.extend_from_slice(matcher);
    }
    buf
}

/// `None` if the bytes are truncated or carry an unknown kind.
pub fn decode_stagers(bytes: &[u8]) -> Option<Vec<RuleKey>> {
    let mut stagers = Vec::new();
    let mut i = 0usize;

    while i < bytes.len() {
        let kind = bytes[i];
        i += 1;
        let target = Address::from_slice(read(bytes, &mut i, 20)?);
        let mut len = [0u8; 4];
        len.copy_from_slice(read(bytes, &mut i, 4)?);
        let matcher = read(bytes, &mut i, u32::from_be_bytes(len) as usize)?;

        let key = match kind {
            KIND_ACTION => RuleKey::Action {
                target,
                call_data: CallData::from(matcher),
            },
            KIND_FUNCTION => RuleKey::Function {
                target,
                selector: Selector::of(matcher)?,
            },
            _ => return None,
        };
        stagers.push(key);
    }
    Some(stagers)
}

fn read<'a>(bytes: &'a [u8], i: &mut usize, len: usize) -> Option<&'a [u8]> {
    let out = bytes.get(*i..i.checked_add(len)?)?;
    *i += len;
    Some(out)
}
