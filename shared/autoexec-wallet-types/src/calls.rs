use alloc::vec::Vec;

use alloy_primitives::{Address, FixedBytes};

/// Length of an ABI function selector.
pub const SELECTOR_LEN: usize = 4;

/// 4-byte function selector (first bytes of ABI call data).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Selector(pub [u8; SELECTOR_LEN]);

impl Selector {
    /// Selector carried by `data`, or `None` when the payload is shorter than 4 bytes.
    pub fn of(data: &[u8]) -> Option<Self> {
        let head = data.get(..SELECTOR_LEN)?;
        let mut sel = [0u8; SELECTOR_LEN];
        sel.copy_from_slice(head);
        Some(Self(sel))
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; SELECTOR_LEN]> for Selector {
    fn from(value: [u8; SELECTOR_LEN]) -> Self {
        Self(value)
    }
}

impl From<FixedBytes<SELECTOR_LEN>> for Selector {
    fn from(value: FixedBytes<SELECTOR_LEN>) -> Self {
        Self(value.0)
    }
}

impl From<Selector> for FixedBytes<SELECTOR_LEN> {
    fn from(value: Selector) -> Self {
        FixedBytes(value.0)
    }
}

/// Full ABI-encoded call payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CallData(pub Vec<u8>);

impl CallData {
    pub fn selector(&self) -> Option<Selector> {
        Selector::of(&self.0)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for CallData {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<&[u8]> for CallData {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

/// A call the wallet may make later on its own behalf.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeferredCall {
    pub target: Address,
    pub payload: CallData,
}

impl DeferredCall {
    pub fn new(target: Address, payload: impl Into<CallData>) -> Self {
        Self {
            target,
            payload: payload.into(),
        }
    }
}
