use alloc::{string::String, vec::Vec};

use alloy_sol_types::{Revert, SolError};

/// Every way a wallet operation can fail.
///
/// The reason strings are part of the external interface and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletError {
    /// Caller is not the owner.
    NotOwner,
    /// Caller is neither the owner nor an approved configurator.
    NotAllowed,
    /// Call data matches an exact-action rule.
    CallNotAllowed,
    /// Call selector matches a function rule.
    FunctionBanned,
    /// The forwarded call failed.
    CallExecutionFailed,
    /// Staged call triggered before its expiry block.
    NotYetEligible,
    /// No call is staged for the requested target/payload.
    NothingStaged,
    /// One-shot staged call already ran.
    AlreadyTriggered,
}

impl WalletError {
    pub fn reason(&self) -> &'static str {
        match self {
            WalletError::NotOwner => "!owner",
            WalletError::NotAllowed => "!allowed",
            WalletError::CallNotAllowed => "not allowed",
            WalletError::FunctionBanned => "THis func is banned",
            WalletError::CallExecutionFailed => "!success",
            WalletError::NotYetEligible => "expired",
            WalletError::NothingStaged => "!staged",
            WalletError::AlreadyTriggered => "triggered",
        }
    }

    /// Solidity `Error(string)` revert data carrying [`WalletError::reason`].
    pub fn revert_data(&self) -> Vec<u8> {
        Revert {
            reason: String::from(self.reason()),
        }
        .abi_encode()
    }
}

impl From<WalletError> for Vec<u8> {
    fn from(err: WalletError) -> Self {
        err.revert_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revert_data_is_solidity_error_string() {
        let data = WalletError::FunctionBanned.revert_data();
        assert_eq!(&data[..4], &[0x08, 0xc3, 0x79, 0xa0]);

        let decoded = Revert::abi_decode(&data, true).unwrap();
        assert_eq!(decoded.reason, "THis func is banned");
    }

    #[test]
    fn legacy_reason_strings_are_preserved() {
        assert_eq!(WalletError::NotAllowed.reason(), "!allowed");
        assert_eq!(WalletError::CallNotAllowed.reason(), "not allowed");
        assert_eq!(WalletError::NotOwner.reason(), "!owner");
        assert_eq!(WalletError::NotYetEligible.reason(), "expired");
        assert_eq!(WalletError::CallExecutionFailed.reason(), "!success");
    }
}
