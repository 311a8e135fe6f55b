//! Outbound calls made by the wallet.

use alloc::vec::Vec;

use stylus_sdk::{alloy_primitives::Address, call::RawCall};

use autoexec_wallet_types::CallForwarder;

/// Forwards calls with `CALL`, zero value and all remaining gas.
///
/// The wallet is the caller as seen by the target. Contracts built without the
/// `reentrant` feature make any callback into the wallet revert.
pub struct OnchainForwarder;

impl CallForwarder for OnchainForwarder {
    fn forward(&mut self, target: Address, data: &[u8]) -> Result<Vec<u8>, Vec<u8>> {
        unsafe { RawCall::new().call(target, data) }
    }
}
