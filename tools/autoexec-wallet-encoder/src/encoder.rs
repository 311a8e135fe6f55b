use alloy_primitives::{Address, Bytes, FixedBytes};
use alloy_sol_types::{sol, SolCall};
use sha3::{Digest, Keccak256};

use autoexec_wallet_types::{CallData, DeferredCall, RuleKey, Selector, SELECTOR_LEN};

use crate::types::RuleRequest;

sol! {
    interface IAutoexecWallet {
        function approveForConfigure(address delegate) external;
        function revokeForConfigure(address delegate) external;
        function isAllowedToConfigure(address caller) external view returns (bool);

        function setBlacklistedActions(address target, bytes data, uint256 expiryBlock, address autoTarget, bytes autoPayload) external;
        function setBlacklistedContractFunction(address target, bytes4 selector, uint256 expiryBlock, address autoTarget, bytes autoPayload) external;
        function clearBlacklistedActions(address target, bytes data) external;
        function clearBlacklistedContractFunction(address target, bytes4 selector) external;

        function makeTransaction(address target, bytes data) external returns (bytes);
        function autoExecuteTo(address target, bytes data) external returns (bytes);
        function autoExecuteTo(address target) external returns (bytes);
    }
}

fn keccak256_bytes(bytes: &[u8]) -> FixedBytes<32> {
    let mut h = Keccak256::new();
    h.update(bytes);
    let out = h.finalize();
    let mut b = [0u8; 32];
    b.copy_from_slice(out.as_slice());
    FixedBytes(b)
}

/// Function selector of a canonical signature, e.g. `incrementCount(uint256)`.
pub fn selector(signature: &str) -> Selector {
    let hash = keccak256_bytes(signature.as_bytes());
    let mut sel = [0u8; SELECTOR_LEN];
    sel.copy_from_slice(&hash[..SELECTOR_LEN]);
    Selector(sel)
}

/// `selector(signature) || args`, where `args` is already ABI-encoded.
pub fn encode_with_signature(signature: &str, args: &[u8]) -> CallData {
    let mut buf = Vec::with_capacity(SELECTOR_LEN + args.len());
    buf.extend_from_slice(selector(signature).as_slice());
    buf.extend_from_slice(args);
    CallData(buf)
}

/// Parses hex call data, with or without a `0x` prefix.
pub fn parse_call_data(input: &str) -> Result<CallData, hex::FromHexError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    Ok(CallData(hex::decode(digits)?))
}

pub fn encode_approve(delegate: Address) -> Vec<u8> {
    IAutoexecWallet::approveForConfigureCall { delegate }.abi_encode()
}

pub fn encode_revoke(delegate: Address) -> Vec<u8> {
    IAutoexecWallet::revokeForConfigureCall { delegate }.abi_encode()
}

/// `setBlacklistedActions` or `setBlacklistedContractFunction`, depending on the rule kind.
pub fn encode_rule(request: &RuleRequest) -> Vec<u8> {
    let auto_target = request.auto_execute.target;
    let auto_payload = Bytes::copy_from_slice(request.auto_execute.payload.as_slice());
    match &request.key {
        RuleKey::Action { target, call_data } => IAutoexecWallet::setBlacklistedActionsCall {
            target: *target,
            data: Bytes::copy_from_slice(call_data.as_slice()),
            expiryBlock: request.expiry_block,
            autoTarget: auto_target,
            autoPayload: auto_payload,
        }
        .abi_encode(),
        RuleKey::Function { target, selector } => {
            IAutoexecWallet::setBlacklistedContractFunctionCall {
                target: *target,
                selector: (*selector).into(),
                expiryBlock: request.expiry_block,
                autoTarget: auto_target,
                autoPayload: auto_payload,
            }
            .abi_encode()
        }
    }
}

pub fn encode_clear_rule(key: &RuleKey) -> Vec<u8> {
    match key {
        RuleKey::Action { target, call_data } => IAutoexecWallet::clearBlacklistedActionsCall {
            target: *target,
            data: Bytes::copy_from_slice(call_data.as_slice()),
        }
        .abi_encode(),
        RuleKey::Function { target, selector } => {
            IAutoexecWallet::clearBlacklistedContractFunctionCall {
                target: *target,
                selector: (*selector).into(),
            }
            .abi_encode()
        }
    }
}

pub fn encode_make_transaction(target: Address, data: &CallData) -> Vec<u8> {
    IAutoexecWallet::makeTransactionCall {
        target,
        data: Bytes::copy_from_slice(data.as_slice()),
    }
    .abi_encode()
}

/// `autoExecuteTo(address,bytes)` for a specific staged call.
pub fn encode_auto_execute(call: &DeferredCall) -> Vec<u8> {
    IAutoexecWallet::autoExecuteTo_0Call {
        target: call.target,
        data: Bytes::copy_from_slice(call.payload.as_slice()),
    }
    .abi_encode()
}

/// `autoExecuteTo(address)`: the call most recently staged towards `target`.
pub fn encode_auto_execute_latest(target: Address) -> Vec<u8> {
    IAutoexecWallet::autoExecuteTo_1Call { target }.abi_encode()
}
