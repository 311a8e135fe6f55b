//! Solidity ABI surface of the wallet: events and the receiver interface it implements.

use stylus_sdk::alloy_sol_types::sol;

sol! {
    /// `delegate` may now configure rules and send transactions.
    event ApprovalGranted(address indexed delegate);
    event ApprovalRevoked(address indexed delegate);

    /// `selectorOrData` is the full call data for action rules, the selector otherwise.
    event PolicyRuleSet(address indexed target, bytes selectorOrData, uint256 expiryBlock);
    event PolicyRuleCleared(address indexed target, bytes selectorOrData);

    event AutoExecuted(address indexed target, address indexed caller, bytes payload);

    interface IERC721Receiver {
        function onERC721Received(address operator, address from, uint256 tokenId, bytes data)
            external
            returns (bytes4);
    }
}
