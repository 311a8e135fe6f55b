//! Fixed values of the wallet ABI.

use stylus_sdk::alloy_primitives::FixedBytes;

/// `IERC721Receiver.onERC721Received.selector`.
pub const ERC721_RECEIVED: FixedBytes<4> = FixedBytes([0x15, 0x0b, 0x7a, 0x02]);
