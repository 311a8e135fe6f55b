//! Off-chain call data builder for the auto-executing policy wallet.

pub mod encoder;
pub mod types;


pub use autoexec_wallet_types::{CallData, DeferredCall, RuleKey, Selector};
pub use encoder::IAutoexecWallet;
pub use types::RuleRequest;
