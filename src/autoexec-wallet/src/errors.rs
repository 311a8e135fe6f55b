/// Errors surfaced by wallet entry points (revert reasons are fixed strings).
pub use autoexec_wallet_types::WalletError;
