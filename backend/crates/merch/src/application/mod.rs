//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod buy_item;
pub mod config;
pub mod get_info;
pub mod send_coin;
pub mod session_token;

// Re-exports
pub use authenticate::{AuthenticateInput, AuthenticateOutput, AuthenticateUseCase};
pub use buy_item::BuyItemUseCase;
pub use config::MerchConfig;
pub use get_info::GetInfoUseCase;
pub use send_coin::{SendCoinInput, SendCoinUseCase};
pub use session_token::SessionTokenService;
