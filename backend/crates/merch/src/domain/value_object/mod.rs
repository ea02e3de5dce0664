//! Value Object Module

pub mod coins;
pub mod item_name;
pub mod user_name;
pub mod user_password;

pub use coins::Coins;
pub use item_name::ItemName;
pub use user_name::UserName;
pub use user_password::{RawPassword, UserPassword};
