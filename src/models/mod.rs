//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`WalletState`] - Web3 wallet session state
//! - [`Notification`], [`NotificationQueue`] - Snackbar messages

mod notification;
mod wallet;

pub use notification::{Notification, NotificationQueue, Severity};
pub use wallet::WalletState;
