//! UI components built with Leptos.
//!
//! - [`Header`] - Top bar with network switcher and account button
//! - [`ConnectModal`] - Wallet picker dialog
//! - [`Snackbar`] - Transient notifications
//! - [`icons`] - Centralized icon definitions (change theme here)

mod connect_modal;
mod header;
pub mod icons;
mod snackbar;

pub use connect_modal::ConnectModal;
pub use header::Header;
pub use snackbar::Snackbar;
