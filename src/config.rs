//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.
//! Deployment-specific values (project id, network override) are read at
//! build time, see [`crate::core::resolver::Environment`].

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name shown in the header and sent to WalletConnect.
pub const APP_NAME: &str = "Lumangi";

/// Short description sent to WalletConnect as dApp metadata.
pub const APP_DESCRIPTION: &str = "Lumangi dApp";

/// Icon path (relative to the page origin) advertised to wallets.
pub const APP_ICON_PATH: &str = "/lumangi-coin.png";

// =============================================================================
// Build-time Environment
// =============================================================================

/// Environment variable names surfaced in configuration errors.
pub mod env_vars {
    /// WalletConnect Cloud project id (public, bundled).
    pub const PROJECT_ID: &str = "WALLETCONNECT_PROJECT_ID";
}

// =============================================================================
// Wallet Configuration
// =============================================================================

/// localStorage key remembering the last successfully activated connector.
pub const CONNECTOR_ID_KEY: &str = "connectorId";

/// Timeout for silent (no popup) wallet queries in milliseconds.
pub const WALLET_TIMEOUT_MS: i32 = 2000;

/// Delay between closing our modal and opening the WalletConnect QR modal.
///
/// Both modals fight over focus when opened in the same frame.
pub const QR_MODAL_HANDOFF_MS: u32 = 50;

/// Global name under which `index.html` exposes the WalletConnect provider class.
pub const WALLETCONNECT_GLOBAL: &str = "WalletConnectEthereumProvider";

/// Address display truncation.
pub mod eth_address {
    /// Full length of a `0x`-prefixed address.
    pub const FULL_LEN: usize = 42;
    /// Characters kept at the start (`0x` + 4 hex digits).
    pub const PREFIX_LEN: usize = 6;
    /// Start index of the 4 trailing hex digits.
    pub const SUFFIX_START: usize = 38;
}

/// EIP-1193 / EIP-3085 provider error codes.
pub mod rpc_codes {
    /// User rejected the request.
    pub const USER_REJECTED: i64 = 4001;
    /// Requested chain has not been added to the wallet.
    pub const UNRECOGNIZED_CHAIN: i64 = 4902;
}

// =============================================================================
// Notification Configuration
// =============================================================================

/// Snackbar auto-hide duration in milliseconds.
pub const SNACKBAR_AUTO_HIDE_MS: u32 = 3000;

/// Maximum number of snackbars shown at once.
pub const MAX_SNACKBARS: usize = 3;

// =============================================================================
// External Links
// =============================================================================

/// Help link shown in the connect modal.
pub const WALLET_HELP_URL: &str =
    "https://metamask.zendesk.com/hc/en-us/articles/360015489471-How-to-Install-MetaMask-Manually";

// =============================================================================
// UI Configuration
// =============================================================================

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the application.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;
