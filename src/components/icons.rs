//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use icondata::Icon;

use crate::config::IconTheme;
use crate::core::connector::ConnectorKind;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuCheck as Check, LuCoins as Coinbase, LuExternalLink as ExternalLink, LuGlobe as Network,
        LuLogOut as Disconnect, LuQrCode as WalletConnect, LuWallet as Wallet, LuX as Close,
    };
}

mod bootstrap {
    pub use icondata::{
        BsBoxArrowRight as Disconnect, BsBoxArrowUpRight as ExternalLink, BsCheckLg as Check,
        BsCoin as Coinbase, BsGlobe as Network, BsQrCode as WalletConnect, BsWallet2 as Wallet,
        BsXLg as Close,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(WALLET, Wallet);
themed_icon!(WALLET_CONNECT, WalletConnect);
themed_icon!(COINBASE, Coinbase);
themed_icon!(NETWORK, Network);
themed_icon!(CHECK, Check);
themed_icon!(CLOSE, Close);
themed_icon!(DISCONNECT, Disconnect);
themed_icon!(EXTERNAL_LINK, ExternalLink);

/// Icon for a wallet option.
pub fn connector_icon(kind: ConnectorKind) -> Icon {
    match kind {
        ConnectorKind::Injected => WALLET,
        ConnectorKind::SessionBased => WALLET_CONNECT,
        ConnectorKind::CoinbaseSpecific => COINBASE,
        ConnectorKind::NetworkSimulated => NETWORK,
    }
}
