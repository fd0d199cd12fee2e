use alloy_primitives::Address;

use crate::config::eth_address;
use crate::core::chain::ChainId;
use crate::core::connector::{Activation, ConnectorKind, ProviderEvent};

/// Wallet session state.
///
/// Lives in the application context; connectors never hold it themselves.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum WalletState {
    #[default]
    Disconnected,
    Connecting(ConnectorKind),
    Connected {
        connector: ConnectorKind,
        /// `None` for read-only sessions.
        address: Option<Address>,
        chain_id: Option<ChainId>,
    },
}

impl WalletState {
    /// Session after a successful activation.
    pub fn connected(connector: ConnectorKind, activation: &Activation) -> Self {
        Self::Connected {
            connector,
            address: activation.primary_account(),
            chain_id: activation.chain_id,
        }
    }

    /// Check if wallet is connected
    pub fn is_connected(&self) -> bool {
        matches!(self, WalletState::Connected { .. })
    }

    /// Get chain ID if connected
    pub fn chain_id(&self) -> Option<ChainId> {
        match self {
            WalletState::Connected { chain_id, .. } => *chain_id,
            _ => None,
        }
    }

    /// Connector of the current or pending session
    pub fn connector(&self) -> Option<ConnectorKind> {
        match self {
            WalletState::Connecting(kind) | WalletState::Connected { connector: kind, .. } => {
                Some(*kind)
            }
            WalletState::Disconnected => None,
        }
    }

    /// Apply a provider event; returns `true` when the session ended.
    pub fn apply_event(&mut self, event: ProviderEvent) -> bool {
        let WalletState::Connected {
            address, chain_id, ..
        } = self
        else {
            return false;
        };
        match event {
            ProviderEvent::AccountsChanged(accounts) => match accounts.first() {
                Some(first) => {
                    *address = Some(*first);
                    false
                }
                None => {
                    *self = WalletState::Disconnected;
                    true
                }
            },
            ProviderEvent::ChainChanged(new_chain) => {
                *chain_id = new_chain;
                false
            }
            ProviderEvent::Disconnected => {
                *self = WalletState::Disconnected;
                true
            }
        }
    }

    /// Format for display (0x1234...5678, checksummed)
    pub fn display_name(&self) -> String {
        match self {
            WalletState::Connected {
                address: Some(address),
                ..
            } => {
                let full = address.to_checksum(None);
                format!(
                    "{}...{}",
                    &full[..eth_address::PREFIX_LEN],
                    &full[eth_address::SUFFIX_START..eth_address::FULL_LEN]
                )
            }
            WalletState::Connected { address: None, .. } => "read-only".to_string(),
            WalletState::Connecting(_) => "connecting...".to_string(),
            WalletState::Disconnected => "Connect Wallet".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chain::{MAINNET, SEPOLIA};

    fn address() -> Address {
        "0xd8da6bf26964af9d7eed9e03e53415d37aa96045".parse().unwrap()
    }

    fn connected() -> WalletState {
        WalletState::Connected {
            connector: ConnectorKind::Injected,
            address: Some(address()),
            chain_id: Some(MAINNET),
        }
    }

    #[test]
    fn test_disconnected_state() {
        let state = WalletState::Disconnected;
        assert!(!state.is_connected());
        assert_eq!(state.chain_id(), None);
        assert_eq!(state.connector(), None);
        assert_eq!(state.display_name(), "Connect Wallet");
    }

    #[test]
    fn test_connecting_state() {
        let state = WalletState::Connecting(ConnectorKind::SessionBased);
        assert!(!state.is_connected());
        assert_eq!(state.connector(), Some(ConnectorKind::SessionBased));
        assert_eq!(state.display_name(), "connecting...");
    }

    #[test]
    fn test_connected_display() {
        let state = connected();
        assert!(state.is_connected());
        assert_eq!(state.chain_id(), Some(MAINNET));
        assert_eq!(state.display_name(), "0xd8dA...6045");
    }

    #[test]
    fn test_read_only_display() {
        let state = WalletState::connected(
            ConnectorKind::NetworkSimulated,
            &Activation {
                accounts: vec![],
                chain_id: Some(SEPOLIA),
            },
        );
        assert_eq!(state.display_name(), "read-only");
        assert_eq!(state.chain_id(), Some(SEPOLIA));
    }

    #[test]
    fn test_chain_changed_event() {
        let mut state = connected();
        assert!(!state.apply_event(ProviderEvent::ChainChanged(Some(SEPOLIA))));
        assert_eq!(state.chain_id(), Some(SEPOLIA));
    }

    #[test]
    fn test_empty_accounts_disconnects() {
        let mut state = connected();
        assert!(state.apply_event(ProviderEvent::AccountsChanged(vec![])));
        assert_eq!(state, WalletState::Disconnected);
    }

    #[test]
    fn test_events_ignored_when_disconnected() {
        let mut state = WalletState::Disconnected;
        assert!(!state.apply_event(ProviderEvent::Disconnected));
        assert_eq!(state, WalletState::Disconnected);
    }

    #[test]
    fn test_default() {
        assert_eq!(WalletState::default(), WalletState::Disconnected);
    }
}
