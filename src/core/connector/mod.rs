//! Wallet connectors.
//!
//! A connector adapts one wallet transport to a uniform `activate` operation.
//! The transport category is fixed when the connector is built
//! ([`ConnectorKind`]) so call sites never probe provider identity.
//!
//! - [`InjectedConnector`] - browser extension (MetaMask, Coinbase Wallet)
//! - [`SessionConnector`] - WalletConnect QR / deep-link session
//! - [`NetworkConnector`] - read-only JSON-RPC endpoint

mod eip1193;
mod injected;
mod network;
mod session;

use std::rc::Rc;

use alloy_primitives::Address;

use crate::core::chain::{AddEthereumChainParameter, ChainId, RpcMap};
use crate::core::error::{ActivationError, WalletError};
use crate::core::resolver::ConnectorConfig;

pub use eip1193::ProviderEvent;
pub use injected::{InjectedConnector, InjectedFlavor};
pub use network::NetworkConnector;
pub use session::SessionConnector;

// ============================================================================
// ConnectorKind
// ============================================================================

/// Transport category of a connector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConnectorKind {
    /// Generic injected EIP-1193 provider (MetaMask).
    Injected,
    /// WalletConnect v2 session.
    SessionBased,
    /// Read-only RPC endpoint, no signer.
    NetworkSimulated,
    /// Coinbase Wallet injected provider.
    CoinbaseSpecific,
}

impl ConnectorKind {
    /// Connectors the user can pick in the connect modal, in display order.
    pub const SELECTABLE: [ConnectorKind; 3] =
        [Self::Injected, Self::SessionBased, Self::CoinbaseSpecific];

    /// Whether chain switches take a bare chain id.
    ///
    /// Injected wallets instead get full add-chain parameters so that a chain
    /// unknown to the extension can be registered on the fly.
    pub fn accepts_raw_chain_id(self) -> bool {
        matches!(self, Self::SessionBased | Self::NetworkSimulated)
    }

    /// Value persisted under the connector-id storage key.
    pub fn storage_id(self) -> &'static str {
        match self {
            Self::Injected => "injected",
            Self::SessionBased => "wallet_connect_v2",
            Self::NetworkSimulated => "network",
            Self::CoinbaseSpecific => "coinbase",
        }
    }

    pub fn from_storage_id(id: &str) -> Option<Self> {
        match id {
            "injected" => Some(Self::Injected),
            "wallet_connect_v2" => Some(Self::SessionBased),
            "network" => Some(Self::NetworkSimulated),
            "coinbase" => Some(Self::CoinbaseSpecific),
            _ => None,
        }
    }

    /// Wallet label shown in the UI.
    pub fn label(self) -> &'static str {
        match self {
            Self::Injected => "MetaMask",
            Self::SessionBased => "WalletConnect",
            Self::NetworkSimulated => "Read-only",
            Self::CoinbaseSpecific => "Coinbase Wallet",
        }
    }
}

// ============================================================================
// Activation
// ============================================================================

/// What an activation request should land on.
#[derive(Clone, Debug, PartialEq)]
pub enum ActivationTarget {
    /// Connector's default chain (or whatever the wallet is on).
    Default,
    /// Switch to a chain by id.
    Chain(ChainId),
    /// Switch to a chain, registering it with the wallet if unknown.
    AddChain(AddEthereumChainParameter),
}

impl ActivationTarget {
    /// Target for a chain switch on a connector of `kind`.
    ///
    /// `desired = None` re-activates on the default chain.
    pub fn for_switch(kind: ConnectorKind, desired: Option<ChainId>, rpc_map: &RpcMap) -> Self {
        let Some(chain) = desired else {
            return Self::Default;
        };
        if kind.accepts_raw_chain_id() {
            return Self::Chain(chain);
        }
        AddEthereumChainParameter::for_chain(chain, rpc_map)
            .map(Self::AddChain)
            .unwrap_or(Self::Chain(chain))
    }

    /// Chain this target asks for, if any.
    pub fn chain_id(&self) -> Option<ChainId> {
        match self {
            Self::Default => None,
            Self::Chain(id) => Some(*id),
            Self::AddChain(params) => ChainId::from_hex(&params.chain_id),
        }
    }
}

/// Result of a successful activation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Activation {
    /// Exposed accounts; empty for read-only connectors.
    pub accounts: Vec<Address>,
    pub chain_id: Option<ChainId>,
}

impl Activation {
    pub fn primary_account(&self) -> Option<Address> {
        self.accounts.first().copied()
    }
}

/// Uniform connector operations.
#[allow(async_fn_in_trait)]
pub trait Connect {
    fn kind(&self) -> ConnectorKind;

    /// Establish a session or switch an existing one to `target`.
    async fn activate(&self, target: ActivationTarget) -> Result<Activation, ActivationError>;

    /// Restore an existing authorization without prompting the user.
    async fn connect_eagerly(&self) -> Result<Activation, ActivationError>;

    /// Tear down the session where the transport supports it.
    async fn deactivate(&self) -> Result<(), WalletError>;
}

// ============================================================================
// Connector
// ============================================================================

/// A concrete connector, tagged by transport.
#[derive(Clone)]
pub enum Connector {
    Injected(InjectedConnector),
    Session(SessionConnector),
    Network(NetworkConnector),
}

impl Connector {
    /// Subscribe to provider account/chain events.
    ///
    /// Read-only connectors have no provider and never emit.
    pub fn subscribe(&self, handler: impl Fn(ProviderEvent) + 'static) -> Result<(), WalletError> {
        match self {
            Self::Injected(c) => c.subscribe(handler),
            Self::Session(c) => c.subscribe(handler),
            Self::Network(_) => Ok(()),
        }
    }
}

impl Connect for Connector {
    fn kind(&self) -> ConnectorKind {
        match self {
            Self::Injected(c) => c.kind(),
            Self::Session(_) => ConnectorKind::SessionBased,
            Self::Network(_) => ConnectorKind::NetworkSimulated,
        }
    }

    async fn activate(&self, target: ActivationTarget) -> Result<Activation, ActivationError> {
        match self {
            Self::Injected(c) => c.activate(target).await,
            Self::Session(c) => c.activate(target).await,
            Self::Network(c) => c.activate(target).await,
        }
    }

    async fn connect_eagerly(&self) -> Result<Activation, ActivationError> {
        match self {
            Self::Injected(c) => c.connect_eagerly().await,
            Self::Session(c) => c.connect_eagerly().await,
            Self::Network(c) => c.activate(ActivationTarget::Default).await,
        }
    }

    async fn deactivate(&self) -> Result<(), WalletError> {
        match self {
            Self::Session(c) => c.deactivate().await,
            Self::Injected(_) | Self::Network(_) => Ok(()),
        }
    }
}

/// All connectors of the application, sharing one configuration.
#[derive(Clone)]
pub struct Connectors {
    config: Rc<ConnectorConfig>,
    metamask: Connector,
    wallet_connect: Connector,
    coinbase: Connector,
    network: Connector,
}

impl Connectors {
    pub fn new(config: ConnectorConfig) -> Self {
        let config = Rc::new(config);
        Self {
            metamask: Connector::Injected(InjectedConnector::new(
                InjectedFlavor::MetaMask,
                Rc::clone(&config),
            )),
            wallet_connect: Connector::Session(SessionConnector::new(Rc::clone(&config))),
            coinbase: Connector::Injected(InjectedConnector::new(
                InjectedFlavor::Coinbase,
                Rc::clone(&config),
            )),
            network: Connector::Network(NetworkConnector::new(Rc::clone(&config))),
            config,
        }
    }

    pub fn get(&self, kind: ConnectorKind) -> Connector {
        match kind {
            ConnectorKind::Injected => self.metamask.clone(),
            ConnectorKind::SessionBased => self.wallet_connect.clone(),
            ConnectorKind::CoinbaseSpecific => self.coinbase.clone(),
            ConnectorKind::NetworkSimulated => self.network.clone(),
        }
    }

    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chain::{MAINNET, SEPOLIA};

    fn rpc_map() -> RpcMap {
        RpcMap::from([
            (MAINNET, "https://main".to_string()),
            (SEPOLIA, "https://sep".to_string()),
        ])
    }

    #[test]
    fn test_raw_chain_id_categories() {
        assert!(ConnectorKind::SessionBased.accepts_raw_chain_id());
        assert!(ConnectorKind::NetworkSimulated.accepts_raw_chain_id());
        assert!(!ConnectorKind::Injected.accepts_raw_chain_id());
        assert!(!ConnectorKind::CoinbaseSpecific.accepts_raw_chain_id());
    }

    #[test]
    fn test_switch_target_raw_for_session() {
        let target = ActivationTarget::for_switch(ConnectorKind::SessionBased, Some(SEPOLIA), &rpc_map());
        assert_eq!(target, ActivationTarget::Chain(SEPOLIA));
        let target =
            ActivationTarget::for_switch(ConnectorKind::NetworkSimulated, Some(MAINNET), &rpc_map());
        assert_eq!(target, ActivationTarget::Chain(MAINNET));
    }

    #[test]
    fn test_switch_target_add_chain_for_injected() {
        for kind in [ConnectorKind::Injected, ConnectorKind::CoinbaseSpecific] {
            match ActivationTarget::for_switch(kind, Some(SEPOLIA), &rpc_map()) {
                ActivationTarget::AddChain(params) => {
                    assert_eq!(params.chain_id, "0xaa36a7");
                    assert_eq!(params.rpc_urls, vec!["https://sep".to_string()]);
                }
                other => panic!("expected AddChain, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_switch_target_without_desired_chain() {
        for kind in ConnectorKind::SELECTABLE {
            assert_eq!(
                ActivationTarget::for_switch(kind, None, &rpc_map()),
                ActivationTarget::Default
            );
        }
    }

    #[test]
    fn test_switch_target_unknown_chain_falls_back_to_raw() {
        let target =
            ActivationTarget::for_switch(ConnectorKind::Injected, Some(ChainId(137)), &rpc_map());
        assert_eq!(target, ActivationTarget::Chain(ChainId(137)));
    }

    #[test]
    fn test_target_chain_id() {
        let params = AddEthereumChainParameter::for_chain(SEPOLIA, &rpc_map()).unwrap();
        assert_eq!(ActivationTarget::AddChain(params).chain_id(), Some(SEPOLIA));
        assert_eq!(ActivationTarget::Chain(MAINNET).chain_id(), Some(MAINNET));
        assert_eq!(ActivationTarget::Default.chain_id(), None);
    }

    #[test]
    fn test_storage_ids_round_trip() {
        for kind in [
            ConnectorKind::Injected,
            ConnectorKind::SessionBased,
            ConnectorKind::NetworkSimulated,
            ConnectorKind::CoinbaseSpecific,
        ] {
            assert_eq!(ConnectorKind::from_storage_id(kind.storage_id()), Some(kind));
        }
        assert_eq!(ConnectorKind::from_storage_id("wallet_connect"), None);
    }
}
