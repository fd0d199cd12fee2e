//! Injected EIP-1193 connector (browser extensions).

use std::rc::Rc;

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::JsCast;

use super::eip1193::{self, ProviderEvent};
use super::{Activation, ActivationTarget, ConnectorKind};
use crate::config::WALLET_TIMEOUT_MS;
use crate::core::chain::ChainId;
use crate::core::error::{ActivationError, WalletError};
use crate::core::resolver::ConnectorConfig;
use crate::utils::dom;

/// Which extension the connector targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InjectedFlavor {
    MetaMask,
    Coinbase,
}

impl InjectedFlavor {
    fn name(self) -> &'static str {
        match self {
            Self::MetaMask => "MetaMask",
            Self::Coinbase => "Coinbase Wallet",
        }
    }

    /// Whether an injected provider object belongs to this flavor.
    fn matches(self, provider: &Object) -> bool {
        let flag = |name: &str| {
            Reflect::get(provider, &name.into())
                .ok()
                .and_then(|v| v.as_bool())
                .unwrap_or(false)
        };
        match self {
            Self::MetaMask => flag("isMetaMask") && !flag("isCoinbaseWallet"),
            Self::Coinbase => flag("isCoinbaseWallet"),
        }
    }
}

/// Connector over `window.ethereum`.
#[derive(Clone)]
pub struct InjectedConnector {
    flavor: InjectedFlavor,
    config: Rc<ConnectorConfig>,
}

impl InjectedConnector {
    pub fn new(flavor: InjectedFlavor, config: Rc<ConnectorConfig>) -> Self {
        Self { flavor, config }
    }

    pub fn kind(&self) -> ConnectorKind {
        match self.flavor {
            InjectedFlavor::MetaMask => ConnectorKind::Injected,
            InjectedFlavor::Coinbase => ConnectorKind::CoinbaseSpecific,
        }
    }

    /// Locate the provider for this flavor.
    ///
    /// With several extensions installed `window.ethereum.providers` lists
    /// each of them; Coinbase additionally exposes `coinbaseWalletExtension`.
    fn provider(&self) -> Result<Object, WalletError> {
        dom::window().ok_or(WalletError::NoWindow)?;

        if self.flavor == InjectedFlavor::Coinbase
            && let Some(extension) = dom::global_object("coinbaseWalletExtension")
        {
            return Ok(extension);
        }

        let ethereum =
            dom::global_object("ethereum").ok_or(WalletError::NotInstalled(self.flavor.name()))?;

        let listed = Reflect::get(&ethereum, &"providers".into())
            .ok()
            .and_then(|v| v.dyn_into::<Array>().ok());
        if let Some(providers) = listed {
            return providers
                .iter()
                .filter_map(|p| p.dyn_into::<Object>().ok())
                .find(|p| self.flavor.matches(p))
                .ok_or(WalletError::NotInstalled(self.flavor.name()));
        }

        match self.flavor {
            InjectedFlavor::Coinbase if !self.flavor.matches(&ethereum) => {
                Err(WalletError::NotInstalled(self.flavor.name()))
            }
            _ => Ok(ethereum),
        }
    }

    pub async fn activate(&self, target: ActivationTarget) -> Result<Activation, ActivationError> {
        let provider = self.provider()?;
        let accounts = eip1193::request_accounts(&provider).await?;
        let current = eip1193::chain_id(&provider).await?;

        let chain_id = match target {
            ActivationTarget::Default => current,
            ActivationTarget::Chain(chain) if chain == current => current,
            ActivationTarget::Chain(chain) => {
                eip1193::switch_chain(&provider, chain).await?;
                chain
            }
            ActivationTarget::AddChain(params) => {
                let chain = ChainId::from_hex(&params.chain_id).unwrap_or(current);
                if chain != current {
                    eip1193::switch_or_add_chain(&provider, &params).await?;
                }
                chain
            }
        };

        if !chain_id.is_supported() {
            web_sys::console::warn_1(
                &format!(
                    "{} is on unsupported chain {} (default {})",
                    self.flavor.name(),
                    chain_id,
                    self.config.default_chain()
                )
                .into(),
            );
        }

        Ok(Activation {
            accounts,
            chain_id: Some(chain_id),
        })
    }

    pub async fn connect_eagerly(&self) -> Result<Activation, ActivationError> {
        let provider = self.provider()?;
        let accounts = eip1193::accounts(&provider, WALLET_TIMEOUT_MS).await?;
        let chain_id = eip1193::chain_id(&provider).await.ok();
        Ok(Activation { accounts, chain_id })
    }

    pub fn subscribe(&self, handler: impl Fn(ProviderEvent) + 'static) -> Result<(), WalletError> {
        let provider = self.provider()?;
        eip1193::subscribe(&provider, Rc::new(handler))
    }
}
