//! WalletConnect v2 session connector.
//!
//! Wraps the `@walletconnect/ethereum-provider` class that `index.html`
//! exposes on `window`. The provider owns pairing, the QR modal and session
//! transport; this module only configures it and drives `enable`/`request`.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use js_sys::{Object, Reflect};
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use super::eip1193::{self, ProviderEvent};
use super::{Activation, ActivationTarget};
use crate::config::{APP_DESCRIPTION, APP_ICON_PATH, APP_NAME, WALLET_TIMEOUT_MS, WALLETCONNECT_GLOBAL};
use crate::core::chain::ChainId;
use crate::core::error::{ActivationError, WalletError};
use crate::core::resolver::ConnectorConfig;
use crate::utils::dom;

/// dApp metadata shown by the wallet during pairing.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionMetadata {
    pub name: String,
    pub description: String,
    pub url: String,
    pub icons: Vec<String>,
}

/// Options passed to `EthereumProvider.init`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInitOptions {
    pub project_id: String,
    pub chains: Vec<ChainId>,
    pub optional_chains: Vec<ChainId>,
    /// Keys are decimal chain ids; the provider expects a plain object.
    pub rpc_map: BTreeMap<String, String>,
    pub show_qr_modal: bool,
    pub metadata: SessionMetadata,
}

impl SessionInitOptions {
    pub fn new(config: &ConnectorConfig, origin: &str) -> Self {
        Self {
            project_id: config.project_id.clone(),
            chains: config.chains.clone(),
            optional_chains: config.optional_chains.clone(),
            rpc_map: config
                .rpc_map
                .iter()
                .map(|(id, url)| (id.to_string(), url.clone()))
                .collect(),
            show_qr_modal: config.show_qr_modal,
            metadata: SessionMetadata {
                name: APP_NAME.to_string(),
                description: APP_DESCRIPTION.to_string(),
                url: origin.to_string(),
                icons: vec![format!("{origin}{APP_ICON_PATH}")],
            },
        }
    }
}

type Handler = Rc<dyn Fn(ProviderEvent)>;

/// Connector over a lazily initialized WalletConnect provider.
#[derive(Clone)]
pub struct SessionConnector {
    config: Rc<ConnectorConfig>,
    provider: Rc<RefCell<Option<Object>>>,
    handler: Rc<RefCell<Option<Handler>>>,
}

impl SessionConnector {
    pub fn new(config: Rc<ConnectorConfig>) -> Self {
        Self {
            config,
            provider: Rc::new(RefCell::new(None)),
            handler: Rc::new(RefCell::new(None)),
        }
    }

    /// Initialize the provider on first use.
    async fn provider(&self) -> Result<Object, WalletError> {
        if let Some(provider) = self.provider.borrow().as_ref() {
            return Ok(provider.clone());
        }

        let class = dom::global_object(WALLETCONNECT_GLOBAL).ok_or(WalletError::SessionProviderMissing)?;
        let options = SessionInitOptions::new(&self.config, &dom::origin());
        let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
        let options = options
            .serialize(&serializer)
            .map_err(|_| WalletError::RequestCreationFailed)?;

        let promise = eip1193::call_promise(&class, "init", &[&options])?;
        let provider = JsFuture::from(promise)
            .await
            .map_err(|e| eip1193::rejection(&e))?
            .dyn_into::<Object>()
            .map_err(|_| WalletError::InvalidResponse("EthereumProvider.init".to_string()))?;

        if let Some(handler) = self.handler.borrow().as_ref() {
            eip1193::subscribe(&provider, Rc::clone(handler))?;
        }
        *self.provider.borrow_mut() = Some(provider.clone());
        Ok(provider)
    }

    fn has_session(provider: &Object) -> bool {
        Reflect::get(provider, &"session".into())
            .map(|s| !s.is_undefined() && !s.is_null())
            .unwrap_or(false)
    }

    /// Pair (opening the QR modal) if no session exists, then switch if asked.
    pub async fn activate(&self, target: ActivationTarget) -> Result<Activation, ActivationError> {
        let provider = self.provider().await?;

        if !Self::has_session(&provider) {
            let promise = eip1193::call_promise(&provider, "enable", &[])?;
            JsFuture::from(promise)
                .await
                .map_err(|e| eip1193::rejection(&e))?;
        }

        let mut chain_id = eip1193::chain_id(&provider).await?;
        if let Some(desired) = target.chain_id()
            && desired != chain_id
        {
            eip1193::switch_chain(&provider, desired).await?;
            chain_id = desired;
        }

        let accounts = eip1193::accounts(&provider, WALLET_TIMEOUT_MS).await?;
        Ok(Activation {
            accounts,
            chain_id: Some(chain_id),
        })
    }

    /// Resume a session persisted by the provider itself, without pairing.
    pub async fn connect_eagerly(&self) -> Result<Activation, ActivationError> {
        let provider = self.provider().await?;
        if !Self::has_session(&provider) {
            return Err(WalletError::NoAccount.into());
        }
        let accounts = eip1193::accounts(&provider, WALLET_TIMEOUT_MS).await?;
        let chain_id = eip1193::chain_id(&provider).await.ok();
        Ok(Activation { accounts, chain_id })
    }

    pub async fn deactivate(&self) -> Result<(), WalletError> {
        let provider = self.provider.borrow().clone();
        let Some(provider) = provider else {
            return Ok(());
        };
        if Self::has_session(&provider) {
            let promise = eip1193::call_promise(&provider, "disconnect", &[])?;
            JsFuture::from(promise)
                .await
                .map_err(|e| eip1193::rejection(&e))?;
        }
        Ok(())
    }

    /// Register `handler`; attached once the provider exists.
    pub fn subscribe(&self, handler: impl Fn(ProviderEvent) + 'static) -> Result<(), WalletError> {
        let handler: Handler = Rc::new(handler);
        if let Some(provider) = self.provider.borrow().as_ref() {
            eip1193::subscribe(provider, Rc::clone(&handler))?;
        }
        *self.handler.borrow_mut() = Some(handler);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chain::{MAINNET, RpcSource, SEPOLIA, SUPPORTED_CHAINS};

    fn config() -> ConnectorConfig {
        let source = RpcSource::from([
            (MAINNET, vec!["https://main".to_string()]),
            (SEPOLIA, vec!["https://sep".to_string()]),
        ]);
        ConnectorConfig::build("proj", SEPOLIA, SUPPORTED_CHAINS, &source).unwrap()
    }

    #[test]
    fn test_init_options_shape() {
        let options = SessionInitOptions::new(&config(), "https://app.test");
        let json = serde_json::to_value(&options).unwrap();

        assert_eq!(json["projectId"], "proj");
        assert_eq!(json["chains"], serde_json::json!([11155111]));
        assert_eq!(json["optionalChains"], serde_json::json!([1]));
        assert_eq!(json["rpcMap"]["1"], "https://main");
        assert_eq!(json["rpcMap"]["11155111"], "https://sep");
        assert_eq!(json["showQrModal"], true);
        assert_eq!(json["metadata"]["icons"][0], "https://app.test/lumangi-coin.png");
        assert_eq!(json["metadata"]["url"], "https://app.test");
    }
}
