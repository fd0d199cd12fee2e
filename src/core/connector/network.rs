//! Read-only connector backed by the configured RPC endpoints.
//!
//! Activating it only checks that the endpoint for the requested chain is
//! reachable and actually serves that chain. There is no signer.

use std::rc::Rc;

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

use super::{Activation, ActivationTarget};
use crate::core::chain::ChainId;
use crate::core::error::{ActivationError, WalletError};
use crate::core::resolver::ConnectorConfig;

/// JSON-RPC 2.0 request body.
#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u32,
    method: &'a str,
    params: [(); 0],
}

impl<'a> JsonRpcRequest<'a> {
    fn new(method: &'a str) -> Self {
        Self {
            jsonrpc: "2.0",
            id: 1,
            method,
            params: [],
        }
    }
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// JSON-RPC 2.0 response body.
#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    result: Option<String>,
    error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    fn into_chain_id(self) -> Result<ChainId, WalletError> {
        if let Some(err) = self.error {
            return Err(WalletError::Rpc(format!("{} ({})", err.message, err.code)));
        }
        let hex = self
            .result
            .ok_or_else(|| WalletError::InvalidResponse("missing result".to_string()))?;
        ChainId::from_hex(&hex).ok_or(WalletError::InvalidResponse(hex))
    }
}

/// Connector with no wallet, reading chain state over HTTP.
#[derive(Clone)]
pub struct NetworkConnector {
    config: Rc<ConnectorConfig>,
}

impl NetworkConnector {
    pub fn new(config: Rc<ConnectorConfig>) -> Self {
        Self { config }
    }

    pub async fn activate(&self, target: ActivationTarget) -> Result<Activation, ActivationError> {
        let chain = target
            .chain_id()
            .unwrap_or_else(|| self.config.default_chain());
        let url = self
            .config
            .rpc_url(chain)
            .ok_or_else(|| WalletError::Rpc(format!("no RPC URL for chain {chain}")))?;

        let served = fetch_chain_id(url).await?;
        if served != chain {
            return Err(WalletError::InvalidResponse(format!(
                "endpoint for chain {chain} serves chain {served}"
            ))
            .into());
        }

        Ok(Activation {
            accounts: Vec::new(),
            chain_id: Some(chain),
        })
    }
}

/// `eth_chainId` over HTTP.
async fn fetch_chain_id(url: &str) -> Result<ChainId, WalletError> {
    let response = Request::post(url)
        .json(&JsonRpcRequest::new("eth_chainId"))
        .map_err(|e| WalletError::Rpc(e.to_string()))?
        .send()
        .await
        .map_err(|e| WalletError::Rpc(e.to_string()))?;

    if !response.ok() {
        return Err(WalletError::Rpc(format!("HTTP error: {}", response.status())));
    }

    response
        .json::<JsonRpcResponse>()
        .await
        .map_err(|e| WalletError::InvalidResponse(e.to_string()))?
        .into_chain_id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body() {
        let body = serde_json::to_value(JsonRpcRequest::new("eth_chainId")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"jsonrpc": "2.0", "id": 1, "method": "eth_chainId", "params": []})
        );
    }

    #[test]
    fn test_response_result() {
        let response: JsonRpcResponse =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":"0xaa36a7"}"#).unwrap();
        assert_eq!(response.into_chain_id(), Ok(ChainId(11155111)));
    }

    #[test]
    fn test_response_error() {
        let response: JsonRpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"method not found"}}"#,
        )
        .unwrap();
        assert_eq!(
            response.into_chain_id(),
            Err(WalletError::Rpc("method not found (-32601)".to_string()))
        );
    }

    #[test]
    fn test_response_garbage_result() {
        let response: JsonRpcResponse =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":"nope"}"#).unwrap();
        assert!(matches!(
            response.into_chain_id(),
            Err(WalletError::InvalidResponse(_))
        ));
    }
}
