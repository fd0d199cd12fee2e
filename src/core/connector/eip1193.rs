//! EIP-1193 provider plumbing shared by the injected and session connectors.
//!
//! Both transports expose the same `request({ method, params })` interface and
//! the same `on(event, listener)` events, so everything here works on a bare
//! provider [`Object`] via the Reflect API.

use std::rc::Rc;

use alloy_primitives::Address;
use js_sys::{Array, Function, Object, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen_futures::JsFuture;

use crate::config::rpc_codes;
use crate::core::chain::{AddEthereumChainParameter, ChainId};
use crate::core::error::WalletError;
use crate::utils::dom;

/// Provider notifications relevant to the session state.
#[derive(Clone, Debug, PartialEq)]
pub enum ProviderEvent {
    AccountsChanged(Vec<Address>),
    ChainChanged(Option<ChainId>),
    Disconnected,
}

// ============================================================================
// Requests
// ============================================================================

/// Build the `{ method, params }` argument object.
fn request_args(method: &str, params: Option<&JsValue>) -> Result<Object, WalletError> {
    let args = Object::new();
    Reflect::set(&args, &"method".into(), &method.into())
        .map_err(|_| WalletError::RequestCreationFailed)?;
    if let Some(params) = params {
        Reflect::set(&args, &"params".into(), params)
            .map_err(|_| WalletError::RequestCreationFailed)?;
    }
    Ok(args)
}

/// Call a method on `target` that returns a promise.
pub(super) fn call_promise(
    target: &Object,
    name: &str,
    args: &[&JsValue],
) -> Result<Promise, WalletError> {
    let func = Reflect::get(target, &name.into())
        .map_err(|_| WalletError::RequestCreationFailed)?
        .dyn_into::<Function>()
        .map_err(|_| WalletError::RequestCreationFailed)?;

    let result = match args {
        [] => func.call0(target),
        [a] => func.call1(target, a),
        [a, b, ..] => func.call2(target, a, b),
    };

    result
        .map_err(|e| rejection(&e))?
        .dyn_into::<Promise>()
        .map_err(|_| WalletError::InvalidResponse(format!("{name} did not return a promise")))
}

/// `provider.request({ method, params })`
pub(super) async fn request(
    provider: &Object,
    method: &str,
    params: Option<&JsValue>,
) -> Result<JsValue, WalletError> {
    let args = request_args(method, params)?;
    let promise = call_promise(provider, "request", &[args.as_ref()])?;
    JsFuture::from(promise).await.map_err(|e| rejection(&e))
}

/// `provider.request(...)` raced against a timeout, for silent queries.
pub(super) async fn request_with_timeout(
    provider: &Object,
    method: &str,
    timeout_ms: i32,
) -> Result<JsValue, WalletError> {
    let args = request_args(method, None)?;
    let promise = call_promise(provider, "request", &[args.as_ref()])?;
    race_with_timeout(promise, timeout_ms).await
}

/// Race a promise against a timeout.
///
/// The timeout promise resolves to `undefined`, which no wallet request
/// resolves to, so `undefined` means the timer won.
async fn race_with_timeout(promise: Promise, timeout_ms: i32) -> Result<JsValue, WalletError> {
    let window = dom::window().ok_or(WalletError::NoWindow)?;

    let timeout_promise = Promise::new(&mut |resolve, _| {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout_ms);
    });

    let race_array = Array::new();
    race_array.push(&promise);
    race_array.push(&timeout_promise);

    match JsFuture::from(Promise::race(&race_array)).await {
        Ok(result) if result.is_undefined() => Err(WalletError::Timeout),
        Ok(result) => Ok(result),
        Err(e) => Err(rejection(&e)),
    }
}

/// Convert a rejected JS value (`{ code, message }` or a string) into a [`WalletError`].
pub(super) fn rejection(err: &JsValue) -> WalletError {
    let code = Reflect::get(err, &"code".into())
        .ok()
        .and_then(|c| c.as_f64())
        .map(|c| c as i64);
    let message = Reflect::get(err, &"message".into())
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{err:?}"));
    WalletError::Rejected { code, message }
}

// ============================================================================
// Typed Calls
// ============================================================================

/// `eth_requestAccounts` (prompts the user).
pub(super) async fn request_accounts(provider: &Object) -> Result<Vec<Address>, WalletError> {
    let result = request(provider, "eth_requestAccounts", None).await?;
    non_empty(parse_accounts(&result))
}

/// `eth_accounts` (no prompt).
pub(super) async fn accounts(provider: &Object, timeout_ms: i32) -> Result<Vec<Address>, WalletError> {
    let result = request_with_timeout(provider, "eth_accounts", timeout_ms).await?;
    non_empty(parse_accounts(&result))
}

/// `eth_chainId`
pub(super) async fn chain_id(provider: &Object) -> Result<ChainId, WalletError> {
    let result = request(provider, "eth_chainId", None).await?;
    parse_chain_id(&result)
        .ok_or_else(|| WalletError::InvalidResponse(format!("eth_chainId returned {result:?}")))
}

/// `wallet_switchEthereumChain`
pub(super) async fn switch_chain(provider: &Object, chain: ChainId) -> Result<(), WalletError> {
    let param = Object::new();
    Reflect::set(&param, &"chainId".into(), &chain.to_hex().into())
        .map_err(|_| WalletError::RequestCreationFailed)?;
    let params = Array::of1(&param);
    request(provider, "wallet_switchEthereumChain", Some(&params)).await?;
    Ok(())
}

/// `wallet_switchEthereumChain`, registering the chain first if the wallet
/// reports it as unknown.
pub(super) async fn switch_or_add_chain(
    provider: &Object,
    params: &AddEthereumChainParameter,
) -> Result<(), WalletError> {
    let chain = ChainId::from_hex(&params.chain_id)
        .ok_or_else(|| WalletError::InvalidResponse(params.chain_id.clone()))?;

    match switch_chain(provider, chain).await {
        Err(WalletError::Rejected {
            code: Some(rpc_codes::UNRECOGNIZED_CHAIN),
            ..
        }) => {
            let value = serde_wasm_bindgen::to_value(params)
                .map_err(|_| WalletError::RequestCreationFailed)?;
            let add_params = Array::of1(&value);
            request(provider, "wallet_addEthereumChain", Some(&add_params)).await?;
            Ok(())
        }
        other => other,
    }
}

fn non_empty(accounts: Vec<Address>) -> Result<Vec<Address>, WalletError> {
    if accounts.is_empty() {
        Err(WalletError::NoAccount)
    } else {
        Ok(accounts)
    }
}

/// Parse an accounts array, skipping malformed entries.
pub(super) fn parse_accounts(value: &JsValue) -> Vec<Address> {
    let Some(array) = value.dyn_ref::<Array>() else {
        return Vec::new();
    };
    parse_addresses(array.iter().filter_map(|v| v.as_string()))
}

/// Parse hex address strings, skipping malformed entries.
pub(super) fn parse_addresses<S: AsRef<str>>(raw: impl IntoIterator<Item = S>) -> Vec<Address> {
    raw.into_iter()
        .filter_map(|s| s.as_ref().trim().parse::<Address>().ok())
        .collect()
}

/// Chain id as sent by providers: hex string, or a plain number from some wallets.
pub(super) fn parse_chain_id(value: &JsValue) -> Option<ChainId> {
    if let Some(hex) = value.as_string() {
        return ChainId::from_hex(&hex);
    }
    value.as_f64().map(|n| ChainId(n as u64))
}

// ============================================================================
// Event Listeners
// ============================================================================

/// Register `handler` for `accountsChanged`, `chainChanged` and `disconnect`.
///
/// # Note
/// The closures are intentionally leaked using `forget()` since this is a
/// single-page application where the listeners should persist for the
/// entire lifetime of the page.
pub(super) fn subscribe(
    provider: &Object,
    handler: Rc<dyn Fn(ProviderEvent)>,
) -> Result<(), WalletError> {
    let on_fn = Reflect::get(provider, &"on".into())
        .map_err(|_| WalletError::RequestCreationFailed)?
        .dyn_into::<Function>()
        .map_err(|_| WalletError::RequestCreationFailed)?;

    let accounts_handler = Rc::clone(&handler);
    let on_accounts = Closure::wrap(Box::new(move |accounts: JsValue| {
        accounts_handler(ProviderEvent::AccountsChanged(parse_accounts(&accounts)));
    }) as Box<dyn Fn(JsValue)>);

    let chain_handler = Rc::clone(&handler);
    let on_chain = Closure::wrap(Box::new(move |chain_id: JsValue| {
        chain_handler(ProviderEvent::ChainChanged(parse_chain_id(&chain_id)));
    }) as Box<dyn Fn(JsValue)>);

    let on_disconnect = Closure::wrap(Box::new(move |_: JsValue| {
        handler(ProviderEvent::Disconnected);
    }) as Box<dyn Fn(JsValue)>);

    for (event, closure) in [
        ("accountsChanged", &on_accounts),
        ("chainChanged", &on_chain),
        ("disconnect", &on_disconnect),
    ] {
        on_fn
            .call2(provider, &event.into(), closure.as_ref())
            .map_err(|_| WalletError::RequestCreationFailed)?;
    }

    on_accounts.forget();
    on_chain.forget();
    on_disconnect.forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_addresses_skips_malformed() {
        let parsed = parse_addresses([
            "0x1234567890123456789012345678901234567890",
            "not-an-address",
            " 0xd8da6bf26964af9d7eed9e03e53415d37aa96045 ",
        ]);
        assert_eq!(parsed.len(), 2);
        assert_eq!(
            parsed[1].to_checksum(None),
            "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"
        );
    }

    #[test]
    fn test_non_empty_accounts() {
        assert_eq!(non_empty(vec![]), Err(WalletError::NoAccount));
        let one = parse_addresses(["0x1234567890123456789012345678901234567890"]);
        assert_eq!(non_empty(one.clone()), Ok(one));
    }
}
