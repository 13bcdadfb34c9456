//! Bridge to the injected EIP-1193 wallet provider (`window.ethereum`).
//!
//! SYSTEM CONTEXT
//! ==============
//! The wallet is treated as an opaque capability: this module only requests
//! accounts, reads the chain id, and asks the wallet to switch chains. All
//! failures come back as display strings for `WalletState::error`.

#![allow(clippy::unused_async)]

#[cfg(feature = "hydrate")]
use wasm_bindgen::{JsCast as _, JsValue};

#[cfg(feature = "hydrate")]
use crate::state::wallet::{chain_id_hex, parse_chain_id};
use crate::state::wallet::METIS_CHAIN_ID;

#[cfg(feature = "hydrate")]
fn js_error(value: &JsValue) -> String {
    js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| value.as_string())
        .unwrap_or_else(|| "wallet request failed".to_owned())
}

#[cfg(feature = "hydrate")]
async fn request(method: &str, params: Option<JsValue>) -> Result<JsValue, String> {
    let window = web_sys::window().ok_or_else(|| "no window".to_owned())?;
    let ethereum = js_sys::Reflect::get(window.as_ref(), &JsValue::from_str("ethereum")).map_err(|e| js_error(&e))?;
    if ethereum.is_undefined() || ethereum.is_null() {
        return Err("No wallet found. Install MetaMask to connect.".to_owned());
    }
    let request_fn: js_sys::Function = js_sys::Reflect::get(&ethereum, &JsValue::from_str("request"))
        .map_err(|e| js_error(&e))?
        .dyn_into()
        .map_err(|_| "wallet provider has no request method".to_owned())?;

    let args = js_sys::Object::new();
    js_sys::Reflect::set(&args, &JsValue::from_str("method"), &JsValue::from_str(method)).map_err(|e| js_error(&e))?;
    if let Some(params) = params {
        js_sys::Reflect::set(&args, &JsValue::from_str("params"), &params).map_err(|e| js_error(&e))?;
    }

    let promise: js_sys::Promise = request_fn
        .call1(&ethereum, &args)
        .map_err(|e| js_error(&e))?
        .dyn_into()
        .map_err(|_| "wallet request did not return a promise".to_owned())?;
    wasm_bindgen_futures::JsFuture::from(promise).await.map_err(|e| js_error(&e))
}

#[cfg(feature = "hydrate")]
async fn chain_id() -> Result<Option<u64>, String> {
    let raw = request("eth_chainId", None).await?;
    Ok(raw.as_string().as_deref().and_then(parse_chain_id))
}

#[cfg(feature = "hydrate")]
fn first_account(value: &JsValue) -> Option<String> {
    js_sys::Array::from(value).get(0).as_string()
}

/// Prompt the wallet for account access.
///
/// # Errors
///
/// Returns a display string if no provider is injected or the user rejects.
pub async fn connect() -> Result<(String, Option<u64>), String> {
    #[cfg(feature = "hydrate")]
    {
        let accounts = request("eth_requestAccounts", None).await?;
        let account = first_account(&accounts).ok_or_else(|| "wallet returned no accounts".to_owned())?;
        Ok((account, chain_id().await?))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("wallet unavailable on server".to_owned())
    }
}

/// Already-authorized account, without prompting. `None` if not connected.
///
/// # Errors
///
/// Returns a display string if the provider call fails.
pub async fn current() -> Result<Option<(String, Option<u64>)>, String> {
    #[cfg(feature = "hydrate")]
    {
        let accounts = request("eth_accounts", None).await?;
        match first_account(&accounts) {
            Some(account) => Ok(Some((account, chain_id().await?))),
            None => Ok(None),
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Ok(None)
    }
}

/// Ask the wallet to switch to Metis mainnet; returns the resulting chain id.
///
/// # Errors
///
/// Returns a display string if the wallet refuses or lacks the chain.
pub async fn switch_to_metis() -> Result<Option<u64>, String> {
    #[cfg(feature = "hydrate")]
    {
        let param = js_sys::Object::new();
        js_sys::Reflect::set(
            &param,
            &JsValue::from_str("chainId"),
            &JsValue::from_str(&chain_id_hex(METIS_CHAIN_ID)),
        )
        .map_err(|e| js_error(&e))?;
        let params = js_sys::Array::of1(&param);
        request("wallet_switchEthereumChain", Some(params.into())).await?;
        chain_id().await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = METIS_CHAIN_ID;
        Err("wallet unavailable on server".to_owned())
    }
}
