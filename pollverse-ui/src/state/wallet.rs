//! Injected Wallet
//!
//! `WalletProvider` over the EIP-1193 object at `window.ethereum`.

use async_trait::async_trait;
use js_sys::{Array, Function, Object, Promise, Reflect, JSON};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use pollverse::chain::wallet::parse_accounts;
use pollverse::chain::{
    ListenerRegistry, RpcError, WalletEvent, WalletListener, WalletProvider, WalletSubscription,
};

/// JSON-RPC "internal error", used when the wallet throws something unexpected
const INTERNAL_ERROR: i64 = -32603;

const ACCOUNTS_CHANGED: &str = "accountsChanged";
const CHAIN_CHANGED: &str = "chainChanged";

/// JS callbacks registered with the wallet while anyone is subscribed
struct EventBridge {
    accounts: Closure<dyn FnMut(JsValue)>,
    chain: Closure<dyn FnMut(JsValue)>,
}

/// The browser wallet extension
pub struct BrowserWallet {
    ethereum: JsValue,
    listeners: ListenerRegistry,
    bridge: Rc<RefCell<Option<EventBridge>>>,
}

impl BrowserWallet {
    /// The injected wallet, or `None` when no extension is installed
    pub fn detect() -> Option<Rc<Self>> {
        let window = web_sys::window()?;
        let ethereum = Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
        if ethereum.is_undefined() || ethereum.is_null() {
            tracing::info!("No injected wallet found");
            return None;
        }

        Some(Rc::new(Self {
            ethereum,
            listeners: ListenerRegistry::new(),
            bridge: Rc::new(RefCell::new(None)),
        }))
    }

    fn attach(&self) {
        if self.bridge.borrow().is_some() {
            return;
        }

        let listeners = self.listeners.clone();
        let accounts = Closure::wrap(Box::new(move |value: JsValue| {
            match js_to_json(&value).and_then(|json| parse_accounts(&json).map_err(internal)) {
                Ok(accounts) => listeners.emit(&WalletEvent::AccountsChanged(accounts)),
                Err(e) => tracing::warn!(error = %e, "Ignoring malformed accountsChanged payload"),
            }
        }) as Box<dyn FnMut(JsValue)>);

        let listeners = self.listeners.clone();
        let chain = Closure::wrap(Box::new(move |value: JsValue| {
            let chain_id = value.as_string().unwrap_or_default();
            listeners.emit(&WalletEvent::ChainChanged(chain_id));
        }) as Box<dyn FnMut(JsValue)>);

        let registered = invoke(&self.ethereum, "on", ACCOUNTS_CHANGED, accounts.as_ref())
            .and_then(|_| invoke(&self.ethereum, "on", CHAIN_CHANGED, chain.as_ref()));
        if let Err(e) = registered {
            tracing::warn!(error = ?e, "Wallet does not support event listeners");
        }

        *self.bridge.borrow_mut() = Some(EventBridge { accounts, chain });
    }
}

fn detach(ethereum: &JsValue, bridge: &RefCell<Option<EventBridge>>) {
    let Some(bridge) = bridge.borrow_mut().take() else {
        return;
    };

    let removed = invoke(ethereum, "removeListener", ACCOUNTS_CHANGED, bridge.accounts.as_ref())
        .and_then(|_| invoke(ethereum, "removeListener", CHAIN_CHANGED, bridge.chain.as_ref()));
    if let Err(e) = removed {
        tracing::warn!(error = ?e, "Failed to remove wallet listeners");
    }
}

/// Call `target[method](event, callback)`
fn invoke(target: &JsValue, method: &str, event: &str, callback: &JsValue) -> Result<JsValue, JsValue> {
    let function: Function = Reflect::get(target, &JsValue::from_str(method))?.dyn_into()?;
    function.call2(target, &JsValue::from_str(event), callback)
}

fn internal(message: impl Into<String>) -> RpcError {
    RpcError::new(INTERNAL_ERROR, message)
}

fn js_to_json(value: &JsValue) -> Result<serde_json::Value, RpcError> {
    if value.is_undefined() || value.is_null() {
        return Ok(serde_json::Value::Null);
    }

    let text = JSON::stringify(value)
        .map_err(|e| internal(format!("unserializable wallet value: {:?}", e)))?;
    let text: String = text.into();
    serde_json::from_str(&text).map_err(|e| internal(e.to_string()))
}

fn json_to_js(value: &serde_json::Value) -> Result<JsValue, RpcError> {
    JSON::parse(&value.to_string()).map_err(|e| internal(format!("{:?}", e)))
}

/// Wallet errors are JS `Error` objects whose `message` is not enumerable,
/// so the fields are read one by one.
fn rpc_error(err: JsValue) -> RpcError {
    let field = |name: &str| Reflect::get(&err, &JsValue::from_str(name)).unwrap_or(JsValue::UNDEFINED);

    let code = field("code").as_f64().map(|c| c as i64).unwrap_or(INTERNAL_ERROR);
    let message = field("message")
        .as_string()
        .unwrap_or_else(|| format!("{:?}", err));

    let error = RpcError::new(code, message);
    match js_to_json(&field("data")) {
        Ok(serde_json::Value::Null) | Err(_) => error,
        Ok(data) => error.with_data(data),
    }
}

#[async_trait(?Send)]
impl WalletProvider for BrowserWallet {
    async fn request(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, RpcError> {
        tracing::debug!(method, "Wallet request");

        let args = Object::new();
        Reflect::set(&args, &JsValue::from_str("method"), &JsValue::from_str(method))
            .map_err(rpc_error)?;
        if !params.is_null() {
            Reflect::set(&args, &JsValue::from_str("params"), &json_to_js(&params)?)
                .map_err(rpc_error)?;
        }

        let request: Function = Reflect::get(&self.ethereum, &JsValue::from_str("request"))
            .map_err(rpc_error)?
            .dyn_into()
            .map_err(|_| internal("wallet has no request method"))?;
        let promise: Promise = request
            .apply(&self.ethereum, &Array::of1(&args))
            .map_err(rpc_error)?
            .dyn_into()
            .map_err(|_| internal("wallet request did not return a promise"))?;

        let result = JsFuture::from(promise).await.map_err(rpc_error)?;
        js_to_json(&result)
    }

    fn subscribe(&self, listener: WalletListener) -> WalletSubscription {
        self.attach();
        let registration = self.listeners.add(listener);

        let listeners = self.listeners.clone();
        let bridge = Rc::clone(&self.bridge);
        let ethereum = self.ethereum.clone();
        WalletSubscription::new(move || {
            registration.unsubscribe();
            if listeners.is_empty() {
                detach(&ethereum, &bridge);
            }
        })
    }

    async fn delay(&self, duration: Duration) {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        gloo_timers::future::TimeoutFuture::new(millis).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_rejection_error_is_read_from_js_error() {
        let err = js_sys::Error::new("User rejected the request.");
        Reflect::set(&err, &JsValue::from_str("code"), &JsValue::from_f64(4001.0)).unwrap();

        let rpc = rpc_error(err.into());
        assert!(rpc.is_user_rejection());
        assert_eq!(rpc.message, "User rejected the request.");
        assert!(rpc.data.is_none());
    }

    #[wasm_bindgen_test]
    fn test_revert_data_is_kept() {
        let err = js_sys::Error::new("execution reverted");
        Reflect::set(&err, &JsValue::from_str("code"), &JsValue::from_f64(3.0)).unwrap();
        Reflect::set(&err, &JsValue::from_str("data"), &JsValue::from_str("0x08c379a0")).unwrap();

        let rpc = rpc_error(err.into());
        assert_eq!(rpc.code, 3);
        assert_eq!(rpc.data, Some(serde_json::json!("0x08c379a0")));
    }

    #[wasm_bindgen_test]
    fn test_json_conversion() {
        let value = serde_json::json!([{"to": "0x01", "data": "0x"}, "latest"]);
        let js = json_to_js(&value).unwrap();
        assert_eq!(js_to_json(&js).unwrap(), value);
        assert_eq!(js_to_json(&JsValue::UNDEFINED).unwrap(), serde_json::Value::Null);
    }
}
