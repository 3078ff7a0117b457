use std::rc::Rc;
use std::time::Duration;

use dioxus::prelude::*;
use futures_util::future::LocalBoxFuture;
use portfolio_core::site::Notification;
use portfolio_core::wallet::{short_address, Runtime, WalletConnector, WalletProvider, WalletState, WalletUpdate};
use portfolio_core::PortfolioConfig;

use crate::hooks::{sleep, spawn_detached};
use crate::notifications::{use_notifier, Notifier};

/// The page-load check waits for the extension to finish injecting itself.
const PREFLIGHT_DELAY: Duration = Duration::from_secs(2);

struct BrowserRuntime;

impl Runtime for BrowserRuntime {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(sleep(duration))
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        spawn_detached(task);
    }
}

#[cfg(target_arch = "wasm32")]
mod injected {
    use async_trait::async_trait;
    use js_sys::{Array, Function, Object, Promise, Reflect, JSON};
    use portfolio_core::wallet::{NotificationListener, ProviderError, ProviderNotification, WalletProvider};
    use serde_json::Value;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    /// `window.ethereum`, driven through EIP-1193 `request` and `on`.
    pub struct InjectedProvider {
        ethereum: JsValue,
    }

    impl InjectedProvider {
        pub fn detect() -> Option<Self> {
            let window = web_sys::window()?;
            let ethereum = Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
            if ethereum.is_undefined() || ethereum.is_null() {
                return None;
            }
            Some(Self { ethereum })
        }

        fn method(&self, name: &str) -> Result<Function, ProviderError> {
            Reflect::get(&self.ethereum, &JsValue::from_str(name))
                .ok()
                .and_then(|value| value.dyn_into::<Function>().ok())
                .ok_or_else(|| ProviderError::Message(format!("provider has no {name}()")))
        }

        fn listen(&self, event: &str, handler: Box<dyn FnMut(JsValue)>) -> Result<(), ProviderError> {
            let on = self.method("on")?;
            let closure = Closure::wrap(handler);
            on.call2(&self.ethereum, &JsValue::from_str(event), closure.as_ref())
                .map_err(provider_error)?;
            // Registered once per page; the provider keeps the callback alive.
            closure.forget();
            Ok(())
        }
    }

    fn provider_error(value: JsValue) -> ProviderError {
        let message = Reflect::get(&value, &JsValue::from_str("message"))
            .ok()
            .and_then(|message| message.as_string())
            .unwrap_or_else(|| format!("{value:?}"));
        match Reflect::get(&value, &JsValue::from_str("code"))
            .ok()
            .and_then(|code| code.as_f64())
        {
            Some(code) => ProviderError::rpc(code as i64, message),
            None => ProviderError::Message(message),
        }
    }

    fn to_js(method: &str, value: &impl serde::Serialize) -> Result<JsValue, ProviderError> {
        let text = serde_json::to_string(value).map_err(|err| ProviderError::payload(method, err.to_string()))?;
        JSON::parse(&text).map_err(provider_error)
    }

    fn from_js(method: &str, value: &JsValue) -> Result<Value, ProviderError> {
        if value.is_undefined() || value.is_null() {
            return Ok(Value::Null);
        }
        let text: String = JSON::stringify(value).map_err(provider_error)?.into();
        serde_json::from_str(&text).map_err(|err| ProviderError::payload(method, err.to_string()))
    }

    #[async_trait(?Send)]
    impl WalletProvider for InjectedProvider {
        async fn request(&self, method: &str, params: Vec<Value>) -> Result<Value, ProviderError> {
            let args = Object::new();
            Reflect::set(&args, &JsValue::from_str("method"), &JsValue::from_str(method)).map_err(provider_error)?;
            Reflect::set(&args, &JsValue::from_str("params"), &to_js(method, &params)?).map_err(provider_error)?;

            let request = self.method("request")?;
            let promise: Promise = request
                .call1(&self.ethereum, &args)
                .map_err(provider_error)?
                .dyn_into()
                .map_err(|_| ProviderError::payload(method, "request() did not return a promise"))?;
            let result = JsFuture::from(promise).await.map_err(provider_error)?;
            from_js(method, &result)
        }

        fn subscribe(&self, listener: NotificationListener) {
            let on_accounts = listener.clone();
            let accounts = self.listen(
                "accountsChanged",
                Box::new(move |payload: JsValue| {
                    let accounts = Array::from(&payload)
                        .iter()
                        .filter_map(|account| account.as_string())
                        .collect();
                    on_accounts(ProviderNotification::AccountsChanged(accounts));
                }),
            );
            let chain = self.listen(
                "chainChanged",
                Box::new(move |payload: JsValue| {
                    if let Some(chain_id) = payload.as_string() {
                        listener(ProviderNotification::ChainChanged(chain_id));
                    }
                }),
            );
            if let Err(error) = accounts.and(chain) {
                tracing::warn!(%error, "wallet.subscribe_failed");
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn detect_provider() -> Option<Rc<dyn WalletProvider>> {
    injected::InjectedProvider::detect().map(|provider| Rc::new(provider) as Rc<dyn WalletProvider>)
}

#[cfg(not(target_arch = "wasm32"))]
fn detect_provider() -> Option<Rc<dyn WalletProvider>> {
    None
}

/// Deep link into the MetaMask app for phones without an injected provider.
#[cfg(target_arch = "wasm32")]
fn mobile_deep_link() -> Option<String> {
    use portfolio_core::wallet::{is_mobile_user_agent, metamask_deep_link};

    let window = web_sys::window()?;
    let agent = window.navigator().user_agent().ok()?;
    if !is_mobile_user_agent(&agent) {
        return None;
    }
    let location = window.location();
    Some(metamask_deep_link(&location.hostname().ok()?, &location.pathname().ok()?))
}

#[cfg(not(target_arch = "wasm32"))]
fn mobile_deep_link() -> Option<String> {
    None
}

#[cfg(target_arch = "wasm32")]
fn copy_to_clipboard(text: String, notifier: Notifier) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let promise = window.navigator().clipboard().write_text(&text);
    spawn_detached(async move {
        match wasm_bindgen_futures::JsFuture::from(promise).await {
            Ok(_) => notifier.show(Notification::success("Address copied to clipboard!")),
            Err(err) => tracing::debug!(?err, "wallet.copy_failed"),
        }
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn copy_to_clipboard(text: String, notifier: Notifier) {
    tracing::debug!(%text, "wallet.copy_unsupported");
    notifier.show(Notification::info(text));
}

#[component]
pub fn WalletPanel() -> Element {
    let config = use_context::<PortfolioConfig>();
    let notifier = use_notifier();
    let state = use_signal(WalletState::default);
    let busy = use_signal(|| false);
    let mut install_guide = use_signal(|| false);
    let deep_link = use_hook(mobile_deep_link);

    let connector = use_hook(move || {
        let connector = WalletConnector::new(detect_provider(), Rc::new(BrowserRuntime), config.wallet.clone());
        connector.set_observer(move |update: &WalletUpdate| {
            let (mut state, mut busy, mut install_guide) = (state, busy, install_guide);
            state.set(update.state.clone());
            busy.set(update.busy);
            if update.show_install_guide {
                install_guide.set(true);
            }
            for notice in &update.notices {
                notifier.show(notice.clone());
            }
        });
        connector
    });

    use_hook({
        let connector = connector.clone();
        move || {
            spawn(async move {
                sleep(PREFLIGHT_DELAY).await;
                let status = connector.preflight().await;
                tracing::debug!(?status, "wallet.preflight");
            })
        }
    });

    let current = state();
    let account = current
        .session()
        .map(|session| session.account.clone())
        .unwrap_or_default();
    let network = current
        .session()
        .and_then(|session| session.network.clone())
        .unwrap_or_else(|| "Loading...".to_string());
    let activate = connector.clone();
    let offer_deep_link = !connector.has_provider() && matches!(current, WalletState::Disconnected { .. });

    rsx! {
        div { class: "wallet-panel",
            div { class: "wallet-actions",
                button {
                    class: "wallet-button wallet-{current.name()}",
                    disabled: busy(),
                    onclick: move |_| activate.activate(),
                    if busy() {
                        i { class: "fas fa-spinner fa-spin" }
                    } else {
                        i { class: "fas fa-wallet" }
                    }
                    " {current.button_label()}"
                }
                if offer_deep_link {
                    if let Some(link) = deep_link.clone() {
                        a { class: "wallet-button secondary", href: "{link}", "Open in MetaMask app" }
                    }
                }
            }
            if let Some(session) = current.session() {
                div { class: "wallet-info",
                    p {
                        span { class: "wallet-label", "Address: " }
                        button {
                            class: "wallet-address",
                            title: "Copy address",
                            onclick: move |_| copy_to_clipboard(account.clone(), notifier),
                            "{short_address(&session.account)}"
                        }
                    }
                    p {
                        span { class: "wallet-label", "Balance: " }
                        if let Some(balance) = &session.balance {
                            span { "{balance}" }
                        } else {
                            span { class: "wallet-muted", "Loading..." }
                        }
                    }
                    p {
                        span { class: "wallet-label", "Network: " }
                        span { "{network}" }
                    }
                    if matches!(current, WalletState::DemoConnected(_)) {
                        p { class: "wallet-muted", "Demo mode: this is not a real wallet." }
                    }
                }
            }
            if install_guide() {
                div { class: "metamask-guide", role: "dialog",
                    h4 { "Install MetaMask" }
                    ol {
                        li {
                            "Visit "
                            a { href: "https://metamask.io", target: "_blank", rel: "noopener", "metamask.io" }
                        }
                        li { "Click \"Download\" and install the extension" }
                        li { "Create or import a wallet" }
                        li { "Refresh this page and try connecting again" }
                    }
                    button { class: "wallet-button secondary", onclick: move |_| install_guide.set(false), "Close" }
                }
            }
        }
    }
}
