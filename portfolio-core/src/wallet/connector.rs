use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::format::{format_balance, network_name, Balance, UNKNOWN_NETWORK};
use super::machine::{CallToAction, WalletEffect, WalletEvent, WalletMachine, WalletState};
use super::provider::{
    parse_accounts, parse_string, with_timeout, ErrorCategory, ProviderError, ProviderNotification, Runtime,
    WalletProvider,
};
use crate::config::WalletTimings;
use crate::site::notify::Notification;

/// What the view needs after every change: the new state plus anything to
/// announce.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalletUpdate {
    pub state: WalletState,
    pub busy: bool,
    pub notices: Vec<Notification>,
    pub show_install_guide: bool,
}

pub type WalletObserver = Rc<dyn Fn(&WalletUpdate)>;

/// Result of the quiet check run shortly after page load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderStatus {
    NotDetected,
    Ready,
    Locked,
    Unresponsive,
}

impl ProviderStatus {
    pub fn notice(self) -> Option<Notification> {
        match self {
            ProviderStatus::Ready => Some(Notification::success(
                "MetaMask is ready! Click \"Connect Wallet\" to connect.",
            )),
            ProviderStatus::Locked => Some(Notification::warning("MetaMask is locked. Please unlock MetaMask.")),
            // The machine already announces a missing provider.
            ProviderStatus::NotDetected | ProviderStatus::Unresponsive => None,
        }
    }
}

struct Inner {
    machine: RefCell<WalletMachine>,
    provider: Option<Rc<dyn WalletProvider>>,
    runtime: Rc<dyn Runtime>,
    timings: WalletTimings,
    observer: RefCell<Option<WalletObserver>>,
}

/// Drives [`WalletMachine`] against a provider: issues the requests, races
/// them against timers and feeds the outcomes back as events.
#[derive(Clone)]
pub struct WalletConnector {
    inner: Rc<Inner>,
}

impl WalletConnector {
    pub fn new(provider: Option<Rc<dyn WalletProvider>>, runtime: Rc<dyn Runtime>, timings: WalletTimings) -> Self {
        Self {
            inner: Rc::new(Inner {
                machine: RefCell::new(WalletMachine::new()),
                provider,
                runtime,
                timings,
                observer: RefCell::new(None),
            }),
        }
    }

    pub fn set_observer(&self, observer: impl Fn(&WalletUpdate) + 'static) {
        *self.inner.observer.borrow_mut() = Some(Rc::new(observer));
    }

    pub fn state(&self) -> WalletState {
        self.inner.machine.borrow().state().clone()
    }

    pub fn busy(&self) -> bool {
        self.inner.machine.borrow().busy()
    }

    pub fn has_provider(&self) -> bool {
        self.inner.provider.is_some()
    }

    /// Handles a press of the main wallet button.
    pub fn activate(&self) {
        let state = self.state();
        match state {
            WalletState::Disconnected {
                cta: CallToAction::Connect,
            } => {
                let connector = self.clone();
                self.inner.runtime.spawn(Box::pin(async move { connector.connect().await }));
            }
            WalletState::Disconnected {
                cta: CallToAction::TryDemo,
            } => {
                let connector = self.clone();
                self.inner
                    .runtime
                    .spawn(Box::pin(async move { connector.connect_demo().await }));
            }
            WalletState::Connected(_) | WalletState::DemoConnected(_) => self.disconnect(),
            WalletState::Connecting { .. } => tracing::debug!("wallet.activate_ignored_while_busy"),
        }
    }

    pub async fn connect(&self) {
        let provider_present = self.has_provider();
        if !self.dispatch(WalletEvent::ConnectRequested { provider_present }) {
            return;
        }
        let Some(provider) = self.inner.provider.clone() else {
            return;
        };

        let runtime = self.inner.runtime.as_ref();
        let check = with_timeout(
            runtime,
            "eth_accounts",
            self.inner.timings.health_check(),
            provider.request("eth_accounts", Vec::new()),
        )
        .await;
        if let Err(error) = check {
            tracing::info!(%error, "wallet.health_check_failed");
            self.dispatch(WalletEvent::HealthCheckFailed);
            return;
        }

        let event = match self.request_accounts(provider.as_ref()).await {
            Ok(accounts) => WalletEvent::AccountsResolved(accounts),
            Err(error) => {
                tracing::info!(%error, category = ?error.category(), "wallet.connect_failed");
                WalletEvent::ConnectFailed(error.category())
            }
        };
        self.dispatch(event);
    }

    /// `eth_requestAccounts`, falling back to `eth_accounts` unless the user
    /// said no or the extension itself is broken.
    async fn request_accounts(&self, provider: &dyn WalletProvider) -> Result<Vec<String>, ProviderError> {
        let runtime = self.inner.runtime.as_ref();
        let timings = &self.inner.timings;

        let primary = with_timeout(
            runtime,
            "eth_requestAccounts",
            timings.request_accounts(),
            provider.request("eth_requestAccounts", Vec::new()),
        )
        .await
        .and_then(|value| parse_accounts("eth_requestAccounts", &value));

        match primary {
            Ok(accounts) => Ok(accounts),
            Err(error) if matches!(error.category(), ErrorCategory::Rejected | ErrorCategory::Internal) => Err(error),
            Err(error) => {
                tracing::debug!(%error, "wallet.request_accounts_fallback");
                with_timeout(
                    runtime,
                    "eth_accounts",
                    timings.accounts_fallback(),
                    provider.request("eth_accounts", Vec::new()),
                )
                .await
                .and_then(|value| parse_accounts("eth_accounts", &value))
            }
        }
    }

    pub async fn connect_demo(&self) {
        if !self.dispatch(WalletEvent::DemoRequested) {
            return;
        }
        self.inner.runtime.sleep(self.inner.timings.demo_connect()).await;
        self.dispatch(WalletEvent::DemoReady);
    }

    pub fn disconnect(&self) {
        self.dispatch(WalletEvent::Disconnect);
    }

    /// Page-load check. Only a missing provider changes state; the other
    /// outcomes are announced (or logged) and leave the button alone.
    pub async fn preflight(&self) -> ProviderStatus {
        let Some(provider) = self.inner.provider.clone() else {
            self.dispatch(WalletEvent::ProviderMissing);
            return ProviderStatus::NotDetected;
        };

        let check = with_timeout(
            self.inner.runtime.as_ref(),
            "eth_accounts",
            self.inner.timings.preflight_check(),
            provider.request("eth_accounts", Vec::new()),
        )
        .await
        .and_then(|value| parse_accounts("eth_accounts", &value));

        let status = match check {
            Ok(accounts) if !accounts.is_empty() => ProviderStatus::Ready,
            Ok(_) => ProviderStatus::Locked,
            Err(error) => {
                tracing::debug!(%error, "wallet.preflight_failed");
                ProviderStatus::Unresponsive
            }
        };
        if let Some(notice) = status.notice() {
            self.publish(vec![notice], false);
        }
        status
    }

    /// Applies `event` and runs its effects. Returns whether it was accepted.
    fn dispatch(&self, event: WalletEvent) -> bool {
        let transition = match self.inner.machine.borrow_mut().apply(event) {
            Ok(transition) => transition,
            Err(_) => return false,
        };

        let show_install_guide = transition.effects.contains(&WalletEffect::ShowInstallGuide);
        self.publish(transition.notices, show_install_guide);
        for effect in transition.effects {
            self.run_effect(effect);
        }
        true
    }

    fn publish(&self, notices: Vec<Notification>, show_install_guide: bool) {
        let update = {
            let machine = self.inner.machine.borrow();
            WalletUpdate {
                state: machine.state().clone(),
                busy: machine.busy(),
                notices,
                show_install_guide,
            }
        };
        let observer = self.inner.observer.borrow().clone();
        if let Some(observer) = observer {
            observer(&update);
        }
    }

    fn run_effect(&self, effect: WalletEffect) {
        let runtime = &self.inner.runtime;
        match effect {
            WalletEffect::ShowInstallGuide => {}
            WalletEffect::FetchBalance { account } => {
                let Some(provider) = self.inner.provider.clone() else {
                    return;
                };
                let connector = self.clone();
                let limit = self.inner.timings.lookup();
                runtime.spawn(Box::pin(async move {
                    let runtime = connector.inner.runtime.as_ref();
                    let lookup = with_timeout(
                        runtime,
                        "eth_getBalance",
                        limit,
                        provider.request("eth_getBalance", vec![account.clone().into(), "latest".into()]),
                    )
                    .await
                    .and_then(|value| parse_string("eth_getBalance", &value));
                    let balance = match lookup {
                        Ok(hex) => format_balance(&hex).unwrap_or_else(Balance::unavailable),
                        Err(error) => {
                            tracing::debug!(%error, "wallet.balance_failed");
                            Balance::unavailable()
                        }
                    };
                    connector.dispatch(WalletEvent::BalanceLoaded { account, balance });
                }));
            }
            WalletEffect::FetchNetwork => {
                let Some(provider) = self.inner.provider.clone() else {
                    return;
                };
                let connector = self.clone();
                let limit = self.inner.timings.lookup();
                runtime.spawn(Box::pin(async move {
                    let runtime = connector.inner.runtime.as_ref();
                    let network = match with_timeout(
                        runtime,
                        "eth_chainId",
                        limit,
                        provider.request("eth_chainId", Vec::new()),
                    )
                    .await
                    .and_then(|value| parse_string("eth_chainId", &value))
                    {
                        Ok(chain_id) => network_name(&chain_id),
                        Err(error) => {
                            tracing::debug!(%error, "wallet.chain_id_failed");
                            UNKNOWN_NETWORK.to_string()
                        }
                    };
                    connector.dispatch(WalletEvent::NetworkLoaded(network));
                }));
            }
            WalletEffect::RegisterListeners => {
                let Some(provider) = self.inner.provider.as_ref() else {
                    return;
                };
                let weak: Weak<Inner> = Rc::downgrade(&self.inner);
                provider.subscribe(Rc::new(move |notification: ProviderNotification| {
                    let Some(inner) = weak.upgrade() else {
                        return;
                    };
                    let connector = WalletConnector { inner };
                    let event = match notification {
                        ProviderNotification::AccountsChanged(accounts) => WalletEvent::AccountsChanged(accounts),
                        ProviderNotification::ChainChanged(chain_id) => WalletEvent::ChainChanged(chain_id),
                    };
                    connector.dispatch(event);
                }));
            }
            WalletEffect::ScheduleDemoExpiry { generation } => {
                let connector = self.clone();
                let sleep = runtime.sleep(self.inner.timings.demo_session());
                runtime.spawn(Box::pin(async move {
                    sleep.await;
                    connector.dispatch(WalletEvent::DemoExpired { generation });
                }));
            }
        }
    }
}
