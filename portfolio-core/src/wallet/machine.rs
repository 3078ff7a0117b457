use thiserror::Error;

use super::format::{network_name, Balance};
use super::provider::ErrorCategory;
use crate::site::notify::Notification;

pub const DEMO_ACCOUNT: &str = "0x742d35Cc6634C0532925a3b8D4C9db96C4b4d8b6";
pub const DEMO_NETWORK: &str = "Ethereum Mainnet (Demo)";
const DEMO_BALANCE: &str = "2.8473 ETH";
const DEMO_BALANCE_USD: &str = "($8,123.45 USD)";

pub const MSG_NOT_FOUND: &str = "MetaMask not found. Please install MetaMask extension.";
pub const MSG_NOT_DETECTED: &str = "MetaMask not detected. Please install MetaMask extension.";
pub const MSG_UNHEALTHY: &str = "MetaMask has issues. Using Demo Mode instead!";
pub const MSG_CONNECTED: &str = "Wallet connected successfully!";
pub const MSG_NO_ACCOUNTS: &str = "No accounts found. Please unlock MetaMask.";
pub const MSG_REJECTED: &str = "Connection request rejected. Try Demo Mode instead!";
pub const MSG_FAILED: &str = "Connection failed. Try Demo Mode instead!";
pub const MSG_DEMO_CONNECTED: &str = "Demo wallet connected! (Not a real wallet)";
pub const MSG_DISCONNECTED: &str = "Wallet disconnected";
pub const MSG_DEMO_ENDED: &str = "Demo session ended. Connect real wallet for full functionality.";
pub const MSG_ACCOUNT_SWITCHED: &str = "Account switched";

/// What the main wallet button does next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CallToAction {
    #[default]
    Connect,
    TryDemo,
}

impl CallToAction {
    pub fn label(self) -> &'static str {
        match self {
            CallToAction::Connect => "Connect Wallet",
            CallToAction::TryDemo => "Try Demo Mode",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectMode {
    Provider,
    Demo,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub account: String,
    pub balance: Option<Balance>,
    pub network: Option<String>,
}

impl Session {
    fn pending(account: String) -> Self {
        Self {
            account,
            balance: None,
            network: None,
        }
    }

    fn demo() -> Self {
        Self {
            account: DEMO_ACCOUNT.to_string(),
            balance: Some(Balance {
                amount: DEMO_BALANCE.to_string(),
                usd: Some(DEMO_BALANCE_USD.to_string()),
            }),
            network: Some(DEMO_NETWORK.to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalletState {
    Disconnected { cta: CallToAction },
    Connecting { mode: ConnectMode },
    Connected(Session),
    DemoConnected(Session),
}

impl Default for WalletState {
    fn default() -> Self {
        WalletState::Disconnected {
            cta: CallToAction::Connect,
        }
    }
}

impl WalletState {
    pub fn name(&self) -> &'static str {
        match self {
            WalletState::Disconnected { .. } => "disconnected",
            WalletState::Connecting { .. } => "connecting",
            WalletState::Connected(_) => "connected",
            WalletState::DemoConnected(_) => "demo-connected",
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            WalletState::Connected(session) | WalletState::DemoConnected(session) => Some(session),
            _ => None,
        }
    }

    /// Label for the main wallet button.
    pub fn button_label(&self) -> &'static str {
        match self {
            WalletState::Disconnected { cta } => cta.label(),
            WalletState::Connecting {
                mode: ConnectMode::Provider,
            } => "Connecting...",
            WalletState::Connecting {
                mode: ConnectMode::Demo,
            } => "Connecting Demo...",
            WalletState::Connected(_) => "Connected",
            WalletState::DemoConnected(_) => "Disconnect Demo",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalletEvent {
    /// Main button pressed while it offers a real connection.
    ConnectRequested { provider_present: bool },
    /// The page-load check found no injected provider.
    ProviderMissing,
    DemoRequested,
    HealthCheckFailed,
    AccountsResolved(Vec<String>),
    ConnectFailed(ErrorCategory),
    DemoReady,
    BalanceLoaded { account: String, balance: Balance },
    NetworkLoaded(String),
    AccountsChanged(Vec<String>),
    ChainChanged(String),
    Disconnect,
    DemoExpired { generation: u64 },
}

impl WalletEvent {
    pub fn name(&self) -> &'static str {
        match self {
            WalletEvent::ConnectRequested { .. } => "connect-requested",
            WalletEvent::ProviderMissing => "provider-missing",
            WalletEvent::DemoRequested => "demo-requested",
            WalletEvent::HealthCheckFailed => "health-check-failed",
            WalletEvent::AccountsResolved(_) => "accounts-resolved",
            WalletEvent::ConnectFailed(_) => "connect-failed",
            WalletEvent::DemoReady => "demo-ready",
            WalletEvent::BalanceLoaded { .. } => "balance-loaded",
            WalletEvent::NetworkLoaded(_) => "network-loaded",
            WalletEvent::AccountsChanged(_) => "accounts-changed",
            WalletEvent::ChainChanged(_) => "chain-changed",
            WalletEvent::Disconnect => "disconnect",
            WalletEvent::DemoExpired { .. } => "demo-expired",
        }
    }
}

/// Work the driver performs after a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalletEffect {
    ShowInstallGuide,
    FetchBalance { account: String },
    FetchNetwork,
    RegisterListeners,
    ScheduleDemoExpiry { generation: u64 },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transition {
    pub notices: Vec<Notification>,
    pub effects: Vec<WalletEffect>,
}

impl Transition {
    fn notice(notice: Notification) -> Self {
        Self {
            notices: vec![notice],
            effects: Vec::new(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("a connection attempt is already in progress")]
    Busy,
    #[error("{event} is not valid while {state}")]
    Invalid {
        event: &'static str,
        state: &'static str,
    },
    #[error("demo session {0} already ended")]
    StaleDemoTimer(u64),
    #[error("balance for {0} arrived after the account changed")]
    StaleBalance(String),
}

/// Connection state plus the bookkeeping that outlives a single session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WalletMachine {
    state: WalletState,
    listeners_registered: bool,
    demo_generation: u64,
}

impl WalletMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WalletState {
        &self.state
    }

    /// Set exactly while an attempt is in flight.
    pub fn busy(&self) -> bool {
        matches!(self.state, WalletState::Connecting { .. })
    }

    pub fn call_to_action(&self) -> Option<CallToAction> {
        match self.state {
            WalletState::Disconnected { cta } => Some(cta),
            _ => None,
        }
    }

    /// Applies `event`. Rejected events leave the machine untouched.
    pub fn apply(&mut self, event: WalletEvent) -> Result<Transition, TransitionError> {
        let event_name = event.name();
        let current = std::mem::take(&mut self.state);
        let from = current.name();
        match self.step(current, event) {
            Ok((next, transition)) => {
                tracing::debug!(event = event_name, from, to = next.name(), "wallet.transition");
                self.state = next;
                Ok(transition)
            }
            Err((unchanged, error)) => {
                tracing::debug!(event = event_name, state = from, %error, "wallet.rejected");
                self.state = unchanged;
                Err(error)
            }
        }
    }

    fn step(
        &mut self,
        state: WalletState,
        event: WalletEvent,
    ) -> Result<(WalletState, Transition), (WalletState, TransitionError)> {
        use WalletState::{Connected, Connecting, DemoConnected, Disconnected};

        let disconnected = |cta| Disconnected { cta };

        match (state, event) {
            (Disconnected { .. }, WalletEvent::ConnectRequested { provider_present: false }) => Ok((
                disconnected(CallToAction::TryDemo),
                Transition {
                    notices: vec![Notification::error(MSG_NOT_FOUND)],
                    effects: vec![WalletEffect::ShowInstallGuide],
                },
            )),
            (Disconnected { .. }, WalletEvent::ConnectRequested { provider_present: true }) => Ok((
                Connecting {
                    mode: ConnectMode::Provider,
                },
                Transition::default(),
            )),
            (Disconnected { .. }, WalletEvent::ProviderMissing) => Ok((
                disconnected(CallToAction::TryDemo),
                Transition::notice(Notification::error(MSG_NOT_DETECTED)),
            )),
            (Disconnected { .. }, WalletEvent::DemoRequested) => Ok((
                Connecting {
                    mode: ConnectMode::Demo,
                },
                Transition::default(),
            )),
            (
                Connecting {
                    mode: ConnectMode::Provider,
                },
                WalletEvent::HealthCheckFailed,
            ) => Ok((
                disconnected(CallToAction::TryDemo),
                Transition::notice(Notification::info(MSG_UNHEALTHY)),
            )),
            (
                Connecting {
                    mode: ConnectMode::Provider,
                },
                WalletEvent::AccountsResolved(accounts),
            ) => {
                let Some(account) = accounts.into_iter().next() else {
                    return Ok((
                        disconnected(CallToAction::Connect),
                        Transition::notice(Notification::warning(MSG_NO_ACCOUNTS)),
                    ));
                };
                let mut effects = vec![
                    WalletEffect::FetchBalance {
                        account: account.clone(),
                    },
                    WalletEffect::FetchNetwork,
                ];
                if !self.listeners_registered {
                    self.listeners_registered = true;
                    effects.push(WalletEffect::RegisterListeners);
                }
                Ok((
                    Connected(Session::pending(account)),
                    Transition {
                        notices: vec![Notification::success(MSG_CONNECTED)],
                        effects,
                    },
                ))
            }
            (
                Connecting {
                    mode: ConnectMode::Provider,
                },
                WalletEvent::ConnectFailed(category),
            ) => {
                let message = match category {
                    ErrorCategory::Rejected => MSG_REJECTED,
                    _ => MSG_FAILED,
                };
                Ok((
                    disconnected(CallToAction::TryDemo),
                    Transition::notice(Notification::warning(message)),
                ))
            }
            (
                Connecting {
                    mode: ConnectMode::Demo,
                },
                WalletEvent::DemoReady,
            ) => {
                self.demo_generation += 1;
                Ok((
                    DemoConnected(Session::demo()),
                    Transition {
                        notices: vec![Notification::success(MSG_DEMO_CONNECTED)],
                        effects: vec![WalletEffect::ScheduleDemoExpiry {
                            generation: self.demo_generation,
                        }],
                    },
                ))
            }
            (Connected(session), WalletEvent::BalanceLoaded { account, .. }) if session.account != account => {
                Err((Connected(session), TransitionError::StaleBalance(account)))
            }
            (Connected(mut session), WalletEvent::BalanceLoaded { balance, .. }) => {
                session.balance = Some(balance);
                Ok((Connected(session), Transition::default()))
            }
            (Connected(mut session), WalletEvent::NetworkLoaded(network)) => {
                session.network = Some(network);
                Ok((Connected(session), Transition::default()))
            }
            (Connected(mut session), WalletEvent::AccountsChanged(accounts)) => match accounts.into_iter().next() {
                Some(account) => {
                    session.account = account.clone();
                    session.balance = None;
                    Ok((
                        Connected(session),
                        Transition {
                            notices: vec![Notification::info(MSG_ACCOUNT_SWITCHED)],
                            effects: vec![WalletEffect::FetchBalance { account }],
                        },
                    ))
                }
                None => Ok((
                    disconnected(CallToAction::Connect),
                    Transition::notice(Notification::info(MSG_DISCONNECTED)),
                )),
            },
            (Connected(mut session), WalletEvent::ChainChanged(chain_id)) => {
                let network = network_name(&chain_id);
                let notice = Notification::info(format!("Network switched to {network}"));
                session.network = Some(network);
                Ok((Connected(session), Transition::notice(notice)))
            }
            (Connected(_) | DemoConnected(_), WalletEvent::Disconnect) => Ok((
                disconnected(CallToAction::Connect),
                Transition::notice(Notification::info(MSG_DISCONNECTED)),
            )),
            (DemoConnected(_), WalletEvent::DemoExpired { generation }) if generation == self.demo_generation => {
                Ok((
                    disconnected(CallToAction::Connect),
                    Transition {
                        notices: vec![
                            Notification::info(MSG_DISCONNECTED),
                            Notification::info(MSG_DEMO_ENDED),
                        ],
                        effects: Vec::new(),
                    },
                ))
            }
            (state, WalletEvent::DemoExpired { generation }) => {
                Err((state, TransitionError::StaleDemoTimer(generation)))
            }
            (state, event) => {
                let error = rejection(&state, &event);
                Err((state, error))
            }
        }
    }
}

fn rejection(state: &WalletState, event: &WalletEvent) -> TransitionError {
    if matches!(state, WalletState::Connecting { .. }) {
        return TransitionError::Busy;
    }
    TransitionError::Invalid {
        event: event.name(),
        state: state.name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn connected(account: &str) -> WalletMachine {
        let mut machine = WalletMachine::new();
        machine
            .apply(WalletEvent::ConnectRequested { provider_present: true })
            .unwrap();
        machine
            .apply(WalletEvent::AccountsResolved(vec![account.to_string()]))
            .unwrap();
        machine
    }

    #[test]
    fn missing_provider_never_enters_connecting() {
        let mut machine = WalletMachine::new();
        let transition = machine
            .apply(WalletEvent::ConnectRequested { provider_present: false })
            .unwrap();
        assert_eq!(
            machine.state(),
            &WalletState::Disconnected {
                cta: CallToAction::TryDemo
            }
        );
        assert!(!machine.busy());
        assert_eq!(transition.notices, vec![Notification::error(MSG_NOT_FOUND)]);
        assert_eq!(transition.effects, vec![WalletEffect::ShowInstallGuide]);
    }

    #[test]
    fn second_connect_while_busy_is_rejected() {
        let mut machine = WalletMachine::new();
        machine
            .apply(WalletEvent::ConnectRequested { provider_present: true })
            .unwrap();
        assert!(machine.busy());
        let before = machine.clone();
        assert_eq!(
            machine.apply(WalletEvent::ConnectRequested { provider_present: true }),
            Err(TransitionError::Busy)
        );
        assert_eq!(machine.apply(WalletEvent::DemoRequested), Err(TransitionError::Busy));
        assert_eq!(machine, before);
    }

    #[test]
    fn successful_connect_requests_details_and_listeners_once() {
        let mut machine = WalletMachine::new();
        machine
            .apply(WalletEvent::ConnectRequested { provider_present: true })
            .unwrap();
        let transition = machine
            .apply(WalletEvent::AccountsResolved(vec!["0xabc".into(), "0xdef".into()]))
            .unwrap();
        assert_eq!(
            transition.effects,
            vec![
                WalletEffect::FetchBalance {
                    account: "0xabc".into()
                },
                WalletEffect::FetchNetwork,
                WalletEffect::RegisterListeners,
            ]
        );
        assert_eq!(machine.state().session().map(|s| s.account.as_str()), Some("0xabc"));

        machine.apply(WalletEvent::Disconnect).unwrap();
        machine
            .apply(WalletEvent::ConnectRequested { provider_present: true })
            .unwrap();
        let again = machine
            .apply(WalletEvent::AccountsResolved(vec!["0xabc".into()]))
            .unwrap();
        assert!(!again.effects.contains(&WalletEffect::RegisterListeners));
    }

    #[test]
    fn empty_accounts_restore_connect_action() {
        let mut machine = WalletMachine::new();
        machine
            .apply(WalletEvent::ConnectRequested { provider_present: true })
            .unwrap();
        let transition = machine.apply(WalletEvent::AccountsResolved(vec![])).unwrap();
        assert_eq!(machine.call_to_action(), Some(CallToAction::Connect));
        assert_eq!(transition.notices, vec![Notification::warning(MSG_NO_ACCOUNTS)]);
    }

    #[test]
    fn rejection_and_failure_offer_demo_with_distinct_messages() {
        for (category, message) in [
            (ErrorCategory::Rejected, MSG_REJECTED),
            (ErrorCategory::Timeout, MSG_FAILED),
            (ErrorCategory::Internal, MSG_FAILED),
        ] {
            let mut machine = WalletMachine::new();
            machine
                .apply(WalletEvent::ConnectRequested { provider_present: true })
                .unwrap();
            let transition = machine.apply(WalletEvent::ConnectFailed(category)).unwrap();
            assert_eq!(machine.call_to_action(), Some(CallToAction::TryDemo));
            assert!(!machine.busy());
            assert_eq!(transition.notices[0].message, message);
        }
    }

    #[test]
    fn demo_expiry_ignores_stale_timers() {
        let mut machine = WalletMachine::new();
        machine.apply(WalletEvent::DemoRequested).unwrap();
        let first = machine.apply(WalletEvent::DemoReady).unwrap();
        assert_eq!(first.effects, vec![WalletEffect::ScheduleDemoExpiry { generation: 1 }]);
        assert_eq!(machine.state().button_label(), "Disconnect Demo");

        machine.apply(WalletEvent::Disconnect).unwrap();
        machine.apply(WalletEvent::DemoRequested).unwrap();
        machine.apply(WalletEvent::DemoReady).unwrap();

        assert_eq!(
            machine.apply(WalletEvent::DemoExpired { generation: 1 }),
            Err(TransitionError::StaleDemoTimer(1))
        );
        assert!(matches!(machine.state(), WalletState::DemoConnected(_)));

        let ended = machine.apply(WalletEvent::DemoExpired { generation: 2 }).unwrap();
        assert_eq!(ended.notices[1].message, MSG_DEMO_ENDED);
        assert_eq!(machine.call_to_action(), Some(CallToAction::Connect));
    }

    #[test]
    fn listener_events_update_session() {
        let mut machine = connected("0xabc");
        let switched = machine
            .apply(WalletEvent::AccountsChanged(vec!["0x999".into()]))
            .unwrap();
        assert_eq!(switched.notices[0].message, MSG_ACCOUNT_SWITCHED);

        assert_eq!(
            machine.apply(WalletEvent::BalanceLoaded {
                account: "0xabc".into(),
                balance: Balance::unavailable(),
            }),
            Err(TransitionError::StaleBalance("0xabc".into()))
        );

        let chain = machine.apply(WalletEvent::ChainChanged("0x89".into())).unwrap();
        assert_eq!(chain.notices[0].message, "Network switched to Polygon Mainnet");
        assert_eq!(
            machine.state().session().and_then(|s| s.network.as_deref()),
            Some("Polygon Mainnet")
        );

        machine.apply(WalletEvent::AccountsChanged(vec![])).unwrap();
        assert_eq!(machine.call_to_action(), Some(CallToAction::Connect));
    }

    #[test]
    fn illegal_pairs_leave_state_untouched() {
        let mut machine = WalletMachine::new();
        let before = machine.clone();
        assert_eq!(
            machine.apply(WalletEvent::Disconnect),
            Err(TransitionError::Invalid {
                event: "disconnect",
                state: "disconnected"
            })
        );
        assert!(machine.apply(WalletEvent::DemoReady).is_err());
        assert!(machine.apply(WalletEvent::ChainChanged("0x1".into())).is_err());
        assert_eq!(machine, before);
    }
}
