use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use portfolio_core::config::WalletTimings;
use portfolio_core::wallet::format::{BALANCE_UNAVAILABLE, UNKNOWN_NETWORK};
use portfolio_core::wallet::machine::{MSG_FAILED, MSG_NOT_FOUND, MSG_REJECTED, MSG_UNHEALTHY};
use portfolio_core::wallet::{
    CallToAction, NotificationListener, ProviderError, ProviderNotification, ProviderStatus, Runtime, WalletConnector,
    WalletProvider, WalletState, WalletUpdate, DEMO_ACCOUNT,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;
use tokio::task::LocalSet;
use tokio::time::{sleep, Instant};

const ACCOUNT: &str = "0xAbC0000000000000000000000000000000000001";
// 1.5 ETH in wei.
const BALANCE_WEI: &str = "0x14d1120d7b160000";

struct TokioRuntime;

impl Runtime for TokioRuntime {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(sleep(duration))
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        tokio::task::spawn_local(task);
    }
}

#[derive(Clone)]
enum Reply {
    Ok(Value),
    Err(ProviderError),
    Delayed(Duration, Value),
    Hang,
}

#[derive(Default)]
struct MockProvider {
    replies: RefCell<HashMap<&'static str, Reply>>,
    /// One-shot replies served before the standing ones.
    queued: RefCell<HashMap<&'static str, VecDeque<Reply>>>,
    calls: RefCell<Vec<String>>,
    listeners: RefCell<Vec<NotificationListener>>,
}

impl MockProvider {
    fn with(replies: &[(&'static str, Reply)]) -> Rc<Self> {
        let provider = Self::default();
        provider.replies.borrow_mut().extend(replies.iter().cloned());
        Rc::new(provider)
    }

    /// Unlocked wallet on mainnet holding 1.5 ETH.
    fn healthy() -> Rc<Self> {
        Self::with(&[
            ("eth_accounts", Reply::Ok(json!([ACCOUNT]))),
            ("eth_requestAccounts", Reply::Ok(json!([ACCOUNT]))),
            ("eth_getBalance", Reply::Ok(json!(BALANCE_WEI))),
            ("eth_chainId", Reply::Ok(json!("0x1"))),
        ])
    }

    fn queue(&self, method: &'static str, reply: Reply) {
        self.queued.borrow_mut().entry(method).or_default().push_back(reply);
    }

    fn calls_to(&self, method: &str) -> usize {
        self.calls.borrow().iter().filter(|call| *call == method).count()
    }

    fn emit(&self, notification: ProviderNotification) {
        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener(notification.clone());
        }
    }
}

#[async_trait(?Send)]
impl WalletProvider for MockProvider {
    async fn request(&self, method: &str, _params: Vec<Value>) -> Result<Value, ProviderError> {
        self.calls.borrow_mut().push(method.to_string());
        let queued = self
            .queued
            .borrow_mut()
            .get_mut(method)
            .and_then(|replies| replies.pop_front());
        let reply = queued.or_else(|| self.replies.borrow().get(method).cloned());
        match reply {
            Some(Reply::Ok(value)) => Ok(value),
            Some(Reply::Err(error)) => Err(error),
            Some(Reply::Delayed(delay, value)) => {
                sleep(delay).await;
                Ok(value)
            }
            Some(Reply::Hang) => std::future::pending().await,
            None => Err(ProviderError::rpc(-32601, format!("method {method} not supported"))),
        }
    }

    fn subscribe(&self, listener: NotificationListener) {
        self.listeners.borrow_mut().push(listener);
    }
}

fn connector(provider: Option<Rc<MockProvider>>) -> (WalletConnector, Rc<RefCell<Vec<WalletUpdate>>>) {
    let provider = provider.map(|provider| provider as Rc<dyn WalletProvider>);
    let connector = WalletConnector::new(provider, Rc::new(TokioRuntime), WalletTimings::default());
    let updates = Rc::new(RefCell::new(Vec::new()));
    let sink = updates.clone();
    connector.set_observer(move |update: &WalletUpdate| sink.borrow_mut().push(update.clone()));
    (connector, updates)
}

fn last_message(updates: &RefCell<Vec<WalletUpdate>>) -> Option<String> {
    updates
        .borrow()
        .iter()
        .flat_map(|update| update.notices.iter())
        .last()
        .map(|notice| notice.message.clone())
}

fn try_demo() -> WalletState {
    WalletState::Disconnected {
        cta: CallToAction::TryDemo,
    }
}

fn ready_to_connect() -> WalletState {
    WalletState::Disconnected {
        cta: CallToAction::Connect,
    }
}

fn assert_elapsed(started: Instant, expected: Duration) {
    let elapsed = started.elapsed();
    assert!(
        elapsed >= expected && elapsed < expected + Duration::from_millis(50),
        "expected ~{expected:?}, got {elapsed:?}"
    );
}

/// Lets spawned balance and network lookups finish.
async fn settle() {
    sleep(Duration::from_millis(10)).await;
}

#[tokio::test(start_paused = true)]
async fn connect_without_provider_offers_demo() {
    LocalSet::new()
        .run_until(async {
            let (connector, updates) = connector(None);
            connector.connect().await;

            assert!(!connector.busy());
            assert_eq!(connector.state(), try_demo());
            let updates = updates.borrow();
            assert!(updates.iter().all(|update| !update.busy));
            assert!(
                updates
                    .iter()
                    .all(|update| !matches!(update.state, WalletState::Connecting { .. }))
            );
            assert!(updates[0].show_install_guide);
            assert_eq!(updates[0].notices[0].message, MSG_NOT_FOUND);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn rapid_connects_issue_a_single_request() {
    LocalSet::new()
        .run_until(async {
            let provider = MockProvider::healthy();
            provider.replies.borrow_mut().insert(
                "eth_requestAccounts",
                Reply::Delayed(Duration::from_millis(200), json!([ACCOUNT])),
            );
            let (connector, _updates) = connector(Some(provider.clone()));

            tokio::join!(connector.connect(), connector.connect());
            settle().await;

            assert_eq!(provider.calls_to("eth_requestAccounts"), 1);
            let state = connector.state();
            let session = state.session().expect("connected session");
            assert_eq!(session.account, ACCOUNT);
            assert_eq!(
                session.balance.as_ref().map(ToString::to_string).as_deref(),
                Some("1.5000 ETH ($4270.98 USD)")
            );
            assert_eq!(session.network.as_deref(), Some("Ethereum Mainnet"));
            assert!(!connector.busy());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn demo_session_expires() {
    LocalSet::new()
        .run_until(async {
            let (connector, updates) = connector(None);
            let started = Instant::now();

            connector.connect_demo().await;
            assert_elapsed(started, Duration::from_millis(1500));
            match connector.state() {
                WalletState::DemoConnected(session) => assert_eq!(session.account, DEMO_ACCOUNT),
                other => panic!("expected demo session, got {other:?}"),
            }

            sleep(Duration::from_secs(29)).await;
            assert!(matches!(connector.state(), WalletState::DemoConnected(_)));

            sleep(Duration::from_secs(2)).await;
            assert_eq!(connector.state(), ready_to_connect());
            assert_eq!(
                last_message(&updates).as_deref(),
                Some("Demo session ended. Connect real wallet for full functionality.")
            );
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn old_demo_timer_does_not_end_a_new_session() {
    LocalSet::new()
        .run_until(async {
            let (connector, _updates) = connector(None);

            connector.connect_demo().await;
            sleep(Duration::from_secs(10)).await;
            connector.disconnect();
            connector.connect_demo().await;

            // First session's timer fires at 31.5 s.
            sleep(Duration::from_secs(25)).await;
            assert!(matches!(connector.state(), WalletState::DemoConnected(_)));

            sleep(Duration::from_secs(7)).await;
            assert_eq!(connector.state(), ready_to_connect());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn rejection_skips_the_fallback() {
    LocalSet::new()
        .run_until(async {
            let provider = MockProvider::with(&[
                ("eth_accounts", Reply::Ok(json!([]))),
                (
                    "eth_requestAccounts",
                    Reply::Err(ProviderError::rpc(4001, "User rejected the request.")),
                ),
            ]);
            let (connector, updates) = connector(Some(provider.clone()));

            connector.connect().await;

            assert_eq!(connector.state(), try_demo());
            assert!(!connector.busy());
            // Only the health check.
            assert_eq!(provider.calls_to("eth_accounts"), 1);
            assert_eq!(last_message(&updates).as_deref(), Some(MSG_REJECTED));
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn unresponsive_provider_fails_health_check() {
    LocalSet::new()
        .run_until(async {
            let provider = MockProvider::with(&[("eth_accounts", Reply::Hang)]);
            let (connector, updates) = connector(Some(provider.clone()));
            let started = Instant::now();

            connector.connect().await;

            assert_elapsed(started, Duration::from_secs(1));
            assert_eq!(connector.state(), try_demo());
            assert_eq!(provider.calls_to("eth_requestAccounts"), 0);
            assert_eq!(last_message(&updates).as_deref(), Some(MSG_UNHEALTHY));
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn stalled_request_falls_back_to_known_accounts() {
    LocalSet::new()
        .run_until(async {
            let provider = MockProvider::healthy();
            provider
                .replies
                .borrow_mut()
                .insert("eth_requestAccounts", Reply::Hang);
            let (connector, _updates) = connector(Some(provider.clone()));
            let started = Instant::now();

            connector.connect().await;

            assert_elapsed(started, Duration::from_secs(5));
            assert_eq!(provider.calls_to("eth_accounts"), 2);
            assert_eq!(
                connector.state().session().map(|session| session.account.clone()),
                Some(ACCOUNT.to_string())
            );
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn provider_events_update_the_session() {
    LocalSet::new()
        .run_until(async {
            let provider = MockProvider::healthy();
            let (connector, updates) = connector(Some(provider.clone()));

            connector.connect().await;
            settle().await;
            assert_eq!(provider.listeners.borrow().len(), 1);

            provider.emit(ProviderNotification::ChainChanged("0x89".to_string()));
            assert_eq!(
                connector.state().session().and_then(|session| session.network.clone()),
                Some("Polygon Mainnet".to_string())
            );
            assert_eq!(
                last_message(&updates).as_deref(),
                Some("Network switched to Polygon Mainnet")
            );

            provider.emit(ProviderNotification::AccountsChanged(Vec::new()));
            assert_eq!(connector.state(), ready_to_connect());

            connector.connect().await;
            settle().await;
            assert!(matches!(connector.state(), WalletState::Connected(_)));
            assert_eq!(provider.listeners.borrow().len(), 1);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn preflight_reports_provider_status() {
    LocalSet::new()
        .run_until(async {
            let (missing, _updates) = connector(None);
            assert_eq!(missing.preflight().await, ProviderStatus::NotDetected);
            assert_eq!(missing.state(), try_demo());

            let locked = MockProvider::with(&[("eth_accounts", Reply::Ok(json!([])))]);
            let (unlocked_later, updates) = connector(Some(locked));
            assert_eq!(unlocked_later.preflight().await, ProviderStatus::Locked);
            assert_eq!(unlocked_later.state(), ready_to_connect());
            assert_eq!(
                last_message(&updates).as_deref(),
                Some("MetaMask is locked. Please unlock MetaMask.")
            );

            let (ready, _updates) = connector(Some(MockProvider::healthy()));
            assert_eq!(ready.preflight().await, ProviderStatus::Ready);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn failed_request_and_fallback_offer_demo() {
    LocalSet::new()
        .run_until(async {
            let provider = MockProvider::with(&[
                (
                    "eth_accounts",
                    Reply::Err(ProviderError::rpc(-32002, "Request already pending")),
                ),
                (
                    "eth_requestAccounts",
                    Reply::Err(ProviderError::rpc(-32000, "Resource unavailable")),
                ),
            ]);
            // The health check gets an answer; the fallback does not.
            provider.queue("eth_accounts", Reply::Ok(json!([])));
            let (connector, updates) = connector(Some(provider.clone()));

            connector.connect().await;

            assert_eq!(provider.calls_to("eth_requestAccounts"), 1);
            assert_eq!(provider.calls_to("eth_accounts"), 2);
            assert_eq!(connector.state(), try_demo());
            assert!(!connector.busy());
            assert_eq!(last_message(&updates).as_deref(), Some(MSG_FAILED));
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn failing_lookups_leave_the_session_connected() {
    LocalSet::new()
        .run_until(async {
            let provider = MockProvider::healthy();
            provider.replies.borrow_mut().extend([
                ("eth_getBalance", Reply::Err(ProviderError::rpc(-32000, "header not found"))),
                ("eth_chainId", Reply::Err(ProviderError::Message("disconnected".to_string()))),
            ]);
            let (connector, _updates) = connector(Some(provider));

            connector.connect().await;
            settle().await;

            let state = connector.state();
            assert!(matches!(state, WalletState::Connected(_)));
            let session = state.session().expect("connected session");
            assert_eq!(session.account, ACCOUNT);
            assert_eq!(
                session.balance.as_ref().map(ToString::to_string).as_deref(),
                Some(BALANCE_UNAVAILABLE)
            );
            assert_eq!(session.network.as_deref(), Some(UNKNOWN_NETWORK));
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn hanging_lookups_time_out() {
    LocalSet::new()
        .run_until(async {
            let provider = MockProvider::healthy();
            provider
                .replies
                .borrow_mut()
                .extend([("eth_getBalance", Reply::Hang), ("eth_chainId", Reply::Hang)]);
            let (connector, _updates) = connector(Some(provider));
            let lookup = WalletTimings::default().lookup();

            connector.connect().await;
            settle().await;
            let state = connector.state();
            let session = state.session().expect("connected session");
            assert_eq!(session.balance, None);
            assert_eq!(session.network, None);

            sleep(lookup).await;

            let state = connector.state();
            assert!(matches!(state, WalletState::Connected(_)));
            let session = state.session().expect("connected session");
            assert_eq!(
                session.balance.as_ref().map(ToString::to_string).as_deref(),
                Some(BALANCE_UNAVAILABLE)
            );
            assert_eq!(session.network.as_deref(), Some(UNKNOWN_NETWORK));
        })
        .await;
}
