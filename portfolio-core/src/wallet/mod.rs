//! Wallet connection flow over an optional injected provider, with a scripted
//! demo fallback.
//!
//! [`WalletMachine`] is the pure state machine; [`WalletConnector`] performs
//! the provider calls and timers and feeds their outcomes back into it.

pub mod connector;
pub mod format;
pub mod machine;
pub mod provider;

pub use connector::{ProviderStatus, WalletConnector, WalletObserver, WalletUpdate};
pub use format::{format_balance, is_mobile_user_agent, metamask_deep_link, network_name, short_address, Balance};
pub use machine::{
    CallToAction, ConnectMode, Session, Transition, TransitionError, WalletEffect, WalletEvent, WalletMachine,
    WalletState, DEMO_ACCOUNT,
};
pub use provider::{
    with_timeout, ErrorCategory, NotificationListener, ProviderError, ProviderNotification, Runtime, WalletProvider,
};
