//! Core logic for the portfolio site: everything that can be decided without
//! a browser. The `portfolio-web` crate renders it.

pub mod config;
pub mod error;
pub mod market;
pub mod playground;
pub mod profile;
pub mod site;
pub mod terminal;
pub mod wallet;

pub use config::{PortfolioConfig, WalletTimings};
pub use error::ConfigError;
pub use terminal::{CommandOutcome, Terminal, TerminalEffect};
pub use wallet::{WalletConnector, WalletMachine, WalletState};
