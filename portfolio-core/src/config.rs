use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::error::ConfigError;

const DEFAULT_HOME: &str = "/home/yogeshwara";
const DEFAULT_PRICE_API_URL: &str = "https://api.coingecko.com/api/v3/simple/price?ids=ethereum,matic-network,tether&vs_currencies=usd&include_24hr_change=true";

/// Site-wide tunables. Every field has a default so a partial `config.json`
/// is enough to override a single value.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PortfolioConfig {
    pub terminal_home: String,
    pub price_api_url: String,
    pub price_refresh_secs: u64,
    pub price_retry_secs: u64,
    pub gas_refresh_secs: u64,
    pub tagline_interval_ms: u64,
    pub notification_ms: u64,
    pub mining_difficulty: usize,
    pub wallet: WalletTimings,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WalletTimings {
    pub health_check_ms: u64,
    pub request_accounts_ms: u64,
    pub accounts_fallback_ms: u64,
    pub preflight_check_ms: u64,
    /// Limit for the balance and network lookups after connecting.
    pub lookup_ms: u64,
    pub demo_connect_ms: u64,
    pub demo_session_secs: u64,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            terminal_home: DEFAULT_HOME.to_string(),
            price_api_url: DEFAULT_PRICE_API_URL.to_string(),
            price_refresh_secs: 60,
            price_retry_secs: 120,
            gas_refresh_secs: 180,
            tagline_interval_ms: 2500,
            notification_ms: 3000,
            mining_difficulty: 2,
            wallet: WalletTimings::default(),
        }
    }
}

impl Default for WalletTimings {
    fn default() -> Self {
        Self {
            health_check_ms: 1000,
            request_accounts_ms: 5000,
            accounts_fallback_ms: 3000,
            preflight_check_ms: 500,
            lookup_ms: 3000,
            demo_connect_ms: 1500,
            demo_session_secs: 30,
        }
    }
}

impl WalletTimings {
    pub fn health_check(&self) -> Duration {
        Duration::from_millis(self.health_check_ms)
    }

    pub fn request_accounts(&self) -> Duration {
        Duration::from_millis(self.request_accounts_ms)
    }

    pub fn accounts_fallback(&self) -> Duration {
        Duration::from_millis(self.accounts_fallback_ms)
    }

    pub fn preflight_check(&self) -> Duration {
        Duration::from_millis(self.preflight_check_ms)
    }

    pub fn lookup(&self) -> Duration {
        Duration::from_millis(self.lookup_ms)
    }

    pub fn demo_connect(&self) -> Duration {
        Duration::from_millis(self.demo_connect_ms)
    }

    pub fn demo_session(&self) -> Duration {
        Duration::from_secs(self.demo_session_secs)
    }
}

impl PortfolioConfig {
    /// Reads overrides from the process environment. Unset variables keep
    /// their defaults; set-but-invalid ones are rejected.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let wallet_defaults = WalletTimings::default();

        let config = Self {
            terminal_home: env::var("TERMINAL_HOME").unwrap_or(defaults.terminal_home),
            price_api_url: env::var("PRICE_API_URL").unwrap_or(defaults.price_api_url),
            price_refresh_secs: parse_positive("PRICE_REFRESH_SECS", defaults.price_refresh_secs)?,
            price_retry_secs: parse_positive("PRICE_RETRY_SECS", defaults.price_retry_secs)?,
            gas_refresh_secs: parse_positive("GAS_REFRESH_SECS", defaults.gas_refresh_secs)?,
            tagline_interval_ms: parse_positive("TAGLINE_INTERVAL_MS", defaults.tagline_interval_ms)?,
            notification_ms: parse_positive("NOTIFICATION_MS", defaults.notification_ms)?,
            mining_difficulty: parse_positive("MINING_DIFFICULTY", defaults.mining_difficulty as u64)?
                as usize,
            wallet: WalletTimings {
                health_check_ms: parse_positive("WALLET_HEALTH_CHECK_MS", wallet_defaults.health_check_ms)?,
                request_accounts_ms: parse_positive(
                    "WALLET_REQUEST_ACCOUNTS_MS",
                    wallet_defaults.request_accounts_ms,
                )?,
                accounts_fallback_ms: parse_positive(
                    "WALLET_ACCOUNTS_FALLBACK_MS",
                    wallet_defaults.accounts_fallback_ms,
                )?,
                preflight_check_ms: parse_positive(
                    "WALLET_PREFLIGHT_CHECK_MS",
                    wallet_defaults.preflight_check_ms,
                )?,
                lookup_ms: parse_positive("WALLET_LOOKUP_MS", wallet_defaults.lookup_ms)?,
                demo_connect_ms: parse_positive("DEMO_CONNECT_MS", wallet_defaults.demo_connect_ms)?,
                demo_session_secs: parse_positive("DEMO_SESSION_SECS", wallet_defaults.demo_session_secs)?,
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.terminal_home.starts_with('/') {
            return Err(ConfigError::Invalid {
                name: "terminalHome",
                reason: format!("must be an absolute path; got {}", self.terminal_home),
            });
        }
        if self.mining_difficulty == 0 || self.mining_difficulty > 64 {
            return Err(ConfigError::Invalid {
                name: "miningDifficulty",
                reason: "must be between 1 and 64".to_string(),
            });
        }
        let durations = [
            ("priceRefreshSecs", self.price_refresh_secs),
            ("priceRetrySecs", self.price_retry_secs),
            ("gasRefreshSecs", self.gas_refresh_secs),
            ("taglineIntervalMs", self.tagline_interval_ms),
            ("notificationMs", self.notification_ms),
            ("wallet.healthCheckMs", self.wallet.health_check_ms),
            ("wallet.requestAccountsMs", self.wallet.request_accounts_ms),
            ("wallet.accountsFallbackMs", self.wallet.accounts_fallback_ms),
            ("wallet.preflightCheckMs", self.wallet.preflight_check_ms),
            ("wallet.lookupMs", self.wallet.lookup_ms),
            ("wallet.demoConnectMs", self.wallet.demo_connect_ms),
            ("wallet.demoSessionSecs", self.wallet.demo_session_secs),
        ];
        for (name, value) in durations {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    name,
                    reason: "must be greater than zero".to_string(),
                });
            }
        }
        Ok(())
    }
}

fn parse_positive(name: &'static str, fallback: u64) -> Result<u64, ConfigError> {
    match env::var(name) {
        Ok(value) => {
            let parsed = value.trim().parse::<u64>().unwrap_or(0);
            if parsed == 0 {
                Err(ConfigError::Invalid {
                    name,
                    reason: format!("must be a positive integer; got {value:?}"),
                })
            } else {
                Ok(parsed)
            }
        }
        Err(_) => Ok(fallback),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: PortfolioConfig =
            serde_json::from_str(r#"{ "priceRefreshSecs": 15, "wallet": { "demoSessionSecs": 5 } }"#)
                .unwrap();
        assert_eq!(config.price_refresh_secs, 15);
        assert_eq!(config.price_retry_secs, 120);
        assert_eq!(config.wallet.demo_session(), Duration::from_secs(5));
        assert_eq!(config.wallet.health_check(), Duration::from_millis(1000));
        assert_eq!(config.wallet.lookup(), Duration::from_millis(3000));
        assert_eq!(config.terminal_home, DEFAULT_HOME);
    }

    #[test]
    fn rejects_zero_durations() {
        let mut config = PortfolioConfig::default();
        config.wallet.demo_connect_ms = 0;
        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains("wallet.demoConnectMs"));
    }

    #[test]
    fn rejects_relative_home() {
        let config = PortfolioConfig {
            terminal_home: "home/me".to_string(),
            ..PortfolioConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
