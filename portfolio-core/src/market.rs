//! Price and gas tickers. Live prices come from CoinGecko's simple-price
//! endpoint; anything that goes wrong falls back to a synthetic series so the
//! widgets are never empty.

use std::time::Duration;

use rand::Rng;
use serde::Deserialize;

use crate::config::PortfolioConfig;

const ETH_BASE: f64 = 2847.32;
const MATIC_BASE: f64 = 0.89;
const PRICE_SWING: f64 = 0.02;
const USDT_JITTER: f64 = 0.001;
const GAS_BASE: [(GasTier, f64); 3] = [(GasTier::Slow, 15.0), (GasTier::Standard, 25.0), (GasTier::Fast, 35.0)];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriceSource {
    Live,
    Synthetic,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceQuotes {
    pub eth: f64,
    pub matic: f64,
    pub usdt: f64,
    pub source: PriceSource,
}

#[derive(Debug, Deserialize)]
struct CoinQuote {
    usd: f64,
}

#[derive(Debug, Deserialize)]
struct SimplePriceResponse {
    ethereum: CoinQuote,
    #[serde(rename = "matic-network")]
    matic: CoinQuote,
    tether: CoinQuote,
}

impl PriceQuotes {
    /// Parses a simple-price body. A body missing any of the three coins is
    /// treated as a failure.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let response: SimplePriceResponse = serde_json::from_str(body)?;
        Ok(Self {
            eth: response.ethereum.usd,
            matic: response.matic.usd,
            usdt: response.tether.usd,
            source: PriceSource::Live,
        })
    }

    /// Deterministic drift around fixed base prices, plus a tiny random
    /// wobble on the stablecoin.
    pub fn synthetic<R: Rng + ?Sized>(now_ms: f64, rng: &mut R) -> Self {
        let variation = (now_ms / 10_000.0).sin() * PRICE_SWING;
        Self {
            eth: ETH_BASE * (1.0 + variation),
            matic: MATIC_BASE * (1.0 + variation),
            usdt: 1.0 + rng.random_range(-USDT_JITTER..USDT_JITTER),
            source: PriceSource::Synthetic,
        }
    }

    pub fn eth_text(&self) -> String {
        format!("${}", group_thousands(self.eth))
    }

    pub fn matic_text(&self) -> String {
        format!("${:.4}", self.matic)
    }

    pub fn usdt_text(&self) -> String {
        format!("${:.2}", self.usdt)
    }

    /// How long to wait before asking the API again.
    pub fn next_refresh(&self, config: &PortfolioConfig) -> Duration {
        match self.source {
            PriceSource::Live => Duration::from_secs(config.price_refresh_secs),
            PriceSource::Synthetic => Duration::from_secs(config.price_retry_secs),
        }
    }
}

/// Up to three decimals, trailing zeros dropped, comma-grouped integer part.
fn group_thousands(value: f64) -> String {
    let fixed = format!("{:.3}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GasTier {
    Slow,
    Standard,
    Fast,
}

impl GasTier {
    pub fn label(self) -> &'static str {
        match self {
            GasTier::Slow => "Slow",
            GasTier::Standard => "Standard",
            GasTier::Fast => "Fast",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GasPrices {
    pub slow: u32,
    pub standard: u32,
    pub fast: u32,
}

impl GasPrices {
    /// Gas is always simulated: a slow sine stands in for network load.
    pub fn synthetic(now_ms: f64) -> Self {
        let load = (now_ms / 20_000.0).sin() * 0.3 + 0.7;
        let [slow, standard, fast] = GAS_BASE.map(|(_, base)| (base * load).round() as u32);
        Self { slow, standard, fast }
    }

    pub fn get(&self, tier: GasTier) -> u32 {
        match tier {
            GasTier::Slow => self.slow,
            GasTier::Standard => self.standard,
            GasTier::Fast => self.fast,
        }
    }

    pub fn text(&self, tier: GasTier) -> String {
        format!("{} Gwei", self.get(tier))
    }

    pub fn tiers() -> [GasTier; 3] {
        GAS_BASE.map(|(tier, _)| tier)
    }
}
