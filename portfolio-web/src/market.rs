use std::time::Duration;

use dioxus::prelude::*;
use portfolio_core::market::{GasPrices, PriceQuotes, PriceSource};
use portfolio_core::PortfolioConfig;

use crate::clock::{now_ms, seeded_rng};
use crate::hooks::{sleep, use_interval};

#[cfg(target_arch = "wasm32")]
async fn fetch_quotes(url: &str) -> Result<PriceQuotes, String> {
    let response = gloo_net::http::Request::get(url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|err| format!("price fetch failed: {err}"))?;
    if !response.ok() {
        return Err(format!("price fetch failed: status {}", response.status()));
    }
    let body = response
        .text()
        .await
        .map_err(|err| format!("price body unreadable: {err}"))?;
    PriceQuotes::from_json(&body).map_err(|err| format!("price decode failed: {err}"))
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_quotes(_url: &str) -> Result<PriceQuotes, String> {
    Err("no browser fetch on this target".to_string())
}

async fn load_quotes(url: &str) -> PriceQuotes {
    match fetch_quotes(url).await {
        Ok(quotes) => quotes,
        Err(message) => {
            tracing::warn!(%message, "market.fallback");
            PriceQuotes::synthetic(now_ms(), &mut seeded_rng())
        }
    }
}

#[component]
pub fn MarketTickers() -> Element {
    let config = use_context::<PortfolioConfig>();
    let mut quotes = use_signal(|| None::<PriceQuotes>);
    let mut gas = use_signal(|| GasPrices::synthetic(now_ms()));

    use_hook({
        let config = config.clone();
        move || {
            spawn(async move {
                loop {
                    let next = load_quotes(&config.price_api_url).await;
                    quotes.set(Some(next));
                    sleep(next.next_refresh(&config)).await;
                }
            })
        }
    });

    use_interval(Duration::from_secs(config.gas_refresh_secs), move || {
        gas.set(GasPrices::synthetic(now_ms()));
    });

    let current = quotes();
    let source_label = match current.map(|quotes| quotes.source) {
        Some(PriceSource::Live) => "live",
        Some(PriceSource::Synthetic) => "demo data",
        None => "loading",
    };
    let [eth, matic, usdt] = match current {
        Some(quotes) => [quotes.eth_text(), quotes.matic_text(), quotes.usdt_text()],
        None => ["...".to_string(), "...".to_string(), "...".to_string()],
    };
    let gas_now = gas();

    rsx! {
        div { class: "market-grid",
            div { class: "market-card",
                h3 { "Token Prices" }
                span { class: "market-source", "{source_label}" }
                p { span { class: "market-symbol", "ETH" } span { class: "market-price", "{eth}" } }
                p { span { class: "market-symbol", "MATIC" } span { class: "market-price", "{matic}" } }
                p { span { class: "market-symbol", "USDT" } span { class: "market-price", "{usdt}" } }
            }
            div { class: "market-card",
                h3 { "Gas Tracker" }
                for tier in GasPrices::tiers() {
                    p { key: "{tier.label()}",
                        span { class: "market-symbol", "{tier.label()}" }
                        span { class: "market-price", "{gas_now.text(tier)}" }
                    }
                }
            }
        }
    }
}
