use dioxus::prelude::*;
use portfolio_core::PortfolioConfig;

pub fn use_portfolio_config() -> Resource<Result<PortfolioConfig, String>> {
    use_resource(|| async move { fetch_portfolio_config().await })
}

/// A missing config file is normal for a static deploy; only a file that
/// exists but does not validate is an error.
#[cfg(target_arch = "wasm32")]
async fn fetch_portfolio_config() -> Result<PortfolioConfig, String> {
    for path in ["/config.json", "/assets/config.json"] {
        match fetch_config_from(path).await {
            Ok(Some(config)) => {
                config.validate().map_err(|err| format!("{path}: {err}"))?;
                return Ok(config);
            }
            Ok(None) => continue,
            Err(message) => tracing::debug!(path, %message, "config.fetch_skipped"),
        }
    }
    Ok(PortfolioConfig::default())
}

#[cfg(target_arch = "wasm32")]
async fn fetch_config_from(path: &str) -> Result<Option<PortfolioConfig>, String> {
    let response = gloo_net::http::Request::get(path)
        .send()
        .await
        .map_err(|err| format!("config fetch failed: {err}"))?;
    if !response.ok() {
        return Ok(None);
    }
    response
        .json::<PortfolioConfig>()
        .await
        .map(Some)
        .map_err(|err| format!("config decode failed: {err}"))
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_portfolio_config() -> Result<PortfolioConfig, String> {
    PortfolioConfig::from_env().map_err(|err| err.to_string())
}
