use std::fmt;

/// Fixed ETH price used for the USD estimate next to a balance.
pub const ETH_USD_ESTIMATE: f64 = 2847.32;
pub const BALANCE_UNAVAILABLE: &str = "Balance unavailable";
pub const UNKNOWN_NETWORK: &str = "Unknown";

const WEI_PER_ETH: f64 = 1e18;

const NETWORKS: &[(u64, &str)] = &[
    (0x1, "Ethereum Mainnet"),
    (0x3, "Ropsten Testnet"),
    (0x4, "Rinkeby Testnet"),
    (0x5, "Goerli Testnet"),
    (0x2a, "Kovan Testnet"),
    (0x89, "Polygon Mainnet"),
    (0x13881, "Mumbai Testnet"),
    (0xa, "Optimism"),
    (0xa4b1, "Arbitrum One"),
];

const MOBILE_AGENTS: &[&str] = &[
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Balance {
    pub amount: String,
    pub usd: Option<String>,
}

impl Balance {
    pub fn unavailable() -> Self {
        Self {
            amount: BALANCE_UNAVAILABLE.to_string(),
            usd: None,
        }
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.usd {
            Some(usd) => write!(f, "{} {usd}", self.amount),
            None => f.write_str(&self.amount),
        }
    }
}

fn parse_hex_quantity(value: &str) -> Option<u128> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    if digits.is_empty() {
        return None;
    }
    u128::from_str_radix(digits, 16).ok()
}

/// Human name for an `eth_chainId` result, `Chain ID: <decimal>` otherwise.
pub fn network_name(chain_id: &str) -> String {
    let Some(id) = parse_hex_quantity(chain_id.trim()) else {
        return format!("Chain ID: {chain_id}");
    };
    NETWORKS
        .iter()
        .find(|(known, _)| u128::from(*known) == id)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| format!("Chain ID: {id}"))
}

/// Renders an `eth_getBalance` hex-wei quantity as ETH with a USD estimate.
pub fn format_balance(hex_wei: &str) -> Option<Balance> {
    let wei = parse_hex_quantity(hex_wei.trim())?;
    let eth = wei as f64 / WEI_PER_ETH;
    Some(Balance {
        amount: format!("{eth:.4} ETH"),
        usd: Some(format!("(${:.2} USD)", eth * ETH_USD_ESTIMATE)),
    })
}

/// `0x742d35Cc...d8b6` becomes `0x742d...d8b6`.
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    let agent = user_agent.to_lowercase();
    MOBILE_AGENTS.iter().any(|needle| agent.contains(needle))
}

/// Universal link that opens the current page inside the MetaMask mobile app.
pub fn metamask_deep_link(hostname: &str, pathname: &str) -> String {
    format!("https://metamask.app.link/dapp/{hostname}{pathname}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn names_known_and_unknown_chains() {
        assert_eq!(network_name("0x1"), "Ethereum Mainnet");
        assert_eq!(network_name("0xa4b1"), "Arbitrum One");
        assert_eq!(network_name("0x13881"), "Mumbai Testnet");
        assert_eq!(network_name("0x38"), "Chain ID: 56");
        assert_eq!(network_name("garbage"), "Chain ID: garbage");
    }

    #[test]
    fn formats_wei_balances() {
        // 1.5 ETH
        let balance = format_balance("0x14d1120d7b160000").unwrap();
        assert_eq!(balance.amount, "1.5000 ETH");
        assert_eq!(balance.usd.as_deref(), Some("($4270.98 USD)"));
        assert_eq!(balance.to_string(), "1.5000 ETH ($4270.98 USD)");
        assert_eq!(format_balance("0x0").unwrap().amount, "0.0000 ETH");
        assert_eq!(format_balance("0x"), None);
        assert_eq!(Balance::unavailable().to_string(), "Balance unavailable");
    }

    #[test]
    fn shortens_addresses() {
        assert_eq!(short_address("0x742d35Cc6634C0532925a3b8D4C9db96C4b4d8b6"), "0x742d...d8b6");
        assert_eq!(short_address("0x1234"), "0x1234");
    }

    #[test]
    fn detects_mobile_agents() {
        assert!(is_mobile_user_agent(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15"
        ));
        assert!(is_mobile_user_agent("Opera/9.80 (J2ME/MIDP; Opera Mini/9.80)"));
        assert!(!is_mobile_user_agent(
            "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/120.0 Safari/537.36"
        ));
        assert_eq!(
            metamask_deep_link("example.dev", "/portfolio/"),
            "https://metamask.app.link/dapp/example.dev/portfolio/"
        );
    }
}
