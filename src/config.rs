use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use url::Url;

/// Network category for grouping in the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkCategory {
    RelayChain,
    Parachain,
    Testnet,
}

/// A built-in Substrate network with display name, native token and explorer.
#[derive(Clone, Debug)]
pub struct Network {
    pub key: &'static str,
    pub chain: &'static str,
    pub native_token: &'static str,
    pub decimals: u32,
    pub ss58_format: u16,
    pub explorer_url: &'static str,
    /// Brand colour used for the network logo badge
    pub logo_rgb: [u8; 3],
    pub category: NetworkCategory,
}

impl Network {
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        key: &'static str,
        chain: &'static str,
        native_token: &'static str,
        decimals: u32,
        ss58_format: u16,
        explorer_url: &'static str,
        logo_rgb: [u8; 3],
        category: NetworkCategory,
    ) -> Self {
        Self {
            key,
            chain,
            native_token,
            decimals,
            ss58_format,
            explorer_url,
            logo_rgb,
            category,
        }
    }
}

use NetworkCategory::*;

/// Networks known to the wallet out of the box.
pub const NETWORKS: &[Network] = &[
    Network::new("polkadot", "Polkadot", "DOT", 10, 0, "https://polkadot.subscan.io", [230, 0, 122], RelayChain),
    Network::new("kusama", "Kusama", "KSM", 12, 2, "https://kusama.subscan.io", [40, 40, 40], RelayChain),
    Network::new("astar", "Astar", "ASTR", 18, 5, "https://astar.subscan.io", [0, 130, 230], Parachain),
    Network::new("moonbeam", "Moonbeam", "GLMR", 18, 1284, "https://moonbeam.subscan.io", [83, 203, 200], Parachain),
    Network::new("acala", "Acala", "ACA", 12, 10, "https://acala.subscan.io", [230, 65, 45], Parachain),
    Network::new("westend", "Westend", "WND", 12, 42, "https://westend.subscan.io", [218, 104, 167], Testnet),
];

/// Find a built-in network by key
pub fn find_network(key: &str) -> Option<&'static Network> {
    NETWORKS.iter().find(|n| n.key == key)
}

/// Link to an extrinsic on the network's block explorer
pub fn get_extrinsic_explorer_url(network_key: &str, extrinsic_hash: &str) -> Option<String> {
    let network = find_network(network_key)?;
    let base = Url::parse(network.explorer_url).ok()?;
    base.join(&format!("extrinsic/{}", extrinsic_hash))
        .ok()
        .map(|u| u.to_string())
}

/// Link to an account on the network's block explorer
pub fn get_account_explorer_url(network_key: &str, address: &str) -> Option<String> {
    let network = find_network(network_key)?;
    let base = Url::parse(network.explorer_url).ok()?;
    base.join(&format!("account/{}", address))
        .ok()
        .map(|u| u.to_string())
}

/// Account used when no `KESTREL_ACCOUNT` is given (Alice's well-known dev address)
pub const DEFAULT_ACCOUNT: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";

/// Settings of the in-process simulated wallet backend
#[derive(Clone, Debug, PartialEq)]
pub struct BackendConfig {
    /// Delay before a fee preview resolves
    pub preview_delay: Duration,
    /// Delay between the broadcast and finalisation updates of a submission
    pub submit_delay: Duration,
    /// Fee amount reported by previews, in the network's native token
    pub fee: String,
    /// Password the simulated keyring accepts
    pub password: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            preview_delay: Duration::from_millis(600),
            submit_delay: Duration::from_millis(1200),
            fee: "0.015".to_string(),
            password: "password".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub network_key: String,
    pub account: String,
    pub backend: BackendConfig,
}

impl Config {
    pub fn new(network_key: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            network_key: network_key.into(),
            account: account.into(),
            backend: BackendConfig::default(),
        }
    }

    /// Build the configuration from defaults plus `KESTREL_*` environment overrides.
    ///
    /// Call after `dotenvy::dotenv()` so a local `.env` is honoured.
    pub fn from_env() -> Self {
        let network_key = env::var("KESTREL_NETWORK").unwrap_or_else(|_| "polkadot".to_string());
        let account = env::var("KESTREL_ACCOUNT").unwrap_or_else(|_| DEFAULT_ACCOUNT.to_string());
        let mut config = Self::new(network_key, account);

        if let Some(ms) = env_millis("KESTREL_PREVIEW_DELAY_MS") {
            config.backend.preview_delay = ms;
        }
        if let Some(ms) = env_millis("KESTREL_SUBMIT_DELAY_MS") {
            config.backend.submit_delay = ms;
        }
        if let Ok(fee) = env::var("KESTREL_FEE") {
            if !fee.trim().is_empty() {
                config.backend.fee = fee.trim().to_string();
            }
        }
        if let Ok(password) = env::var("KESTREL_PASSWORD") {
            config.backend.password = password;
        }
        config
    }

    pub fn network(&self) -> Option<&'static Network> {
        find_network(&self.network_key)
    }

    pub fn native_token(&self) -> &str {
        self.network().map(|n| n.native_token).unwrap_or("Token")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("polkadot", DEFAULT_ACCOUNT)
    }
}

fn env_millis(name: &str) -> Option<Duration> {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== find_network tests ====================

    #[test]
    fn test_find_network_polkadot() {
        let network = find_network("polkadot").unwrap();
        assert_eq!(network.chain, "Polkadot");
        assert_eq!(network.native_token, "DOT");
        assert_eq!(network.decimals, 10);
    }

    #[test]
    fn test_find_network_not_found() {
        assert!(find_network("ethereum").is_none());
    }

    #[test]
    fn test_network_keys_unique() {
        for (i, a) in NETWORKS.iter().enumerate() {
            for b in &NETWORKS[i + 1..] {
                assert_ne!(a.key, b.key);
            }
        }
    }

    // ==================== explorer url tests ====================

    #[test]
    fn test_extrinsic_explorer_url() {
        let url = get_extrinsic_explorer_url("kusama", "0xabc").unwrap();
        assert_eq!(url, "https://kusama.subscan.io/extrinsic/0xabc");
    }

    #[test]
    fn test_account_explorer_url() {
        let url = get_account_explorer_url("polkadot", DEFAULT_ACCOUNT).unwrap();
        assert_eq!(url, format!("https://polkadot.subscan.io/account/{}", DEFAULT_ACCOUNT));
    }

    #[test]
    fn test_explorer_url_unknown_network() {
        assert!(get_extrinsic_explorer_url("nowhere", "0xabc").is_none());
    }

    // ==================== Config tests ====================

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.network_key, "polkadot");
        assert_eq!(config.account, DEFAULT_ACCOUNT);
        assert_eq!(config.native_token(), "DOT");
        assert_eq!(config.backend, BackendConfig::default());
    }

    #[test]
    fn test_config_unknown_network_token_fallback() {
        let config = Config::new("custom-chain", DEFAULT_ACCOUNT);
        assert!(config.network().is_none());
        assert_eq!(config.native_token(), "Token");
    }
}
