//! Lookups the field widgets receive as capabilities.
//!
//! Widgets never read global state: the address identicon and the network
//! name/logo come from a resolver handed in by the caller.

use crate::config::{self, NETWORKS};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Side length of the identicon grid
pub const IDENTICON_SIZE: usize = 5;

/// A small symmetric avatar derived from an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identicon {
    pub color: [u8; 3],
    pub background: [u8; 3],
    /// Row-major cell mask, mirrored left to right
    pub cells: [[bool; IDENTICON_SIZE]; IDENTICON_SIZE],
}

/// Logo of a network: a coloured badge with the chain's initial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkLogo {
    pub initial: char,
    pub color: [u8; 3],
}

pub trait AvatarResolver {
    fn avatar(&self, address: &str) -> Identicon;
}

pub trait NetworkResolver {
    /// Human readable chain name, `None` when the key is unknown
    fn chain_name(&self, network_key: &str) -> Option<String>;

    fn logo(&self, network_key: &str) -> NetworkLogo;

    /// Native token symbol, `None` when the network has none configured
    fn native_token(&self, network_key: &str) -> Option<String>;

    /// Chain name, or the raw key when the network is unknown
    fn display_name(&self, network_key: &str) -> String {
        self.chain_name(network_key)
            .unwrap_or_else(|| network_key.to_string())
    }
}

/// Identicons hashed from the address with SHA-256.
#[derive(Debug, Default, Clone, Copy)]
pub struct HashIdenticons;

impl AvatarResolver for HashIdenticons {
    fn avatar(&self, address: &str) -> Identicon {
        let digest = Sha256::digest(address.as_bytes());
        let color = [digest[0], digest[1], digest[2]];
        let background = [
            255 - digest[0] / 4,
            255 - digest[1] / 4,
            255 - digest[2] / 4,
        ];

        let mut cells = [[false; IDENTICON_SIZE]; IDENTICON_SIZE];
        let half = (IDENTICON_SIZE + 1) / 2;
        for (row, cells_row) in cells.iter_mut().enumerate() {
            for col in 0..half {
                let bit = digest[3 + row * half + col] & 1 == 1;
                cells_row[col] = bit;
                cells_row[IDENTICON_SIZE - 1 - col] = bit;
            }
        }

        Identicon {
            color,
            background,
            cells,
        }
    }
}

/// Entry of the network registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInfo {
    pub key: String,
    pub chain: String,
    pub native_token: Option<String>,
    pub logo_color: [u8; 3],
}

/// Network map built from the built-in networks plus user overrides.
#[derive(Debug, Clone, Default)]
pub struct NetworkRegistry {
    networks: HashMap<String, NetworkInfo>,
}

impl NetworkRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry holding every entry of `config::NETWORKS`
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for network in NETWORKS {
            registry.insert(NetworkInfo {
                key: network.key.to_string(),
                chain: network.chain.to_string(),
                native_token: Some(network.native_token.to_string()),
                logo_color: network.logo_rgb,
            });
        }
        registry
    }

    /// Add or replace an entry
    pub fn insert(&mut self, info: NetworkInfo) {
        self.networks.insert(info.key.clone(), info);
    }

    /// Rename a network, adding a bare entry for unknown keys
    pub fn rename(&mut self, network_key: &str, chain: impl Into<String>) {
        let chain = chain.into();
        match self.networks.get_mut(network_key) {
            Some(info) => info.chain = chain,
            None => self.insert(NetworkInfo {
                key: network_key.to_string(),
                chain,
                native_token: None,
                logo_color: fallback_logo_color(network_key),
            }),
        }
    }

    pub fn get(&self, network_key: &str) -> Option<&NetworkInfo> {
        self.networks.get(network_key)
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}

impl NetworkResolver for NetworkRegistry {
    fn chain_name(&self, network_key: &str) -> Option<String> {
        self.networks.get(network_key).map(|n| n.chain.clone())
    }

    fn logo(&self, network_key: &str) -> NetworkLogo {
        let (name, color) = match self.networks.get(network_key) {
            Some(info) => (info.chain.as_str(), info.logo_color),
            None => (network_key, fallback_logo_color(network_key)),
        };
        NetworkLogo {
            initial: name
                .chars()
                .next()
                .map(|c| c.to_ascii_uppercase())
                .unwrap_or('?'),
            color,
        }
    }

    fn native_token(&self, network_key: &str) -> Option<String> {
        self.networks
            .get(network_key)
            .and_then(|n| n.native_token.clone())
            .or_else(|| config::find_network(network_key).map(|n| n.native_token.to_string()))
    }
}

/// Grey shade derived from the key so unknown networks still get a stable badge
fn fallback_logo_color(network_key: &str) -> [u8; 3] {
    let digest = Sha256::digest(network_key.as_bytes());
    let shade = 90 + digest[0] % 80;
    [shade, shade, shade]
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== identicon tests ====================

    #[test]
    fn test_identicon_is_deterministic() {
        let resolver = HashIdenticons;
        let a = resolver.avatar(config::DEFAULT_ACCOUNT);
        let b = resolver.avatar(config::DEFAULT_ACCOUNT);
        assert_eq!(a, b);
    }

    #[test]
    fn test_identicon_differs_per_address() {
        let resolver = HashIdenticons;
        let a = resolver.avatar("5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY");
        let b = resolver.avatar("5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty");
        assert_ne!(a, b);
    }

    #[test]
    fn test_identicon_is_mirrored() {
        let icon = HashIdenticons.avatar("15oF4uVJwmo4TdGW7VfQxNLavjCXviqxT9S1MgbjMNHr6Sp5");
        for row in icon.cells.iter() {
            for col in 0..IDENTICON_SIZE {
                assert_eq!(row[col], row[IDENTICON_SIZE - 1 - col]);
            }
        }
    }

    // ==================== NetworkRegistry tests ====================

    #[test]
    fn test_builtin_registry_resolves_chain_name() {
        let registry = NetworkRegistry::builtin();
        assert_eq!(registry.len(), NETWORKS.len());
        assert_eq!(registry.chain_name("kusama").as_deref(), Some("Kusama"));
        assert_eq!(registry.display_name("kusama"), "Kusama");
    }

    #[test]
    fn test_unknown_network_falls_back_to_key() {
        let registry = NetworkRegistry::builtin();
        assert!(registry.chain_name("my-devnet").is_none());
        assert_eq!(registry.display_name("my-devnet"), "my-devnet");
    }

    #[test]
    fn test_empty_registry_falls_back_to_key() {
        let registry = NetworkRegistry::empty();
        assert!(registry.is_empty());
        assert_eq!(registry.display_name("polkadot"), "polkadot");
    }

    #[test]
    fn test_logo_for_known_and_unknown_network() {
        let registry = NetworkRegistry::builtin();
        let logo = registry.logo("polkadot");
        assert_eq!(logo.initial, 'P');
        assert_eq!(logo.color, [230, 0, 122]);

        let unknown = registry.logo("zeitgeist");
        assert_eq!(unknown.initial, 'Z');
        assert_eq!(unknown.color, registry.logo("zeitgeist").color);
    }

    #[test]
    fn test_rename_existing_and_new_network() {
        let mut registry = NetworkRegistry::builtin();
        registry.rename("polkadot", "Polkadot Relay");
        registry.rename("local", "Local Node");
        assert_eq!(registry.display_name("polkadot"), "Polkadot Relay");
        assert_eq!(registry.display_name("local"), "Local Node");
        assert_eq!(registry.native_token("polkadot").as_deref(), Some("DOT"));
        assert!(registry.native_token("local").is_none());
    }
}
