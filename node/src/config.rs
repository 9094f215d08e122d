// Node configuration: loaded from a TOML file or built programmatically
// for development, mirroring the protocol's wire-visible constants.
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use weave_p2p::PeerEndpoint;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    pub network: NetworkConfig,
    pub verifier: VerifierSettings,
    #[serde(default)]
    pub firewall: FirewallSettings,
    #[serde(default)]
    pub operational: OperationalConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Local HTTP port peers use to reach us (default 1984).
    pub port: u16,

    /// Seed peers to bootstrap `external_peers` from, as `ip:port` strings.
    pub seed_peers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifierSettings {
    /// Reject unsigned transactions by default; only development tooling
    /// should ever flip this on.
    pub allow_unsigned: bool,

    /// The first write to an empty wallet ledger is accepted regardless of
    /// `last_tx` — the genesis-bootstrap escape hatch.
    pub allow_genesis_bootstrap: bool,

    /// Fixed network difficulty used for pricing checks.
    pub difficulty: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirewallSettings {
    /// Newline-delimited binary signature file; `None` runs with an empty
    /// signature table (everything passes).
    pub signature_file: Option<PathBuf>,
}

impl Default for FirewallSettings {
    fn default() -> Self {
        Self {
            signature_file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationalConfig {
    pub log_level: String,
    pub structured_logging: bool,
}

impl Default for OperationalConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            structured_logging: false,
        }
    }
}

impl NodeConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn development() -> Self {
        Self {
            network: NetworkConfig {
                port: 1984,
                seed_peers: vec![],
            },
            verifier: VerifierSettings {
                allow_unsigned: false,
                allow_genesis_bootstrap: true,
                difficulty: 25,
            },
            firewall: FirewallSettings::default(),
            operational: OperationalConfig::default(),
        }
    }

    pub fn seed_peer_endpoints(&self) -> Vec<PeerEndpoint> {
        self.network
            .seed_peers
            .iter()
            .filter_map(|entry| parse_peer(entry))
            .collect()
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig {
                port: 1984,
                seed_peers: vec![],
            },
            verifier: VerifierSettings {
                allow_unsigned: false,
                allow_genesis_bootstrap: false,
                difficulty: 25,
            },
            firewall: FirewallSettings::default(),
            operational: OperationalConfig::default(),
        }
    }
}

fn parse_peer(entry: &str) -> Option<PeerEndpoint> {
    let (ip, port) = entry.split_once(':')?;
    let port: u16 = port.parse().ok()?;
    let mut octets = ip.split('.').map(|o| o.parse::<u8>());
    Some(PeerEndpoint::new(
        octets.next()?.ok()?,
        octets.next()?.ok()?,
        octets.next()?.ok()?,
        octets.next()?.ok()?,
        port,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_seed_peer_list() {
        let mut config = NodeConfig::development();
        config.network.seed_peers = vec!["10.0.0.1:1984".to_string(), "garbage".to_string()];
        assert_eq!(
            config.seed_peer_endpoints(),
            vec![PeerEndpoint::new(10, 0, 0, 1, 1984)]
        );
    }

    #[test]
    fn loads_from_toml_file() {
        let toml = r#"
            [network]
            port = 1985
            seed_peers = ["1.2.3.4:1984"]

            [verifier]
            allow_unsigned = false
            allow_genesis_bootstrap = true
            difficulty = 30
        "#;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weave.toml");
        std::fs::write(&path, toml).unwrap();

        let config = NodeConfig::from_file(&path).unwrap();
        assert_eq!(config.network.port, 1985);
        assert_eq!(config.verifier.difficulty, 30);
        assert!(config.verifier.allow_genesis_bootstrap);
        assert_eq!(
            config.seed_peer_endpoints(),
            vec![PeerEndpoint::new(1, 2, 3, 4, 1984)]
        );
        // optional sections fall back to serde defaults when omitted
        assert!(config.firewall.signature_file.is_none());
        assert_eq!(config.operational.log_level, "info");
    }
}
