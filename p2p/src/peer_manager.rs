// Peer-management collaborator: `peer_manager.update(existing) ->
// refreshed`. The bridge's periodic maintainer calls through this trait
// rather than owning peer-discovery logic itself.
use async_trait::async_trait;

use crate::peer::PeerEndpoint;
use crate::wire::NET_TIMEOUT;

#[async_trait]
pub trait PeerManager: Send + Sync {
    async fn update(&self, existing_peers: Vec<PeerEndpoint>) -> anyhow::Result<Vec<PeerEndpoint>>;
}

/// Test double: returns a fixed peer list regardless of input, useful for
/// deterministic maintainer tests.
pub struct StaticPeerManager {
    peers: Vec<PeerEndpoint>,
}

impl StaticPeerManager {
    pub fn new(peers: Vec<PeerEndpoint>) -> Self {
        Self { peers }
    }
}

#[async_trait]
impl PeerManager for StaticPeerManager {
    async fn update(&self, _existing_peers: Vec<PeerEndpoint>) -> anyhow::Result<Vec<PeerEndpoint>> {
        Ok(self.peers.clone())
    }
}

/// Queries a configured peer-list endpoint via `reqwest`, with the same
/// 10-second timeout used by the wire adapters.
pub struct HttpPeerManager {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(serde::Deserialize)]
struct PeerListResponse {
    peers: Vec<(u8, u8, u8, u8, u16)>,
}

impl HttpPeerManager {
    pub fn new(endpoint: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(NET_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl PeerManager for HttpPeerManager {
    async fn update(&self, _existing_peers: Vec<PeerEndpoint>) -> anyhow::Result<Vec<PeerEndpoint>> {
        let resp: PeerListResponse = self
            .client
            .get(&self.endpoint)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(resp
            .peers
            .into_iter()
            .map(|(a, b, c, d, port)| PeerEndpoint::new(a, b, c, d, port))
            .collect())
    }
}
