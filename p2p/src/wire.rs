// Wire adapters: outbound send operations to a remote peer.
// `http.send_new_tx`, `http.send_new_block`, `http.add_peer` as a trait
// boundary, so the bridge depends on a trait object rather than a
// concrete transport. HTTP wire framing itself is out of scope here —
// these are thin client calls, not a protocol definition.
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use weave_core::{Block, RecallBlock, Transaction};

use crate::peer::PeerEndpoint;

pub const NET_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait WireAdapter: Send + Sync {
    async fn send_new_tx(&self, peer: PeerEndpoint, tx: &Transaction) -> anyhow::Result<()>;
    async fn send_new_block(
        &self,
        peer: PeerEndpoint,
        port: u16,
        block: &Block,
        recall: Option<&RecallBlock>,
    ) -> anyhow::Result<()>;
    async fn add_peer(&self, peer: PeerEndpoint) -> anyhow::Result<()>;
}

/// `reqwest`-backed implementation posting to a peer's well-known tx/block
/// endpoints, with the standard 10-second network timeout.
pub struct ReqwestWireAdapter {
    client: reqwest::Client,
}

impl ReqwestWireAdapter {
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(NET_TIMEOUT).build()?;
        Ok(Self { client })
    }
}

#[derive(serde::Serialize)]
struct NewBlockBody<'a> {
    port: u16,
    block: &'a Block,
    recall: Option<&'a RecallBlock>,
}

#[async_trait]
impl WireAdapter for ReqwestWireAdapter {
    async fn send_new_tx(&self, peer: PeerEndpoint, tx: &Transaction) -> anyhow::Result<()> {
        self.client
            .post(format!("{}/tx", peer.base_url()))
            .json(tx)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn send_new_block(
        &self,
        peer: PeerEndpoint,
        port: u16,
        block: &Block,
        recall: Option<&RecallBlock>,
    ) -> anyhow::Result<()> {
        self.client
            .post(format!("{}/block", peer.base_url()))
            .json(&NewBlockBody { port, block, recall })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn add_peer(&self, peer: PeerEndpoint) -> anyhow::Result<()> {
        self.client
            .post(format!("{}/peers", peer.base_url()))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Records every call it receives instead of performing I/O, so tests can
/// assert the at-most-once-forwarding property directly.
#[derive(Default)]
pub struct RecordingWireAdapter {
    tx_sends: Mutex<Vec<(PeerEndpoint, [u8; 32])>>,
    block_sends: Mutex<Vec<(PeerEndpoint, [u8; 32])>>,
    peers_added: Mutex<Vec<PeerEndpoint>>,
}

impl RecordingWireAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tx_sends(&self) -> Vec<(PeerEndpoint, [u8; 32])> {
        self.tx_sends.lock().unwrap().clone()
    }

    pub fn block_sends(&self) -> Vec<(PeerEndpoint, [u8; 32])> {
        self.block_sends.lock().unwrap().clone()
    }

    pub fn peers_added(&self) -> Vec<PeerEndpoint> {
        self.peers_added.lock().unwrap().clone()
    }
}

#[async_trait]
impl WireAdapter for RecordingWireAdapter {
    async fn send_new_tx(&self, peer: PeerEndpoint, tx: &Transaction) -> anyhow::Result<()> {
        self.tx_sends.lock().unwrap().push((peer, tx.id));
        Ok(())
    }

    async fn send_new_block(
        &self,
        peer: PeerEndpoint,
        _port: u16,
        block: &Block,
        _recall: Option<&RecallBlock>,
    ) -> anyhow::Result<()> {
        self.block_sends.lock().unwrap().push((peer, block.indep_hash));
        Ok(())
    }

    async fn add_peer(&self, peer: PeerEndpoint) -> anyhow::Result<()> {
        self.peers_added.lock().unwrap().push(peer);
        Ok(())
    }
}
