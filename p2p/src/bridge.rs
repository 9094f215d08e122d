// Bridge Actor: the single-threaded message loop that admits transactions
// and blocks from external peers, dedupes them, screens them through the
// firewall, and fans them out to the gossip mesh and to external peers.
// Owns `external_peers`, `processed`, `ignored_peers`.
use std::collections::{HashSet, VecDeque};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use lru::LruCache;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};
use weave_core::{Block, RecallBlock, Transaction};

use crate::firewall::{FirewallHandle, ScanKind};
use crate::gossip::{GossipMesh, GossipMessage};
use crate::peer::PeerEndpoint;
use crate::wire::WireAdapter;

pub const IGNORE_PEERS_TIME: Duration = Duration::from_secs(300);
pub const GET_MORE_PEERS_TIME: Duration = Duration::from_secs(120);

const DEFAULT_PROCESSED_CAPACITY: usize = 100_000;
const DEFAULT_PROCESSED_PEER_CAPACITY: usize = 500_000;

/// An admitted item, identified opaquely by id for dedup purposes: `tx.id`
/// for transactions, `block.indep_hash` for blocks.
#[derive(Debug, Clone)]
pub enum Admittable {
    Tx(Transaction),
    Block {
        block: Block,
        recall: Option<RecallBlock>,
    },
}

impl Admittable {
    pub fn id(&self) -> [u8; 32] {
        match self {
            Admittable::Tx(tx) => tx.id,
            Admittable::Block { block, .. } => block.indep_hash,
        }
    }

    fn is_sentinel_block(&self) -> bool {
        matches!(self, Admittable::Block { block, .. } if block.is_sentinel())
    }
}

pub enum BridgeMessage {
    IgnorePeer(PeerEndpoint),
    UnignorePeer(PeerEndpoint),
    IgnoreId([u8; 32]),
    AddTx(Transaction),
    AddBlock {
        origin: PeerEndpoint,
        block: Block,
        recall: Option<RecallBlock>,
    },
    AddPeerRemote(PeerEndpoint),
    AddPeerLocal(PeerEndpoint),
    GetPeers(oneshot::Sender<Vec<PeerEndpoint>>),
    UpdatePeers(Vec<PeerEndpoint>),
    GossipInbound(GossipMessage),
}

/// Cloneable handle to a running `BridgeActor`.
#[derive(Clone)]
pub struct BridgeHandle {
    tx: mpsc::UnboundedSender<BridgeMessage>,
}

impl BridgeHandle {
    pub fn ignore_peer(&self, peer: PeerEndpoint) {
        let _ = self.tx.send(BridgeMessage::IgnorePeer(peer));
    }

    pub fn unignore_peer(&self, peer: PeerEndpoint) {
        let _ = self.tx.send(BridgeMessage::UnignorePeer(peer));
    }

    pub fn ignore_id(&self, id: [u8; 32]) {
        let _ = self.tx.send(BridgeMessage::IgnoreId(id));
    }

    pub fn add_tx(&self, tx: Transaction) {
        let _ = self.tx.send(BridgeMessage::AddTx(tx));
    }

    pub fn add_block(&self, origin: PeerEndpoint, block: Block, recall: Option<RecallBlock>) {
        let _ = self.tx.send(BridgeMessage::AddBlock {
            origin,
            block,
            recall,
        });
    }

    pub fn add_peer_remote(&self, peer: PeerEndpoint) {
        let _ = self.tx.send(BridgeMessage::AddPeerRemote(peer));
    }

    pub fn add_peer_local(&self, peer: PeerEndpoint) {
        let _ = self.tx.send(BridgeMessage::AddPeerLocal(peer));
    }

    pub async fn get_peers(&self) -> Vec<PeerEndpoint> {
        let (reply_tx, reply_rx) = oneshot::channel();
        if self.tx.send(BridgeMessage::GetPeers(reply_tx)).is_err() {
            return Vec::new();
        }
        reply_rx.await.unwrap_or_default()
    }

    pub fn update_peers(&self, peers: Vec<PeerEndpoint>) {
        let _ = self.tx.send(BridgeMessage::UpdatePeers(peers));
    }

    pub fn gossip_inbound(&self, msg: GossipMessage) {
        let _ = self.tx.send(BridgeMessage::GossipInbound(msg));
    }
}

#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Local listening port, used as the return address when forwarding
    /// blocks.
    pub port: u16,
    pub ignore_peers_time: Duration,
    pub get_more_peers_time: Duration,
    pub processed_capacity: usize,
    pub processed_peer_capacity: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            port: 1984,
            ignore_peers_time: IGNORE_PEERS_TIME,
            get_more_peers_time: GET_MORE_PEERS_TIME,
            processed_capacity: DEFAULT_PROCESSED_CAPACITY,
            processed_peer_capacity: DEFAULT_PROCESSED_PEER_CAPACITY,
        }
    }
}

/// Owns all bridge state and runs the mailbox loop. Not `Clone` — only
/// `BridgeHandle` is shared.
pub struct BridgeActor {
    self_tx: mpsc::UnboundedSender<BridgeMessage>,
    rx: mpsc::UnboundedReceiver<BridgeMessage>,
    config: BridgeConfig,
    external_peers: VecDeque<PeerEndpoint>,
    processed: LruCache<[u8; 32], ()>,
    processed_peer: LruCache<([u8; 32], PeerEndpoint), ()>,
    ignored_peers: HashSet<PeerEndpoint>,
    gossip: Arc<dyn GossipMesh>,
    firewall: FirewallHandle,
    wire: Arc<dyn WireAdapter>,
}

impl BridgeActor {
    pub fn spawn(
        config: BridgeConfig,
        gossip: Arc<dyn GossipMesh>,
        firewall: FirewallHandle,
        wire: Arc<dyn WireAdapter>,
    ) -> BridgeHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        let actor = BridgeActor {
            self_tx: tx.clone(),
            rx,
            processed: LruCache::new(
                NonZeroUsize::new(config.processed_capacity.max(1)).unwrap(),
            ),
            processed_peer: LruCache::new(
                NonZeroUsize::new(config.processed_peer_capacity.max(1)).unwrap(),
            ),
            config,
            external_peers: VecDeque::new(),
            ignored_peers: HashSet::new(),
            gossip,
            firewall,
            wire,
        };
        tokio::spawn(actor.run());
        BridgeHandle { tx }
    }

    /// The mailbox loop. Any error surfaced while handling a message is
    /// logged and the loop resumes from the last good state — failure
    /// isolation for the whole actor; there is no panic/unwrap path
    /// through admission.
    async fn run(mut self) {
        while let Some(msg) = self.rx.recv().await {
            self.handle(msg).await;
        }
    }

    async fn handle(&mut self, msg: BridgeMessage) {
        match msg {
            BridgeMessage::IgnorePeer(peer) => {
                self.ignored_peers.insert(peer);
                let self_tx = self.self_tx.clone();
                let duration = self.config.ignore_peers_time;
                tokio::spawn(async move {
                    tokio::time::sleep(duration).await;
                    let _ = self_tx.send(BridgeMessage::UnignorePeer(peer));
                });
            }
            BridgeMessage::UnignorePeer(peer) => {
                self.ignored_peers.remove(&peer);
            }
            BridgeMessage::IgnoreId(id) => {
                self.processed.put(id, ());
            }
            BridgeMessage::AddTx(tx) => {
                self.maybe_admit(Admittable::Tx(tx)).await;
            }
            BridgeMessage::AddBlock {
                origin,
                block,
                recall,
            } => {
                if self.ignored_peers.contains(&origin) {
                    debug!(peer = %origin, "dropping block from ignored peer");
                    return;
                }
                self.maybe_admit(Admittable::Block { block, recall }).await;
            }
            BridgeMessage::AddPeerRemote(peer) => {
                self.external_peers.push_front(peer);
            }
            BridgeMessage::AddPeerLocal(peer) => {
                self.gossip.add_peer(peer).await;
            }
            BridgeMessage::GetPeers(reply) => {
                let _ = reply.send(self.external_peers.iter().copied().collect());
            }
            BridgeMessage::UpdatePeers(peers) => {
                self.external_peers = peers.into();
            }
            BridgeMessage::GossipInbound(msg) => {
                if let Some(forwarded) = self.gossip.recv(msg).await {
                    self.processed.put(forwarded.id, ());
                    self.fan_out(&forwarded.item).await;
                }
            }
        }
    }

    /// `maybe_admit(type, data)`: dedup, sentinel-block short circuit,
    /// firewall scan, internal gossip distribution, then external
    /// fan-out. Each step runs to completion before the next mailbox
    /// receive, so admission of a given id cannot interleave with itself.
    async fn maybe_admit(&mut self, item: Admittable) {
        let id = item.id();

        if self.processed.contains(&id) {
            debug!(id = %hex::encode(id), "already processed, dropping");
            return;
        }

        if item.is_sentinel_block() {
            debug!(id = %hex::encode(id), "sentinel block payload, treating as processed");
            self.processed.put(id, ());
            return;
        }

        let (kind, data) = match &item {
            Admittable::Tx(tx) => (ScanKind::Tx, tx.data.clone()),
            Admittable::Block { .. } => (ScanKind::Block, Vec::new()),
        };
        let (_, pass) = self.firewall.scan(kind, data).await;
        if !pass {
            warn!(id = %hex::encode(id), "firewall rejected item");
            return;
        }

        let outbound = self
            .gossip
            .send(GossipMessage {
                id,
                item: item.clone(),
            })
            .await;
        self.fan_out(&outbound.item).await;
        self.processed.put(id, ());
    }

    /// Sends the item to every external peer that hasn't already been
    /// credited with it, marking `(id, peer)` before spawning the send so
    /// a repeated admission of the same id can never double-send within
    /// this actor's lifetime.
    async fn fan_out(&mut self, item: &Admittable) {
        let id = item.id();
        let port = self.config.port;
        for peer in self.external_peers.clone() {
            if self.processed_peer.contains(&(id, peer)) {
                continue;
            }
            self.processed_peer.put((id, peer), ());

            let wire = self.wire.clone();
            let item = item.clone();
            tokio::spawn(async move {
                let result = match &item {
                    Admittable::Tx(tx) => wire.send_new_tx(peer, tx).await,
                    Admittable::Block { block, recall } => {
                        wire.send_new_block(peer, port, block, recall.as_ref()).await
                    }
                };
                if let Err(err) = result {
                    warn!(%peer, error = %err, "wire send failed, swallowing (fire-and-forget)");
                }
            });
        }
    }
}
