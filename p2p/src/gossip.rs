// Gossip mesh adapter: the internal peer-to-peer broadcast substrate,
// distinct from the external HTTP peer set. Modeled as a trait boundary
// since the mesh's own wire protocol is a collaborator this crate does
// not reimplement.
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::bridge::Admittable;
use crate::peer::PeerEndpoint;

/// An item passed through the gossip mesh: either an admitted transaction
/// or block, identified opaquely by id for the mesh's own dedup.
#[derive(Debug, Clone)]
pub struct GossipMessage {
    pub id: [u8; 32],
    pub item: Admittable,
}

/// `gossip.init/add_peers/send/recv`.
#[async_trait]
pub trait GossipMesh: Send + Sync {
    async fn add_peer(&self, peer: PeerEndpoint);

    /// Hands `msg` to the mesh for internal distribution, returning the
    /// outbound message the bridge fans out externally.
    async fn send(&self, msg: GossipMessage) -> GossipMessage;

    /// An inbound message arriving from the mesh. `None` means the mesh
    /// itself already ignored/deduped it — the bridge must not fan it out.
    async fn recv(&self, msg: GossipMessage) -> Option<GossipMessage>;
}

/// Reference implementation: tracks member peers and a seen-id set
/// standing in for a real `libp2p::gossipsub` topic. What matters here is
/// the `add_peer`/`send`/`recv` contract, not a full gossip protocol —
/// the mesh's internal wire format is out of scope for this crate.
pub struct InProcessGossipMesh {
    peers: Mutex<HashSet<PeerEndpoint>>,
    seen: Mutex<HashSet<[u8; 32]>>,
    send_calls: AtomicUsize,
}

impl InProcessGossipMesh {
    pub fn new() -> Self {
        Self {
            peers: Mutex::new(HashSet::new()),
            seen: Mutex::new(HashSet::new()),
            send_calls: AtomicUsize::new(0),
        }
    }

    pub fn member_count(&self) -> usize {
        self.peers.lock().unwrap().len()
    }

    /// Number of times `send` has been called — used by bridge tests to
    /// assert exactly-once internal distribution.
    pub fn send_calls(&self) -> usize {
        self.send_calls.load(Ordering::SeqCst)
    }
}

impl Default for InProcessGossipMesh {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GossipMesh for InProcessGossipMesh {
    async fn add_peer(&self, peer: PeerEndpoint) {
        self.peers.lock().unwrap().insert(peer);
    }

    async fn send(&self, msg: GossipMessage) -> GossipMessage {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().insert(msg.id);
        msg
    }

    async fn recv(&self, msg: GossipMessage) -> Option<GossipMessage> {
        let mut seen = self.seen.lock().unwrap();
        if seen.contains(&msg.id) {
            None
        } else {
            seen.insert(msg.id);
            Some(msg)
        }
    }
}
