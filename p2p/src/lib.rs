// Gossip-bridge core: admits transactions and blocks from external peers,
// dedupes and screens them, and fans them out to the internal gossip mesh
// and to external HTTP peers.

pub mod bridge;
pub mod firewall;
pub mod gossip;
pub mod peer;
pub mod peer_manager;
pub mod peer_maintainer;
pub mod signature_engine;
pub mod wire;

pub use bridge::{Admittable, BridgeActor, BridgeConfig, BridgeHandle, BridgeMessage};
pub use firewall::{FirewallActor, FirewallHandle, ScanKind};
pub use gossip::{GossipMesh, GossipMessage, InProcessGossipMesh};
pub use peer::PeerEndpoint;
pub use peer_manager::{HttpPeerManager, PeerManager, StaticPeerManager};
pub use signature_engine::{SignatureEngine, SubstringSignatureEngine};
pub use wire::{ReqwestWireAdapter, WireAdapter};
