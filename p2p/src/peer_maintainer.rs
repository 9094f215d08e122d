// The periodic "get more peers" loop: a self-addressed `get_more_peers`
// timer is realized here as a standalone tokio task rather than a message
// the bridge sends itself, since tokio gives a cleaner primitive for
// "do this every N seconds" than a mailbox self-send loop.
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::bridge::BridgeHandle;
use crate::peer_manager::PeerManager;
use crate::wire::WireAdapter;

/// Runs forever, refreshing the bridge's external peer list every
/// `interval` and telling the wire adapter about any peer it hasn't seen
/// before (`peer_manager.update` + `wire.add_peer`).
pub async fn run(
    bridge: BridgeHandle,
    peer_manager: Arc<dyn PeerManager>,
    wire: Arc<dyn WireAdapter>,
    interval: Duration,
) {
    loop {
        tokio::time::sleep(interval).await;
        let existing = bridge.get_peers().await;
        match peer_manager.update(existing.clone()).await {
            Ok(refreshed) => {
                let known: std::collections::HashSet<_> = existing.iter().copied().collect();
                for peer in refreshed.iter().filter(|p| !known.contains(p)) {
                    if let Err(err) = wire.add_peer(*peer).await {
                        warn!(%peer, error = %err, "failed to announce ourselves to new peer");
                    }
                }
                debug!(count = refreshed.len(), "peer list refreshed");
                bridge.update_peers(refreshed);
            }
            Err(err) => {
                warn!(error = %err, "peer list refresh failed, keeping existing peers");
            }
        }
    }
}
