// Firewall Scanner actor: a long-lived mailbox that screens transaction
// payloads against a read-only signature table loaded at start. Blocks
// always pass; unknown item kinds fail closed.
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::signature_engine::{FirewallSignature, SignatureEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanKind {
    Block,
    Tx,
    /// Any item type other than `block`/`tx` fails closed.
    Other,
}

struct ScanRequest {
    kind: ScanKind,
    data: Vec<u8>,
    reply: oneshot::Sender<(Vec<u8>, bool)>,
}

/// Cloneable handle to a running `FirewallActor`.
#[derive(Clone)]
pub struct FirewallHandle {
    tx: mpsc::UnboundedSender<ScanRequest>,
}

impl FirewallHandle {
    /// `scan(type, data) -> (data, pass)`. An actor that has shut down
    /// fails closed (`pass = false`).
    pub async fn scan(&self, kind: ScanKind, data: Vec<u8>) -> (Vec<u8>, bool) {
        let (reply_tx, reply_rx) = oneshot::channel();
        let data_for_reply = data.clone();
        if self
            .tx
            .send(ScanRequest {
                kind,
                data,
                reply: reply_tx,
            })
            .is_err()
        {
            return (data_for_reply, false);
        }
        reply_rx.await.unwrap_or((data_for_reply, false))
    }
}

/// Owns the signature table and runs the scan mailbox loop.
pub struct FirewallActor {
    engine: Arc<dyn SignatureEngine>,
    signatures: Vec<FirewallSignature>,
    rx: mpsc::UnboundedReceiver<ScanRequest>,
}

impl FirewallActor {
    pub fn spawn(engine: Arc<dyn SignatureEngine>) -> FirewallHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        let signatures = engine.all();
        let actor = FirewallActor {
            engine,
            signatures,
            rx,
        };
        tokio::spawn(actor.run());
        FirewallHandle { tx }
    }

    async fn run(mut self) {
        while let Some(req) = self.rx.recv().await {
            let pass = match req.kind {
                ScanKind::Block => true,
                ScanKind::Tx => self
                    .engine
                    .is_infected(&req.data, &self.signatures)
                    .is_none(),
                ScanKind::Other => false,
            };
            debug!(kind = ?req.kind, pass, "firewall scan");
            let _ = req.reply.send((req.data, pass));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature_engine::SubstringSignatureEngine;

    #[tokio::test]
    async fn block_always_passes() {
        let engine = Arc::new(SubstringSignatureEngine::new(vec![b"anything".to_vec()]));
        let handle = FirewallActor::spawn(engine);
        let (_, pass) = handle.scan(ScanKind::Block, b"anything".to_vec()).await;
        assert!(pass);
    }

    #[tokio::test]
    async fn tx_matching_signature_fails_scan() {
        let engine = Arc::new(SubstringSignatureEngine::new(vec![b"badstuff".to_vec()]));
        let handle = FirewallActor::spawn(engine);
        let (_, pass) = handle.scan(ScanKind::Tx, b"badstuff".to_vec()).await;
        assert!(!pass);
        let (_, pass) = handle.scan(ScanKind::Tx, b"goodstuff".to_vec()).await;
        assert!(pass);
    }

    #[tokio::test]
    async fn unknown_item_kind_fails_closed() {
        let engine = Arc::new(SubstringSignatureEngine::new(vec![]));
        let handle = FirewallActor::spawn(engine);
        let (_, pass) = handle.scan(ScanKind::Other, b"anything".to_vec()).await;
        assert!(!pass);
    }
}
