// Block shape the bridge needs to dedupe and forward. Block validation
// itself is out of scope — this crate only needs enough structure to
// identify a block and to recognize the "not found" / "unavailable"
// sentinel payloads the bridge treats as already processed.
use serde::{Deserialize, Serialize};

/// A block as the bridge sees it: identified by `indep_hash`, carrying the
/// ids of its transactions opaquely (never the transactions themselves).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Block {
    pub indep_hash: [u8; 32],
    pub height: u64,
    pub previous_block: [u8; 32],
    pub txs: Vec<[u8; 32]>,
    pub payload: BlockPayload,
}

/// A real block carries `Found`; peers that don't have the block yet (or
/// can no longer serve it) respond with one of the sentinel variants,
/// which `maybe_admit` treats as already-processed and drops before it
/// ever reaches the firewall or gossip mesh.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlockPayload {
    Found,
    NotFound,
    Unavailable,
}

impl Block {
    pub fn new(indep_hash: [u8; 32], height: u64, previous_block: [u8; 32]) -> Self {
        Self {
            indep_hash,
            height,
            previous_block,
            txs: Vec::new(),
            payload: BlockPayload::Found,
        }
    }

    pub fn not_found(indep_hash: [u8; 32]) -> Self {
        Self {
            indep_hash,
            height: 0,
            previous_block: [0u8; 32],
            txs: Vec::new(),
            payload: BlockPayload::NotFound,
        }
    }

    pub fn unavailable(indep_hash: [u8; 32]) -> Self {
        Self {
            indep_hash,
            height: 0,
            previous_block: [0u8; 32],
            txs: Vec::new(),
            payload: BlockPayload::Unavailable,
        }
    }

    /// True for the `not_found`/`unavailable` sentinel payloads: these are
    /// treated as already processed and dropped before admission.
    pub fn is_sentinel(&self) -> bool {
        matches!(self.payload, BlockPayload::NotFound | BlockPayload::Unavailable)
    }
}

/// A recall block, carried opaquely alongside a new block purely for
/// storage-proof purposes. This crate never inspects its contents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecallBlock {
    pub indep_hash: [u8; 32],
    pub data: Vec<u8>,
}
