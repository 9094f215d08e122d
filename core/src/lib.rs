// Weave core: transaction construction, canonical encoding, pricing,
// wallet ledger chaining, and the boolean transaction verifier. The
// gossip-bridge actor that consumes these types lives in `weave-p2p`.

pub mod block;
pub mod error;
pub mod ledger;
pub mod pricing;
pub mod transaction;
pub mod verifier;

pub use block::{Block, BlockPayload, RecallBlock};
pub use error::CoreError;
pub use ledger::{InMemoryLedger, LedgerEntry, WalletLedger};
pub use pricing::min_cost;
pub use transaction::{Tag, Transaction};
pub use verifier::{verify, verify_txs, VerifierConfig};

/// 1 AR in Winstons — the smallest denomination of the native token.
pub const WINSTON_PER_AR: u128 = 1_000_000_000_000;

/// Convenience for expressing test/demo rewards in AR instead of Winstons.
pub fn ar(amount: u128) -> u128 {
    amount * WINSTON_PER_AR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ar_converts_to_winstons() {
        assert_eq!(ar(1), WINSTON_PER_AR);
        assert_eq!(ar(10), 10 * WINSTON_PER_AR);
    }
}
