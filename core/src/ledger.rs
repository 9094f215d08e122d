// Wallet ledger: the last-tx chain the verifier checks transactions
// against. The ledger itself is an external collaborator; this module
// defines the entry shape, a lookup trait boundary, and an in-process
// reference implementation for tests and the bridge CLI.
use std::collections::HashMap;

use crate::transaction::Transaction;

/// `(address, balance, last_tx)` — a single wallet's ledger record.
/// `last_tx` is empty when the wallet has never transacted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub address: [u8; 32],
    pub balance: u128,
    pub last_tx: Vec<u8>,
}

impl LedgerEntry {
    pub fn new(address: [u8; 32], balance: u128) -> Self {
        Self {
            address,
            balance,
            last_tx: Vec::new(),
        }
    }

    pub fn with_last_tx(address: [u8; 32], balance: u128, last_tx: [u8; 32]) -> Self {
        Self {
            address,
            balance,
            last_tx: last_tx.to_vec(),
        }
    }
}

/// The boundary the verifier's last-tx check depends on. `is_empty` lets
/// the genesis-bootstrap escape hatch short-circuit without a lookup.
pub trait WalletLedger {
    fn is_empty(&self) -> bool;
    fn lookup(&self, address: &[u8; 32]) -> Option<&LedgerEntry>;
}

/// A plain in-memory ledger, indexed by address.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    entries: HashMap<[u8; 32], LedgerEntry>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: LedgerEntry) {
        self.entries.insert(entry.address, entry);
    }

    /// Applies a verified transaction: debits the sender, credits the
    /// target (if any), and advances the sender's `last_tx` to this
    /// transaction's id. Used by `verify_txs` to chain verification across
    /// a sequence.
    pub fn apply(&mut self, tx: &Transaction) {
        let owner_addr = weave_crypto::to_address(&tx.owner);
        let sender = self
            .entries
            .entry(owner_addr)
            .or_insert_with(|| LedgerEntry::new(owner_addr, 0));
        sender.balance = sender.balance.saturating_sub(tx.quantity);
        sender.last_tx = tx.id.to_vec();

        if tx.target.len() == 32 {
            let mut target_addr = [0u8; 32];
            target_addr.copy_from_slice(&tx.target);
            let recipient = self
                .entries
                .entry(target_addr)
                .or_insert_with(|| LedgerEntry::new(target_addr, 0));
            recipient.balance = recipient.balance.saturating_add(tx.quantity);
        }
    }
}

impl WalletLedger for InMemoryLedger {
    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup(&self, address: &[u8; 32]) -> Option<&LedgerEntry> {
        self.entries.get(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ledger_reports_empty() {
        let ledger = InMemoryLedger::new();
        assert!(ledger.is_empty());
        assert!(ledger.lookup(&[0u8; 32]).is_none());
    }

    #[test]
    fn apply_advances_last_tx_and_moves_balance() {
        let mut ledger = InMemoryLedger::new();
        let kp = weave_crypto::Keypair::generate().unwrap();
        let owner_addr = kp.address().unwrap();
        ledger.insert(LedgerEntry::new(owner_addr, 1000));

        let target = [7u8; 32];
        let mut tx = Transaction::transfer(&target, 1, 100, None);
        tx.sign(&kp).unwrap();
        ledger.apply(&tx);

        let sender = ledger.lookup(&owner_addr).unwrap();
        assert_eq!(sender.balance, 900);
        assert_eq!(sender.last_tx, tx.id.to_vec());
        let recipient = ledger.lookup(&target).unwrap();
        assert_eq!(recipient.balance, 100);
    }
}
