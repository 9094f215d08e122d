// Composes the transaction verifier: signature, pricing, field-size,
// tag-shape, last-tx chain, and id-binding checks. Always returns a
// boolean — no structured error ever escapes a verification call.
use tracing::warn;

use crate::ledger::{InMemoryLedger, WalletLedger};
use crate::pricing::min_cost;
use crate::transaction::Transaction;

/// Tunables that gate the two explicit escape hatches: unsigned-transaction
/// bypass (debug tooling only) and the genesis-ledger bootstrap pass. Both
/// default to the safe (off) setting.
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// Skip signature and id-binding checks entirely. Never enable this
    /// outside of local development tooling.
    pub allow_unsigned: bool,
    /// Treat an empty wallet ledger as passing the last-tx check
    /// unconditionally, per the upstream genesis-bootstrap behavior.
    pub allow_genesis_bootstrap: bool,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            allow_unsigned: false,
            allow_genesis_bootstrap: false,
        }
    }
}

/// `verify(tx, diff, ledger)` — the conjunction of all six checks.
pub fn verify(
    tx: &Transaction,
    diff: u64,
    ledger: &dyn WalletLedger,
    config: &VerifierConfig,
) -> bool {
    if config.allow_unsigned {
        warn!("verifier: allow_unsigned is enabled, signature and id-binding checks bypassed");
    }

    let signature_ok =
        config.allow_unsigned || weave_crypto::verify(&tx.owner, &tx.canonical(), &tx.signature);
    let id_ok = config.allow_unsigned || tx.id == weave_crypto::hash_id(&tx.signature);
    let pricing_ok = tx.reward >= min_cost(tx.data.len() as u64, diff);
    let size_ok = tx.validate_field_sizes().is_ok();
    let tag_shape_ok = tx.tags_well_formed();
    let last_tx_ok = verify_last_tx(tx, ledger, config);

    signature_ok && id_ok && pricing_ok && size_ok && tag_shape_ok && last_tx_ok
}

fn verify_last_tx(tx: &Transaction, ledger: &dyn WalletLedger, config: &VerifierConfig) -> bool {
    if ledger.is_empty() {
        return config.allow_genesis_bootstrap;
    }
    let owner_addr = weave_crypto::to_address(&tx.owner);
    match ledger.lookup(&owner_addr) {
        Some(entry) => entry.last_tx == tx.last_tx,
        None => false,
    }
}

/// Verifies a sequence in order, applying each successfully-verified
/// transaction to `ledger` before checking the next. A single failure
/// fails the whole sequence.
pub fn verify_txs(
    txs: &[Transaction],
    diff: u64,
    ledger: &mut InMemoryLedger,
    config: &VerifierConfig,
) -> bool {
    for tx in txs {
        if !verify(tx, diff, ledger, config) {
            return false;
        }
        ledger.apply(tx);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::LedgerEntry;
    use weave_crypto::Keypair;

    fn bootstrap_config() -> VerifierConfig {
        VerifierConfig {
            allow_unsigned: false,
            allow_genesis_bootstrap: true,
        }
    }

    #[test]
    fn fresh_signed_tx_verifies_against_empty_ledger_when_bootstrap_allowed() {
        let kp = Keypair::generate().unwrap();
        let mut tx = Transaction::with_reward(b"TEST DATA".to_vec(), 10_000_000_000_000);
        tx.sign(&kp).unwrap();
        let ledger = InMemoryLedger::new();
        assert!(verify(&tx, 1, &ledger, &bootstrap_config()));
    }

    #[test]
    fn empty_ledger_fails_without_bootstrap_flag() {
        let kp = Keypair::generate().unwrap();
        let mut tx = Transaction::with_reward(b"TEST DATA".to_vec(), 10_000_000_000_000);
        tx.sign(&kp).unwrap();
        let ledger = InMemoryLedger::new();
        assert!(!verify(&tx, 1, &ledger, &VerifierConfig::default()));
    }

    #[test]
    fn tampering_with_data_breaks_verification() {
        let kp = Keypair::generate().unwrap();
        let mut tx = Transaction::with_reward(b"TEST DATA".to_vec(), 10_000_000_000_000);
        tx.sign(&kp).unwrap();
        tx.data = b"FAKE DATA".to_vec();
        let ledger = InMemoryLedger::new();
        assert!(!verify(&tx, 1, &ledger, &bootstrap_config()));
    }

    #[test]
    fn reward_below_min_cost_fails_pricing_check() {
        let kp = Keypair::generate().unwrap();
        let mut tx = Transaction::with_reward(b"TEST DATA".to_vec(), 1);
        tx.sign(&kp).unwrap();
        let ledger = InMemoryLedger::new();
        assert!(!verify(&tx, 10, &ledger, &bootstrap_config()));
    }

    #[test]
    fn last_tx_chain_checked_against_ledger_entry() {
        let kp = Keypair::generate().unwrap();
        let addr = kp.address().unwrap();
        let id1 = [5u8; 32];

        let mut ledger = InMemoryLedger::new();
        ledger.insert(LedgerEntry::with_last_tx(addr, 2000, id1));

        let mut matching = Transaction::with_last_tx(b"x".to_vec(), 10_000_000_000_000, id1);
        matching.sign(&kp).unwrap();
        assert!(verify(&matching, 1, &ledger, &VerifierConfig::default()));

        let mut mismatched = Transaction::with_reward(b"x".to_vec(), 10_000_000_000_000);
        mismatched.sign(&kp).unwrap();
        assert!(!verify(&mismatched, 1, &ledger, &VerifierConfig::default()));
    }

    #[test]
    fn verify_txs_chains_ledger_updates_across_sequence() {
        let kp = Keypair::generate().unwrap();
        let addr = kp.address().unwrap();
        let mut ledger = InMemoryLedger::new();
        ledger.insert(LedgerEntry::new(addr, 1_000_000_000_000_000));

        let mut first = Transaction::with_reward(b"one".to_vec(), 10_000_000_000_000);
        first.sign(&kp).unwrap();

        let mut second = Transaction::with_last_tx(b"two".to_vec(), 10_000_000_000_000, first.id);
        second.sign(&kp).unwrap();

        assert!(verify_txs(&[first, second], 1, &mut ledger, &VerifierConfig::default()));
    }

    #[test]
    fn verify_txs_fails_whole_sequence_on_broken_chain() {
        let kp = Keypair::generate().unwrap();
        let addr = kp.address().unwrap();
        let mut ledger = InMemoryLedger::new();
        ledger.insert(LedgerEntry::new(addr, 1_000_000_000_000_000));

        let mut first = Transaction::with_reward(b"one".to_vec(), 10_000_000_000_000);
        first.sign(&kp).unwrap();

        // wrong last_tx: doesn't reference `first`
        let mut second = Transaction::with_reward(b"two".to_vec(), 10_000_000_000_000);
        second.sign(&kp).unwrap();

        assert!(!verify_txs(&[first, second], 1, &mut ledger, &VerifierConfig::default()));
    }

    #[test]
    fn unsigned_bypass_only_works_when_explicitly_enabled() {
        let tx = Transaction::with_reward(b"TEST DATA".to_vec(), 10_000_000_000_000);
        let ledger = InMemoryLedger::new();
        let config = VerifierConfig {
            allow_unsigned: true,
            allow_genesis_bootstrap: true,
        };
        assert!(verify(&tx, 1, &ledger, &config));
        assert!(!verify(&tx, 1, &ledger, &VerifierConfig::default()));
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use crate::pricing::min_cost;
    use proptest::prelude::*;

    fn bootstrap_config() -> VerifierConfig {
        VerifierConfig {
            allow_unsigned: false,
            allow_genesis_bootstrap: true,
        }
    }

    proptest! {
        #[test]
        fn sign_verify_round_trips_for_any_reward_above_min_cost(
            data in proptest::collection::vec(any::<u8>(), 0..256),
            extra_reward in 0u128..1_000_000_000_000u128,
        ) {
            let kp = Keypair::generate().unwrap();
            let reward = min_cost(data.len() as u64, 1) + extra_reward;
            let mut tx = Transaction::with_reward(data, reward);
            tx.sign(&kp).unwrap();
            let ledger = InMemoryLedger::new();
            prop_assert!(verify(&tx, 1, &ledger, &bootstrap_config()));
        }

        #[test]
        fn any_data_mutation_breaks_verification(
            data in proptest::collection::vec(any::<u8>(), 1..256),
            mutate_index in 0usize..255,
        ) {
            let kp = Keypair::generate().unwrap();
            let reward = min_cost(data.len() as u64, 1) + 1_000_000_000_000;
            let mut tx = Transaction::with_reward(data.clone(), reward);
            tx.sign(&kp).unwrap();

            let index = mutate_index % tx.data.len();
            tx.data[index] = tx.data[index].wrapping_add(1);

            let ledger = InMemoryLedger::new();
            prop_assert!(!verify(&tx, 1, &ledger, &bootstrap_config()));
        }

        #[test]
        fn signed_transaction_id_is_always_hash_of_signature(
            data in proptest::collection::vec(any::<u8>(), 0..256),
        ) {
            let kp = Keypair::generate().unwrap();
            let mut tx = Transaction::with_reward(data, 10_000_000_000_000);
            tx.sign(&kp).unwrap();
            prop_assert_eq!(tx.id, weave_crypto::hash_id(&tx.signature));
        }
    }
}
