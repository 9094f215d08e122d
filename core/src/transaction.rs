// Transaction structure: canonical encoding, construction variants, and
// field-size bounds. Signature/pricing/last-tx *verification* lives in
// `verifier` — this module only builds and encodes transactions.
use serde::{Deserialize, Serialize};
use weave_crypto::Keypair;

use crate::error::CoreError;

pub const MAX_OWNER_BYTES: usize = 512;
pub const MAX_SIGNATURE_BYTES: usize = 512;
pub const MAX_TAGS_BYTES: usize = 2048;
pub const MAX_QUANTITY_DECIMAL_BYTES: usize = 21;
pub const MAX_REWARD_DECIMAL_BYTES: usize = 21;
pub const ADDRESS_BYTES: usize = 32;

/// A single (name, value) tag. The 2-tuple shape the tag-shape check
/// requires is structural here — a `Tag` can never be anything but a name
/// and a value — so `Transaction::tags_well_formed` is a trivial `true`,
/// documented rather than hidden.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Tag {
    pub name: Vec<u8>,
    pub value: Vec<u8>,
}

impl Tag {
    pub fn new(name: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    fn flattened_len(&self) -> usize {
        self.name.len() + self.value.len()
    }
}

/// A transaction as specified in the data model: an id, an optional
/// last-tx chain reference, an owner public key, tags, an optional
/// target address, a quantity/reward pair, arbitrary data, and a
/// signature over the canonical encoding.
///
/// `last_tx` and `target` are `Vec<u8>` rather than `[u8; 32]` because
/// "empty" is a distinct, meaningful state from "32 zero bytes" in the
/// canonical encoding — collapsing the two would silently change what
/// gets signed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: [u8; 32],
    pub last_tx: Vec<u8>,
    pub owner: Vec<u8>,
    pub tags: Vec<Tag>,
    pub target: Vec<u8>,
    pub quantity: u128,
    pub data: Vec<u8>,
    pub signature: Vec<u8>,
    pub reward: u128,
}

fn random_id() -> [u8; 32] {
    use rand::RngCore;
    let mut id = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut id);
    id
}

/// Normalizes a `destination` field: a 32-byte value is already an address;
/// anything else is treated as a public key and hashed down to one via
/// `wallet.to_address`.
fn normalize_destination(destination: &[u8]) -> Vec<u8> {
    if destination.len() == ADDRESS_BYTES {
        destination.to_vec()
    } else {
        weave_crypto::to_address(destination).to_vec()
    }
}

impl Transaction {
    /// No-arg construction variant: a fresh id, everything else empty.
    pub fn new() -> Self {
        Self {
            id: random_id(),
            last_tx: Vec::new(),
            owner: Vec::new(),
            tags: Vec::new(),
            target: Vec::new(),
            quantity: 0,
            data: Vec::new(),
            signature: Vec::new(),
            reward: 0,
        }
    }

    /// Data-only transaction, reward left at zero (caller fills it in, or
    /// uses `with_reward`).
    pub fn with_data(data: Vec<u8>) -> Self {
        Self {
            data,
            ..Self::new()
        }
    }

    pub fn with_reward(data: Vec<u8>, reward: u128) -> Self {
        Self {
            reward,
            ..Self::with_data(data)
        }
    }

    pub fn with_last_tx(data: Vec<u8>, reward: u128, last_tx: [u8; 32]) -> Self {
        Self {
            last_tx: last_tx.to_vec(),
            ..Self::with_reward(data, reward)
        }
    }

    /// Value-transfer construction variant. `destination` may be a 32-byte
    /// address or a public key (normalized to an address).
    pub fn transfer(
        destination: &[u8],
        reward: u128,
        quantity: u128,
        last_tx: Option<[u8; 32]>,
    ) -> Self {
        Self {
            target: normalize_destination(destination),
            reward,
            quantity,
            last_tx: last_tx.map(|t| t.to_vec()).unwrap_or_default(),
            ..Self::new()
        }
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    /// The bit-exact signing/id input: `owner || target || data ||
    /// ascii_decimal(quantity) || ascii_decimal(reward) || last_tx`.
    pub fn canonical(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(
            self.owner.len() + self.target.len() + self.data.len() + self.last_tx.len() + 48,
        );
        buf.extend_from_slice(&self.owner);
        buf.extend_from_slice(&self.target);
        buf.extend_from_slice(&self.data);
        buf.extend_from_slice(ascii_decimal(self.quantity).as_bytes());
        buf.extend_from_slice(ascii_decimal(self.reward).as_bytes());
        buf.extend_from_slice(&self.last_tx);
        buf
    }

    /// Signs in place: sets `owner`, `signature`, then `id`. A mutation of
    /// any other field afterward invalidates the signature — this type
    /// does not enforce immutability itself; the verifier is the
    /// enforcement point.
    pub fn sign(&mut self, keypair: &Keypair) -> Result<(), CoreError> {
        self.owner = keypair.public_key_bytes()?;
        let signature = keypair.sign(&self.canonical())?;
        self.id = weave_crypto::hash_id(&signature);
        self.signature = signature;
        Ok(())
    }

    /// The field-size bounds, independent of signature/pricing checks.
    pub fn validate_field_sizes(&self) -> Result<(), CoreError> {
        if self.owner.len() > MAX_OWNER_BYTES {
            return Err(CoreError::OwnerTooLarge);
        }
        if self.signature.len() > MAX_SIGNATURE_BYTES {
            return Err(CoreError::SignatureTooLarge);
        }
        if !self.target.is_empty() && self.target.len() != ADDRESS_BYTES {
            return Err(CoreError::InvalidDestination);
        }
        if !self.last_tx.is_empty() && self.last_tx.len() != ADDRESS_BYTES {
            return Err(CoreError::InvalidDestination);
        }
        let tags_len: usize = self.tags.iter().map(Tag::flattened_len).sum();
        if tags_len > MAX_TAGS_BYTES {
            return Err(CoreError::TagsTooLarge);
        }
        if ascii_decimal(self.quantity).len() > MAX_QUANTITY_DECIMAL_BYTES {
            return Err(CoreError::QuantityTooLarge);
        }
        if ascii_decimal(self.reward).len() > MAX_REWARD_DECIMAL_BYTES {
            return Err(CoreError::RewardTooLarge);
        }
        Ok(())
    }

    /// Every `Tag` is structurally a 2-tuple; this exists so the verifier
    /// can name the tag-shape check explicitly without special-casing the
    /// always-true result.
    pub fn tags_well_formed(&self) -> bool {
        true
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

/// Base-10 ASCII representation with no leading zeros and no sign.
fn ascii_decimal(n: u128) -> String {
    n.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_concatenates_fields_in_order() {
        let mut tx = Transaction::with_reward(b"data".to_vec(), 7);
        tx.owner = b"OWNER".to_vec();
        tx.target = vec![9u8; 32];
        tx.last_tx = vec![1u8; 32];
        tx.quantity = 42;
        let mut expected = Vec::new();
        expected.extend_from_slice(b"OWNER");
        expected.extend_from_slice(&[9u8; 32]);
        expected.extend_from_slice(b"data");
        expected.extend_from_slice(b"42");
        expected.extend_from_slice(b"7");
        expected.extend_from_slice(&[1u8; 32]);
        assert_eq!(tx.canonical(), expected);
    }

    #[test]
    fn empty_last_tx_and_target_contribute_zero_bytes() {
        let tx = Transaction::with_data(b"x".to_vec());
        assert!(tx.canonical().starts_with(b"x0"));
    }

    #[test]
    fn sign_sets_owner_signature_and_id() {
        let kp = Keypair::generate().unwrap();
        let mut tx = Transaction::with_reward(b"TEST DATA".to_vec(), 10);
        tx.sign(&kp).unwrap();
        assert_eq!(tx.owner, kp.public_key_bytes().unwrap());
        assert_eq!(tx.id, weave_crypto::hash_id(&tx.signature));
    }

    #[test]
    fn transfer_normalizes_full_public_key_to_address() {
        let kp = Keypair::generate().unwrap();
        let pub_bytes = kp.public_key_bytes().unwrap();
        let tx = Transaction::transfer(&pub_bytes, 1, 1, None);
        assert_eq!(tx.target, weave_crypto::to_address(&pub_bytes).to_vec());
    }

    #[test]
    fn transfer_keeps_32_byte_destination_as_address() {
        let addr = [3u8; 32];
        let tx = Transaction::transfer(&addr, 1, 1, None);
        assert_eq!(tx.target, addr.to_vec());
    }

    #[test]
    fn oversized_owner_fails_field_size_validation() {
        let mut tx = Transaction::new();
        tx.owner = vec![0u8; MAX_OWNER_BYTES + 1];
        assert!(tx.validate_field_sizes().is_err());
    }

    #[test]
    fn oversized_tags_fail_field_size_validation() {
        let mut tx = Transaction::new();
        tx.tags.push(Tag::new(vec![0u8; MAX_TAGS_BYTES], vec![]));
        assert!(tx.validate_field_sizes().is_err());
    }
}
