// Weave Bridge Cryptography - wallet key management, signing, and verification.
//
// The wire contract is RSA (PKCS1v15 padding) over SHA-256: every signature
// this crate produces or checks uses that pairing, matching the protocol's
// HASH_ALG/SIGN_ALG constants bit-for-bit.

pub mod error;
pub mod wallet;

pub use error::CryptoError;
pub use wallet::{hash_id, to_address, verify, Keypair, RSA_KEY_BITS};
