// RSA + SHA-256 wallet primitives: keypair generation, signing, verification,
// and address derivation.
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey, EncodeRsaPrivateKey, EncodeRsaPublicKey};
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};

use crate::error::CryptoError;

/// Default RSA modulus size. Arweave-style wallets use 4096-bit keys; we use
/// 2048 here to keep owner/signature fields comfortably inside the field
/// bounds while leaving headroom in `owner <= 512 bytes` / `signature <= 512 bytes`.
pub const RSA_KEY_BITS: usize = 2048;

/// A generated keypair. `private` never leaves this type except through
/// explicit export for persistence (`to_der`/`from_der`).
pub struct Keypair {
    private: RsaPrivateKey,
    public: RsaPublicKey,
}

impl Keypair {
    /// Generate a fresh keypair using the OS CSPRNG, per the RNG-quality
    /// distinction for id/key material (non-cryptographic RNGs are only
    /// acceptable for test data, never for keys or ids).
    pub fn generate() -> Result<Self, CryptoError> {
        let mut rng = rand::rngs::OsRng;
        let private = RsaPrivateKey::new(&mut rng, RSA_KEY_BITS)
            .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;
        let public = RsaPublicKey::from(&private);
        Ok(Self { private, public })
    }

    /// The wire form of the public key, used verbatim as `tx.owner`.
    pub fn public_key_bytes(&self) -> Result<Vec<u8>, CryptoError> {
        Ok(self.public.to_pkcs1_der()?.as_bytes().to_vec())
    }

    /// DER encoding of the private key, for key-file persistence.
    pub fn private_key_der(&self) -> Result<Vec<u8>, CryptoError> {
        Ok(self
            .private
            .to_pkcs1_der()
            .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?
            .as_bytes()
            .to_vec())
    }

    /// Reconstruct a keypair from a persisted private-key DER blob.
    pub fn from_private_key_der(der: &[u8]) -> Result<Self, CryptoError> {
        let private = RsaPrivateKey::from_pkcs1_der(der)
            .map_err(|e| CryptoError::InvalidPrivateKey(e.to_string()))?;
        let public = RsaPublicKey::from(&private);
        Ok(Self { private, public })
    }

    pub fn address(&self) -> Result<[u8; 32], CryptoError> {
        Ok(to_address(&self.public_key_bytes()?))
    }

    /// Sign `message` (already the canonical encoding; this function does not
    /// itself build that encoding).
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let digest = Sha256::digest(message);
        self.private
            .sign(Pkcs1v15Sign::new::<Sha256>(), &digest)
            .map_err(CryptoError::from)
    }
}

/// `wallet.to_address/1`: the 32-byte SHA-256 digest of a public key's wire bytes.
pub fn to_address(public_key_bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(public_key_bytes).into()
}

/// The id-binding hash: `id = SHA-256(signature)`. Used both when signing
/// (to derive the freshly-signed id) and when verifying (to check binding).
pub fn hash_id(signature: &[u8]) -> [u8; 32] {
    Sha256::digest(signature).into()
}

/// `wallet.verify/3`: true iff `signature` is a valid RSA-PKCS1v15/SHA-256
/// signature of `message` under the public key encoded in `public_key_bytes`.
///
/// Returns `false` rather than an error on any malformed input — signature
/// verification is a boolean predicate throughout this crate (see the
/// transaction verifier), never a source of propagated errors.
pub fn verify(public_key_bytes: &[u8], message: &[u8], signature: &[u8]) -> bool {
    let public_key = match RsaPublicKey::from_pkcs1_der(public_key_bytes) {
        Ok(key) => key,
        Err(_) => return false,
    };
    let digest = Sha256::digest(message);
    public_key
        .verify(Pkcs1v15Sign::new::<Sha256>(), &digest, signature)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_then_verify_round_trips() {
        let kp = Keypair::generate().unwrap();
        let msg = b"canonical transaction bytes";
        let sig = kp.sign(msg).unwrap();
        let pub_bytes = kp.public_key_bytes().unwrap();
        assert!(verify(&pub_bytes, msg, &sig));
    }

    #[test]
    fn tampered_message_fails_verification() {
        let kp = Keypair::generate().unwrap();
        let sig = kp.sign(b"original").unwrap();
        let pub_bytes = kp.public_key_bytes().unwrap();
        assert!(!verify(&pub_bytes, b"tampered", &sig));
    }

    #[test]
    fn address_is_deterministic_hash_of_public_key() {
        let kp = Keypair::generate().unwrap();
        let pub_bytes = kp.public_key_bytes().unwrap();
        assert_eq!(kp.address().unwrap(), to_address(&pub_bytes));
    }

    #[test]
    fn private_key_round_trips_through_der() {
        let kp = Keypair::generate().unwrap();
        let der = kp.private_key_der().unwrap();
        let restored = Keypair::from_private_key_der(&der).unwrap();
        assert_eq!(kp.public_key_bytes().unwrap(), restored.public_key_bytes().unwrap());
    }

    #[test]
    fn malformed_private_key_der_is_rejected() {
        let err = Keypair::from_private_key_der(b"not a key").unwrap_err();
        assert!(matches!(err, CryptoError::InvalidPrivateKey(_)));
    }
}
