// Error types for cryptographic operations
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    #[error("invalid public key encoding: {0}")]
    InvalidPublicKey(String),

    #[error("invalid private key encoding: {0}")]
    InvalidPrivateKey(String),

    #[error("signing operation failed: {0}")]
    SigningFailed(String),
}

impl From<rsa::Error> for CryptoError {
    fn from(err: rsa::Error) -> Self {
        CryptoError::SigningFailed(err.to_string())
    }
}

impl From<rsa::pkcs1::Error> for CryptoError {
    fn from(err: rsa::pkcs1::Error) -> Self {
        CryptoError::InvalidPublicKey(err.to_string())
    }
}
