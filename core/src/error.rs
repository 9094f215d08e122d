// Error types for the weave core: transaction construction and field-size
// validation. Verification itself stays boolean (see `verifier`) — these
// variants cover the surfaces that legitimately need to distinguish
// failure reasons.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("owner exceeds 512 bytes")]
    OwnerTooLarge,

    #[error("signature exceeds 512 bytes")]
    SignatureTooLarge,

    #[error("tags serialize to more than 2048 bytes")]
    TagsTooLarge,

    #[error("quantity decimal representation exceeds 21 bytes")]
    QuantityTooLarge,

    #[error("reward decimal representation exceeds 21 bytes")]
    RewardTooLarge,

    #[error("destination must be a 32-byte address or a public key")]
    InvalidDestination,

    #[error("cryptographic error: {0}")]
    Crypto(#[from] weave_crypto::CryptoError),
}
