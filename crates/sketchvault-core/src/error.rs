use thiserror::Error;

use sketchvault_crypto::CryptoError;

/// Failures while packing or unpacking a transport payload.
///
/// `Decompress` and `Decode` mean the key was right but the data is corrupt;
/// `Crypto` covers wrong-key and tampered-ciphertext cases. Callers rely on
/// the distinction to pick user-facing messaging.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("Malformed transport container: {0}")]
    Decode(String),

    #[error("Unsupported container version: {0}")]
    UnsupportedVersion(u8),

    #[error("Corrupt compressed stream: {0}")]
    Decompress(String),

    #[error("Malformed scene data: {0}")]
    Scene(#[from] serde_json::Error),

    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

/// Share-link validation failures surfaced to the user.
///
/// Distinct from "not a share link at all", which parses to `None`.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("Invalid room key in collaboration link: expected {expected} characters, got {got}")]
    InvalidRoomKey { expected: usize, got: usize },
}
