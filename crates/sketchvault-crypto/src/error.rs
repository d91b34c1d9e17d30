use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Invalid key length: expected {expected} bytes, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("Invalid key encoding: {0}")]
    InvalidKeyEncoding(String),

    #[error("Encrypted data too short")]
    DataTooShort,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Random number generation failed: {0}")]
    RngFailed(String),
}
