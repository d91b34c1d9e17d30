/// AES key length in bytes (128 bits, matching the historical scene format).
pub const KEY_LENGTH: usize = 16;

/// Length of a URL-safe encoded key: 16 bytes as unpadded base64url.
pub const ENCODED_KEY_LENGTH: usize = 22;

/// AES-GCM IV length in bytes (96 bits per NIST recommendation).
pub const IV_LENGTH: usize = 12;

/// AES-GCM authentication tag length in bytes (128 bits).
pub const TAG_LENGTH: usize = 16;

/// An encrypted scene payload: fresh random IV plus ciphertext.
///
/// The ciphertext carries the GCM tag, so tampering with either part is
/// detected at decrypt time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedEnvelope {
    pub iv: [u8; IV_LENGTH],
    pub ciphertext: Vec<u8>,
}
