//! Scene encryption keys.
//!
//! A key is 128-bit symmetric material held exclusively client-side. Keys
//! travel only inside URL fragments as 22-character unpadded base64url
//! strings, never as query parameters or headers unless the caller opts in.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::base64url::{base64url_decode, base64url_encode};
use crate::error::CryptoError;
use crate::types::{ENCODED_KEY_LENGTH, KEY_LENGTH};

/// A 128-bit symmetric scene key. Zeroized on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SceneKey([u8; KEY_LENGTH]);

impl SceneKey {
    /// Generate a fresh random key from the system CSPRNG.
    pub fn generate() -> Result<Self, CryptoError> {
        let mut bytes = [0u8; KEY_LENGTH];
        getrandom::getrandom(&mut bytes).map_err(|e| CryptoError::RngFailed(e.to_string()))?;
        Ok(Self(bytes))
    }

    /// Build a key from raw bytes. Length must be exactly [`KEY_LENGTH`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let array: [u8; KEY_LENGTH] =
            bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidKeyLength {
                    expected: KEY_LENGTH,
                    got: bytes.len(),
                })?;
        Ok(Self(array))
    }

    /// Decode a key from its URL-safe string form (22 chars, unpadded base64url).
    pub fn from_url_safe(encoded: &str) -> Result<Self, CryptoError> {
        if encoded.len() != ENCODED_KEY_LENGTH {
            return Err(CryptoError::InvalidKeyEncoding(format!(
                "expected {} characters, got {}",
                ENCODED_KEY_LENGTH,
                encoded.len()
            )));
        }
        let bytes = base64url_decode(encoded)
            .map_err(|e| CryptoError::InvalidKeyEncoding(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Encode the key as its URL-safe string form.
    pub fn to_url_safe(&self) -> String {
        base64url_encode(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.0
    }
}

// Key material stays out of logs and panic messages.
impl std::fmt::Debug for SceneKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SceneKey(..)")
    }
}
