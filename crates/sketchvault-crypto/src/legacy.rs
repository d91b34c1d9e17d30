//! Fallback decoding for pre-container scene payloads.
//!
//! Two legacy generations exist in stored data:
//!
//! 1. `[IV:12][ciphertext + tag]`, the IV carried at the front of the buffer.
//! 2. `[ciphertext + tag]` with a fixed all-zero IV, the oldest format.
//!
//! Decoding is an ordered strategy list, tried front to back. Both layouts
//! are decode-only: nothing ever encrypts under a zero IV again.

use tracing::warn;

use crate::aes_gcm::decrypt_raw;
use crate::error::CryptoError;
use crate::key::SceneKey;
use crate::types::{IV_LENGTH, TAG_LENGTH};

/// A legacy buffer layout, in decode order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyLayout {
    /// `[IV:12][ciphertext + tag]`
    EmbeddedIv,
    /// Whole buffer is ciphertext, IV fixed to all zeroes.
    ZeroIv,
}

/// The order strategies are attempted in. The embedded-IV layout is newer
/// and far more common in surviving payloads, so it goes first.
pub const LEGACY_DECODE_ORDER: &[LegacyLayout] = &[LegacyLayout::EmbeddedIv, LegacyLayout::ZeroIv];

fn try_layout(layout: LegacyLayout, buffer: &[u8], key: &SceneKey) -> Result<Vec<u8>, CryptoError> {
    match layout {
        LegacyLayout::EmbeddedIv => {
            if buffer.len() < IV_LENGTH + TAG_LENGTH {
                return Err(CryptoError::DataTooShort);
            }
            // Length checked above
            let iv: [u8; IV_LENGTH] = buffer[..IV_LENGTH]
                .try_into()
                .expect("slice is exactly IV_LENGTH bytes after length check");
            decrypt_raw(&iv, &buffer[IV_LENGTH..], key)
        }
        LegacyLayout::ZeroIv => decrypt_raw(&[0u8; IV_LENGTH], buffer, key),
    }
}

/// Decrypt a legacy raw buffer by trying each layout in [`LEGACY_DECODE_ORDER`].
///
/// Returns the first successful plaintext. Once the last strategy fails the
/// chain terminates with [`CryptoError::DecryptionFailed`]; there is no
/// retry beyond the listed layouts.
pub fn decrypt_legacy(buffer: &[u8], key: &SceneKey) -> Result<Vec<u8>, CryptoError> {
    for layout in LEGACY_DECODE_ORDER {
        match try_layout(*layout, buffer, key) {
            Ok(plaintext) => {
                warn!(?layout, "decrypted payload via legacy layout");
                return Ok(plaintext);
            }
            Err(_) => continue,
        }
    }
    Err(CryptoError::DecryptionFailed(
        "no legacy layout matched".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aes_gcm::encrypt;

    /// Build a legacy embedded-IV buffer from a current-format envelope.
    fn embedded_iv_buffer(plaintext: &[u8], key: &SceneKey) -> Vec<u8> {
        let envelope = encrypt(plaintext, key).unwrap();
        let mut buffer = Vec::with_capacity(IV_LENGTH + envelope.ciphertext.len());
        buffer.extend_from_slice(&envelope.iv);
        buffer.extend_from_slice(&envelope.ciphertext);
        buffer
    }

    /// Encrypt under the fixed all-zero IV, as the oldest writers did.
    fn zero_iv_buffer(plaintext: &[u8], key: &SceneKey) -> Vec<u8> {
        use aes_gcm::aead::{Aead, KeyInit};
        use aes_gcm::{Aes128Gcm, Nonce};
        let cipher = Aes128Gcm::new_from_slice(key.as_bytes()).unwrap();
        cipher
            .encrypt(Nonce::from_slice(&[0u8; IV_LENGTH]), plaintext)
            .unwrap()
    }

    #[test]
    fn decodes_embedded_iv_layout() {
        let key = SceneKey::generate().unwrap();
        let buffer = embedded_iv_buffer(b"drawing data", &key);
        assert_eq!(decrypt_legacy(&buffer, &key).unwrap(), b"drawing data");
    }

    #[test]
    fn decodes_zero_iv_layout() {
        let key = SceneKey::generate().unwrap();
        let buffer = zero_iv_buffer(b"ancient drawing", &key);
        assert_eq!(decrypt_legacy(&buffer, &key).unwrap(), b"ancient drawing");
    }

    #[test]
    fn zero_iv_reached_after_embedded_iv_fails() {
        // A zero-IV buffer also parses as [IV][ciphertext] under the first
        // strategy, but authentication fails there, so the chain falls
        // through to the zero-IV layout.
        let key = SceneKey::generate().unwrap();
        let buffer = zero_iv_buffer(b"fallback order", &key);
        assert!(buffer.len() >= IV_LENGTH + TAG_LENGTH);
        assert_eq!(decrypt_legacy(&buffer, &key).unwrap(), b"fallback order");
    }

    #[test]
    fn wrong_key_exhausts_chain() {
        let k1 = SceneKey::generate().unwrap();
        let k2 = SceneKey::generate().unwrap();
        let buffer = embedded_iv_buffer(b"secret", &k1);
        let err = decrypt_legacy(&buffer, &k2).unwrap_err();
        assert!(matches!(err, CryptoError::DecryptionFailed(_)));
    }

    #[test]
    fn garbage_exhausts_chain() {
        let key = SceneKey::generate().unwrap();
        let err = decrypt_legacy(&[0xAA; 64], &key).unwrap_err();
        assert!(matches!(err, CryptoError::DecryptionFailed(_)));
    }

    #[test]
    fn short_buffer_fails_cleanly() {
        let key = SceneKey::generate().unwrap();
        assert!(decrypt_legacy(&[1, 2, 3], &key).is_err());
    }

    #[test]
    fn decode_order_is_embedded_iv_first() {
        assert_eq!(
            LEGACY_DECODE_ORDER,
            &[LegacyLayout::EmbeddedIv, LegacyLayout::ZeroIv]
        );
    }
}
