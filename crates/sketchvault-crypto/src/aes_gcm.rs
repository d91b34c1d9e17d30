//! AES-128-GCM encryption for scene payloads.
//!
//! Current wire shape: the IV and ciphertext travel separately inside the
//! transport container (`EncryptedEnvelope`). The IV is freshly random for
//! every encryption; the ciphertext ends with the 16-byte GCM tag.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes128Gcm, Nonce};

use crate::error::CryptoError;
use crate::key::SceneKey;
use crate::types::{EncryptedEnvelope, IV_LENGTH, TAG_LENGTH};

/// Generate a random 12-byte IV.
pub fn generate_iv() -> Result<[u8; IV_LENGTH], CryptoError> {
    let mut iv = [0u8; IV_LENGTH];
    getrandom::getrandom(&mut iv).map_err(|e| CryptoError::RngFailed(e.to_string()))?;
    Ok(iv)
}

fn cipher(key: &SceneKey) -> Result<Aes128Gcm, CryptoError> {
    Aes128Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))
}

/// Encrypt a plaintext under a scene key with a fresh random IV.
pub fn encrypt(plaintext: &[u8], key: &SceneKey) -> Result<EncryptedEnvelope, CryptoError> {
    let iv = generate_iv()?;
    let ciphertext = cipher(key)?
        .encrypt(Nonce::from_slice(&iv), plaintext)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;
    Ok(EncryptedEnvelope { iv, ciphertext })
}

/// Decrypt an envelope. Fails with [`CryptoError::DecryptionFailed`] when the
/// key is wrong or the ciphertext/tag was tampered with.
pub fn decrypt(envelope: &EncryptedEnvelope, key: &SceneKey) -> Result<Vec<u8>, CryptoError> {
    if envelope.ciphertext.len() < TAG_LENGTH {
        return Err(CryptoError::DataTooShort);
    }
    cipher(key)?
        .decrypt(Nonce::from_slice(&envelope.iv), envelope.ciphertext.as_slice())
        .map_err(|e| CryptoError::DecryptionFailed(e.to_string()))
}

/// Decrypt with an explicit IV and raw ciphertext slice.
///
/// Used by the legacy fallback chain, where the IV is either carried at the
/// front of the buffer or fixed to all zeroes.
pub fn decrypt_raw(iv: &[u8; IV_LENGTH], ciphertext: &[u8], key: &SceneKey) -> Result<Vec<u8>, CryptoError> {
    if ciphertext.len() < TAG_LENGTH {
        return Err(CryptoError::DataTooShort);
    }
    cipher(key)?
        .decrypt(Nonce::from_slice(iv), ciphertext)
        .map_err(|e| CryptoError::DecryptionFailed(e.to_string()))
}
