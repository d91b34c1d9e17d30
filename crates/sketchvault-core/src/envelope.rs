//! Versioned transport container: compression + encryption in one payload.
//!
//! Current wire format (version 2):
//! `[1 byte: version=2][CBOR map: compression, encryption, iv, data]`
//! where `data` is AES-128-GCM ciphertext of the LZ4-compressed plaintext.
//!
//! Anything that is not a current container is treated as a legacy raw
//! encrypted buffer and handed to the crypto fallback chain. Legacy writers
//! never compressed, so legacy plaintext is returned as-is.

use serde::{Deserialize, Serialize};
use tracing::debug;

use sketchvault_crypto::{decrypt_raw, encrypt, decrypt_legacy, EncryptedEnvelope, SceneKey, IV_LENGTH};

use crate::error::EnvelopeError;

/// Container format version byte.
pub const TRANSPORT_VERSION: u8 = 2;

/// Compression algorithm label carried in the container.
pub const COMPRESSION_LZ4: &str = "lz4";

/// Encryption algorithm label carried in the container.
pub const ENCRYPTION_AES_128_GCM: &str = "aes-128-gcm";

#[derive(Debug, Serialize, Deserialize)]
struct Container {
    compression: String,
    encryption: String,
    #[serde(with = "serde_bytes")]
    iv: Vec<u8>,
    #[serde(with = "serde_bytes")]
    data: Vec<u8>,
}

/// Compress and encrypt plaintext into a transport payload.
pub fn compress(plaintext: &[u8], key: &SceneKey) -> Result<Vec<u8>, EnvelopeError> {
    let compressed = lz4_flex::compress_prepend_size(plaintext);
    let EncryptedEnvelope { iv, ciphertext } = encrypt(&compressed, key)?;

    let container = Container {
        compression: COMPRESSION_LZ4.to_string(),
        encryption: ENCRYPTION_AES_128_GCM.to_string(),
        iv: iv.to_vec(),
        data: ciphertext,
    };

    let mut out = vec![TRANSPORT_VERSION];
    ciborium::into_writer(&container, &mut out)
        .map_err(|e| EnvelopeError::Decode(format!("{}", e)))?;
    Ok(out)
}

/// Decrypt and decompress a transport payload.
///
/// Decode strategies, in order:
/// 1. current container (embedded IV, LZ4 body),
/// 2. legacy `[IV][ciphertext]` buffer,
/// 3. legacy zero-IV buffer.
///
/// A container that parses but fails authentication is terminal: a wrong
/// key on current data must not fall through to the legacy chain. A corrupt
/// compressed stream after successful decryption is [`EnvelopeError::Decompress`],
/// so callers can tell "wrong key" from "corrupt data".
pub fn decompress(payload: &[u8], key: &SceneKey) -> Result<Vec<u8>, EnvelopeError> {
    if let Some((&version, body)) = payload.split_first() {
        if let Ok(container) = ciborium::from_reader::<Container, _>(body) {
            if version == TRANSPORT_VERSION {
                return unpack_container(container, key);
            }
            if version > TRANSPORT_VERSION {
                return Err(EnvelopeError::UnsupportedVersion(version));
            }
        }
    }

    debug!("payload is not a current container, trying legacy layouts");
    Ok(decrypt_legacy(payload, key)?)
}

fn unpack_container(container: Container, key: &SceneKey) -> Result<Vec<u8>, EnvelopeError> {
    if container.compression != COMPRESSION_LZ4 {
        return Err(EnvelopeError::Decode(format!(
            "unknown compression algorithm: {}",
            container.compression
        )));
    }
    if container.encryption != ENCRYPTION_AES_128_GCM {
        return Err(EnvelopeError::Decode(format!(
            "unknown encryption algorithm: {}",
            container.encryption
        )));
    }
    let iv: [u8; IV_LENGTH] = container
        .iv
        .as_slice()
        .try_into()
        .map_err(|_| EnvelopeError::Decode(format!("bad IV length: {}", container.iv.len())))?;

    let compressed = decrypt_raw(&iv, &container.data, key)?;
    lz4_flex::decompress_size_prepended(&compressed)
        .map_err(|e| EnvelopeError::Decompress(e.to_string()))
}
