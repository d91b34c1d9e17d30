//! Symmetric encryption for shared scenes.
//!
//! Scenes persist server-side only as opaque encrypted blobs; the key lives
//! in the share link's URL fragment and never reaches the server. This crate
//! covers the codec half of that contract: AES-128-GCM with fresh random IVs,
//! URL-safe key encoding, and an ordered fallback chain for the two legacy
//! buffer layouts still found in stored payloads.

pub mod aes_gcm;
pub mod base64url;
pub mod error;
pub mod key;
pub mod legacy;
pub mod types;

pub use aes_gcm::{decrypt, decrypt_raw, encrypt, generate_iv};
pub use base64url::{base64url_decode, base64url_encode};
pub use error::CryptoError;
pub use key::SceneKey;
pub use legacy::{decrypt_legacy, LegacyLayout, LEGACY_DECODE_ORDER};
pub use types::{EncryptedEnvelope, ENCODED_KEY_LENGTH, IV_LENGTH, KEY_LENGTH, TAG_LENGTH};
