//! Room and snapshot capabilities.
//!
//! A capability is an unguessable token pair that itself grants access:
//! possession of the link is authorization, there are no server-side ACLs.
//! Both tokens travel exclusively in the URL fragment, which browsers never
//! send over the wire, so the server cannot see them.
//!
//! Fragment forms:
//! - `#room=<roomId>,<roomKey>` for a live collaboration room
//! - `#json=<id>,<encryptionKey>` for a static shared snapshot

use std::sync::LazyLock;

use regex::Regex;

use sketchvault_crypto::{CryptoError, SceneKey, ENCODED_KEY_LENGTH};

use crate::error::LinkError;

/// Random bytes in a room id (rendered as 20 hex characters).
pub const ROOM_ID_BYTES: usize = 10;

static RE_COLLAB_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^room=([a-zA-Z0-9_-]+),([a-zA-Z0-9_-]+)$").unwrap());

static RE_SNAPSHOT_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^json=([a-zA-Z0-9_-]+),([a-zA-Z0-9_-]+)$").unwrap());

/// A live collaboration capability: room id plus room key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomCapability {
    pub room_id: String,
    /// URL-safe encoded scene key, exactly [`ENCODED_KEY_LENGTH`] characters.
    pub room_key: String,
}

/// A parsed share-link fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareLink {
    Collaboration(RoomCapability),
    Snapshot { id: String, key: String },
}

/// Generate a fresh room capability from the system CSPRNG.
pub fn generate_room() -> Result<RoomCapability, CryptoError> {
    let mut bytes = [0u8; ROOM_ID_BYTES];
    getrandom::getrandom(&mut bytes).map_err(|e| CryptoError::RngFailed(e.to_string()))?;
    Ok(RoomCapability {
        room_id: hex::encode(bytes),
        room_key: SceneKey::generate()?.to_url_safe(),
    })
}

fn fragment_of(link: &str) -> &str {
    match link.rfind('#') {
        Some(i) => &link[i + 1..],
        None => link,
    }
}

/// Parse a URL (or bare fragment) into a share link.
///
/// `Ok(None)` means the fragment matches neither pattern: not a share link.
/// A collaboration fragment with a wrong-length room key is a distinct,
/// user-facing [`LinkError::InvalidRoomKey`]: the link was clearly meant to
/// be a collaboration link but cannot work.
pub fn parse_share_link(link: &str) -> Result<Option<ShareLink>, LinkError> {
    let fragment = fragment_of(link);

    if let Some(captures) = RE_COLLAB_FRAGMENT.captures(fragment) {
        let room_key = &captures[2];
        if room_key.len() != ENCODED_KEY_LENGTH {
            return Err(LinkError::InvalidRoomKey {
                expected: ENCODED_KEY_LENGTH,
                got: room_key.len(),
            });
        }
        return Ok(Some(ShareLink::Collaboration(RoomCapability {
            room_id: captures[1].to_string(),
            room_key: room_key.to_string(),
        })));
    }

    if let Some(captures) = RE_SNAPSHOT_FRAGMENT.captures(fragment) {
        return Ok(Some(ShareLink::Snapshot {
            id: captures[1].to_string(),
            key: captures[2].to_string(),
        }));
    }

    Ok(None)
}

/// Parse a URL into a collaboration capability, ignoring snapshot links.
pub fn parse_collaboration_link(link: &str) -> Result<Option<RoomCapability>, LinkError> {
    match parse_share_link(link)? {
        Some(ShareLink::Collaboration(cap)) => Ok(Some(cap)),
        _ => Ok(None),
    }
}

/// Format a collaboration link. `base` is the origin + path, without fragment.
pub fn collaboration_link(base: &str, capability: &RoomCapability) -> String {
    format!(
        "{}#room={},{}",
        base, capability.room_id, capability.room_key
    )
}

/// Format a static snapshot link for a stored drawing id and its key.
pub fn snapshot_link(base: &str, id: &str, key: &SceneKey) -> String {
    format!("{}#json={},{}", base, id, key.to_url_safe())
}
