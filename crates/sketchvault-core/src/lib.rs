//! Core protocol logic for secure scene synchronization and sharing.
//!
//! The server only ever sees opaque encrypted blobs; everything that gives
//! those blobs meaning lives here: the versioned transport container
//! (compression + encryption), the element model with its syncability rules,
//! version-based reconciliation for concurrent edits, and the capability
//! links that carry room ids and keys in URL fragments.

pub mod capability;
pub mod element;
pub mod envelope;
pub mod error;
pub mod reconcile;
pub mod scene;

pub use capability::{
    collaboration_link, generate_room, parse_collaboration_link, parse_share_link, snapshot_link,
    RoomCapability, ShareLink, ROOM_ID_BYTES,
};
pub use element::{
    filter_syncable, filter_syncable_at, now_ms, Binding, Element, ElementKind,
    DELETED_ELEMENT_TIMEOUT_MS, SIZE_EPSILON,
};
pub use envelope::{compress, decompress, TRANSPORT_VERSION};
pub use error::{EnvelopeError, LinkError};
pub use reconcile::{propagate_concealment, reconcile, should_conceal, toggle_concealed};
pub use scene::{
    deserialize_scene, serialize_scene, SceneFile, SCENE_FILE_TYPE, SCENE_FILE_VERSION,
};
