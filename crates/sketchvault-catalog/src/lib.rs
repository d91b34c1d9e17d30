//! Remote drawing catalog client.
//!
//! Talks to a blob store that only ever sees opaque encrypted payloads and
//! sidecar metadata. The network layer is injected as a [`BlobTransport`],
//! so the client itself is pure protocol: size guards, response validation,
//! error classification, and pagination that survives misbehaving cursors.
//!
//! All operations are independent async tasks. Dropping an in-flight future
//! cancels the operation; nothing partial is ever observable afterwards.

pub mod client;
pub mod error;
pub mod scene_io;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{
    CatalogClient, CatalogConfig, SavedDrawing, DEFAULT_MAX_PAYLOAD_BYTES, LIST_ALL_PER_PAGE,
};
pub use error::{response_snippet, CatalogError, ERROR_SNIPPET_MAX};
pub use scene_io::{SaveSceneOptions, SavedScene};
pub use transport::{BlobTransport, ListQuery, StoreParams, TransportError, TransportResponse};
pub use types::{DrawingRecord, ErrorClass, ListPage, PageMeta};
