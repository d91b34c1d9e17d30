//! Transport seam between the catalog client and the blob store.
//!
//! The protocol core holds no ambient I/O: callers inject a [`BlobTransport`]
//! (HTTP, in-memory, whatever) and the client only sees status codes and raw
//! bodies. All response interpretation (JSON validation, error
//! classification) happens on this side of the seam, so transports stay thin.

use async_trait::async_trait;
use thiserror::Error;

/// A raw response from the blob store: HTTP-ish status plus body bytes.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A transport-level failure: the request never produced a response
/// (connection refused, DNS, cancellation of the underlying socket).
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Parameters for storing a payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreParams {
    /// Optional display name, sent as a query parameter.
    pub name: Option<String>,
    /// Encoded encryption key to persist server-side, sent as a sensitive
    /// header. `None` for every normal save: the key leaves the client only
    /// on explicit opt-in, for deployments with access-controlled metadata.
    pub persist_key: Option<String>,
}

/// Filter and paging parameters for catalog listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    /// Substring match on drawing name.
    pub q: Option<String>,
    pub owner_id: Option<String>,
    pub project_id: Option<String>,
    /// Opaque continuation cursor from a previous page.
    pub cursor: Option<String>,
    /// Explicit page number, for callers that still use page-based paging.
    pub page: Option<String>,
    /// Server clamps to 1..=100.
    pub per_page: Option<u32>,
}

/// User-provided network layer for the blob store.
///
/// Implementations map these calls onto the store's HTTP surface (`POST` for
/// store, `GET {id}` for fetch, `GET /` for list) and report transport-level
/// failures as [`TransportError`]. Non-2xx responses are returned, not
/// errors: classification is the client's job.
///
/// All methods are plain futures with no shared mutable state, so dropping a
/// call mid-flight (caller cancellation) leaves nothing behind.
#[async_trait]
pub trait BlobTransport: Send + Sync {
    /// Store an opaque payload, returning the server's response.
    async fn store(
        &self,
        payload: &[u8],
        params: &StoreParams,
    ) -> Result<TransportResponse, TransportError>;

    /// Fetch a payload by id.
    async fn fetch(&self, id: &str) -> Result<TransportResponse, TransportError>;

    /// Request one listing page.
    async fn list(&self, query: &ListQuery) -> Result<TransportResponse, TransportError>;

    /// Fetch a single catalog record, optionally asking the server to include
    /// the persisted encryption key (access-controlled on the server side).
    async fn fetch_record(
        &self,
        id: &str,
        include_encryption_key: bool,
    ) -> Result<TransportResponse, TransportError>;
}
