//! Catalog client: upload, download, and loop-safe paginated listing.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use sketchvault_crypto::SceneKey;

use crate::error::{response_snippet, CatalogError};
use crate::transport::{BlobTransport, ListQuery, StoreParams, TransportResponse};
use crate::types::{DrawingRecord, ErrorClass, ListPage, ServerErrorBody, StoredBody};

/// Default local size guard, matching the backend's default request limit.
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 4 * 1024 * 1024;

/// Page size used when draining the whole catalog.
pub const LIST_ALL_PER_PAGE: u32 = 100;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Payloads above this are rejected locally, before any network call.
    pub max_payload_bytes: usize,
    /// Page size for [`CatalogClient::list_all`].
    pub per_page: u32,
    /// Deployment-pinned encryption key. When set, every scene save reuses
    /// it instead of generating a fresh key.
    pub pinned_key: Option<SceneKey>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
            per_page: LIST_ALL_PER_PAGE,
            pinned_key: None,
        }
    }
}

/// Result of a successful store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedDrawing {
    pub id: String,
}

/// Client for the remote drawing catalog.
///
/// Stateless between calls: concurrent saves and loads are independent, and
/// dropping any in-flight future cancels it without partial state. The only
/// per-call state is the cursor-seen set inside one [`CatalogClient::list_all`]
/// run.
pub struct CatalogClient {
    transport: Arc<dyn BlobTransport>,
    config: CatalogConfig,
}

impl CatalogClient {
    pub fn new(transport: Arc<dyn BlobTransport>) -> Self {
        Self::with_config(transport, CatalogConfig::default())
    }

    pub fn with_config(transport: Arc<dyn BlobTransport>, config: CatalogConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Store an opaque payload. Oversized payloads fail locally with
    /// [`CatalogError::PayloadTooLarge`] and never touch the transport.
    pub async fn save(
        &self,
        payload: &[u8],
        params: &StoreParams,
    ) -> Result<SavedDrawing, CatalogError> {
        if payload.is_empty() {
            return Err(CatalogError::Validation("payload is empty".into()));
        }
        if payload.len() > self.config.max_payload_bytes {
            return Err(CatalogError::PayloadTooLarge {
                detail: format!(
                    "{} bytes exceeds the {} byte limit",
                    payload.len(),
                    self.config.max_payload_bytes
                ),
                server_rejected: false,
            });
        }

        debug!(size = payload.len(), "storing drawing payload");
        let response = self.transport.store(payload, params).await?;
        if !response.is_success() {
            return Err(classify_failure(&response, None));
        }

        let body: StoredBody = serde_json::from_slice(&response.body).map_err(|_| {
            CatalogError::Protocol {
                detail: format!(
                    "store response missing id - {}",
                    response_snippet(&response.body)
                ),
            }
        })?;
        Ok(SavedDrawing { id: body.id })
    }

    /// Fetch a stored payload by id.
    pub async fn fetch(&self, id: &str) -> Result<Vec<u8>, CatalogError> {
        let response = self.transport.fetch(id).await?;
        if !response.is_success() {
            return Err(classify_failure(&response, Some(id)));
        }
        Ok(response.body)
    }

    /// Fetch one listing page with validated shape.
    pub async fn list_page(&self, query: &ListQuery) -> Result<ListPage, CatalogError> {
        let response = self.transport.list(query).await?;
        if !response.is_success() {
            return Err(classify_failure(&response, None));
        }
        parse_page(&response.body)
    }

    /// Drain the catalog into one vector, following cursors until the server
    /// reports no more pages, omits the cursor, or re-issues one already seen
    /// in this run. The seen set is local to this call, so concurrent
    /// `list_all` runs never interfere.
    pub async fn list_all(&self, query: &ListQuery) -> Result<Vec<DrawingRecord>, CatalogError> {
        let mut drawings = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut cursor = query.cursor.clone();
        if let Some(initial) = &cursor {
            seen.insert(initial.clone());
        }

        loop {
            let page_query = ListQuery {
                cursor: cursor.clone(),
                per_page: Some(query.per_page.unwrap_or(self.config.per_page)),
                ..query.clone()
            };
            let page = self.list_page(&page_query).await?;
            drawings.extend(page.items);

            if !page.meta.has_more_pages {
                break;
            }
            let Some(next) = page.meta.next_cursor else {
                break;
            };
            if !seen.insert(next.clone()) {
                // Misbehaving server re-issued a cursor; stop instead of looping.
                debug!(cursor = %next, "repeated pagination cursor, terminating");
                break;
            }
            debug!(cursor = %next, accumulated = drawings.len(), "following pagination cursor");
            cursor = Some(next);
        }

        Ok(drawings)
    }

    /// Fetch a single record's metadata, including the persisted encryption
    /// key. Only meaningful on deployments that opted into key persistence;
    /// the endpoint is access-controlled server-side.
    pub async fn fetch_record_with_key(&self, id: &str) -> Result<DrawingRecord, CatalogError> {
        let response = self.transport.fetch_record(id, true).await?;
        if !response.is_success() {
            return Err(classify_failure(&response, Some(id)));
        }
        serde_json::from_slice(&response.body).map_err(|_| CatalogError::Protocol {
            detail: format!(
                "record response malformed - {}",
                response_snippet(&response.body)
            ),
        })
    }
}

fn parse_page(body: &[u8]) -> Result<ListPage, CatalogError> {
    serde_json::from_slice(body).map_err(|e| CatalogError::Protocol {
        detail: format!("{} - {}", e, response_snippet(body)),
    })
}

/// Map a failure response through the closed error-class set; anything else
/// becomes an HTTP failure with a bounded body snippet.
fn classify_failure(response: &TransportResponse, id: Option<&str>) -> CatalogError {
    if let Ok(body) = serde_json::from_slice::<ServerErrorBody>(&response.body) {
        match ErrorClass::from_wire(&body.error_class) {
            Some(ErrorClass::RequestTooLarge) => {
                return CatalogError::PayloadTooLarge {
                    detail: body.message,
                    server_rejected: true,
                }
            }
            Some(ErrorClass::DrawingNotFound) => {
                return CatalogError::NotFound {
                    id: id.unwrap_or_default().to_string(),
                }
            }
            Some(class) => {
                return CatalogError::Rejected {
                    class,
                    message: body.message,
                }
            }
            None => {}
        }
    }
    CatalogError::Http {
        status: response.status,
        snippet: response_snippet(&response.body),
    }
}
