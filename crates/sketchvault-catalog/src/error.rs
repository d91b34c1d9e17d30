//! Catalog error taxonomy.
//!
//! Local validation failures never reach the network. Server failures are
//! classified through the closed `error_class` set; anything outside it
//! surfaces as an HTTP failure carrying a bounded body snippet.

use thiserror::Error;

use sketchvault_core::EnvelopeError;
use sketchvault_crypto::CryptoError;

use crate::transport::TransportError;
use crate::types::ErrorClass;

/// Maximum characters of a server body quoted in error details.
pub const ERROR_SNIPPET_MAX: usize = 180;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Bad input caught locally, before any network call.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Payload exceeds the size limit. `server_rejected` records whether the
    /// local guard or the server caught it; both present the same way to the
    /// user (see [`CatalogError::is_too_large`]).
    #[error("Drawing payload too large: {detail}")]
    PayloadTooLarge { detail: String, server_rejected: bool },

    #[error("Drawing not found: {id}")]
    NotFound { id: String },

    /// The server rejected the request with a known error class.
    #[error("Server rejected request ({class}): {message}")]
    Rejected { class: ErrorClass, message: String },

    /// The request never produced a response.
    #[error("Network failure: {0}")]
    Network(#[from] TransportError),

    /// The server answered with a failure status outside the known classes.
    #[error("Server error (HTTP {status}) - {snippet}")]
    Http { status: u16, snippet: String },

    /// The server answered 2xx but the body shape is not the contract.
    #[error("Malformed server response: {detail}")]
    Protocol { detail: String },

    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

impl CatalogError {
    /// The single user-facing distinction the UI needs: "too big" gets its
    /// own message, every other save/load failure coalesces to a generic one
    /// (optionally garnished with [`std::fmt::Display`] output as detail).
    pub fn is_too_large(&self) -> bool {
        matches!(self, CatalogError::PayloadTooLarge { .. })
    }
}

/// Bound a server body for inclusion in an error message: lossy UTF-8,
/// whitespace collapsed, at most [`ERROR_SNIPPET_MAX`] characters.
pub fn response_snippet(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(ERROR_SNIPPET_MAX).collect()
}
