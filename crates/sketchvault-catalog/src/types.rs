//! Catalog wire types and server error classification.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A drawing as the catalog lists it. The payload itself is opaque to the
/// catalog; these are sidecar attributes only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub size_bytes: u64,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<FixedOffset>>,
    /// Present only on key-persisting deployments, and only when the caller
    /// explicitly asked for it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_key: Option<String>,
}

/// Paging metadata accompanying a listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMeta {
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub has_more_pages: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// One page of catalog results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage {
    pub items: Vec<DrawingRecord>,
    pub meta: PageMeta,
}

/// The closed set of error classes the server emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    InvalidRequest,
    RequestTooLarge,
    DrawingNotFound,
    Unauthorized,
}

impl ErrorClass {
    /// Map a wire `error_class` string. Unknown classes return `None` and are
    /// treated as generic HTTP failures by the caller.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "InvalidRequestError" => Some(Self::InvalidRequest),
            "RequestTooLargeError" => Some(Self::RequestTooLarge),
            "DrawingNotFound" => Some(Self::DrawingNotFound),
            "Unauthorized" => Some(Self::Unauthorized),
            _ => None,
        }
    }
}

impl std::fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::InvalidRequest => "InvalidRequestError",
            Self::RequestTooLarge => "RequestTooLargeError",
            Self::DrawingNotFound => "DrawingNotFound",
            Self::Unauthorized => "Unauthorized",
        };
        f.write_str(name)
    }
}

/// `{error_class, message}` body the server sends on failure.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ServerErrorBody {
    pub error_class: String,
    #[serde(default)]
    pub message: String,
}

/// `{id}` body the server sends on a successful store.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StoredBody {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_class_round_trips_through_wire_names() {
        for class in [
            ErrorClass::InvalidRequest,
            ErrorClass::RequestTooLarge,
            ErrorClass::DrawingNotFound,
            ErrorClass::Unauthorized,
        ] {
            assert_eq!(ErrorClass::from_wire(&class.to_string()), Some(class));
        }
    }

    #[test]
    fn unknown_error_class_is_none() {
        assert_eq!(ErrorClass::from_wire("TeapotError"), None);
    }

    #[test]
    fn record_parses_with_minimal_fields() {
        let record: DrawingRecord =
            serde_json::from_str(r#"{"id":"01HTX","size_bytes":1024}"#).unwrap();
        assert_eq!(record.id, "01HTX");
        assert_eq!(record.name, None);
        assert_eq!(record.created_at, None);
        assert_eq!(record.encryption_key, None);
    }

    #[test]
    fn record_parses_iso8601_timestamps() {
        let record: DrawingRecord = serde_json::from_str(
            r#"{"id":"a","size_bytes":10,"created_at":"2026-02-12T09:30:00+00:00"}"#,
        )
        .unwrap();
        assert_eq!(record.created_at.unwrap().timestamp(), 1_770_888_600);
    }

    #[test]
    fn page_meta_tolerates_null_cursor() {
        let meta: PageMeta = serde_json::from_str(
            r#"{"page":1,"per_page":25,"total":3,"has_more_pages":false,"next_cursor":null}"#,
        )
        .unwrap();
        assert_eq!(meta.next_cursor, None);
        assert!(!meta.has_more_pages);
    }
}
