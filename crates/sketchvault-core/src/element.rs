//! Scene elements and the syncability predicate.
//!
//! An element is syncable (eligible for an outgoing sync payload) iff it is
//! live, or it is a tombstone still inside the retention window. Degenerate
//! (invisibly small) live elements are excluded as well. Non-syncable
//! elements stay in the local scene untouched.

use serde::{Deserialize, Serialize};

/// How long a deleted element (tombstone) remains syncable, so peers observe
/// the deletion instead of resurrecting the element: 24 hours.
pub const DELETED_ELEMENT_TIMEOUT_MS: i64 = 24 * 60 * 60 * 1000;

/// Geometry below this threshold counts as invisibly small.
pub const SIZE_EPSILON: f64 = 1e-6;

/// Element kind. Connectors bind to up to two endpoint elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Rectangle,
    Ellipse,
    Diamond,
    Text,
    Freedraw,
    Connector,
}

impl ElementKind {
    pub fn is_connector(self) -> bool {
        matches!(self, ElementKind::Connector)
    }

    /// Node kinds whose concealed state a bound connector derives from.
    pub fn is_concealable_node(self) -> bool {
        !self.is_connector()
    }
}

/// A connector endpoint binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Binding {
    pub element_id: String,
}

/// A versioned drawing primitive.
///
/// Among elements sharing an id, the higher `version` wins; `version_nonce`
/// breaks version ties. Field names follow the scene wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub version: u64,
    pub version_nonce: u64,
    pub is_deleted: bool,
    /// Milliseconds since epoch of the last mutation.
    pub updated: i64,
    #[serde(default)]
    pub concealed: bool,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_binding: Option<Binding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_binding: Option<Binding>,
}

impl Element {
    /// A fresh element with unit geometry at the origin.
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
            version: 1,
            version_nonce: 0,
            is_deleted: false,
            updated: 0,
            concealed: false,
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
            start_binding: None,
            end_binding: None,
        }
    }

    /// Degenerate geometry that would render to nothing.
    pub fn is_invisibly_small(&self) -> bool {
        self.width.abs() < SIZE_EPSILON && self.height.abs() < SIZE_EPSILON
    }

    /// Syncability against an injected clock (milliseconds since epoch).
    pub fn is_syncable_at(&self, now_ms: i64) -> bool {
        if self.is_deleted {
            return self.updated > now_ms - DELETED_ELEMENT_TIMEOUT_MS;
        }
        !self.is_invisibly_small()
    }
}

/// Current wall clock in milliseconds since epoch.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Filter to syncable elements against the wall clock.
pub fn filter_syncable(elements: &[Element]) -> Vec<Element> {
    filter_syncable_at(elements, now_ms())
}

/// Pure form of [`filter_syncable`], for callers that inject the clock.
pub fn filter_syncable_at(elements: &[Element], now_ms: i64) -> Vec<Element> {
    elements
        .iter()
        .filter(|e| e.is_syncable_at(now_ms))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    fn deleted_at(updated: i64) -> Element {
        let mut el = Element::new("a", ElementKind::Rectangle);
        el.is_deleted = true;
        el.updated = updated;
        el
    }

    #[test]
    fn live_element_is_syncable() {
        let el = Element::new("a", ElementKind::Rectangle);
        assert!(el.is_syncable_at(NOW));
    }

    #[test]
    fn invisibly_small_element_is_not_syncable() {
        let mut el = Element::new("a", ElementKind::Rectangle);
        el.width = 0.0;
        el.height = 0.0;
        assert!(!el.is_syncable_at(NOW));
    }

    #[test]
    fn thin_but_long_element_is_syncable() {
        let mut el = Element::new("a", ElementKind::Connector);
        el.width = 0.0;
        el.height = 40.0;
        assert!(el.is_syncable_at(NOW));
    }

    #[test]
    fn fresh_tombstone_is_syncable() {
        let el = deleted_at(NOW - 1000);
        assert!(el.is_syncable_at(NOW));
    }

    #[test]
    fn tombstone_just_inside_window_is_syncable() {
        let el = deleted_at(NOW - DELETED_ELEMENT_TIMEOUT_MS + 1);
        assert!(el.is_syncable_at(NOW));
    }

    #[test]
    fn tombstone_at_window_edge_is_not_syncable() {
        let el = deleted_at(NOW - DELETED_ELEMENT_TIMEOUT_MS);
        assert!(!el.is_syncable_at(NOW));
    }

    #[test]
    fn expired_tombstone_is_not_syncable() {
        let el = deleted_at(NOW - DELETED_ELEMENT_TIMEOUT_MS - 1);
        assert!(!el.is_syncable_at(NOW));
    }

    #[test]
    fn deleted_invisibly_small_element_inside_window_is_syncable() {
        // Tombstones skip the geometry check: the deletion must reach peers
        // even if the element had degenerated before it was removed.
        let mut el = deleted_at(NOW - 1000);
        el.width = 0.0;
        el.height = 0.0;
        assert!(el.is_syncable_at(NOW));
    }

    #[test]
    fn filter_keeps_local_order() {
        let a = Element::new("a", ElementKind::Rectangle);
        let expired = deleted_at(NOW - DELETED_ELEMENT_TIMEOUT_MS - 1);
        let b = Element::new("b", ElementKind::Text);
        let kept = filter_syncable_at(&[a.clone(), expired, b.clone()], NOW);
        assert_eq!(kept, vec![a, b]);
    }

    #[test]
    fn serde_uses_scene_wire_names() {
        let mut el = Element::new("el-1", ElementKind::Connector);
        el.version_nonce = 7;
        el.start_binding = Some(Binding {
            element_id: "el-2".into(),
        });
        let json = serde_json::to_value(&el).unwrap();
        assert_eq!(json["type"], "connector");
        assert_eq!(json["versionNonce"], 7);
        assert_eq!(json["isDeleted"], false);
        assert_eq!(json["startBinding"]["elementId"], "el-2");
        assert!(json.get("endBinding").is_none());
    }

    #[test]
    fn serde_tolerates_missing_concealed() {
        let json = serde_json::json!({
            "id": "el-1",
            "type": "rectangle",
            "version": 3,
            "versionNonce": 9,
            "isDeleted": false,
            "updated": 12,
            "x": 0.0, "y": 0.0, "width": 5.0, "height": 5.0
        });
        let el: Element = serde_json::from_value(json).unwrap();
        assert!(!el.concealed);
        assert_eq!(el.version, 3);
    }
}
