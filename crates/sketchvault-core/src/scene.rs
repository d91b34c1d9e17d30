//! Scene file (de)serialization.
//!
//! The JSON shape persisted inside the encrypted payload. `app_state` and
//! `files` are opaque to the protocol: editor state passes through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::element::Element;
use crate::error::EnvelopeError;

/// `type` discriminator written into scene files.
pub const SCENE_FILE_TYPE: &str = "sketchvault";

/// Scene file schema version.
pub const SCENE_FILE_VERSION: u32 = 2;

fn default_file_type() -> String {
    SCENE_FILE_TYPE.to_string()
}

fn default_file_version() -> u32 {
    SCENE_FILE_VERSION
}

/// The plaintext scene document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneFile {
    #[serde(rename = "type", default = "default_file_type")]
    pub file_type: String,
    #[serde(default = "default_file_version")]
    pub version: u32,
    pub elements: Vec<Element>,
    #[serde(default)]
    pub app_state: Value,
    #[serde(default)]
    pub files: Map<String, Value>,
}

impl SceneFile {
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            file_type: SCENE_FILE_TYPE.to_string(),
            version: SCENE_FILE_VERSION,
            elements,
            app_state: Value::Null,
            files: Map::new(),
        }
    }

    pub fn with_app_state(mut self, app_state: Value) -> Self {
        self.app_state = app_state;
        self
    }

    pub fn with_files(mut self, files: Map<String, Value>) -> Self {
        self.files = files;
        self
    }
}

/// Serialize a scene to its JSON byte form.
pub fn serialize_scene(scene: &SceneFile) -> Result<Vec<u8>, EnvelopeError> {
    Ok(serde_json::to_vec(scene)?)
}

/// Parse scene bytes. Tolerates absent `appState`/`files` (older payloads
/// carried elements only).
pub fn deserialize_scene(bytes: &[u8]) -> Result<SceneFile, EnvelopeError> {
    Ok(serde_json::from_slice(bytes)?)
}
