//! Scene-level orchestration over the catalog client.
//!
//! Save: filter syncable → serialize → compress+encrypt → store → share key.
//! Load: fetch → decrypt+decompress (with legacy fallback) → parse.
//! The catalog only ever sees the encrypted payload; keys stay in the
//! returned [`SavedScene`] (and the share-link fragment built from it).

use serde_json::{Map, Value};
use tracing::debug;

use sketchvault_core::{
    compress, decompress, deserialize_scene, filter_syncable, reconcile, serialize_scene,
    snapshot_link, Element, SceneFile,
};
use sketchvault_crypto::SceneKey;

use crate::client::CatalogClient;
use crate::error::CatalogError;
use crate::transport::StoreParams;

/// Options for a scene save.
#[derive(Debug, Clone, Default)]
pub struct SaveSceneOptions {
    /// Display name recorded by the catalog.
    pub name: Option<String>,
    /// Persist the encryption key server-side (explicit opt-in; the key is
    /// otherwise never transmitted).
    pub persist_encryption_key: bool,
}

/// A successfully stored scene: the catalog id plus the key that decrypts it.
#[derive(Debug, Clone)]
pub struct SavedScene {
    pub id: String,
    pub key: SceneKey,
}

impl CatalogClient {
    /// Encrypt and store a scene. Uses the deployment-pinned key when
    /// configured, otherwise generates a fresh key for this save.
    pub async fn save_scene(
        &self,
        elements: &[Element],
        app_state: Value,
        files: Map<String, Value>,
        opts: &SaveSceneOptions,
    ) -> Result<SavedScene, CatalogError> {
        let key = match &self.config().pinned_key {
            Some(pinned) => pinned.clone(),
            None => SceneKey::generate()?,
        };

        let syncable = filter_syncable(elements);
        debug!(
            total = elements.len(),
            syncable = syncable.len(),
            "serializing scene for save"
        );
        let scene = SceneFile::new(syncable)
            .with_app_state(app_state)
            .with_files(files);
        let plaintext = serialize_scene(&scene)?;
        let payload = compress(&plaintext, &key)?;

        let params = StoreParams {
            name: opts.name.clone(),
            persist_key: opts
                .persist_encryption_key
                .then(|| key.to_url_safe()),
        };
        let saved = self.save(&payload, &params).await?;
        Ok(SavedScene { id: saved.id, key })
    }

    /// Save a scene and format the shareable snapshot URL, with the key in
    /// the fragment so it never reaches any server.
    pub async fn export_scene(
        &self,
        base_url: &str,
        elements: &[Element],
        app_state: Value,
        files: Map<String, Value>,
    ) -> Result<String, CatalogError> {
        let saved = self
            .save_scene(elements, app_state, files, &SaveSceneOptions::default())
            .await?;
        Ok(snapshot_link(base_url, &saved.id, &saved.key))
    }

    /// Fetch and decode a stored scene.
    pub async fn load_scene(&self, id: &str, key: &SceneKey) -> Result<SceneFile, CatalogError> {
        let payload = self.fetch(id).await?;
        let plaintext = decompress(&payload, key)?;
        Ok(deserialize_scene(&plaintext)?)
    }

    /// Merge a fetched scene into the caller's elements by version precedence.
    pub fn merge_remote_scene(local: &[Element], remote: &SceneFile) -> Vec<Element> {
        reconcile(local, &remote.elements)
    }
}
