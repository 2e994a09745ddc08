use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::fs;
use uuid::Uuid;

use crate::errors::StoreError;

/// File-backed store of per-user JSON configuration documents.
///
/// One document per user id, persisted as `<dir>/<id>.json`. There is no
/// in-memory cache: every operation goes straight to the filesystem, which
/// is the sole record of which users have a configuration.
#[derive(Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

/// Document stamped by `create` for a fresh user.
pub fn default_document() -> Value {
    serde_json::json!({ "packages": [], "files": {} })
}

// Ids become filenames. Reject anything that could name a different
// directory entry than `<id>.json` inside the store: separators, leading
// dots, exotic characters.
fn valid_user_id(id: &str) -> bool {
    !id.is_empty()
        && !id.starts_with('.')
        && id.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

impl ConfigStore {
    /// Open the store rooted at `dir`, creating the directory if missing.
    pub async fn new<P: Into<PathBuf>>(dir: P) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read the document stored for `user_id`.
    pub async fn get(&self, user_id: &str) -> Result<Value, StoreError> {
        let path = self.document_path(user_id)?;
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(user_id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::Corrupt(user_id.to_string(), e.to_string()))
    }

    /// Write `document` for `user_id`, replacing any existing document.
    pub async fn set(&self, user_id: &str, document: &Value) -> Result<(), StoreError> {
        let path = self.document_path(user_id)?;
        self.write_document(&path, document).await
    }

    /// Initialize the default document for `user_id`; fails if one exists.
    pub async fn create(&self, user_id: &str) -> Result<(), StoreError> {
        let path = self.document_path(user_id)?;
        if fs::metadata(&path).await.is_ok() {
            return Err(StoreError::AlreadyExists(user_id.to_string()));
        }
        self.write_document(&path, &default_document()).await
    }

    /// Remove the document stored for `user_id`.
    pub async fn delete(&self, user_id: &str) -> Result<(), StoreError> {
        let path = self.document_path(user_id)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(user_id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn document_path(&self, user_id: &str) -> Result<PathBuf, StoreError> {
        if !valid_user_id(user_id) {
            return Err(StoreError::InvalidId(user_id.to_string()));
        }
        Ok(self.dir.join(format!("{user_id}.json")))
    }

    // Write to a unique temp file, then rename into place. Rename is atomic
    // within one directory, so a concurrent `get` observes either the old or
    // the new document, never a partial write. Unique names keep two racing
    // writers from sharing a temp file.
    async fn write_document(&self, path: &Path, document: &Value) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(document)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;
        let tmp = self.dir.join(format!(".write-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, data).await?;
        if let Err(e) = fs::rename(&tmp, path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn temp_store() -> ConfigStore {
        let dir = std::env::temp_dir().join(format!("config_store_{}", Uuid::new_v4()));
        ConfigStore::new(&dir).await.expect("store init")
    }

    #[tokio::test]
    async fn get_and_delete_of_unknown_user_fail_with_not_found() {
        let store = temp_store().await;
        assert!(matches!(store.get("ghost").await, Err(StoreError::NotFound(_))));
        assert!(matches!(store.delete("ghost").await, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn create_stamps_default_document_exactly_once() -> Result<(), anyhow::Error> {
        let store = temp_store().await;
        store.create("alice").await?;
        assert_eq!(store.get("alice").await?, default_document());

        // a second create must fail and must not touch the stored document
        store.set("alice", &serde_json::json!({"packages": ["curl"], "files": {}})).await?;
        assert!(matches!(store.create("alice").await, Err(StoreError::AlreadyExists(_))));
        assert_eq!(store.get("alice").await?["packages"][0], "curl");
        Ok(())
    }

    #[tokio::test]
    async fn set_is_an_upsert_and_round_trips() -> Result<(), anyhow::Error> {
        let store = temp_store().await;
        let doc = serde_json::json!({
            "packages": ["nginx", "htop"],
            "files": {"/etc/motd": "hello"},
            "nested": [{"deep": [1, 2, {"unicode-ключ": null}]}]
        });

        // no prior document: set creates it
        store.set("bob", &doc).await?;
        assert_eq!(store.get("bob").await?, doc);

        // overwrite with a scalar; the store takes any JSON value
        store.set("bob", &serde_json::json!(42)).await?;
        assert_eq!(store.get("bob").await?, serde_json::json!(42));
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_the_backing_file() -> Result<(), anyhow::Error> {
        let store = temp_store().await;
        store.create("carol").await?;
        store.delete("carol").await?;
        assert!(matches!(store.get("carol").await, Err(StoreError::NotFound(_))));
        assert!(fs::metadata(store.dir().join("carol.json")).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn unreadable_stored_bytes_surface_as_corrupt() -> Result<(), anyhow::Error> {
        let store = temp_store().await;
        fs::write(store.dir().join("dave.json"), b"{not json").await?;
        assert!(matches!(store.get("dave").await, Err(StoreError::Corrupt(..))));
        Ok(())
    }

    #[tokio::test]
    async fn documents_are_pretty_printed_on_disk() -> Result<(), anyhow::Error> {
        let store = temp_store().await;
        store.create("erin").await?;
        let raw = fs::read_to_string(store.dir().join("erin.json")).await?;
        assert!(raw.contains('\n'), "expected indented output, got {raw:?}");
        Ok(())
    }

    #[tokio::test]
    async fn hostile_user_ids_are_rejected() {
        let store = temp_store().await;
        for id in ["", "..", "../../etc/passwd", "a/b", "a\\b", ".hidden", "white space"] {
            assert!(matches!(store.get(id).await, Err(StoreError::InvalidId(_))), "id {id:?}");
        }
        // dots inside an id stay legal, e.g. host-style names
        assert!(matches!(store.get("node-1.internal").await, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn writes_leave_no_temp_files_behind() -> Result<(), anyhow::Error> {
        let store = temp_store().await;
        store.create("frank").await?;
        store.set("frank", &serde_json::json!({"packages": [], "files": {}})).await?;

        let mut entries = fs::read_dir(store.dir()).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        assert_eq!(names, vec!["frank.json"]);
        Ok(())
    }

    #[tokio::test]
    async fn reopening_the_store_sees_existing_documents() -> Result<(), anyhow::Error> {
        let store = temp_store().await;
        store.set("grace", &serde_json::json!({"packages": ["vim"], "files": {}})).await?;

        let reopened = ConfigStore::new(store.dir()).await?;
        assert_eq!(reopened.get("grace").await?["packages"][0], "vim");
        Ok(())
    }

    // Large enough that a partially visible write could not pass for either
    // complete document.
    fn big_document(tag: &str) -> Value {
        let packages: Vec<String> = (0..200).map(|i| format!("{tag}-pkg-{i}")).collect();
        serde_json::json!({ "packages": packages, "files": { "marker": tag } })
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_reads_see_only_complete_documents() -> Result<(), anyhow::Error> {
        let store = temp_store().await;
        let red = big_document("red");
        let blue = big_document("blue");
        store.set("shared", &red).await?;

        let mut tasks = Vec::new();
        for writer in 0..4 {
            let store = store.clone();
            let doc = if writer % 2 == 0 { red.clone() } else { blue.clone() };
            tasks.push(tokio::spawn(async move {
                for _ in 0..50 {
                    store.set("shared", &doc).await?;
                }
                Ok::<_, StoreError>(())
            }));
        }
        for _ in 0..4 {
            let store = store.clone();
            let red = red.clone();
            let blue = blue.clone();
            tasks.push(tokio::spawn(async move {
                for _ in 0..100 {
                    // every read lands on one complete document or the other,
                    // never a torn or mixed file
                    let seen = store.get("shared").await?;
                    assert!(seen == red || seen == blue, "read a torn document");
                }
                Ok::<_, StoreError>(())
            }));
        }
        for task in tasks {
            task.await.expect("task panicked")?;
        }
        Ok(())
    }
}
