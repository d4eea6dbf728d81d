use super::memory_store::Collections;
use super::{Collection, Document, DocumentSet, Filter, Store};
use crate::error::{HobbyistError, Result};
use crate::model::RecordId;
use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::sync::RwLock;

/// Store that persists each collection as a JSON array in `<dir>/<collection>.json`.
///
/// All collections are loaded at open. Every write stages the change on a copy
/// of the collection, writes that copy to disk and only then makes it visible,
/// so a failed write leaves both the file and the in-process view unchanged.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    collections: RwLock<Collections>,
}

fn unavailable(action: &str, path: &Path, err: impl std::fmt::Display) -> HobbyistError {
    HobbyistError::StoreUnavailable(format!("Failed to {} {}: {}", action, path.display(), err))
}

fn atomic_write(dir: &Path, target_path: &Path, content: &str) -> Result<()> {
    // Temp file must sit next to the target for the rename to be atomic
    let mut temp_file =
        NamedTempFile::new_in(dir).map_err(|e| unavailable("create temp file in", dir, e))?;
    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| unavailable("write", temp_file.path(), e))?;
    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| unavailable("sync", temp_file.path(), e))?;
    temp_file
        .persist(target_path)
        .map_err(|e| unavailable("replace", target_path, e.error))?;

    Ok(())
}

impl FileStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| unavailable("create", &dir, e))?;

        let mut collections = Collections::default();
        for collection in Collection::ALL {
            let path = Self::collection_path(&dir, collection);
            if !path.exists() {
                continue;
            }

            let content =
                std::fs::read_to_string(&path).map_err(|e| unavailable("read", &path, e))?;
            let set: DocumentSet = serde_json::from_str(&content).map_err(|e| {
                HobbyistError::Corrupt(format!("{}: {}", path.display(), e))
            })?;
            tracing::debug!(collection = %collection, count = set.len(), "Loaded collection");
            *collections.get_mut(collection) = set;
        }

        Ok(Self {
            dir,
            collections: RwLock::new(collections),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn collection_path(dir: &Path, collection: Collection) -> PathBuf {
        dir.join(format!("{}.json", collection.name()))
    }

    /// Writes the collection file off the async workers. The caller keeps the
    /// write guard until this returns, so writes to one store never interleave.
    async fn persist(&self, collection: Collection, set: &DocumentSet) -> Result<()> {
        let dir = self.dir.clone();
        let target_path = Self::collection_path(&self.dir, collection);
        let content = serde_json::to_string_pretty(set)?;

        tokio::task::spawn_blocking(move || atomic_write(&dir, &target_path, &content))
            .await
            .map_err(|e| {
                HobbyistError::StoreUnavailable(format!(
                    "Write task for {} failed: {}",
                    collection, e
                ))
            })?
    }

    /// Applies `change` to a copy of the collection, persists it, then commits.
    async fn write_with<T>(
        &self,
        collection: Collection,
        change: impl FnOnce(&mut DocumentSet) -> T,
    ) -> Result<T> {
        let mut collections = self.collections.write().await;
        let mut staged = collections.get(collection).clone();
        let out = change(&mut staged);

        if let Err(e) = self.persist(collection, &staged).await {
            tracing::error!(collection = %collection, error = %e, "Failed to persist collection");
            return Err(e);
        }

        *collections.get_mut(collection) = staged;
        Ok(out)
    }
}

#[async_trait]
impl Store for FileStore {
    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Document>> {
        Ok(self.collections.read().await.get(collection).find(filter))
    }

    async fn find_by_id(&self, collection: Collection, id: &RecordId) -> Result<Option<Document>> {
        Ok(self.collections.read().await.get(collection).find_by_id(id))
    }

    async fn insert(&self, collection: Collection, fields: Document) -> Result<Document> {
        self.write_with(collection, |set| set.insert(fields)).await
    }

    async fn update_by_id(
        &self,
        collection: Collection,
        id: &RecordId,
        fields: Document,
    ) -> Result<Option<Document>> {
        // Nothing to write when the id is unknown
        if self
            .collections
            .read()
            .await
            .get(collection)
            .find_by_id(id)
            .is_none()
        {
            return Ok(None);
        }
        self.write_with(collection, |set| set.update_by_id(id, fields))
            .await
    }

    async fn delete_by_id(
        &self,
        collection: Collection,
        id: &RecordId,
    ) -> Result<Option<Document>> {
        if self
            .collections
            .read()
            .await
            .get(collection)
            .find_by_id(id)
            .is_none()
        {
            return Ok(None);
        }
        self.write_with(collection, |set| set.delete_by_id(id)).await
    }
}
