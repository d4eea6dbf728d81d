//! Document storage for hobbyist.
//!
//! Users, posts and hobbies are kept as JSON documents in three collections.
//! Everything above this layer talks to a [`Store`], which only knows how to
//! find, insert, update and delete documents by id.
//!
//! ## Backends
//!
//! - [`MemoryStore`]: documents live in the process; lost on exit
//! - [`FileStore`]: one `<collection>.json` file per collection, rewritten
//!   atomically on every write
//!
//! ## Components
//!
//! - [`Store`]: the capability every backend provides
//! - [`Repository`]: typed access to one collection
//! - [`Database`]: the three repositories the GraphQL layer works with

mod documents;
mod file_store;
mod memory_store;
mod repository;

pub use documents::{Document, DocumentSet, Filter};
pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use repository::{Database, Entity, Repository};

use crate::config::{HobbyistConfig, StoreBackend};
use crate::error::Result;
use crate::model::RecordId;
use async_trait::async_trait;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Posts,
    Hobbies,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Users, Collection::Posts, Collection::Hobbies];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Posts => "posts",
            Collection::Hobbies => "hobbies",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[async_trait]
pub trait Store: Send + Sync {
    /// All documents matching `filter`, in insertion order.
    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Document>>;

    async fn find_by_id(&self, collection: Collection, id: &RecordId) -> Result<Option<Document>>;

    /// Stores `fields` as a new document and returns it with its assigned `id`.
    async fn insert(&self, collection: Collection, fields: Document) -> Result<Document>;

    /// Overwrites the keys present in `fields` and returns the updated
    /// document, or `None` when no document has that id.
    async fn update_by_id(
        &self,
        collection: Collection,
        id: &RecordId,
        fields: Document,
    ) -> Result<Option<Document>>;

    /// Removes the document and returns it, or `None` when it did not exist.
    async fn delete_by_id(&self, collection: Collection, id: &RecordId)
    -> Result<Option<Document>>;
}

/// Opens the backend selected in the configuration.
pub fn open(config: &HobbyistConfig, root: &Path) -> Result<Arc<dyn Store>> {
    match config.store.backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::File => {
            let path = config.data_path(root);
            tracing::info!(path = %path.display(), "Using file store");
            Ok(Arc::new(FileStore::open(path)?))
        }
    }
}
