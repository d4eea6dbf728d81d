use super::{Collection, Document, DocumentSet, Filter, Store};
use crate::error::Result;
use crate::model::RecordId;
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub(super) struct Collections {
    users: DocumentSet,
    posts: DocumentSet,
    hobbies: DocumentSet,
}

impl Collections {
    pub(super) fn get(&self, collection: Collection) -> &DocumentSet {
        match collection {
            Collection::Users => &self.users,
            Collection::Posts => &self.posts,
            Collection::Hobbies => &self.hobbies,
        }
    }

    pub(super) fn get_mut(&mut self, collection: Collection) -> &mut DocumentSet {
        match collection {
            Collection::Users => &mut self.users,
            Collection::Posts => &mut self.posts,
            Collection::Hobbies => &mut self.hobbies,
        }
    }
}

/// Store that keeps every collection in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Document>> {
        Ok(self.collections.read().await.get(collection).find(filter))
    }

    async fn find_by_id(&self, collection: Collection, id: &RecordId) -> Result<Option<Document>> {
        Ok(self.collections.read().await.get(collection).find_by_id(id))
    }

    async fn insert(&self, collection: Collection, fields: Document) -> Result<Document> {
        Ok(self
            .collections
            .write()
            .await
            .get_mut(collection)
            .insert(fields))
    }

    async fn update_by_id(
        &self,
        collection: Collection,
        id: &RecordId,
        fields: Document,
    ) -> Result<Option<Document>> {
        Ok(self
            .collections
            .write()
            .await
            .get_mut(collection)
            .update_by_id(id, fields))
    }

    async fn delete_by_id(
        &self,
        collection: Collection,
        id: &RecordId,
    ) -> Result<Option<Document>> {
        Ok(self
            .collections
            .write()
            .await
            .get_mut(collection)
            .delete_by_id(id))
    }
}
