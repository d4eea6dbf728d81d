use super::{Collection, Document, Filter, Store};
use crate::{
    error::{HobbyistError, Result},
    model::{Hobby, Post, RecordId, User},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

/// A record type stored in its own collection.
pub trait Entity: DeserializeOwned + Send + Sync {
    const COLLECTION: Collection;
    /// Name used in log lines and error messages.
    const NAME: &'static str;
}

impl Entity for User {
    const COLLECTION: Collection = Collection::Users;
    const NAME: &'static str = "User";
}

impl Entity for Post {
    const COLLECTION: Collection = Collection::Posts;
    const NAME: &'static str = "Post";
}

impl Entity for Hobby {
    const COLLECTION: Collection = Collection::Hobbies;
    const NAME: &'static str = "Hobby";
}

fn to_document(value: &impl Serialize) -> Result<Document> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(HobbyistError::Corrupt(format!(
            "expected an object, got {}",
            other
        ))),
    }
}

/// Typed access to one collection of a [`Store`].
pub struct Repository<E> {
    store: Arc<dyn Store>,
    _marker: PhantomData<fn() -> E>,
}

impl<E> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _marker: PhantomData,
        }
    }
}

impl<E: Entity> Repository<E> {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    fn decode(document: Document) -> Result<E> {
        serde_json::from_value(Value::Object(document))
            .map_err(|e| HobbyistError::Corrupt(format!("{} document: {}", E::NAME, e)))
    }

    fn decode_all(documents: Vec<Document>) -> Result<Vec<E>> {
        documents.into_iter().map(Self::decode).collect()
    }

    pub async fn find_all(&self) -> Result<Vec<E>> {
        self.find(&Filter::all()).await
    }

    pub async fn find(&self, filter: &Filter) -> Result<Vec<E>> {
        let documents = self.store.find(E::COLLECTION, filter).await?;
        tracing::debug!(collection = %E::COLLECTION, count = documents.len(), "Found documents");
        Self::decode_all(documents)
    }

    pub async fn find_by_id(&self, id: &RecordId) -> Result<Option<E>> {
        tracing::debug!(collection = %E::COLLECTION, id = %id, "Looking up document");
        self.store
            .find_by_id(E::COLLECTION, id)
            .await?
            .map(Self::decode)
            .transpose()
    }

    pub async fn insert<N: Serialize>(&self, fields: &N) -> Result<E> {
        let document = to_document(fields)?;
        let stored = self.store.insert(E::COLLECTION, document).await?;
        let id = stored
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default();
        tracing::info!(collection = %E::COLLECTION, id = %id, "Created {}", E::NAME);
        Self::decode(stored)
    }

    /// Overwrites the serialized fields of `changes`. Unknown id is `NotFound`.
    pub async fn update_by_id<C: Serialize>(&self, id: &RecordId, changes: &C) -> Result<E> {
        let document = to_document(changes)?;
        tracing::info!(collection = %E::COLLECTION, id = %id, "Updating {}", E::NAME);
        match self.store.update_by_id(E::COLLECTION, id, document).await? {
            Some(updated) => Self::decode(updated),
            None => Err(HobbyistError::not_found(E::NAME, id)),
        }
    }

    /// Removes the record and returns it. Unknown id is `NotFound`.
    pub async fn delete_by_id(&self, id: &RecordId) -> Result<E> {
        tracing::info!(collection = %E::COLLECTION, id = %id, "Removing {}", E::NAME);
        match self.store.delete_by_id(E::COLLECTION, id).await? {
            Some(removed) => Self::decode(removed),
            None => Err(HobbyistError::not_found(E::NAME, id)),
        }
    }
}

/// The repositories behind the GraphQL schema, all sharing one store.
#[derive(Clone)]
pub struct Database {
    pub users: Repository<User>,
    pub posts: Repository<Post>,
    pub hobbies: Repository<Hobby>,
}

impl Database {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            users: Repository::new(Arc::clone(&store)),
            posts: Repository::new(Arc::clone(&store)),
            hobbies: Repository::new(store),
        }
    }

    pub async fn posts_of(&self, user_id: &RecordId) -> Result<Vec<Post>> {
        self.posts
            .find(&Filter::all().field_eq("userId", user_id.as_str()))
            .await
    }

    pub async fn hobbies_of(&self, user_id: &RecordId) -> Result<Vec<Hobby>> {
        self.hobbies
            .find(&Filter::all().field_eq("userId", user_id.as_str()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewPost, NewUser, UserChanges};
    use crate::storage::MemoryStore;

    fn database() -> Database {
        Database::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_insert_then_find_by_id() {
        let db = database();
        let created = db
            .users
            .insert(&NewUser::new("A").with_age(Some(30)))
            .await
            .unwrap();

        assert_eq!(created.name, "A");
        assert_eq!(created.age, Some(30));
        assert_eq!(created.profession, None);

        let found = db.users.find_by_id(&created.id).await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_insert_logs_assigned_id() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let created = database().users.insert(&NewUser::new("A")).await.unwrap();

        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Created User"), "{}", output);
        assert!(output.contains(&format!("id={}", created.id)), "{}", output);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let db = database();
        let err = db
            .users
            .update_by_id(&RecordId::generate(), &UserChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(err, HobbyistError::NotFound { entity: "User", .. }));
    }

    #[tokio::test]
    async fn test_posts_of_user() {
        let db = database();
        let user = db.users.insert(&NewUser::new("A")).await.unwrap();
        let other = db.users.insert(&NewUser::new("B")).await.unwrap();
        for (comment, owner) in [("one", &user), ("two", &other), ("three", &user)] {
            db.posts
                .insert(&NewPost {
                    comment: comment.to_string(),
                    user_id: owner.id.to_string(),
                })
                .await
                .unwrap();
        }

        let comments: Vec<_> = db
            .posts_of(&user.id)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.comment)
            .collect();
        assert_eq!(comments, vec!["one", "three"]);
    }

    #[tokio::test]
    async fn test_corrupt_document_is_reported() {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let mut fields = Document::new();
        fields.insert("age".to_string(), Value::from("thirty"));
        let stored = store.insert(Collection::Users, fields).await.unwrap();
        let id = RecordId::parse(stored["id"].as_str().unwrap()).unwrap();

        let users: Repository<User> = Repository::new(store);
        let err = users.find_by_id(&id).await.unwrap_err();
        assert!(matches!(err, HobbyistError::Corrupt(_)));
    }
}
