#![allow(dead_code)]

use async_trait::async_trait;
use hobbyist::error::{HobbyistError, Result};
use hobbyist::graphql::{HobbyistSchema, build_schema, execute};
use hobbyist::model::RecordId;
use hobbyist::storage::{Collection, Document, Filter, MemoryStore, Store};
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn memory_schema() -> HobbyistSchema {
    build_schema(Arc::new(MemoryStore::new()))
}

/// Runs a request that must succeed and returns its `data` as JSON.
pub async fn run(schema: &HobbyistSchema, query: &str) -> Value {
    let response = execute(schema, query).await;
    assert!(
        response.errors.is_empty(),
        "unexpected errors: {:?}",
        response.errors
    );
    response.data.into_json().unwrap()
}

/// Runs a request and returns the whole response as JSON
/// (`data` plus `errors` when there are any).
pub async fn run_raw(schema: &HobbyistSchema, query: &str) -> Value {
    let response = execute(schema, query).await;
    serde_json::to_value(&response).unwrap()
}

pub fn error_codes(response: &Value) -> Vec<String> {
    response["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .map(|e| e["extensions"]["code"].as_str().unwrap_or_default().to_string())
                .collect()
        })
        .unwrap_or_default()
}

pub async fn create_user(schema: &HobbyistSchema, name: &str, age: Option<i32>) -> String {
    let age = age.map(|a| format!(", age: {}", a)).unwrap_or_default();
    let data = run(
        schema,
        &format!(r#"mutation {{ CreateUser(name: "{}"{}) {{ id }} }}"#, name, age),
    )
    .await;
    data["CreateUser"]["id"].as_str().unwrap().to_string()
}

pub async fn create_post(schema: &HobbyistSchema, comment: &str, user_id: &str) -> String {
    let data = run(
        schema,
        &format!(
            r#"mutation {{ CreatePost(comment: "{}", userId: "{}") {{ id }} }}"#,
            comment, user_id
        ),
    )
    .await;
    data["CreatePost"]["id"].as_str().unwrap().to_string()
}

pub async fn create_hobby(
    schema: &HobbyistSchema,
    title: &str,
    description: &str,
    user_id: &str,
) -> String {
    let data = run(
        schema,
        &format!(
            r#"mutation {{ CreateHobby(title: "{}", description: "{}", userId: "{}") {{ id }} }}"#,
            title, description, user_id
        ),
    )
    .await;
    data["CreateHobby"]["id"].as_str().unwrap().to_string()
}

pub struct Seeded {
    pub users: Vec<String>,
    pub posts: Vec<String>,
    pub hobbies: Vec<String>,
}

/// Sample people, posts and hobbies used across the schema tests.
pub async fn seed(schema: &HobbyistSchema) -> Seeded {
    let users = vec![
        create_user(schema, "Gina", Some(34)).await,
        create_user(schema, "Jessie", Some(23)).await,
        create_user(schema, "Bo", Some(64)).await,
    ];

    let posts = vec![
        create_post(schema, "Building a Mind", &users[0]).await,
        create_post(schema, "GraphQL is Amazing", &users[0]).await,
        create_post(schema, "How to Change the World", &users[1]).await,
    ];

    let hobbies = vec![
        create_hobby(schema, "Programming", "Using computers to make the world a better place", &users[0]).await,
        create_hobby(schema, "Rowing", "Sweat and feel better before eating donuts", &users[1]).await,
        create_hobby(schema, "Swimming", "Get in the water and learn to become the water", &users[2]).await,
    ];

    Seeded {
        users,
        posts,
        hobbies,
    }
}

/// Wraps a store and counts calls per operation.
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryStore,
    pub finds: AtomicUsize,
    pub lookups: AtomicUsize,
    pub writes: AtomicUsize,
}

impl CountingStore {
    pub fn finds(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Store for CountingStore {
    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Document>> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        self.inner.find(collection, filter).await
    }

    async fn find_by_id(&self, collection: Collection, id: &RecordId) -> Result<Option<Document>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_id(collection, id).await
    }

    async fn insert(&self, collection: Collection, fields: Document) -> Result<Document> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(collection, fields).await
    }

    async fn update_by_id(
        &self,
        collection: Collection,
        id: &RecordId,
        fields: Document,
    ) -> Result<Option<Document>> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.update_by_id(collection, id, fields).await
    }

    async fn delete_by_id(
        &self,
        collection: Collection,
        id: &RecordId,
    ) -> Result<Option<Document>> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_by_id(collection, id).await
    }
}

/// A store whose backend is always down.
pub struct UnavailableStore;

fn down() -> HobbyistError {
    HobbyistError::StoreUnavailable("connection refused".to_string())
}

#[async_trait]
impl Store for UnavailableStore {
    async fn find(&self, _collection: Collection, _filter: &Filter) -> Result<Vec<Document>> {
        Err(down())
    }

    async fn find_by_id(&self, _collection: Collection, _id: &RecordId) -> Result<Option<Document>> {
        Err(down())
    }

    async fn insert(&self, _collection: Collection, _fields: Document) -> Result<Document> {
        Err(down())
    }

    async fn update_by_id(
        &self,
        _collection: Collection,
        _id: &RecordId,
        _fields: Document,
    ) -> Result<Option<Document>> {
        Err(down())
    }

    async fn delete_by_id(
        &self,
        _collection: Collection,
        _id: &RecordId,
    ) -> Result<Option<Document>> {
        Err(down())
    }
}
