//! GraphQL schema and resolvers for hobbyist.
//!
//! ## Schema
//!
//! - **Types**: `User`, `Post`, `Hobby`. Relational fields (`User.posts`,
//!   `User.hobbies`, `Post.user`, `Hobby.user`) hit the store only when selected.
//! - **Queries**: `user`, `users`, `post`, `posts`, `hobby`, `hobbies`
//! - **Mutations**: `CreateUser`, `UpdateUser`, `RemoveUser`, `CreatePost`,
//!   `UpdatePost`, `RemovePost`, `CreateHobby`, `UpdateHobby`, `RemoveHobby`
//!
//! ## Errors
//!
//! Every error in a response carries `extensions.code`: `INVALID_ARGUMENT`,
//! `NOT_FOUND`, `STORE_UNAVAILABLE` or `INTERNAL`.
//!
//! ```graphql
//! mutation {
//!   CreateUser(name: "A", age: 30) { id }
//! }
//! ```

mod schema;
mod types;

pub use schema::{HobbyistSchema, MutationRoot, QueryRoot, build_schema};
pub use types::{Hobby, Post, User};

use async_graphql::{Context, ErrorExtensionValues, ErrorExtensions, Request, Response};

use crate::error::HobbyistError;
use crate::storage::Database;

pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
pub const STORE_UNAVAILABLE: &str = "STORE_UNAVAILABLE";

pub(crate) trait FieldResultExt<T> {
    fn into_field_result(self) -> async_graphql::Result<T>;
}

impl<T> FieldResultExt<T> for crate::error::Result<T> {
    fn into_field_result(self) -> async_graphql::Result<T> {
        self.map_err(|e| e.extend())
    }
}

pub(crate) fn database<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Database> {
    ctx.data::<Database>().map_err(|_| {
        HobbyistError::Config("schema was built without a database".to_string()).extend()
    })
}

/// Runs a request against the schema.
///
/// Errors raised before any resolver ran (syntax, unknown fields, missing
/// required arguments, argument coercion) come back without a code; they are
/// tagged `INVALID_ARGUMENT` here.
pub async fn execute(schema: &HobbyistSchema, request: impl Into<Request>) -> Response {
    let mut response = schema.execute(request).await;
    for error in &mut response.errors {
        if error.extensions.is_none() {
            let mut extensions = ErrorExtensionValues::default();
            extensions.set("code", INVALID_ARGUMENT);
            error.extensions = Some(extensions);
        }
    }
    response
}

/// Whether the response failed because the store could not be reached.
pub fn store_unavailable(response: &Response) -> bool {
    response.errors.iter().any(|error| {
        error
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .is_some_and(|code| *code == async_graphql::Value::from(STORE_UNAVAILABLE))
    })
}
