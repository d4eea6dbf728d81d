use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, ID, MaybeUndefined, Object, Schema};

use super::types::*;
use super::{FieldResultExt, database};
use crate::model::{
    HobbyChanges, NewHobby, NewPost, NewUser, Patch, PostChanges, RecordId, UserChanges,
};
use crate::storage::{Database, Store};

pub type HobbyistSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Builds the schema over `store`. The returned value is immutable and cheap
/// to clone; hand it to the router at startup.
pub fn build_schema(store: Arc<dyn Store>) -> HobbyistSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(Database::new(store))
        .finish()
}

fn parse_id(id: &ID) -> async_graphql::Result<RecordId> {
    RecordId::parse(id).into_field_result()
}

fn patch<T>(value: MaybeUndefined<T>) -> Patch<T> {
    match value {
        MaybeUndefined::Undefined => Patch::Keep,
        MaybeUndefined::Null => Patch::Clear,
        MaybeUndefined::Value(v) => Patch::Set(v),
    }
}

pub struct QueryRoot;

#[Object(name = "RootQueryType")]
impl QueryRoot {
    /// Get a single user by ID
    async fn user(
        &self,
        ctx: &Context<'_>,
        id: Option<ID>,
    ) -> async_graphql::Result<Option<User>> {
        let Some(id) = id else {
            return Ok(None);
        };
        let id = parse_id(&id)?;
        let user = database(ctx)?.users.find_by_id(&id).await.into_field_result()?;
        Ok(user.map(User::from))
    }

    /// List all users
    async fn users(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<User>> {
        let users = database(ctx)?.users.find_all().await.into_field_result()?;
        Ok(users.into_iter().map(User::from).collect())
    }

    /// Get a single post by ID
    async fn post(
        &self,
        ctx: &Context<'_>,
        id: Option<ID>,
    ) -> async_graphql::Result<Option<Post>> {
        let Some(id) = id else {
            return Ok(None);
        };
        let id = parse_id(&id)?;
        let post = database(ctx)?.posts.find_by_id(&id).await.into_field_result()?;
        Ok(post.map(Post::from))
    }

    /// List all posts
    async fn posts(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Post>> {
        let posts = database(ctx)?.posts.find_all().await.into_field_result()?;
        Ok(posts.into_iter().map(Post::from).collect())
    }

    /// Get a single hobby by ID
    async fn hobby(
        &self,
        ctx: &Context<'_>,
        id: Option<ID>,
    ) -> async_graphql::Result<Option<Hobby>> {
        let Some(id) = id else {
            return Ok(None);
        };
        let id = parse_id(&id)?;
        let hobby = database(ctx)?
            .hobbies
            .find_by_id(&id)
            .await
            .into_field_result()?;
        Ok(hobby.map(Hobby::from))
    }

    /// List all hobbies
    async fn hobbies(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Hobby>> {
        let hobbies = database(ctx)?.hobbies.find_all().await.into_field_result()?;
        Ok(hobbies.into_iter().map(Hobby::from).collect())
    }
}

pub struct MutationRoot;

#[Object(name = "Mutation")]
impl MutationRoot {
    /// Create a new user
    #[graphql(name = "CreateUser")]
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        name: String,
        age: Option<i32>,
        profession: Option<String>,
    ) -> async_graphql::Result<User> {
        let new_user = NewUser::new(name)
            .with_age(age)
            .with_profession(profession);
        let user = database(ctx)?
            .users
            .insert(&new_user)
            .await
            .into_field_result()?;
        Ok(user.into())
    }

    /// Update a user. Omitted fields are left untouched; an explicit `null`
    /// clears `age` or `profession`.
    #[graphql(name = "UpdateUser")]
    async fn update_user(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: String,
        age: MaybeUndefined<i32>,
        profession: MaybeUndefined<String>,
    ) -> async_graphql::Result<User> {
        let id = parse_id(&id)?;
        let changes = UserChanges {
            name: Some(name),
            age: patch(age),
            profession: patch(profession),
        };
        let user = database(ctx)?
            .users
            .update_by_id(&id, &changes)
            .await
            .into_field_result()?;
        Ok(user.into())
    }

    /// Delete a user and return it. Their posts and hobbies are kept.
    #[graphql(name = "RemoveUser")]
    async fn remove_user(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<User> {
        let id = parse_id(&id)?;
        let user = database(ctx)?
            .users
            .delete_by_id(&id)
            .await
            .into_field_result()?;
        Ok(user.into())
    }

    /// Create a new post. `userId` is not checked against existing users.
    #[graphql(name = "CreatePost")]
    async fn create_post(
        &self,
        ctx: &Context<'_>,
        comment: String,
        user_id: ID,
    ) -> async_graphql::Result<Post> {
        let user_id = parse_id(&user_id)?;
        let new_post = NewPost {
            comment,
            user_id: user_id.to_string(),
        };
        let post = database(ctx)?
            .posts
            .insert(&new_post)
            .await
            .into_field_result()?;
        Ok(post.into())
    }

    /// Replace the comment of a post
    #[graphql(name = "UpdatePost")]
    async fn update_post(
        &self,
        ctx: &Context<'_>,
        id: ID,
        comment: String,
    ) -> async_graphql::Result<Post> {
        let id = parse_id(&id)?;
        let changes = PostChanges {
            comment: Some(comment),
        };
        let post = database(ctx)?
            .posts
            .update_by_id(&id, &changes)
            .await
            .into_field_result()?;
        Ok(post.into())
    }

    /// Delete a post and return it
    #[graphql(name = "RemovePost")]
    async fn remove_post(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Post> {
        let id = parse_id(&id)?;
        let post = database(ctx)?
            .posts
            .delete_by_id(&id)
            .await
            .into_field_result()?;
        Ok(post.into())
    }

    /// Create a new hobby. `userId` is not checked against existing users.
    #[graphql(name = "CreateHobby")]
    async fn create_hobby(
        &self,
        ctx: &Context<'_>,
        title: String,
        description: String,
        user_id: ID,
    ) -> async_graphql::Result<Hobby> {
        let user_id = parse_id(&user_id)?;
        let new_hobby = NewHobby {
            title,
            description,
            user_id: user_id.to_string(),
        };
        let hobby = database(ctx)?
            .hobbies
            .insert(&new_hobby)
            .await
            .into_field_result()?;
        Ok(hobby.into())
    }

    /// Update a hobby. Omitted or `null` fields are left untouched.
    #[graphql(name = "UpdateHobby")]
    async fn update_hobby(
        &self,
        ctx: &Context<'_>,
        id: ID,
        title: Option<String>,
        description: Option<String>,
    ) -> async_graphql::Result<Hobby> {
        let id = parse_id(&id)?;
        let changes = HobbyChanges { title, description };
        let hobby = database(ctx)?
            .hobbies
            .update_by_id(&id, &changes)
            .await
            .into_field_result()?;
        Ok(hobby.into())
    }

    /// Delete a hobby and return it
    #[graphql(name = "RemoveHobby")]
    async fn remove_hobby(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Hobby> {
        let id = parse_id(&id)?;
        let hobby = database(ctx)?
            .hobbies
            .delete_by_id(&id)
            .await
            .into_field_result()?;
        Ok(hobby.into())
    }
}
