use super::{FieldResultExt, database};
use crate::model::{self, Owned, RecordId};
use async_graphql::{Context, ID, Object};

pub(crate) fn to_id(id: &RecordId) -> ID {
    ID(id.to_string())
}

/// Resolves the user a post or hobby points at.
///
/// A missing, malformed or dangling `userId` resolves to `null`.
async fn resolve_owner(
    ctx: &Context<'_>,
    record: &(impl Owned + Sync),
) -> async_graphql::Result<Option<User>> {
    let Some(owner) = record.owner() else {
        return Ok(None);
    };
    let db = database(ctx)?;
    let user = db.users.find_by_id(&owner).await.into_field_result()?;
    Ok(user.map(User::from))
}

/// A person who writes posts and has hobbies.
pub struct User(model::User);

impl From<model::User> for User {
    fn from(user: model::User) -> Self {
        User(user)
    }
}

#[Object]
impl User {
    async fn id(&self) -> ID {
        to_id(&self.0.id)
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn age(&self) -> Option<i32> {
        self.0.age
    }

    async fn profession(&self) -> Option<&str> {
        self.0.profession.as_deref()
    }

    /// Posts whose `userId` is this user.
    async fn posts(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Post>> {
        let db = database(ctx)?;
        let posts = db.posts_of(&self.0.id).await.into_field_result()?;
        Ok(posts.into_iter().map(Post::from).collect())
    }

    /// Hobbies whose `userId` is this user.
    async fn hobbies(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Hobby>> {
        let db = database(ctx)?;
        let hobbies = db.hobbies_of(&self.0.id).await.into_field_result()?;
        Ok(hobbies.into_iter().map(Hobby::from).collect())
    }
}

/// A comment written by a user.
pub struct Post(model::Post);

impl From<model::Post> for Post {
    fn from(post: model::Post) -> Self {
        Post(post)
    }
}

#[Object]
impl Post {
    async fn id(&self) -> ID {
        to_id(&self.0.id)
    }

    async fn comment(&self) -> &str {
        &self.0.comment
    }

    async fn user_id(&self) -> Option<ID> {
        self.0.user_id.clone().map(ID)
    }

    /// The author, or `null` when no such user exists.
    async fn user(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<User>> {
        resolve_owner(ctx, &self.0).await
    }
}

/// Something a user likes to do.
pub struct Hobby(model::Hobby);

impl From<model::Hobby> for Hobby {
    fn from(hobby: model::Hobby) -> Self {
        Hobby(hobby)
    }
}

#[Object]
impl Hobby {
    async fn id(&self) -> ID {
        to_id(&self.0.id)
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn description(&self) -> &str {
        &self.0.description
    }

    async fn user_id(&self) -> Option<ID> {
        self.0.user_id.clone().map(ID)
    }

    /// The owner, or `null` when no such user exists.
    async fn user(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<User>> {
        resolve_owner(ctx, &self.0).await
    }
}
