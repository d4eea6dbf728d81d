//! Data models for hobbyist.
//!
//! This module defines the stored records and the shapes used to write them:
//!
//! - [`User`], [`Post`], [`Hobby`]: records as they come back from the store
//! - [`NewUser`], [`NewPost`], [`NewHobby`]: fields for a create
//! - [`UserChanges`], [`PostChanges`], [`HobbyChanges`]: fields for an update
//! - [`RecordId`]: the store-assigned identifier

mod hobby;
mod id;
mod patch;
mod post;
mod user;

pub use hobby::{Hobby, HobbyChanges, NewHobby};
pub use id::{ID_LENGTH, RecordId};
pub use patch::Patch;
pub use post::{NewPost, Post, PostChanges};
pub use user::{NewUser, User, UserChanges};

/// A record that points at the user it belongs to.
pub trait Owned {
    /// Raw `userId` as stored. May be absent or malformed.
    fn owner_id(&self) -> Option<&str>;

    /// The owner reference, if it is a well-formed id.
    fn owner(&self) -> Option<RecordId> {
        self.owner_id().and_then(|id| RecordId::parse(id).ok())
    }
}
