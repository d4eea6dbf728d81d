//! # Hobbyist - a GraphQL API over users, posts and hobbies
//!
//! Users write posts and have hobbies. All three are stored as documents and
//! exposed through one GraphQL endpoint with fetch, list, create, update and
//! remove operations. Relations between them are resolved only when a query
//! asks for them.
//!
//! ## Quick Start
//!
//! ```bash
//! # Serve on the default port (4000)
//! hobbyist
//!
//! # Or pick one
//! PORT=8080 hobbyist
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line arguments
//! - [`config`]: Configuration loading
//! - [`error`]: Error types and result aliases
//! - [`graphql`]: GraphQL schema and resolvers
//! - [`model`]: Stored records and write shapes
//! - [`server`]: HTTP gateway
//! - [`storage`]: Document store backends

/// Command-line arguments using clap.
pub mod cli;

/// Configuration loading.
///
/// Handles `.hobbyist.toml` files and project root discovery.
pub mod config;

/// Error types and result aliases.
///
/// Defines `HobbyistError` and the `Result<T>` alias.
pub mod error;

/// GraphQL schema and resolvers.
pub mod graphql;

pub mod logging;

/// Data models for users, posts and hobbies.
pub mod model;

/// HTTP gateway built on axum.
pub mod server;

/// Document storage.
///
/// In-memory and JSON file backends behind the `Store` trait.
pub mod storage;
