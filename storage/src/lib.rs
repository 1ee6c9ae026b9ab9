//! Storage crate: post and profile stores used by the mention pipeline.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – MentionQuery, ImportBundle
//! - [`repository`] – PostStore / ProfileStore traits
//! - [`post_repo`] – SqlitePostRepository (SQLite)
//! - [`inmemory_store`] – InMemoryPostStore
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod inmemory_store;
mod models;
mod post_repo;
mod repository;
mod sqlite_pool;

#[cfg(test)]
mod inmemory_store_test;

pub use error::StorageError;
pub use inmemory_store::InMemoryPostStore;
pub use models::{ImportBundle, MentionQuery};
pub use post_repo::SqlitePostRepository;
pub use repository::{PostStore, ProfileStore};
pub use sqlite_pool::SqlitePoolManager;
