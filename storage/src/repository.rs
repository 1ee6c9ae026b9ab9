use async_trait::async_trait;
use guard_core::{Author, Post};

use crate::error::StorageError;
use crate::models::MentionQuery;

/// Read interface over the external post store.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Posts whose text matches `query`, in the store's own order.
    async fn find(&self, query: &MentionQuery) -> Result<Vec<Post>, StorageError>;

    /// A single post by id with its author resolved when the store knows it.
    async fn find_one(&self, id: &str) -> Result<Option<Post>, StorageError>;
}

/// Read interface over social profiles (the external users collection).
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_profile(&self, user_name: &str) -> Result<Option<Author>, StorageError>;
}
