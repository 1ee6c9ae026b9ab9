//! # In-memory post store
//!
//! Implements [`PostStore`] and [`ProfileStore`] over vectors held in memory. Intended for
//! tests and local experiments; data is lost on drop.
//!
//! Unlike [`SqlitePostRepository`](crate::SqlitePostRepository) it accepts duplicate post ids,
//! mirroring an append-only collection; `find_one` returns the first occurrence.
//!
//! The store uses `Arc<RwLock<>>` so clones share state.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use guard_core::{Author, Post};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::StorageError;
use crate::models::{ImportBundle, MentionQuery};
use crate::repository::{PostStore, ProfileStore};

#[derive(Debug, Clone, Default)]
pub struct InMemoryPostStore {
    posts: Arc<RwLock<Vec<Post>>>,
    profiles: Arc<RwLock<HashMap<String, Author>>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bundle(bundle: ImportBundle) -> Self {
        let profiles = bundle
            .users
            .into_iter()
            .map(|a| (a.user_name.clone(), a))
            .collect();
        Self {
            posts: Arc::new(RwLock::new(bundle.posts)),
            profiles: Arc::new(RwLock::new(profiles)),
        }
    }

    pub async fn insert_post(&self, post: Post) {
        self.posts.write().await.push(post);
    }

    pub async fn insert_profile(&self, profile: Author) {
        self.profiles
            .write()
            .await
            .insert(profile.user_name.clone(), profile);
    }

    /// Removes every post with `id`; returns how many were removed.
    pub async fn remove_post(&self, id: &str) -> usize {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        before - posts.len()
    }

    pub async fn remove_profile(&self, user_name: &str) -> Option<Author> {
        self.profiles.write().await.remove(user_name)
    }

    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn find(&self, query: &MentionQuery) -> Result<Vec<Post>, StorageError> {
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let re = query.to_regex()?;
        let posts = self.posts.read().await;
        let matched: Vec<Post> = posts
            .iter()
            .filter(|p| re.is_match(&p.text))
            .map(|p| Post {
                author: None,
                ..p.clone()
            })
            .collect();
        debug!(
            scanned = posts.len(),
            matched = matched.len(),
            "In-memory find returned"
        );
        Ok(matched)
    }

    async fn find_one(&self, id: &str) -> Result<Option<Post>, StorageError> {
        let post = self.posts.read().await.iter().find(|p| p.id == id).cloned();
        let Some(mut post) = post else {
            return Ok(None);
        };
        if post.author.is_none() {
            post.author = self.profiles.read().await.get(&post.author_ref).cloned();
        }
        Ok(Some(post))
    }
}

#[async_trait]
impl ProfileStore for InMemoryPostStore {
    async fn find_profile(&self, user_name: &str) -> Result<Option<Author>, StorageError> {
        Ok(self.profiles.read().await.get(user_name).cloned())
    }
}
