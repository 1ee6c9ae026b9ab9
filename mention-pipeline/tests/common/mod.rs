//! Shared doubles for mention-pipeline integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use classifier::Classifier;
use guard_core::{Author, CancellationToken, Cancellable, Category, Classification, Post};
use llm_client::ClassificationProvider;
use prompt::ClassificationRequest;
use storage::{InMemoryPostStore, MentionQuery, PostStore, StorageError};

/// Answers by exact post text; unknown texts get `fallback`. Optional per-text delays let
/// tests make classifier calls finish out of order.
pub struct ScriptedClassifier {
    answers: HashMap<String, Classification>,
    delays: HashMap<String, Duration>,
    fallback: Classification,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl ScriptedClassifier {
    pub fn new() -> Self {
        Self {
            answers: HashMap::new(),
            delays: HashMap::new(),
            fallback: Classification::new(Category::Safe, 0.5),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn answer(mut self, text: &str, category: Category, probability: f64) -> Self {
        self.answers
            .insert(text.to_string(), Classification::new(category, probability));
        self
    }

    pub fn delay(mut self, text: &str, delay: Duration) -> Self {
        self.delays.insert(text.to_string(), delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Classifier for ScriptedClassifier {
    async fn classify(&self, text: &str) -> Classification {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(text.to_string());
        if let Some(delay) = self.delays.get(text) {
            tokio::time::sleep(*delay).await;
        }
        self.answers.get(text).copied().unwrap_or(self.fallback)
    }
}

/// Cancels `token` once it has classified `after` posts.
pub struct CancellingClassifier {
    pub token: CancellationToken,
    pub after: usize,
    calls: AtomicUsize,
}

impl CancellingClassifier {
    pub fn new(token: CancellationToken, after: usize) -> Self {
        Self {
            token,
            after,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Classifier for CancellingClassifier {
    async fn classify(&self, _text: &str) -> Classification {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if n >= self.after {
            self.token.cancel();
        }
        Classification::new(Category::Safe, 0.9)
    }
}

/// Provider that always replies with the same raw body.
pub struct FixedReplyProvider(pub String);

#[async_trait]
impl ClassificationProvider for FixedReplyProvider {
    async fn complete(&self, _request: &ClassificationRequest) -> anyhow::Result<String> {
        Ok(self.0.clone())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Wraps an in-memory store; `find` passes through, `find_one` hides or fails selected ids.
pub struct PatchyLookupStore {
    pub inner: InMemoryPostStore,
    hidden: HashSet<String>,
    failing: HashSet<String>,
    find_calls: AtomicUsize,
}

impl PatchyLookupStore {
    pub fn new(inner: InMemoryPostStore) -> Self {
        Self {
            inner,
            hidden: HashSet::new(),
            failing: HashSet::new(),
            find_calls: AtomicUsize::new(0),
        }
    }

    pub fn hide(mut self, id: &str) -> Self {
        self.hidden.insert(id.to_string());
        self
    }

    pub fn fail(mut self, id: &str) -> Self {
        self.failing.insert(id.to_string());
        self
    }

    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PostStore for PatchyLookupStore {
    async fn find(&self, query: &MentionQuery) -> Result<Vec<Post>, StorageError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find(query).await
    }

    async fn find_one(&self, id: &str) -> Result<Option<Post>, StorageError> {
        if self.failing.contains(id) {
            return Err(StorageError::Database(format!("lookup of {} failed", id)));
        }
        if self.hidden.contains(id) {
            return Ok(None);
        }
        self.inner.find_one(id).await
    }
}

/// A store whose queries always fail.
pub struct BrokenStore;

#[async_trait]
impl PostStore for BrokenStore {
    async fn find(&self, _query: &MentionQuery) -> Result<Vec<Post>, StorageError> {
        Err(StorageError::Database("store offline".to_string()))
    }

    async fn find_one(&self, _id: &str) -> Result<Option<Post>, StorageError> {
        Err(StorageError::Database("store offline".to_string()))
    }
}

pub fn author(user_name: &str, display_name: &str) -> Author {
    Author {
        user_name: user_name.to_string(),
        display_name: Some(display_name.to_string()),
        avatar_url: Some(format!("https://img.example/{}.png", user_name)),
    }
}

/// Store with profiles `bob`, `carol`, `alice` and the given posts (ids, texts, author refs).
pub async fn store_with(posts: &[(&str, &str, &str)]) -> InMemoryPostStore {
    let store = InMemoryPostStore::new();
    store.insert_profile(author("bob", "Bob B")).await;
    store.insert_profile(author("carol", "Carol C")).await;
    store.insert_profile(author("alice", "Alice Smith")).await;
    for (id, text, author_ref) in posts {
        store.insert_post(Post::new(*id, *text, *author_ref)).await;
    }
    store
}
