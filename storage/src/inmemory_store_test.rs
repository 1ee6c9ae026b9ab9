//! Unit tests for InMemoryPostStore.
//!
//! Covers find ordering and matching, and author resolution in find_one.

use guard_core::{Author, Post};

use crate::inmemory_store::InMemoryPostStore;
use crate::models::MentionQuery;
use crate::repository::{PostStore, ProfileStore};

fn author(user_name: &str) -> Author {
    Author {
        user_name: user_name.to_string(),
        display_name: Some(user_name.to_uppercase()),
        avatar_url: None,
    }
}

#[tokio::test]
async fn test_find_preserves_store_order() {
    let store = InMemoryPostStore::new();
    store.insert_post(Post::new("3", "ping @Alice", "bob")).await;
    store.insert_post(Post::new("1", "nothing here", "bob")).await;
    store.insert_post(Post::new("2", "smith was here", "carol")).await;

    let found = store
        .find(&MentionQuery::new(["@alice", "smith"]))
        .await
        .unwrap();

    let ids: Vec<&str> = found.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["3", "2"]);
}

#[tokio::test]
async fn test_find_with_empty_query_returns_nothing() {
    let store = InMemoryPostStore::new();
    store.insert_post(Post::new("1", "anything", "bob")).await;

    let found = store.find(&MentionQuery::default()).await.unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn test_find_one_resolves_author_from_profiles() {
    let store = InMemoryPostStore::new();
    store.insert_profile(author("bob")).await;
    store.insert_post(Post::new("1", "hi", "bob")).await;
    store.insert_post(Post::new("2", "hi", "ghost")).await;

    let with_author = store.find_one("1").await.unwrap().unwrap();
    assert_eq!(with_author.author, Some(author("bob")));

    let without_author = store.find_one("2").await.unwrap().unwrap();
    assert!(without_author.author.is_none());

    assert!(store.find_one("404").await.unwrap().is_none());
}

#[tokio::test]
async fn test_remove_post_and_profile() {
    let store = InMemoryPostStore::new();
    store.insert_profile(author("bob")).await;
    store.insert_post(Post::new("1", "hi", "bob")).await;
    store.insert_post(Post::new("1", "again", "bob")).await;

    assert_eq!(store.remove_post("1").await, 2);
    assert!(store.is_empty().await);
    assert!(store.remove_profile("bob").await.is_some());
    assert!(store.find_profile("bob").await.unwrap().is_none());
}
