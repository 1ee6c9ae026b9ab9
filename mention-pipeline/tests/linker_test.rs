//! Tests for identity linking: [`mention_pipeline::normalize_profile_input`] and
//! [`mention_pipeline::link_identity`] against an in-memory profile store.

use guard_core::{Author, GuardError, Identity, MatchInputError};
use mention_pipeline::{link_identity, normalize_profile_input};
use storage::InMemoryPostStore;

async fn profiles(authors: Vec<Author>) -> InMemoryPostStore {
    let store = InMemoryPostStore::new();
    for author in authors {
        store.insert_profile(author).await;
    }
    store
}

fn profile(user_name: &str, display_name: Option<&str>) -> Author {
    Author {
        user_name: user_name.to_string(),
        display_name: display_name.map(str::to_string),
        avatar_url: None,
    }
}

/// **Test: whitespace and every `@` are stripped from typed handles.**
#[test]
fn test_normalize_profile_input() {
    assert_eq!(normalize_profile_input(" @@alice "), "alice");
    assert_eq!(normalize_profile_input("@alice"), "alice");
    assert_eq!(normalize_profile_input("al@ice"), "alice");
    assert_eq!(normalize_profile_input(" @ "), "");
}

/// **Test: a typed handle resolves to the stored profile's user name and display name.**
#[tokio::test]
async fn test_link_identity_resolves_profile() {
    let store = profiles(vec![profile("alice", Some("Alice Smith"))]).await;

    let identity = link_identity(" @@alice ", &store).await.unwrap();

    assert_eq!(identity, Identity::new("alice", "Alice Smith"));
}

/// **Test: input that is only `@` is rejected before any lookup.**
#[tokio::test]
async fn test_link_identity_empty_handle() {
    let store = profiles(vec![profile("alice", Some("Alice Smith"))]).await;

    let err = link_identity("@", &store).await.unwrap_err();

    assert!(matches!(err, GuardError::MatchInput(MatchInputError::EmptyHandle)));
}

/// **Test: an unknown user name is reported as ProfileNotFound with the normalized name.**
#[tokio::test]
async fn test_link_identity_unknown_profile() {
    let store = profiles(vec![profile("alice", Some("Alice Smith"))]).await;

    let err = link_identity("@mallory", &store).await.unwrap_err();

    assert!(matches!(err, GuardError::ProfileNotFound(ref name) if name == "mallory"));
}

/// **Test: a missing or blank display name falls back to the user name.**
#[tokio::test]
async fn test_link_identity_display_name_fallback() {
    let store = profiles(vec![profile("cher", None), profile("prince", Some("   "))]).await;

    assert_eq!(
        link_identity("cher", &store).await.unwrap(),
        Identity::new("cher", "cher")
    );
    assert_eq!(
        link_identity("@prince", &store).await.unwrap(),
        Identity::new("prince", "prince")
    );
}
