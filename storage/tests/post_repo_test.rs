//! Integration tests for [`storage::SqlitePostRepository`].
//!
//! Covers `find` matching and ordering, `find_one` author resolution, profile lookup and
//! bundle import, using a SQLite file in a temporary directory.

use guard_core::{Author, Post};
use storage::{
    ImportBundle, InMemoryPostStore, MentionQuery, PostStore, ProfileStore, SqlitePostRepository,
    StorageError,
};
use tempfile::TempDir;

async fn repo_in(dir: &TempDir) -> SqlitePostRepository {
    let path = dir.path().join("posts.db");
    SqlitePostRepository::new(path.to_str().expect("utf-8 path"))
        .await
        .expect("Failed to create repository")
}

fn profile(user_name: &str, display_name: &str) -> Author {
    Author {
        user_name: user_name.to_string(),
        display_name: Some(display_name.to_string()),
        avatar_url: Some(format!("https://img.example/{}.png", user_name)),
    }
}

/// **Test: find returns posts containing any term, case-insensitively, in insertion order.**
///
/// **Setup:** Save four posts; two mention the handle, one the surname, one nothing.
/// **Action:** `find(["@alice", "smith"])`.
/// **Expected:** The three matching posts in the order they were saved.
#[tokio::test]
async fn test_find_matches_terms_in_store_order() {
    let dir = TempDir::new().unwrap();
    let repo = repo_in(&dir).await;

    repo.save_post(&Post::new("10", "hey @ALICE you are great", "bob")).await.unwrap();
    repo.save_post(&Post::new("11", "unrelated chatter", "bob")).await.unwrap();
    repo.save_post(&Post::new("12", "Mrs. Smith called", "carol")).await.unwrap();
    repo.save_post(&Post::new("13", "cc @alice", "dave")).await.unwrap();

    let found = repo.find(&MentionQuery::new(["@alice", "smith"])).await.unwrap();

    let ids: Vec<&str> = found.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["10", "12", "13"]);
    assert!(found.iter().all(|p| p.author.is_none()));
}

/// **Test: terms containing LIKE/regex metacharacters are matched literally.**
#[tokio::test]
async fn test_find_treats_terms_literally() {
    let dir = TempDir::new().unwrap();
    let repo = repo_in(&dir).await;

    repo.save_post(&Post::new("1", "shout out to 100% Jo", "bob")).await.unwrap();
    repo.save_post(&Post::new("2", "100 percent", "bob")).await.unwrap();

    let found = repo.find(&MentionQuery::new(["100%"])).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "1");
}

/// **Test: accented names match in any case, the same way the in-memory store matches.**
///
/// **Setup:** Save an upper-case accented mention, a lower-case one, and an unrelated post.
/// **Action:** `find` with the terms built for "Émile Zoë" on both stores.
/// **Expected:** Both stores return the two mentions in insertion order.
#[tokio::test]
async fn test_find_folds_non_ascii_case() {
    let dir = TempDir::new().unwrap();
    let repo = repo_in(&dir).await;
    let memory = InMemoryPostStore::new();

    for post in [
        Post::new("1", "ÉMILE ZOË was rude", "bob"),
        Post::new("2", "nobody here", "bob"),
        Post::new("3", "thanks émile", "carol"),
    ] {
        repo.save_post(&post).await.unwrap();
        memory.insert_post(post).await;
    }
    let query = MentionQuery::new(["@emile", "Émile Zoë", "Émile", "Zoë"]);

    let from_sqlite: Vec<String> = repo.find(&query).await.unwrap().into_iter().map(|p| p.id).collect();
    let from_memory: Vec<String> = memory.find(&query).await.unwrap().into_iter().map(|p| p.id).collect();

    assert_eq!(from_sqlite, vec!["1", "3"]);
    assert_eq!(from_sqlite, from_memory);
}

/// **Test: save_profile and import share one upsert; the latest write wins either way.**
#[tokio::test]
async fn test_profile_upsert_paths_agree() {
    let dir = TempDir::new().unwrap();
    let repo = repo_in(&dir).await;

    repo.save_profile(&profile("bob", "Bob Jones")).await.unwrap();
    let bundle = ImportBundle {
        users: vec![profile("bob", "Robert Jones")],
        posts: Vec::new(),
    };
    repo.import(&bundle).await.unwrap();
    assert_eq!(
        repo.find_profile("bob").await.unwrap(),
        Some(profile("bob", "Robert Jones"))
    );

    repo.save_profile(&profile("bob", "Bobby")).await.unwrap();
    assert_eq!(repo.find_profile("bob").await.unwrap(), Some(profile("bob", "Bobby")));
}

/// **Test: find_one joins the author profile; missing profile leaves author unset.**
#[tokio::test]
async fn test_find_one_with_and_without_author() {
    let dir = TempDir::new().unwrap();
    let repo = repo_in(&dir).await;

    repo.save_profile(&profile("bob", "Bob Jones")).await.unwrap();
    repo.save_post(&Post::new("1", "hello", "bob")).await.unwrap();
    repo.save_post(&Post::new("2", "hello", "ghost")).await.unwrap();

    let post = repo.find_one("1").await.unwrap().expect("post 1");
    assert_eq!(post.author, Some(profile("bob", "Bob Jones")));

    let orphan = repo.find_one("2").await.unwrap().expect("post 2");
    assert!(orphan.author.is_none());

    assert!(repo.find_one("missing").await.unwrap().is_none());
}

/// **Test: saving a post id twice is rejected as AlreadyExists.**
#[tokio::test]
async fn test_save_duplicate_post_id() {
    let dir = TempDir::new().unwrap();
    let repo = repo_in(&dir).await;

    repo.save_post(&Post::new("1", "first", "bob")).await.unwrap();
    let err = repo.save_post(&Post::new("1", "second", "bob")).await.unwrap_err();
    assert!(matches!(err, StorageError::AlreadyExists(_)));
}

/// **Test: import upserts profiles and skips posts whose id already exists.**
#[tokio::test]
async fn test_import_bundle() {
    let dir = TempDir::new().unwrap();
    let repo = repo_in(&dir).await;
    repo.save_post(&Post::new("1", "already here", "bob")).await.unwrap();

    let bundle = ImportBundle::from_json(
        r#"{
            "users": [{"user_name": "bob", "display_name": "Bob"}],
            "posts": [
                {"id": "1", "text": "dup", "author_ref": "bob"},
                {"id": "2", "text": "new", "author_ref": "bob"}
            ]
        }"#,
    )
    .unwrap();

    let (profiles, inserted) = repo.import(&bundle).await.unwrap();
    assert_eq!(profiles, 1);
    assert_eq!(inserted, 1);
    assert_eq!(repo.count_posts().await.unwrap(), 2);

    let bob = repo.find_profile("bob").await.unwrap().expect("bob");
    assert_eq!(bob.display_name.as_deref(), Some("Bob"));
    assert!(bob.avatar_url.is_none());

    assert!(repo.delete_profile("bob").await.unwrap());
    assert!(repo.find_profile("bob").await.unwrap().is_none());
}

/// **Test: an in-memory URL keeps its schema across calls.**
#[tokio::test]
async fn test_in_memory_database_url() {
    let repo = SqlitePostRepository::new("sqlite::memory:").await.unwrap();
    repo.save_post(&Post::new("1", "hi @bob", "x")).await.unwrap();
    let found = repo.find(&MentionQuery::new(["@bob"])).await.unwrap();
    assert_eq!(found.len(), 1);
}
