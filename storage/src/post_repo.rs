//! Post repository: SQLite-backed post and profile store.
//!
//! Uses SqlitePoolManager. Posts keep their insertion order (`seq`), which is the order
//! `find` returns. `find` filters rows with [`MentionQuery::to_regex`], which folds case for
//! all of Unicode; SQLite's `lower()` only folds ASCII.

use async_trait::async_trait;
use guard_core::{Author, Post};
use tracing::{debug, info};

use crate::error::StorageError;
use crate::models::{ImportBundle, MentionQuery};
use crate::repository::{PostStore, ProfileStore};
use crate::sqlite_pool::SqlitePoolManager;

const UPSERT_PROFILE_SQL: &str = r#"
    INSERT INTO users (user_name, display_name, avatar_url) VALUES (?, ?, ?)
    ON CONFLICT(user_name) DO UPDATE SET
        display_name = excluded.display_name,
        avatar_url = excluded.avatar_url
"#;

#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: String,
    text: String,
    author_ref: String,
}

#[derive(Debug, sqlx::FromRow)]
struct PostWithAuthorRow {
    id: String,
    text: String,
    author_ref: String,
    user_name: Option<String>,
    display_name: Option<String>,
    avatar_url: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    user_name: String,
    display_name: Option<String>,
    avatar_url: Option<String>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post::new(row.id, row.text, row.author_ref)
    }
}

impl From<PostWithAuthorRow> for Post {
    fn from(row: PostWithAuthorRow) -> Self {
        let author = row.user_name.map(|user_name| Author {
            user_name,
            display_name: row.display_name,
            avatar_url: row.avatar_url,
        });
        Post {
            id: row.id,
            text: row.text,
            author_ref: row.author_ref,
            author,
        }
    }
}

impl From<ProfileRow> for Author {
    fn from(row: ProfileRow) -> Self {
        Author {
            user_name: row.user_name,
            display_name: row.display_name,
            avatar_url: row.avatar_url,
        }
    }
}

#[derive(Clone)]
pub struct SqlitePostRepository {
    pool_manager: SqlitePoolManager,
}

impl SqlitePostRepository {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating post store tables if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS posts (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                text TEXT NOT NULL,
                author_ref TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                user_name TEXT PRIMARY KEY,
                display_name TEXT,
                avatar_url TEXT
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_posts_author_ref ON posts(author_ref)")
            .execute(pool)
            .await?;

        info!("Post store tables ready");
        Ok(())
    }

    pub async fn save_post(&self, post: &Post) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();

        sqlx::query("INSERT INTO posts (id, text, author_ref) VALUES (?, ?, ?)")
            .bind(&post.id)
            .bind(&post.text)
            .bind(&post.author_ref)
            .execute(pool)
            .await?;

        debug!(post_id = %post.id, author_ref = %post.author_ref, "Saved post");
        Ok(())
    }

    /// Inserts or replaces a social profile keyed by `user_name`.
    pub async fn save_profile(&self, profile: &Author) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();

        sqlx::query(UPSERT_PROFILE_SQL)
        .bind(&profile.user_name)
        .bind(&profile.display_name)
        .bind(&profile.avatar_url)
        .execute(pool)
        .await?;

        debug!(user_name = %profile.user_name, "Saved profile");
        Ok(())
    }

    pub async fn delete_profile(&self, user_name: &str) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM users WHERE user_name = ?")
            .bind(user_name)
            .execute(self.pool_manager.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Loads a bundle in one transaction. Profiles are upserted; posts whose id already
    /// exists are skipped. Returns `(profiles, inserted_posts)`.
    pub async fn import(&self, bundle: &ImportBundle) -> Result<(usize, usize), StorageError> {
        let mut tx = self.pool_manager.pool().begin().await?;

        for profile in &bundle.users {
            sqlx::query(UPSERT_PROFILE_SQL)
            .bind(&profile.user_name)
            .bind(&profile.display_name)
            .bind(&profile.avatar_url)
            .execute(&mut *tx)
            .await?;
        }

        let mut inserted = 0;
        for post in &bundle.posts {
            let result = sqlx::query(
                "INSERT OR IGNORE INTO posts (id, text, author_ref) VALUES (?, ?, ?)",
            )
            .bind(&post.id)
            .bind(&post.text)
            .bind(&post.author_ref)
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected() as usize;
        }

        tx.commit().await?;

        info!(
            profiles = bundle.users.len(),
            posts = inserted,
            skipped = bundle.posts.len() - inserted,
            "Imported bundle"
        );
        Ok((bundle.users.len(), inserted))
    }

    pub async fn count_posts(&self) -> Result<i64, StorageError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts")
            .fetch_one(self.pool_manager.pool())
            .await?;
        Ok(count.0)
    }
}

#[async_trait]
impl PostStore for SqlitePostRepository {
    async fn find(&self, query: &MentionQuery) -> Result<Vec<Post>, StorageError> {
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let re = query.to_regex()?;

        let rows = sqlx::query_as::<_, PostRow>(
            "SELECT id, text, author_ref FROM posts ORDER BY seq ASC",
        )
        .fetch_all(self.pool_manager.pool())
        .await?;
        let scanned = rows.len();

        let posts: Vec<Post> = rows
            .into_iter()
            .filter(|row| re.is_match(&row.text))
            .map(Post::from)
            .collect();
        info!(
            terms = query.terms().len(),
            scanned,
            matched = posts.len(),
            "Retrieved mentioning posts"
        );

        Ok(posts)
    }

    async fn find_one(&self, id: &str) -> Result<Option<Post>, StorageError> {
        let row = sqlx::query_as::<_, PostWithAuthorRow>(
            r#"
            SELECT p.id, p.text, p.author_ref, u.user_name, u.display_name, u.avatar_url
            FROM posts p
            LEFT JOIN users u ON u.user_name = p.author_ref
            WHERE p.id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool_manager.pool())
        .await?;

        Ok(row.map(Post::from))
    }
}

#[async_trait]
impl ProfileStore for SqlitePostRepository {
    async fn find_profile(&self, user_name: &str) -> Result<Option<Author>, StorageError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT user_name, display_name, avatar_url FROM users WHERE user_name = ?",
        )
        .bind(user_name)
        .fetch_optional(self.pool_manager.pool())
        .await?;

        Ok(row.map(Author::from))
    }
}
