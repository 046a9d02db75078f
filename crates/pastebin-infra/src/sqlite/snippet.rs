//! SQLite snippet repository implementation.
//!
//! Implements `SnippetRepository` from `pastebin-core` using sqlx with split
//! read/write pools. Every read joins `users` to resolve the owner's username.

use chrono::Utc;
use sqlx::Row;

use pastebin_core::repository::snippet::SnippetRepository;
use pastebin_types::error::RepositoryError;
use pastebin_types::snippet::{NewSnippet, Snippet, SnippetId};
use pastebin_types::user::UserId;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

const SELECT_SNIPPET: &str = "SELECT s.id, s.created, s.title, s.code, s.linenos, s.language, s.style, s.owner_id, u.username AS owner
     FROM snippets s
     LEFT JOIN users u ON u.id = s.owner_id";

/// SQLite-backed implementation of `SnippetRepository`.
pub struct SqliteSnippetRepository {
    pool: DatabasePool,
}

impl SqliteSnippetRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Re-read a row through the writer so a just-committed write is visible.
    async fn fetch_from_writer(&self, id: i64) -> Result<Snippet, RepositoryError> {
        let row = sqlx::query(&format!("{SELECT_SNIPPET} WHERE s.id = ?"))
            .bind(id)
            .fetch_optional(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?
            .ok_or(RepositoryError::NotFound)?;

        SnippetRow::from_row(&row)
            .map_err(|e| RepositoryError::Query(e.to_string()))?
            .into_snippet()
    }
}

/// Internal row type for mapping SQLite rows to domain Snippet.
struct SnippetRow {
    id: i64,
    created: String,
    title: String,
    code: String,
    linenos: bool,
    language: String,
    style: String,
    owner_id: Option<i64>,
    owner: Option<String>,
}

impl SnippetRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            created: row.try_get("created")?,
            title: row.try_get("title")?,
            code: row.try_get("code")?,
            linenos: row.try_get("linenos")?,
            language: row.try_get("language")?,
            style: row.try_get("style")?,
            owner_id: row.try_get("owner_id")?,
            owner: row.try_get("owner")?,
        })
    }

    fn into_snippet(self) -> Result<Snippet, RepositoryError> {
        Ok(Snippet {
            id: SnippetId(self.id),
            created: parse_datetime(&self.created)?,
            title: self.title,
            code: self.code,
            linenos: self.linenos,
            language: self.language,
            style: self.style,
            owner_id: self.owner_id.map(UserId),
            owner: self.owner,
        })
    }
}

fn map_write_error(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::Database(db_err) if db_err.message().contains("FOREIGN KEY") => {
            RepositoryError::Conflict("snippet owner does not exist".to_string())
        }
        other => RepositoryError::Query(other.to_string()),
    }
}

impl SnippetRepository for SqliteSnippetRepository {
    async fn create(&self, snippet: &NewSnippet) -> Result<Snippet, RepositoryError> {
        let row = sqlx::query(
            "INSERT INTO snippets (created, title, code, linenos, language, style, owner_id)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING id",
        )
        .bind(format_datetime(&Utc::now()))
        .bind(&snippet.title)
        .bind(&snippet.code)
        .bind(snippet.linenos)
        .bind(&snippet.language)
        .bind(&snippet.style)
        .bind(snippet.owner_id.map(|id| id.0))
        .fetch_one(&self.pool.writer)
        .await
        .map_err(map_write_error)?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        self.fetch_from_writer(id).await
    }

    async fn get_by_id(&self, id: SnippetId) -> Result<Option<Snippet>, RepositoryError> {
        let row = sqlx::query(&format!("{SELECT_SNIPPET} WHERE s.id = ?"))
            .bind(id.0)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let snippet_row =
                    SnippetRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(snippet_row.into_snippet()?))
            }
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Snippet>, RepositoryError> {
        let rows = sqlx::query(&format!("{SELECT_SNIPPET} ORDER BY s.id ASC"))
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut snippets = Vec::with_capacity(rows.len());
        for row in &rows {
            let snippet_row =
                SnippetRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            snippets.push(snippet_row.into_snippet()?);
        }

        Ok(snippets)
    }

    async fn list_ids_by_owner(&self, owner: UserId) -> Result<Vec<SnippetId>, RepositoryError> {
        let rows: Vec<(i64,)> =
            sqlx::query_as("SELECT id FROM snippets WHERE owner_id = ? ORDER BY id ASC")
                .bind(owner.0)
                .fetch_all(&self.pool.reader)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(rows.into_iter().map(|(id,)| SnippetId(id)).collect())
    }

    async fn update(&self, snippet: &Snippet) -> Result<Snippet, RepositoryError> {
        let result = sqlx::query(
            "UPDATE snippets SET title = ?, code = ?, linenos = ?, language = ?, style = ?, owner_id = ?
             WHERE id = ?",
        )
        .bind(&snippet.title)
        .bind(&snippet.code)
        .bind(snippet.linenos)
        .bind(&snippet.language)
        .bind(&snippet.style)
        .bind(snippet.owner_id.map(|id| id.0))
        .bind(snippet.id.0)
        .execute(&self.pool.writer)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.fetch_from_writer(snippet.id.0).await
    }

    async fn delete(&self, id: SnippetId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM snippets WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::{DatabasePool, database_url};
    use crate::sqlite::user::SqliteUserRepository;
    use pastebin_core::repository::user::UserRepository;
    use pastebin_types::user::NewUser;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let url = database_url(dir.path());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn make_snippet(code: &str, owner_id: Option<UserId>) -> NewSnippet {
        NewSnippet {
            title: format!("{code} title"),
            code: code.to_string(),
            linenos: true,
            language: "rust".to_string(),
            style: "monokai".to_string(),
            owner_id,
        }
    }

    async fn make_user(pool: &DatabasePool, username: &str) -> UserId {
        SqliteUserRepository::new(pool.clone())
            .create(&NewUser {
                username: username.to_string(),
                email: String::new(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_create_and_get_by_id() {
        let pool = test_pool().await;
        let repo = SqliteSnippetRepository::new(pool);

        let created = repo.create(&make_snippet("fn main() {}", None)).await.unwrap();
        assert_eq!(created.id, SnippetId(1));
        assert!(created.linenos);

        let found = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.code, "fn main() {}");
        assert_eq!(found.language, "rust");
        assert_eq!(found.style, "monokai");
        assert!(found.owner.is_none());
    }

    #[tokio::test]
    async fn test_owner_username_joined() {
        let pool = test_pool().await;
        let alice = make_user(&pool, "alice").await;
        let repo = SqliteSnippetRepository::new(pool);

        let created = repo.create(&make_snippet("x", Some(alice))).await.unwrap();
        assert_eq!(created.owner.as_deref(), Some("alice"));
        assert_eq!(created.owner_id, Some(alice));

        let ids = repo.list_ids_by_owner(alice).await.unwrap();
        assert_eq!(ids, vec![created.id]);
    }

    #[tokio::test]
    async fn test_unknown_owner_rejected_by_foreign_key() {
        let pool = test_pool().await;
        let repo = SqliteSnippetRepository::new(pool);

        let err = repo
            .create(&make_snippet("x", Some(UserId(999))))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_in_id_order() {
        let pool = test_pool().await;
        let repo = SqliteSnippetRepository::new(pool);

        for code in ["one", "two", "three"] {
            repo.create(&make_snippet(code, None)).await.unwrap();
        }

        let all = repo.list().await.unwrap();
        let codes: Vec<&str> = all.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_update() {
        let pool = test_pool().await;
        let repo = SqliteSnippetRepository::new(pool);
        let mut snippet = repo.create(&make_snippet("old", None)).await.unwrap();

        snippet.code = "new".to_string();
        snippet.linenos = false;
        let updated = repo.update(&snippet).await.unwrap();
        assert_eq!(updated.code, "new");
        assert_eq!(updated.created, snippet.created);

        let found = repo.get_by_id(snippet.id).await.unwrap().unwrap();
        assert_eq!(found.code, "new");
        assert!(!found.linenos);
    }

    #[tokio::test]
    async fn test_delete() {
        let pool = test_pool().await;
        let repo = SqliteSnippetRepository::new(pool);
        let snippet = repo.create(&make_snippet("gone", None)).await.unwrap();

        repo.delete(snippet.id).await.unwrap();
        assert!(repo.get_by_id(snippet.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_and_delete_nonexistent() {
        let pool = test_pool().await;
        let repo = SqliteSnippetRepository::new(pool);

        let err = repo.delete(SnippetId(12)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));

        let mut ghost = repo.create(&make_snippet("tmp", None)).await.unwrap();
        repo.delete(ghost.id).await.unwrap();
        ghost.code = "boo".to_string();
        let err = repo.update(&ghost).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }
}
