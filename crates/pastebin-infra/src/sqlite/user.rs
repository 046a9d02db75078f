//! SQLite user repository implementation.

use chrono::Utc;
use sqlx::Row;

use pastebin_core::repository::user::UserRepository;
use pastebin_types::error::RepositoryError;
use pastebin_types::user::{NewUser, User, UserCredentials, UserId};

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `UserRepository`.
pub struct SqliteUserRepository {
    pool: DatabasePool,
}

impl SqliteUserRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<User, RepositoryError> {
    let query_err = |e: sqlx::Error| RepositoryError::Query(e.to_string());
    let date_joined: String = row.try_get("date_joined").map_err(query_err)?;
    Ok(User {
        id: UserId(row.try_get("id").map_err(query_err)?),
        username: row.try_get("username").map_err(query_err)?,
        email: row.try_get("email").map_err(query_err)?,
        date_joined: parse_datetime(&date_joined)?,
    })
}

impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let date_joined = Utc::now();
        let result = sqlx::query(
            "INSERT INTO users (username, email, password_hash, date_joined)
             VALUES (?, ?, ?, ?)
             RETURNING id",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(format_datetime(&date_joined))
        .fetch_one(&self.pool.writer)
        .await;

        match result {
            Ok(row) => Ok(User {
                id: UserId(
                    row.try_get("id")
                        .map_err(|e| RepositoryError::Query(e.to_string()))?,
                ),
                username: user.username.clone(),
                email: user.email.clone(),
                date_joined,
            }),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => Err(
                RepositoryError::Conflict(format!("username '{}' already exists", user.username)),
            ),
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query("SELECT id, username, email, date_joined FROM users WHERE id = ?")
            .bind(id.0)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn get_credentials(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, username, email, date_joined, password_hash FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => Ok(Some(UserCredentials {
                user: user_from_row(&row)?,
                password_hash: row
                    .try_get("password_hash")
                    .map_err(|e| RepositoryError::Query(e.to_string()))?,
            })),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query("SELECT id, username, email, date_joined FROM users ORDER BY id ASC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter().map(user_from_row).collect()
    }
}
