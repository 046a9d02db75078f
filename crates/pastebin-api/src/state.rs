//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! Services are generic over repository/hasher traits, but AppState pins them
//! to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use pastebin_core::service::snippet::SnippetService;
use pastebin_core::service::user::UserService;
use pastebin_infra::crypto::password::Argon2PasswordHasher;
use pastebin_infra::sqlite::pool::{database_url, DatabasePool};
use pastebin_infra::sqlite::snippet::SqliteSnippetRepository;
use pastebin_infra::sqlite::user::SqliteUserRepository;
use pastebin_types::config::ServerConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteSnippetService = SnippetService<SqliteSnippetRepository>;

pub type ConcreteUserService =
    UserService<SqliteUserRepository, SqliteSnippetRepository, Argon2PasswordHasher>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub snippet_service: Arc<ConcreteSnippetService>,
    pub user_service: Arc<ConcreteUserService>,
    pub config: ServerConfig,
}

impl AppState {
    /// Initialize the application state: connect to DB, wire services.
    pub async fn init(data_dir: PathBuf, config: ServerConfig) -> anyhow::Result<Self> {
        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let db_pool = DatabasePool::new(&database_url(&data_dir)).await?;
        tracing::debug!(data_dir = %data_dir.display(), "Application state ready");

        Ok(Self::from_pool(db_pool, config))
    }

    /// Wire services over an already-open pool.
    pub fn from_pool(db_pool: DatabasePool, config: ServerConfig) -> Self {
        let snippet_service = SnippetService::new(SqliteSnippetRepository::new(db_pool.clone()));
        let user_service = UserService::new(
            SqliteUserRepository::new(db_pool.clone()),
            SqliteSnippetRepository::new(db_pool),
            Argon2PasswordHasher::new(),
        );

        Self {
            snippet_service: Arc::new(snippet_service),
            user_service: Arc::new(user_service),
            config,
        }
    }
}
