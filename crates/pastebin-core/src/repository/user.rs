//! User repository trait definition.

use pastebin_types::error::RepositoryError;
use pastebin_types::user::{NewUser, User, UserCredentials, UserId};

/// Repository trait for user accounts.
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Fails with `RepositoryError::Conflict` on a duplicate username.
    fn create(
        &self,
        user: &NewUser,
    ) -> impl std::future::Future<Output = Result<User, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Look up a user and their password hash by username.
    fn get_credentials(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<Option<UserCredentials>, RepositoryError>> + Send;

    /// List all users in id order.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<User>, RepositoryError>> + Send;
}
