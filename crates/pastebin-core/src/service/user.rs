//! User service: account creation, lookup, profiles and authentication.
//!
//! Users are read-only over HTTP. Accounts are created from the CLI, which
//! stands in for the admin tooling of an authentication subsystem.

use pastebin_types::error::{AuthError, RepositoryError, UserError};
use pastebin_types::user::{
    CreateUserRequest, NewUser, User, UserId, UserProfile, validate_username,
};

use crate::repository::snippet::SnippetRepository;
use crate::repository::user::UserRepository;
use crate::service::hash::PasswordHasher;

/// Service for user accounts.
///
/// Holds its own snippet repository to resolve the snippet ids shown on
/// user profiles.
pub struct UserService<U: UserRepository, S: SnippetRepository, H: PasswordHasher> {
    user_repo: U,
    snippet_repo: S,
    hasher: H,
}

impl<U: UserRepository, S: SnippetRepository, H: PasswordHasher> UserService<U, S, H> {
    pub fn new(user_repo: U, snippet_repo: S, hasher: H) -> Self {
        Self {
            user_repo,
            snippet_repo,
            hasher,
        }
    }

    /// Create a user account with a hashed password.
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User, UserError> {
        let username = request.username.trim().to_string();
        validate_username(&username).map_err(UserError::InvalidUsername)?;

        if request.password.is_empty() {
            return Err(UserError::InvalidPassword(
                "password cannot be empty".to_string(),
            ));
        }

        let existing = self
            .user_repo
            .get_credentials(&username)
            .await
            .map_err(|e| UserError::StorageError(e.to_string()))?;
        if existing.is_some() {
            return Err(UserError::UsernameTaken(username));
        }

        let password_hash = self.hasher.hash(&request.password).map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed");
            UserError::HashingFailed
        })?;

        let new = NewUser {
            username: username.clone(),
            email: request.email.unwrap_or_default().trim().to_string(),
            password_hash,
        };

        let user = self.user_repo.create(&new).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => UserError::UsernameTaken(username.clone()),
            other => UserError::StorageError(other.to_string()),
        })?;
        tracing::info!(user_id = %user.id, username = %user.username, "User created");
        Ok(user)
    }

    /// All users in id order.
    pub async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.user_repo
            .list()
            .await
            .map_err(|e| UserError::StorageError(e.to_string()))
    }

    /// Get a user by id.
    pub async fn get_user(&self, id: UserId) -> Result<User, UserError> {
        self.user_repo
            .get_by_id(id)
            .await
            .map_err(|e| UserError::StorageError(e.to_string()))?
            .ok_or(UserError::NotFound)
    }

    /// Get a user by username.
    pub async fn get_user_by_username(&self, username: &str) -> Result<User, UserError> {
        self.user_repo
            .get_credentials(username)
            .await
            .map_err(|e| UserError::StorageError(e.to_string()))?
            .map(|c| c.user)
            .ok_or(UserError::NotFound)
    }

    /// Public profile (id, username, owned snippet ids) for every user.
    pub async fn list_profiles(&self) -> Result<Vec<UserProfile>, UserError> {
        let users = self.list_users().await?;
        let mut profiles = Vec::with_capacity(users.len());
        for user in users {
            profiles.push(self.profile_of(user).await?);
        }
        Ok(profiles)
    }

    /// Public profile for one user.
    pub async fn get_profile(&self, id: UserId) -> Result<UserProfile, UserError> {
        let user = self.get_user(id).await?;
        self.profile_of(user).await
    }

    async fn profile_of(&self, user: User) -> Result<UserProfile, UserError> {
        let snippets = self
            .snippet_repo
            .list_ids_by_owner(user.id)
            .await
            .map_err(|e| UserError::StorageError(e.to_string()))?;
        Ok(UserProfile {
            id: user.id,
            username: user.username,
            snippets,
        })
    }

    /// Check a username/password pair.
    ///
    /// Unknown usernames and wrong passwords produce the same error.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let credentials = self
            .user_repo
            .get_credentials(username)
            .await
            .map_err(|e| AuthError::StorageError(e.to_string()))?
            .ok_or(AuthError::InvalidCredentials)?;

        if self.hasher.verify(password, &credentials.password_hash) {
            Ok(credentials.user)
        } else {
            tracing::debug!(username, "Authentication failed");
            Err(AuthError::InvalidCredentials)
        }
    }
}
