//! In-memory repository fakes for service tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use chrono::Utc;

use pastebin_types::error::RepositoryError;
use pastebin_types::snippet::{NewSnippet, Snippet, SnippetId};
use pastebin_types::user::{NewUser, User, UserCredentials, UserId};

use crate::repository::snippet::SnippetRepository;
use crate::repository::user::UserRepository;
use crate::service::hash::PasswordHasher;

pub fn test_user(id: i64, username: &str) -> User {
    User {
        id: UserId(id),
        username: username.to_string(),
        email: String::new(),
        date_joined: Utc::now(),
    }
}

#[derive(Default)]
pub struct InMemorySnippetRepository {
    rows: Mutex<BTreeMap<i64, Snippet>>,
    usernames: HashMap<UserId, String>,
}

impl InMemorySnippetRepository {
    /// Owner ids of these users resolve to their usernames.
    pub fn with_users(users: &[User]) -> Self {
        Self {
            rows: Mutex::default(),
            usernames: users
                .iter()
                .map(|u| (u.id, u.username.clone()))
                .collect(),
        }
    }
}

impl SnippetRepository for InMemorySnippetRepository {
    async fn create(&self, new: &NewSnippet) -> Result<Snippet, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.keys().next_back().copied().unwrap_or(0) + 1;
        let snippet = Snippet {
            id: SnippetId(id),
            created: Utc::now(),
            title: new.title.clone(),
            code: new.code.clone(),
            linenos: new.linenos,
            language: new.language.clone(),
            style: new.style.clone(),
            owner_id: new.owner_id,
            owner: new.owner_id.and_then(|id| self.usernames.get(&id).cloned()),
        };
        rows.insert(id, snippet.clone());
        Ok(snippet)
    }

    async fn get_by_id(&self, id: SnippetId) -> Result<Option<Snippet>, RepositoryError> {
        Ok(self.rows.lock().unwrap().get(&id.0).cloned())
    }

    async fn list(&self) -> Result<Vec<Snippet>, RepositoryError> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn list_ids_by_owner(&self, owner: UserId) -> Result<Vec<SnippetId>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.owner_id == Some(owner))
            .map(|s| s.id)
            .collect())
    }

    async fn update(&self, snippet: &Snippet) -> Result<Snippet, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&snippet.id.0) {
            Some(row) => {
                *row = snippet.clone();
                Ok(snippet.clone())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn delete(&self, id: SnippetId) -> Result<(), RepositoryError> {
        self.rows
            .lock()
            .unwrap()
            .remove(&id.0)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<Vec<UserCredentials>>,
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new: &NewUser) -> Result<User, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|c| c.user.username == new.username) {
            return Err(RepositoryError::Conflict(new.username.clone()));
        }
        let user = User {
            id: UserId(rows.len() as i64 + 1),
            username: new.username.clone(),
            email: new.email.clone(),
            date_joined: Utc::now(),
        };
        rows.push(UserCredentials {
            user: user.clone(),
            password_hash: new.password_hash.clone(),
        });
        Ok(user)
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.user.id == id)
            .map(|c| c.user.clone()))
    }

    async fn get_credentials(&self, username: &str) -> Result<Option<UserCredentials>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.user.username == username)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.rows.lock().unwrap().iter().map(|c| c.user.clone()).collect())
    }
}

/// Reversible "hash" for tests: prefixes the password.
pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<String, String> {
        Ok(format!("plain${password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        hash.strip_prefix("plain$") == Some(password)
    }
}
