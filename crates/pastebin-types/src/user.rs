use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::snippet::SnippetId;

/// Maximum username length in characters.
pub const USERNAME_MAX_LEN: usize = 150;

/// Store-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// An account that can own snippets.
///
/// The password hash is deliberately not part of this struct; it only
/// travels through [`UserCredentials`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub date_joined: DateTime<Utc>,
}

/// A user together with the stored password hash, used for authentication.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// A user ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Public representation of a user: id, username and owned snippet ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub snippets: Vec<SnippetId>,
}

/// Request to create a user. The password is plaintext until hashed by the service.
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: Option<String>,
    pub password: String,
}

/// Check a username: 1..=150 characters, letters, digits and `@.+-_` only.
///
/// # Examples
///
/// ```
/// use pastebin_types::user::validate_username;
///
/// assert!(validate_username("alice").is_ok());
/// assert!(validate_username("first.last+tag@example").is_ok());
/// assert!(validate_username("no spaces").is_err());
/// ```
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("username cannot be empty".to_string());
    }
    if username.chars().count() > USERNAME_MAX_LEN {
        return Err(format!(
            "username must be at most {USERNAME_MAX_LEN} characters"
        ));
    }
    let valid = username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'));
    if !valid {
        return Err(
            "username may contain only letters, numbers, and @/./+/-/_ characters".to_string(),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username_rejects_long_names() {
        let name = "a".repeat(USERNAME_MAX_LEN + 1);
        assert!(validate_username(&name).is_err());
        assert!(validate_username(&name[1..]).is_ok());
    }

    #[test]
    fn test_validate_username_rejects_empty() {
        assert!(validate_username("").is_err());
    }

    #[test]
    fn test_profile_serializes_snippet_ids() {
        let profile = UserProfile {
            id: UserId(3),
            username: "bob".to_string(),
            snippets: vec![SnippetId(1), SnippetId(4)],
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json, serde_json::json!({"id": 3, "username": "bob", "snippets": [1, 4]}));
    }
}
