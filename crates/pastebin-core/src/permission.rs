//! Access policies applied to snippet writes.
//!
//! Reads are always allowed. Writes go through two checks: a request-level
//! gate (is anyone authenticated?) before the object is loaded, and an
//! object-level check (does the actor own it?) after.

use pastebin_types::error::SnippetError;
use pastebin_types::snippet::Snippet;
use pastebin_types::user::{User, UserId};

/// Which rules a route set enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    /// No authentication, no ownership. Anyone may create, modify, delete.
    Open,
    /// Authenticated users may create; only the owner may modify or delete.
    OwnerOrReadOnly,
}

impl AccessPolicy {
    /// Request-level gate for create/update/delete.
    pub fn authorize_write(self, actor: Option<&User>) -> Result<(), SnippetError> {
        match (self, actor) {
            (AccessPolicy::Open, _) => Ok(()),
            (AccessPolicy::OwnerOrReadOnly, Some(_)) => Ok(()),
            (AccessPolicy::OwnerOrReadOnly, None) => Err(SnippetError::NotAuthenticated),
        }
    }

    /// Object-level gate for update/delete of an existing snippet.
    pub fn authorize_modify(self, actor: Option<&User>, snippet: &Snippet) -> Result<(), SnippetError> {
        match self {
            AccessPolicy::Open => Ok(()),
            AccessPolicy::OwnerOrReadOnly if is_owner(actor, snippet) => Ok(()),
            AccessPolicy::OwnerOrReadOnly => {
                tracing::debug!(
                    snippet_id = %snippet.id,
                    actor = actor.map(|u| u.username.as_str()).unwrap_or("<anonymous>"),
                    "Write denied: actor does not own snippet"
                );
                Err(SnippetError::PermissionDenied)
            }
        }
    }

    /// Owner recorded on a snippet created under this policy.
    pub fn owner_for(self, actor: Option<&User>) -> Option<UserId> {
        match self {
            AccessPolicy::Open => None,
            AccessPolicy::OwnerOrReadOnly => actor.map(|u| u.id),
        }
    }
}

/// True when `actor` is set and owns `snippet`. Ownerless snippets have no owner to match.
pub fn is_owner(actor: Option<&User>, snippet: &Snippet) -> bool {
    match (actor, snippet.owner_id) {
        (Some(user), Some(owner_id)) => user.id == owner_id,
        _ => false,
    }
}
