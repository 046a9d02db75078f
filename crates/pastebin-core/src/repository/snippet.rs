//! Snippet repository trait definition.

use pastebin_types::error::RepositoryError;
use pastebin_types::snippet::{NewSnippet, Snippet, SnippetId};
use pastebin_types::user::UserId;

/// Repository trait for snippet persistence.
///
/// Implementations live in pastebin-infra (e.g., SqliteSnippetRepository).
/// Returned snippets carry the owner's username in `Snippet::owner`.
pub trait SnippetRepository: Send + Sync {
    /// Insert a new snippet. Returns the stored snippet with its assigned id.
    fn create(
        &self,
        snippet: &NewSnippet,
    ) -> impl std::future::Future<Output = Result<Snippet, RepositoryError>> + Send;

    /// Get a snippet by id.
    fn get_by_id(
        &self,
        id: SnippetId,
    ) -> impl std::future::Future<Output = Result<Option<Snippet>, RepositoryError>> + Send;

    /// List all snippets in id order.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<Snippet>, RepositoryError>> + Send;

    /// Ids of the snippets owned by `owner`, in id order.
    fn list_ids_by_owner(
        &self,
        owner: UserId,
    ) -> impl std::future::Future<Output = Result<Vec<SnippetId>, RepositoryError>> + Send;

    /// Persist the mutable fields of an existing snippet. Returns the stored snippet.
    fn update(
        &self,
        snippet: &Snippet,
    ) -> impl std::future::Future<Output = Result<Snippet, RepositoryError>> + Send;

    /// Permanently delete a snippet.
    fn delete(
        &self,
        id: SnippetId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
