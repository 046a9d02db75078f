//! Snippet service: list, create, retrieve, update, delete.
//!
//! Every write runs the same sequence regardless of route set: request-level
//! access gate, object lookup, object-level access gate, schema validation,
//! persistence. The `AccessPolicy` passed in decides how strict the gates are.

use serde_json::Value;

use pastebin_types::error::{RepositoryError, SnippetError};
use pastebin_types::snippet::{Snippet, SnippetId};
use pastebin_types::user::User;

use crate::permission::AccessPolicy;
use crate::repository::snippet::SnippetRepository;
use crate::schema::{ValidationMode, validate_snippet};

/// Service owning the snippet lifecycle.
pub struct SnippetService<R: SnippetRepository> {
    repo: R,
}

fn storage(e: RepositoryError) -> SnippetError {
    SnippetError::StorageError(e.to_string())
}

impl<R: SnippetRepository> SnippetService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// All snippets in id order.
    pub async fn list_snippets(&self) -> Result<Vec<Snippet>, SnippetError> {
        self.repo.list().await.map_err(storage)
    }

    /// Get a snippet by id.
    pub async fn get_snippet(&self, id: SnippetId) -> Result<Snippet, SnippetError> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(storage)?
            .ok_or(SnippetError::NotFound)
    }

    /// Validate `payload` and store it as a new snippet.
    pub async fn create_snippet(
        &self,
        policy: AccessPolicy,
        actor: Option<&User>,
        payload: &Value,
    ) -> Result<Snippet, SnippetError> {
        policy.authorize_write(actor)?;

        let changes =
            validate_snippet(payload, ValidationMode::Create).map_err(SnippetError::Invalid)?;
        let new = changes.into_new(policy.owner_for(actor));

        let snippet = self.repo.create(&new).await.map_err(storage)?;
        tracing::info!(
            snippet_id = %snippet.id,
            owner = snippet.owner.as_deref().unwrap_or("-"),
            "Snippet created"
        );
        Ok(snippet)
    }

    /// Run the access gates for changing snippet `id` and return it.
    ///
    /// Order: authentication, lookup, ownership.
    pub async fn check_write_access(
        &self,
        policy: AccessPolicy,
        actor: Option<&User>,
        id: SnippetId,
    ) -> Result<Snippet, SnippetError> {
        policy.authorize_write(actor)?;

        let snippet = self.get_snippet(id).await?;
        policy.authorize_modify(actor, &snippet)?;
        Ok(snippet)
    }

    /// Validate `payload` and apply it over an existing snippet.
    ///
    /// With `partial = false` (PUT) `code` must be present; with `partial =
    /// true` (PATCH) every field is optional. Absent fields keep their value.
    pub async fn update_snippet(
        &self,
        policy: AccessPolicy,
        actor: Option<&User>,
        id: SnippetId,
        payload: &Value,
        partial: bool,
    ) -> Result<Snippet, SnippetError> {
        let mut snippet = self.check_write_access(policy, actor, id).await?;

        let mode = if partial {
            ValidationMode::Partial
        } else {
            ValidationMode::Update
        };
        let changes = validate_snippet(payload, mode).map_err(SnippetError::Invalid)?;
        changes.apply_to(&mut snippet);

        let updated = self.repo.update(&snippet).await.map_err(|e| match e {
            RepositoryError::NotFound => SnippetError::NotFound,
            other => storage(other),
        })?;
        tracing::info!(snippet_id = %updated.id, partial, "Snippet updated");
        Ok(updated)
    }

    /// Delete a snippet.
    pub async fn delete_snippet(
        &self,
        policy: AccessPolicy,
        actor: Option<&User>,
        id: SnippetId,
    ) -> Result<(), SnippetError> {
        self.check_write_access(policy, actor, id).await?;

        self.repo.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => SnippetError::NotFound,
            other => storage(other),
        })?;
        tracing::info!(snippet_id = %id, "Snippet deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{InMemorySnippetRepository, test_user};
    use serde_json::json;

    fn service() -> SnippetService<InMemorySnippetRepository> {
        SnippetService::new(InMemorySnippetRepository::with_users(&[
            test_user(1, "alice"),
            test_user(2, "bob"),
        ]))
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let svc = service();
        let created = svc
            .create_snippet(AccessPolicy::Open, None, &json!({"code": "print(1)"}))
            .await
            .unwrap();

        let found = svc.get_snippet(created.id).await.unwrap();
        assert_eq!(found.code, "print(1)");
        assert_eq!(found.language, "python");
        assert_eq!(found.style, "friendly");
        assert!(found.owner.is_none());
    }

    #[tokio::test]
    async fn test_invalid_create_persists_nothing() {
        let svc = service();
        let err = svc
            .create_snippet(AccessPolicy::Open, None, &json!({"title": "no code"}))
            .await
            .unwrap_err();
        assert!(matches!(err, SnippetError::Invalid(_)));
        assert!(svc.list_snippets().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let err = service().get_snippet(SnippetId(404)).await.unwrap_err();
        assert!(matches!(err, SnippetError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_then_get_not_found() {
        let svc = service();
        let created = svc
            .create_snippet(AccessPolicy::Open, None, &json!({"code": "x"}))
            .await
            .unwrap();
        svc.delete_snippet(AccessPolicy::Open, None, created.id)
            .await
            .unwrap();

        let err = svc.get_snippet(created.id).await.unwrap_err();
        assert!(matches!(err, SnippetError::NotFound));
    }

    #[tokio::test]
    async fn test_guarded_create_records_owner() {
        let svc = service();
        let alice = test_user(1, "alice");
        let created = svc
            .create_snippet(AccessPolicy::OwnerOrReadOnly, Some(&alice), &json!({"code": "x"}))
            .await
            .unwrap();
        assert_eq!(created.owner.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn test_guarded_create_requires_actor() {
        let err = service()
            .create_snippet(AccessPolicy::OwnerOrReadOnly, None, &json!({"code": "x"}))
            .await
            .unwrap_err();
        assert!(matches!(err, SnippetError::NotAuthenticated));
    }

    #[tokio::test]
    async fn test_update_by_non_owner_rejected_owner_accepted() {
        let svc = service();
        let alice = test_user(1, "alice");
        let bob = test_user(2, "bob");
        let created = svc
            .create_snippet(AccessPolicy::OwnerOrReadOnly, Some(&alice), &json!({"code": "a"}))
            .await
            .unwrap();

        let err = svc
            .update_snippet(
                AccessPolicy::OwnerOrReadOnly,
                Some(&bob),
                created.id,
                &json!({"code": "b"}),
                false,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SnippetError::PermissionDenied));

        let updated = svc
            .update_snippet(
                AccessPolicy::OwnerOrReadOnly,
                Some(&alice),
                created.id,
                &json!({"code": "c"}),
                false,
            )
            .await
            .unwrap();
        assert_eq!(updated.code, "c");
    }

    #[tokio::test]
    async fn test_missing_object_reported_before_permission() {
        let bob = test_user(2, "bob");
        let err = service()
            .update_snippet(
                AccessPolicy::OwnerOrReadOnly,
                Some(&bob),
                SnippetId(9),
                &json!({"code": "b"}),
                false,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SnippetError::NotFound));
    }

    #[tokio::test]
    async fn test_authentication_checked_before_lookup() {
        let err = service()
            .check_write_access(AccessPolicy::OwnerOrReadOnly, None, SnippetId(9))
            .await
            .unwrap_err();
        assert!(matches!(err, SnippetError::NotAuthenticated));
    }

    #[tokio::test]
    async fn test_put_requires_code_patch_does_not() {
        let svc = service();
        let created = svc
            .create_snippet(
                AccessPolicy::Open,
                None,
                &json!({"code": "x", "title": "keep me"}),
            )
            .await
            .unwrap();

        let err = svc
            .update_snippet(AccessPolicy::Open, None, created.id, &json!({"style": "vim"}), false)
            .await
            .unwrap_err();
        assert!(matches!(err, SnippetError::Invalid(_)));

        let patched = svc
            .update_snippet(AccessPolicy::Open, None, created.id, &json!({"style": "vim"}), true)
            .await
            .unwrap();
        assert_eq!(patched.style, "vim");
        assert_eq!(patched.title, "keep me");
        assert_eq!(patched.code, "x");
    }

    #[tokio::test]
    async fn test_list_in_id_order() {
        let svc = service();
        for code in ["a", "b", "c"] {
            svc.create_snippet(AccessPolicy::Open, None, &json!({ "code": code }))
                .await
                .unwrap();
        }
        let codes: Vec<String> = svc
            .list_snippets()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.code)
            .collect();
        assert_eq!(codes, vec!["a", "b", "c"]);
    }
}
