//! Axum router configuration with middleware.
//!
//! Two snippet route sets share one service: `/snippets/` enforces
//! owner-or-read-only, `/pastebin/snippets/` is open. The open set can be
//! switched off with `pastebin_routes = false` in `config.toml`.
//! Unknown paths answer 404 and known paths with the wrong method 405,
//! both with a JSON `detail` body. Middleware: CORS, tracing.

use axum::http::{Method, Uri};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::error::AppError;
use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        // Snippets (owner-or-read-only)
        .route(
            "/snippets/",
            get(handlers::snippet::list_snippets).post(handlers::snippet::create_snippet),
        )
        .route(
            "/snippets/{id}/",
            get(handlers::snippet::get_snippet)
                .put(handlers::snippet::update_snippet)
                .patch(handlers::snippet::partial_update_snippet)
                .delete(handlers::snippet::delete_snippet),
        )
        // Users (read-only)
        .route("/users/", get(handlers::user::list_users))
        .route("/users/{id}/", get(handlers::user::get_user))
        .route("/health", get(health_check));

    if state.config.pastebin_routes {
        router = router.nest("/pastebin", pastebin_routes());
    }

    router
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Snippet routes without authentication or ownership.
fn pastebin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/snippets/",
            get(handlers::pastebin::list_snippets).post(handlers::pastebin::create_snippet),
        )
        .route(
            "/snippets/{id}/",
            get(handlers::pastebin::get_snippet)
                .put(handlers::pastebin::update_snippet)
                .delete(handlers::pastebin::delete_snippet),
        )
}

/// GET /health - Simple health check endpoint (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn not_found(uri: Uri) -> AppError {
    tracing::debug!(path = %uri.path(), "No route");
    AppError::NotFound
}

async fn method_not_allowed(method: Method) -> AppError {
    AppError::MethodNotAllowed(method.to_string())
}
