// --- File: crates/schedulink_common/src/routes.rs ---

use axum::{routing::get, Router};

use crate::handlers::{health_handler, root_handler, test_handler};

/// Creates a router with the liveness routes: `/`, `/health` and `/test`.
pub fn routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/test", get(test_handler))
}
