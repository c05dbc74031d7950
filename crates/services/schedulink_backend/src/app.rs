// --- File: crates/services/schedulink_backend/src/app.rs ---
use axum::Router;
use http::Method;
use schedulink_common::log_result;
use schedulink_config::AppConfig;
use schedulink_db::{
    DbClientFactory, DbError, EntityStoreFactory, MemoryStore, RepositoryFactory, SqlEntityStore,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Builds the API router over the store selected by `config`.
///
/// The SQL store is used when `use_database` is set and a database URL is
/// configured; its schema is created on the way. Otherwise records live in
/// memory for the lifetime of the process.
pub async fn build_app(config: &AppConfig) -> Result<Router, DbError> {
    let store_factory = EntityStoreFactory::new();

    let router = match config.active_database() {
        Some(db_config) => {
            let db_client = DbClientFactory::new().from_db_config(db_config).await?;
            let store: SqlEntityStore = store_factory.create_repository(db_client);
            log_result(
                store.init_schema().await,
                "Using SQL entity store",
                "Failed to create schema",
            )?;
            schedulink_booking::routes(Arc::new(store))
        }
        None => {
            let store: MemoryStore = store_factory.create_repository(());
            info!("Using in-memory entity store");
            schedulink_booking::routes(Arc::new(store))
        }
    };

    Ok(with_docs(router)
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http()))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.cors_allow_any {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // same-origin only
        CorsLayer::new().allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
    }
}

#[cfg(feature = "openapi")]
fn with_docs(router: Router) -> Router {
    use schedulink_booking::doc::SchedulinkApiDoc;
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    #[derive(OpenApi)]
    #[openapi(
        info(
            title = "Schedulink API",
            version = "1.0.0",
            description = "Appointment slots and bookings",
            license(name = "MIT", url = "https://opensource.org/licenses/MIT")
        ),
        tags((name = "Schedulink", description = "Core service endpoints")),
    )]
    struct ApiDoc;

    let mut openapi_doc = ApiDoc::openapi();
    openapi_doc.merge(SchedulinkApiDoc::openapi());
    info!("Adding Swagger UI at /docs");

    router.merge(SwaggerUi::new("/docs").url("/docs/openapi.json", openapi_doc))
}

#[cfg(not(feature = "openapi"))]
fn with_docs(router: Router) -> Router {
    router
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    async fn post_user(app: Router) -> StatusCode {
        let request = Request::post("/users")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"email":"a@x.com","name":"Ana"}"#))
            .unwrap();
        app.oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn memory_backend_serves_api() {
        let app = build_app(&AppConfig::in_memory()).await.unwrap();
        let response = app
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(post_user(app).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn sql_backend_creates_schema() {
        let app = build_app(&AppConfig::with_database("sqlite::memory:"))
            .await
            .unwrap();
        assert_eq!(post_user(app.clone()).await, StatusCode::OK);
        assert_eq!(post_user(app).await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn permissive_cors_answers_preflight() {
        let app = build_app(&AppConfig::in_memory()).await.unwrap();
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/slots")
            .header("origin", "http://localhost:5173")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }
}
