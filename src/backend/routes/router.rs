/**
 * Router Configuration
 *
 * Combines the API routes, the uploaded-file service and the fallback into
 * one Axum router.
 *
 * # Route Order
 *
 * 1. Health check
 * 2. API routes (`/api`)
 * 3. Uploaded files (`/uploads`)
 * 4. Fallback handler (404 JSON)
 *
 * Every request passes through a `TraceLayer` span and a permissive CORS
 * layer.
 */

use axum::{http::StatusCode, response::Response, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::backend::error::error_response;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;
use crate::backend::storage::UPLOADS_ROUTE;

/// `GET /api/health`
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": "Server is running",
    }))
}

async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Route not found")
}

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Database pool and blob store shared by the handlers
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route("/api/health", get(health));

    // Add API routes
    let router = configure_api_routes(router, &app_state);

    // Uploaded blobs
    let router = router.nest_service(UPLOADS_ROUTE, ServeDir::new(app_state.storage.root()));

    router
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::MediaStore;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn app() -> Router<()> {
        let dir = std::env::temp_dir().join("pathmatch-router-test");
        create_router(AppState::new(None, MediaStore::new(&dir, "")))
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "OK");
        assert_eq!(body["message"], "Server is running");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let response = app()
            .oneshot(Request::get("/api/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Route not found");
        assert_eq!(body["status"], 404);
    }

    #[tokio::test]
    async fn test_protected_router_requires_token() {
        let response = app()
            .oneshot(
                Request::get("/api/messages/conversations")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
