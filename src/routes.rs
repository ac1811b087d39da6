use axum::http::HeaderValue;
use axum::{
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state);

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Authentication
        .route("/auth/login", get(handlers::auth::login))
        .route("/auth/callback", get(handlers::auth::callback))
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/logout", post(handlers::auth::logout))
        // Balance sheets
        .route("/balance-sheet/companies", get(handlers::balance_sheet::companies))
        .route(
            "/balance-sheet/:ticker/:year",
            get(handlers::balance_sheet::sheet_get)
                .post(handlers::balance_sheet::sheet_post)
                .put(handlers::balance_sheet::sheet_put)
                .delete(handlers::balance_sheet::sheet_delete),
        )
        // LLM gateway
        .route("/llm/chat", post(handlers::llm::chat))
        // Admin role inspection/mutation
        .route("/admin/ping", get(handlers::admin::ping))
        .route("/user-role/:email", get(handlers::admin::role_get))
        .route("/update-role/:email", put(handlers::admin::role_update))
        // Global middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let origins = &state.config.server.cors_origins;
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root() -> axum::response::Json<Value> {
    axum::response::Json(json!({
        "success": true,
        "data": {
            "message": "Welcome to the Balance Sheet Analysis API!",
            "version": env!("CARGO_PKG_VERSION"),
        }
    }))
}

async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::health_check(&state.pool).await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": { "status": "ok", "timestamp": now, "database": "ok" }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": { "status": "degraded", "timestamp": now, "database_error": e.to_string() }
            })),
        ),
    }
}
