use axum::{extract::State, http::HeaderMap, response::Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::require_admin;
use crate::state::AppState;

/// GET /admin/ping - verifies the caller holds the admin role.
pub async fn ping(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<Value>, ApiError> {
    let admin = require_admin(&state, &headers).await?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "message": "Admin access verified",
            "admin_email": admin.email,
        }
    })))
}
