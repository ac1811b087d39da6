use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::require_admin;
use crate::services::role_service;
use crate::state::AppState;

/// GET /user-role/:email - admin-gated role inspection. The caller is
/// identified by bearer token; the path email only names the target user.
pub async fn role_get(
    State(state): State<AppState>,
    Path(email): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    require_admin(&state, &headers).await?;

    let user = role_service::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(json!({
        "success": true,
        "data": { "email": user.email, "role": user.role }
    })))
}

#[derive(Debug, Deserialize)]
pub struct RoleUpdateRequest {
    pub role: String,
}

/// PUT /update-role/:email - admin-gated role mutation.
pub async fn role_update(
    State(state): State<AppState>,
    Path(email): Path<String>,
    headers: HeaderMap,
    Json(request): Json<RoleUpdateRequest>,
) -> Result<Json<Value>, ApiError> {
    let admin = require_admin(&state, &headers).await?;

    let user = role_service::update_role(&state.pool, &email, &request.role)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    tracing::info!(admin = %admin.email, target = %user.email, role = %user.role, "Updated user role");
    Ok(Json(json!({
        "success": true,
        "data": { "email": user.email, "role": user.role }
    })))
}
