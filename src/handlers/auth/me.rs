use axum::{extract::State, http::HeaderMap, response::Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::authenticate;
use crate::services::role_service;
use crate::state::AppState;

/// GET /auth/me - the caller's stored identity. The principal row is looked
/// up fresh, so a role change shows up here before the token is reissued.
pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<Value>, ApiError> {
    let auth_user = authenticate(&state, &headers)?;

    let user = role_service::find_by_email(&state.pool, &auth_user.email)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "email": user.email,
            "name": user.name,
            "role": user.role,
        }
    })))
}
