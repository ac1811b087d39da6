use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Json,
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::require_admin;
use crate::services::balance_sheet_service;
use crate::state::AppState;

/// PUT /balance-sheet/:ticker/:year - admin-gated merge patch. Only fields
/// present in the body overwrite stored values; everything else keeps its
/// prior value.
pub async fn sheet_put(
    State(state): State<AppState>,
    Path((ticker, year)): Path<(String, i32)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    require_admin(&state, &headers).await?;

    let patch = body
        .as_object()
        .ok_or_else(|| ApiError::bad_request("Request body must be a JSON object"))?;

    let sheet = balance_sheet_service::merge_patch(&state.pool, &ticker, year, patch)
        .await?
        .ok_or_else(|| {
            ApiError::not_found("Balance sheet not found for the given ticker and year")
        })?;

    Ok(Json(json!({ "success": true, "data": sheet })))
}
