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

/// DELETE /balance-sheet/:ticker/:year - admin-gated delete.
pub async fn sheet_delete(
    State(state): State<AppState>,
    Path((ticker, year)): Path<(String, i32)>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    require_admin(&state, &headers).await?;

    let deleted = balance_sheet_service::delete(&state.pool, &ticker, year).await?;
    if !deleted {
        return Err(ApiError::not_found(
            "Balance sheet not found for the given ticker and year",
        ));
    }

    tracing::info!(%ticker, year, "Deleted balance sheet");
    Ok(Json(json!({
        "success": true,
        "data": { "message": "Balance sheet deleted successfully" }
    })))
}
