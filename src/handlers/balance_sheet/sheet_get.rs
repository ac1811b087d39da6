use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::services::balance_sheet_service;
use crate::state::AppState;

/// GET /balance-sheet/:ticker/:year - public read of a single record.
pub async fn sheet_get(
    State(state): State<AppState>,
    Path((ticker, year)): Path<(String, i32)>,
) -> Result<Json<Value>, ApiError> {
    let sheet = balance_sheet_service::find(&state.pool, &ticker, year)
        .await?
        .ok_or_else(|| {
            ApiError::not_found("Balance sheet not found for the given ticker and year")
        })?;

    Ok(Json(json!({ "success": true, "data": sheet })))
}
