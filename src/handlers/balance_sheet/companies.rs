use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::services::balance_sheet_service;
use crate::state::AppState;

/// GET /balance-sheet/companies - public listing of every company with its
/// nested balance sheets. An empty store is reported as 404 rather than an
/// empty list; clients rely on this.
pub async fn companies(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let companies = balance_sheet_service::list_companies_with_sheets(&state.pool).await?;

    if companies.is_empty() {
        return Err(ApiError::not_found("No companies found"));
    }

    Ok(Json(json!({ "success": true, "data": companies })))
}
