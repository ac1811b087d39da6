use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::require_admin;
use crate::services::{balance_sheet_service, import_service};
use crate::state::AppState;

/// POST /balance-sheet/:ticker/:year - admin-gated create. A JSON body
/// supplies the line items directly; without one, they are imported from the
/// market-data source. The company is created implicitly the first time its
/// ticker is seen.
pub async fn sheet_post(
    State(state): State<AppState>,
    Path((ticker, year)): Path<(String, i32)>,
    headers: HeaderMap,
    body: Option<Json<Value>>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    require_admin(&state, &headers).await?;

    if balance_sheet_service::exists(&state.pool, &ticker, year).await? {
        return Err(ApiError::conflict(
            "Balance sheet for the given year already exists",
        ));
    }

    let fields = match body_fields(&body)? {
        Some(map) => map,
        None => import_service::fetch_line_items(&state, &ticker, year).await?,
    };

    balance_sheet_service::ensure_company(&state.pool, &ticker).await?;
    let sheet = balance_sheet_service::create(&state.pool, &ticker, year, &fields).await?;

    tracing::info!(%ticker, year, fields = fields.len(), "Created balance sheet");
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": {
                "message": "Balance sheet created successfully",
                "balance_sheet": sheet,
            }
        })),
    ))
}

/// An absent body or an empty JSON object both mean "import from the
/// market-data source".
fn body_fields(
    body: &Option<Json<Value>>,
) -> Result<Option<std::collections::BTreeMap<String, f64>>, ApiError> {
    match body {
        Some(Json(Value::Object(map))) if !map.is_empty() => {
            Ok(Some(balance_sheet_service::numeric_fields_from_body(map)?))
        }
        Some(Json(Value::Object(_))) | Some(Json(Value::Null)) | None => Ok(None),
        Some(_) => Err(ApiError::bad_request("Request body must be a JSON object")),
    }
}
