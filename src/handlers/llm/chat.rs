use axum::{extract::State, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::services::llm::LlmClient;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub question: String,
}

/// POST /llm/chat - forward a free-text question to the hosted model and
/// relay its answer.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<Value>, ApiError> {
    let client = LlmClient::new(&state.http, &state.config.llm.api_url, &state.config.llm.api_key);
    let answer = client.ask(&request.question).await?;

    Ok(Json(json!({ "success": true, "data": { "answer": answer } })))
}
