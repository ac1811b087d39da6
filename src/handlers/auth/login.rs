use axum::{extract::State, response::Redirect};

use crate::auth::google::GoogleAuthClient;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /auth/login - redirect the browser to the provider's consent page.
pub async fn login(State(state): State<AppState>) -> Result<Redirect, ApiError> {
    let url = GoogleAuthClient::consent_url(&state.config.google)?;
    Ok(Redirect::temporary(&url))
}
