use axum::{
    extract::{Query, State},
    response::Redirect,
};
use serde::Deserialize;
use url::Url;

use crate::auth::google::GoogleAuthClient;
use crate::auth::{self, Claims};
use crate::error::ApiError;
use crate::services::role_service;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: String,
}

/// GET /auth/callback?code= - complete the OAuth2 flow: exchange the one-time
/// code for a verified identity, resolve (lazily provisioning) the principal
/// and its role, issue a session token, and send the browser back to the
/// frontend with the token and role as query parameters.
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Result<Redirect, ApiError> {
    let client = GoogleAuthClient::new(&state.http, &state.config.google);
    let identity = client.resolve(&query.code).await?;

    let principal =
        role_service::resolve_principal(&state.pool, &identity.name, &identity.email).await?;

    let claims = Claims::new(
        principal.email.clone(),
        principal.role.clone(),
        state.config.security.token_ttl_minutes,
    );
    let token = auth::issue_token(&state.config.security, &claims)?;

    let mut url = Url::parse(&state.config.server.frontend_url)
        .map_err(|e| ApiError::internal_server_error(format!("Bad frontend URL: {}", e)))?;
    url.query_pairs_mut()
        .append_pair("access_token", &token)
        .append_pair("role", &principal.role);

    tracing::info!(email = %principal.email, role = %principal.role, "Issued session token");
    Ok(Redirect::temporary(url.as_str()))
}
