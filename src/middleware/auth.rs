use axum::http::HeaderMap;

use crate::auth::{self, Claims};
use crate::database::models::user::{User, ADMIN_ROLE};
use crate::error::ApiError;
use crate::services::role_service;
use crate::state::AppState;

/// Authenticated caller context extracted from a validated bearer token.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub email: String,
    pub role: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.sub,
            role: claims.role,
        }
    }
}

/// Validate the bearer token on a request and return the caller context.
/// Signature or expiry failures are authentication errors (401), distinct
/// from the authorization errors `require_admin` produces.
pub fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<AuthUser, ApiError> {
    let token = extract_bearer_token(headers)?;
    let claims = auth::decode_token(&state.config.security, &token)?;
    Ok(AuthUser::from(claims))
}

/// The single access-control contract every gated operation goes through:
/// authenticate the token, load the principal it names, and require the
/// stored role to be `admin`. The stored role is authoritative, so a role
/// change takes effect on the next request even for tokens issued earlier.
pub async fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<User, ApiError> {
    let auth_user = authenticate(state, headers)?;

    let user = role_service::find_by_email(&state.pool, &auth_user.email)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if user.role != ADMIN_ROLE {
        return Err(ApiError::forbidden("Admin access required"));
    }

    Ok(user)
}

/// Extract the token from an `Authorization: Bearer ...` header.
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid Authorization header format"))?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        Some(_) => Err(ApiError::unauthorized("Empty bearer token")),
        None => Err(ApiError::unauthorized(
            "Authorization header must use Bearer token format",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn extracts_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn rejects_missing_and_malformed_headers() {
        let headers = HeaderMap::new();
        assert!(extract_bearer_token(&headers).is_err());

        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic abc"));
        assert!(extract_bearer_token(&headers).is_err());

        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer "));
        assert!(extract_bearer_token(&headers).is_err());
    }
}
