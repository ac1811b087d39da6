pub mod google;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;
use crate::error::ApiError;

/// Session token claims: subject email, resolved role, and expiry. The token
/// is self-contained; there is no revocation list, so logout is a client-side
/// discard.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(email: String, role: String, ttl_minutes: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: email,
            role,
            exp: (now + Duration::minutes(ttl_minutes)).timestamp(),
            iat: now.timestamp(),
        }
    }
}

/// Encode a signed session token with the single active secret.
pub fn issue_token(security: &SecurityConfig, claims: &Claims) -> Result<String, ApiError> {
    let header = Header::new(security.jwt_algorithm);
    let key = EncodingKey::from_secret(security.jwt_secret.as_bytes());
    encode(&header, claims, &key)
        .map_err(|e| ApiError::internal_server_error(format!("Token generation failed: {}", e)))
}

/// Validate signature and expiry, returning the claims. Expiry is exact: no
/// clock leeway, so a token one second past `exp` is rejected.
pub fn decode_token(security: &SecurityConfig, token: &str) -> Result<Claims, ApiError> {
    let key = DecodingKey::from_secret(security.jwt_secret.as_bytes());
    let mut validation = Validation::new(security.jwt_algorithm);
    validation.leeway = 0;

    let data = decode::<Claims>(token, &key, &validation)?;
    Ok(data.claims)
}
