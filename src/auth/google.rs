use serde::Deserialize;
use url::Url;

use crate::config::GoogleConfig;
use crate::error::ApiError;

/// Verified identity returned by the provider's user-info endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleUserInfo {
    pub email: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// Identity resolver: exchanges an authorization code for an access token at
/// the provider's token endpoint, then fetches the verified email/name pair
/// from its user-info endpoint. Persistence happens in the role resolver, not
/// here.
pub struct GoogleAuthClient<'a> {
    http: &'a reqwest::Client,
    config: &'a GoogleConfig,
}

impl<'a> GoogleAuthClient<'a> {
    pub fn new(http: &'a reqwest::Client, config: &'a GoogleConfig) -> Self {
        Self { http, config }
    }

    /// The consent URL /auth/login redirects the browser to.
    pub fn consent_url(config: &GoogleConfig) -> Result<String, ApiError> {
        let mut url = Url::parse(&config.auth_url)
            .map_err(|e| ApiError::internal_server_error(format!("Bad auth URL: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &config.client_id)
            .append_pair("redirect_uri", &config.redirect_uri)
            .append_pair("scope", &config.scopes.join(" "));
        Ok(url.into())
    }

    /// Run the full code-for-identity exchange. Any non-success status or a
    /// missing access token fails as an authentication error.
    pub async fn resolve(&self, code: &str) -> Result<GoogleUserInfo, ApiError> {
        let access_token = self.exchange_code(code).await?;
        self.fetch_user_info(&access_token).await
    }

    async fn exchange_code(&self, code: &str) -> Result<String, ApiError> {
        let params = [
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .http
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "OAuth code exchange rejected");
            return Err(ApiError::unauthorized("Google OAuth2 authentication failed"));
        }

        let token: TokenResponse = response.json().await.map_err(|_| {
            ApiError::unauthorized("Malformed token response from identity provider")
        })?;

        token
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::unauthorized("No access token in provider response"))
    }

    async fn fetch_user_info(&self, access_token: &str) -> Result<GoogleUserInfo, ApiError> {
        let response = self
            .http
            .get(&self.config.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "User-info fetch rejected");
            return Err(ApiError::unauthorized("Failed to fetch user info from provider"));
        }

        response
            .json::<GoogleUserInfo>()
            .await
            .map_err(|_| ApiError::unauthorized("Malformed user info from identity provider"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GoogleConfig {
        GoogleConfig {
            client_id: "client-123".into(),
            client_secret: "secret".into(),
            redirect_uri: "http://localhost:8000/auth/callback".into(),
            scopes: vec!["openid".into(), "email".into()],
            auth_url: "https://accounts.google.com/o/oauth2/v2/auth".into(),
            token_url: "https://oauth2.googleapis.com/token".into(),
            userinfo_url: "https://openidconnect.googleapis.com/v1/userinfo".into(),
        }
    }

    #[test]
    fn consent_url_carries_client_and_scopes() {
        let url = GoogleAuthClient::consent_url(&config()).unwrap();
        assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("client_id=client-123"));
        assert!(url.contains("scope=openid+email"));
    }
}
