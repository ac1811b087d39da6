use std::env;
use std::str::FromStr;

use jsonwebtoken::Algorithm;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Process-wide configuration, loaded once at startup and passed through
/// `AppState`. Read-only after construction.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub google: GoogleConfig,
    pub market_data: MarketDataConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Exact origins allowed by CORS; empty means permissive.
    pub cors_origins: Vec<String>,
    /// Where /auth/callback sends the browser after issuing a token.
    pub frontend_url: String,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_algorithm: Algorithm,
    pub token_ttl_minutes: i64,
}

/// Google OAuth2 client registration plus provider endpoints. The endpoints
/// default to Google's but stay configurable so tests can point them at a
/// local mock server.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
    pub auth_url: String,
    pub token_url: String,
    pub userinfo_url: String,
}

#[derive(Debug, Clone)]
pub struct MarketDataConfig {
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_url: String,
    pub api_key: String,
}

impl AppConfig {
    /// Load configuration from the environment, failing fast when a required
    /// variable is absent or unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_algorithm = match env::var("JWT_ALGORITHM") {
            Ok(v) => Algorithm::from_str(&v).map_err(|_| ConfigError::Invalid {
                var: "JWT_ALGORITHM",
                value: v,
            })?,
            Err(_) => Algorithm::HS256,
        };

        Ok(Self {
            server: ServerConfig {
                port: parsed_or("PORT", 3000)?,
                cors_origins: list_var("CORS_ORIGINS"),
                frontend_url: env::var("FRONTEND_URL")
                    .unwrap_or_else(|_| "http://localhost:5173/dashboard".to_string()),
            },
            database: DatabaseConfig {
                url: required("DATABASE_URL")?,
                max_connections: parsed_or("DATABASE_MAX_CONNECTIONS", 5)?,
            },
            security: SecurityConfig {
                jwt_secret: required("JWT_SECRET")?,
                jwt_algorithm,
                token_ttl_minutes: parsed_or("ACCESS_TOKEN_EXPIRE_MINUTES", 60)?,
            },
            google: GoogleConfig {
                client_id: required("GOOGLE_CLIENT_ID")?,
                client_secret: required("GOOGLE_CLIENT_SECRET")?,
                redirect_uri: required("GOOGLE_REDIRECT_URI")?,
                scopes: {
                    let scopes = list_var("GOOGLE_SCOPES");
                    if scopes.is_empty() {
                        vec!["openid".into(), "email".into(), "profile".into()]
                    } else {
                        scopes
                    }
                },
                auth_url: env::var("GOOGLE_AUTH_URL")
                    .unwrap_or_else(|_| "https://accounts.google.com/o/oauth2/v2/auth".to_string()),
                token_url: env::var("GOOGLE_TOKEN_URL")
                    .unwrap_or_else(|_| "https://oauth2.googleapis.com/token".to_string()),
                userinfo_url: env::var("GOOGLE_USERINFO_URL").unwrap_or_else(|_| {
                    "https://openidconnect.googleapis.com/v1/userinfo".to_string()
                }),
            },
            market_data: MarketDataConfig {
                base_url: env::var("MARKET_DATA_API_URL")
                    .unwrap_or_else(|_| "https://query1.finance.yahoo.com".to_string()),
            },
            llm: LlmConfig {
                api_url: required("LLM_API_URL")?,
                api_key: required("LLM_API_KEY")?,
            },
        })
    }
}

fn required(var: &'static str) -> Result<String, ConfigError> {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(var)),
    }
}

fn parsed_or<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(v) => v.parse().map_err(|_| ConfigError::Invalid { var, value: v }),
        Err(_) => Ok(default),
    }
}

/// Comma-separated list variable; absent or blank yields an empty vec.
fn list_var(var: &'static str) -> Vec<String> {
    env::var(var)
        .map(|v| {
            v.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}
