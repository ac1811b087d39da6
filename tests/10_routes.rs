use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use jsonwebtoken::Algorithm;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use balance_sheet_api::auth::{self, Claims};
use balance_sheet_api::config::{
    AppConfig, DatabaseConfig, GoogleConfig, LlmConfig, MarketDataConfig, SecurityConfig,
    ServerConfig,
};
use balance_sheet_api::routes;
use balance_sheet_api::state::AppState;

/// Router wired to a lazy pool: routes that never touch the database can be
/// exercised without Postgres running.
fn test_app() -> axum::Router {
    let config = AppConfig {
        server: ServerConfig {
            port: 0,
            cors_origins: vec![],
            frontend_url: "http://localhost:5173/dashboard".into(),
        },
        database: DatabaseConfig {
            url: "postgres://postgres@localhost/unused".into(),
            max_connections: 1,
        },
        security: SecurityConfig {
            jwt_secret: "integration-test-secret".into(),
            jwt_algorithm: Algorithm::HS256,
            token_ttl_minutes: 60,
        },
        google: GoogleConfig {
            client_id: "client-123".into(),
            client_secret: "secret".into(),
            redirect_uri: "http://localhost:8000/auth/callback".into(),
            scopes: vec!["openid".into(), "email".into()],
            auth_url: "https://accounts.example.com/consent".into(),
            token_url: "https://accounts.example.com/token".into(),
            userinfo_url: "https://accounts.example.com/userinfo".into(),
        },
        market_data: MarketDataConfig {
            base_url: "http://localhost:9".into(),
        },
        llm: LlmConfig {
            api_url: "http://localhost:9/chat".into(),
            api_key: "key".into(),
        },
    };

    let pool = PgPoolOptions::new()
        .connect_lazy(&config.database.url)
        .expect("lazy pool");

    routes::app(AppState::new(pool, config))
}

async fn body_json(response: axum::response::Response) -> Result<serde_json::Value> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn root_returns_welcome_envelope() -> Result<()> {
    let response = test_app()
        .oneshot(Request::builder().uri("/").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["success"], true);
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("Balance Sheet"));
    Ok(())
}

#[tokio::test]
async fn login_redirects_to_provider_consent_page() -> Result<()> {
    let response = test_app()
        .oneshot(Request::builder().uri("/auth/login").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    let location = response.headers()["location"].to_str()?;
    assert!(location.starts_with("https://accounts.example.com/consent?"));
    assert!(location.contains("client_id=client-123"));
    assert!(location.contains("response_type=code"));
    Ok(())
}

#[tokio::test]
async fn logout_acknowledges_statelessly() -> Result<()> {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/logout")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["success"], true);
    Ok(())
}

#[tokio::test]
async fn me_without_token_is_unauthorized() -> Result<()> {
    let response = test_app()
        .oneshot(Request::builder().uri("/auth/me").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await?;
    assert_eq!(body["code"], "UNAUTHORIZED");
    Ok(())
}

#[tokio::test]
async fn expired_token_is_authentication_failure_not_authorization() -> Result<()> {
    let security = SecurityConfig {
        jwt_secret: "integration-test-secret".into(),
        jwt_algorithm: Algorithm::HS256,
        token_ttl_minutes: 60,
    };
    // Issued 61 minutes ago with a 60 minute lifetime.
    let now = Utc::now();
    let claims = Claims {
        sub: "admin@example.com".into(),
        role: "admin".into(),
        iat: (now - Duration::minutes(61)).timestamp(),
        exp: (now - Duration::minutes(1)).timestamp(),
    };
    let token = auth::issue_token(&security, &claims).unwrap();

    let response = test_app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/balance-sheet/AAPL/2023")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())?,
        )
        .await?;

    // 401, never 403: the gate distinguishes failed authentication from an
    // authenticated caller lacking the role.
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await?;
    assert_eq!(body["code"], "UNAUTHORIZED");
    assert_eq!(body["error"], "Token has expired");
    Ok(())
}

#[tokio::test]
async fn gated_write_without_token_is_unauthorized() -> Result<()> {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/balance-sheet/AAPL/2023")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
