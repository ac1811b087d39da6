use anyhow::Result;
use axum::http::StatusCode;
use jsonwebtoken::Algorithm;
use sqlx::postgres::PgPoolOptions;

use balance_sheet_api::config::{
    AppConfig, DatabaseConfig, GoogleConfig, LlmConfig, MarketDataConfig, SecurityConfig,
    ServerConfig,
};
use balance_sheet_api::services::import_service;
use balance_sheet_api::services::market_data::MarketDataClient;
use balance_sheet_api::state::AppState;

fn state_with_market_base(base_url: String) -> AppState {
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
            jwt_secret: "secret".into(),
            jwt_algorithm: Algorithm::HS256,
            token_ttl_minutes: 60,
        },
        google: GoogleConfig {
            client_id: "id".into(),
            client_secret: "secret".into(),
            redirect_uri: "http://localhost/cb".into(),
            scopes: vec!["openid".into()],
            auth_url: "http://localhost/auth".into(),
            token_url: "http://localhost/token".into(),
            userinfo_url: "http://localhost/userinfo".into(),
        },
        market_data: MarketDataConfig { base_url },
        llm: LlmConfig {
            api_url: "http://localhost/chat".into(),
            api_key: "key".into(),
        },
    };
    let pool = PgPoolOptions::new()
        .connect_lazy(&config.database.url)
        .expect("lazy pool");
    AppState::new(pool, config)
}

const SERIES_BODY: &str = r#"{
    "ticker": "AAPL",
    "balance_sheet": [
        {
            "end_date": "2024-09-28",
            "Total Assets": 364980000000.0,
            "Total Debt": 106629000000.0,
            "Cash And Cash Equivalents": 29943000000.0
        },
        {
            "end_date": "2023-09-30",
            "Total Assets": 352583000000.0,
            "Total Debt": null,
            "Net PPE": 43715000000.0,
            "Unmapped Exotic Item": 1.0
        }
    ]
}"#;

#[tokio::test]
async fn fetches_series_and_selects_requested_year() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/balance-sheet/AAPL")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SERIES_BODY)
        .create_async()
        .await;

    let state = state_with_market_base(server.url());
    let fields = import_service::fetch_line_items(&state, "AAPL", 2023).await?;

    // Only the 2023 statement's mapped, non-null figures survive.
    assert_eq!(fields["total_assets"], 352583000000.0);
    assert_eq!(fields["net_ppe"], 43715000000.0);
    assert!(!fields.contains_key("total_debt"));
    assert!(!fields.contains_key("cash_and_cash_equivalents"));
    Ok(())
}

#[tokio::test]
async fn missing_year_is_not_found() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/balance-sheet/AAPL")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SERIES_BODY)
        .create_async()
        .await;

    let state = state_with_market_base(server.url());
    let err = import_service::fetch_line_items(&state, "AAPL", 2019)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn unknown_ticker_is_not_found() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/balance-sheet/NOPE")
        .with_status(404)
        .create_async()
        .await;

    let state = state_with_market_base(server.url());
    let err = import_service::fetch_line_items(&state, "NOPE", 2023)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn upstream_error_is_bad_gateway() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/balance-sheet/AAPL")
        .with_status(500)
        .create_async()
        .await;

    let http = reqwest::Client::new();
    let base = server.url();
    let err = MarketDataClient::new(&http, &base)
        .balance_sheet_series("AAPL")
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    Ok(())
}

#[tokio::test]
async fn empty_series_is_not_found() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/balance-sheet/SHEL")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ticker":"SHEL","balance_sheet":[]}"#)
        .create_async()
        .await;

    let state = state_with_market_base(server.url());
    let err = import_service::fetch_line_items(&state, "SHEL", 2023)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    Ok(())
}
