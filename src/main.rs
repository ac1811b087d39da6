use balance_sheet_api::config::AppConfig;
use balance_sheet_api::services::role_service;
use balance_sheet_api::state::AppState;
use balance_sheet_api::{database, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Fail fast on missing configuration before touching the network.
    let config = AppConfig::from_env()?;

    let pool = database::create_pool(&config.database).await?;
    database::run_migrations(&pool).await?;

    // Fold the bootstrap admin table into users.role; from here on the users
    // table is the single authority for admin status.
    let synced = role_service::sync_admin_records(&pool).await?;
    tracing::info!("Synced {} admin record(s) into users", synced);

    let port = config.server.port;
    let state = AppState::new(pool, config);
    let app = routes::app(state);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Balance sheet API listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
