use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;

/// Shared per-request state: connection pool, immutable configuration, and a
/// single reqwest client reused across all outbound calls.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            http: reqwest::Client::new(),
        }
    }
}
