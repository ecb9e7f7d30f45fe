pub mod config;
pub mod db;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use sqlx::PgPool;

use db::DashboardStore;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Read-side store behind the admin dashboard.
    pub store: Arc<dyn DashboardStore>,
    pub config: config::AppConfig,
}

impl AppState {
    /// State whose dashboard reads go to the same Postgres pool.
    pub fn new(db: PgPool, config: config::AppConfig) -> Self {
        Self {
            store: Arc::new(db::PgStore::new(db.clone())),
            db,
            config,
        }
    }
}
