use crate::auth::Identity;
use crate::config::ServerConfig;
use anyhow::Result;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub identity: Arc<Identity>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create a new app state; fails if the auth settings are unusable
    pub fn new(pool: PgPool, config: ServerConfig) -> Result<Self> {
        let identity = Identity::new(&config.auth)?;
        Ok(Self {
            pool,
            identity: Arc::new(identity),
            config: Arc::new(config),
        })
    }
}
