//! Shared handler state

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::notify::{LogNotifier, WaitlistNotifier};
use crate::utils::AppError;

/// State cloned into every handler; all fields are cheap handles
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
    pub notifier: Arc<dyn WaitlistNotifier>,
}

impl ServerState {
    /// Open the database and build services from configuration
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_path).await?;
        Ok(Self::new(config.clone(), db.pool, Arc::new(LogNotifier)))
    }

    pub fn new(config: Config, pool: SqlitePool, notifier: Arc<dyn WaitlistNotifier>) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config,
            pool,
            jwt_service,
            notifier,
        }
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
