use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::{JwtService, ProfileResolver};
use crate::core::{Config, Result};
use crate::db::DbService;
use crate::identity::{IdentityProvider, SqliteIdentityProvider};
use crate::live::ChangeHub;

/// State shared by every handler
///
/// Cheap to clone: everything heavy sits behind an `Arc` or is a pool handle.
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub db: DbService,
    pub jwt: Arc<JwtService>,
    pub identity: Arc<dyn IdentityProvider>,
    pub profiles: ProfileResolver,
    pub hub: ChangeHub,
}

impl ServerState {
    /// Open the database from `config.database_path` and wire everything up
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::new(&config.database_path).await?;
        Ok(Self::with_db(config.clone(), db))
    }

    /// Build state around an already opened database
    pub fn with_db(config: Config, db: DbService) -> Self {
        let identity = SqliteIdentityProvider::new(
            db.pool.clone(),
            config.reset_link_base_url.clone(),
            config.reset_link_ttl_minutes,
        );
        Self {
            jwt: Arc::new(JwtService::with_config(config.jwt.clone())),
            identity: Arc::new(identity),
            profiles: ProfileResolver::new(db.pool.clone()),
            hub: ChangeHub::new(),
            config: Arc::new(config),
            db,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }

    pub fn get_jwt_service(&self) -> &JwtService {
        &self.jwt
    }
}
