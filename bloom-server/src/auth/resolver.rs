use shared::AppResult;
use shared::models::{Identity, Profile, resolve_profile};
use sqlx::SqlitePool;

use crate::db::repository::profile;

/// Maps an authenticated identity to its role/store profile.
///
/// Read-only: an identity without a stored record gets the default profile,
/// nothing is written back.
#[derive(Clone)]
pub struct ProfileResolver {
    pool: SqlitePool,
}

impl ProfileResolver {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn resolve(&self, identity: &Identity) -> AppResult<Profile> {
        let stored = profile::find_stored(&self.pool, &identity.uid).await?;
        Ok(resolve_profile(identity, stored))
    }
}
