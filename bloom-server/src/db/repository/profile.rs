//! Profile Repository
//!
//! Rows are read loosely ([`StoredProfile`]) and normalized by the caller or
//! by [`find_by_uid`] / [`find_all`]. Writes always store the role set in
//! `roles` and clear the legacy `role` column.

use super::{RepoError, RepoResult};
use shared::models::{Identity, Profile, StoredProfile};
use sqlx::SqlitePool;

const COLUMNS: &str = "uid, email, username, roles, role, store, region, notifications, created_at";

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    uid: String,
    email: Option<String>,
    username: Option<String>,
    roles: Option<String>,
    role: Option<String>,
    store: Option<String>,
    region: Option<String>,
    notifications: Option<bool>,
    created_at: Option<i64>,
}

impl ProfileRow {
    fn into_stored(self) -> StoredProfile {
        let (roles, role) = match self.roles.as_deref().map(serde_json::from_str::<Vec<String>>) {
            Some(Ok(list)) => (Some(list), self.role),
            Some(Err(_)) => {
                // Not a JSON array: read it like the legacy `a+b` field
                tracing::warn!(uid = %self.uid, "roles column is not a JSON array");
                let merged = [self.roles, self.role]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>()
                    .join("+");
                (None, Some(merged))
            }
            None => (None, self.role),
        };
        StoredProfile {
            email: self.email,
            username: self.username,
            roles,
            role,
            store: self.store,
            region: self.region,
            notifications: self.notifications,
            created_at: self.created_at,
        }
    }

    fn into_profile(self) -> Profile {
        let identity = Identity::new(self.uid.clone(), self.email.clone().unwrap_or_default());
        self.into_stored().normalize(&identity)
    }
}

/// Raw stored record for `uid`, if any
pub async fn find_stored(pool: &SqlitePool, uid: &str) -> RepoResult<Option<StoredProfile>> {
    let row = sqlx::query_as::<_, ProfileRow>(&format!("SELECT {COLUMNS} FROM users WHERE uid = ?"))
        .bind(uid)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(ProfileRow::into_stored))
}

pub async fn find_by_uid(pool: &SqlitePool, uid: &str) -> RepoResult<Option<Profile>> {
    let row = sqlx::query_as::<_, ProfileRow>(&format!("SELECT {COLUMNS} FROM users WHERE uid = ?"))
        .bind(uid)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(ProfileRow::into_profile))
}

/// Every stored profile, normalized
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Profile>> {
    let rows = sqlx::query_as::<_, ProfileRow>(&format!("SELECT {COLUMNS} FROM users ORDER BY email"))
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(ProfileRow::into_profile).collect())
}

fn roles_json(profile: &Profile) -> RepoResult<String> {
    Ok(serde_json::to_string(&profile.roles)?)
}

/// Insert a new profile; an existing uid is a duplicate
pub async fn create(pool: &SqlitePool, profile: &Profile) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO users (uid, email, username, roles, role, store, region, notifications, created_at) \
         VALUES (?, ?, ?, ?, NULL, ?, ?, ?, ?)",
    )
    .bind(&profile.uid)
    .bind(&profile.email)
    .bind(&profile.username)
    .bind(roles_json(profile)?)
    .bind(&profile.store)
    .bind(&profile.region)
    .bind(profile.notifications)
    .bind(profile.created_at)
    .execute(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => RepoError::Duplicate(format!("Profile {}", profile.uid)),
        other => other,
    })?;
    Ok(())
}

/// Insert or replace the record for `profile.uid`
pub async fn save(pool: &SqlitePool, profile: &Profile) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO users (uid, email, username, roles, role, store, region, notifications, created_at) \
         VALUES (?1, ?2, ?3, ?4, NULL, ?5, ?6, ?7, ?8) \
         ON CONFLICT(uid) DO UPDATE SET email = ?2, username = ?3, roles = ?4, role = NULL, \
         store = ?5, region = ?6, notifications = ?7, \
         created_at = COALESCE(users.created_at, ?8)",
    )
    .bind(&profile.uid)
    .bind(&profile.email)
    .bind(&profile.username)
    .bind(roles_json(profile)?)
    .bind(&profile.store)
    .bind(&profile.region)
    .bind(profile.notifications)
    .bind(profile.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Delete the record; `false` when there was none
pub async fn delete(pool: &SqlitePool, uid: &str) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM users WHERE uid = ?")
        .bind(uid)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
