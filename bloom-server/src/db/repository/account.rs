//! Account Repository (identity provider storage)

use super::{RepoError, RepoResult};
use shared::models::Account;
use sqlx::SqlitePool;

const COLUMNS: &str = "uid, email, password_hash, disabled, created_at";

pub async fn find_by_uid(pool: &SqlitePool, uid: &str) -> RepoResult<Option<Account>> {
    let account =
        sqlx::query_as::<_, Account>(&format!("SELECT {COLUMNS} FROM accounts WHERE uid = ?"))
            .bind(uid)
            .fetch_optional(pool)
            .await?;
    Ok(account)
}

/// Case-insensitive lookup
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<Account>> {
    let account =
        sqlx::query_as::<_, Account>(&format!("SELECT {COLUMNS} FROM accounts WHERE email = ?"))
            .bind(email.trim())
            .fetch_optional(pool)
            .await?;
    Ok(account)
}

pub async fn create(pool: &SqlitePool, account: &Account) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO accounts (uid, email, password_hash, disabled, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&account.uid)
    .bind(&account.email)
    .bind(&account.password_hash)
    .bind(account.disabled)
    .bind(account.created_at)
    .execute(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => RepoError::Duplicate(format!("Account {}", account.email)),
        other => other,
    })?;
    Ok(())
}

pub async fn set_disabled(pool: &SqlitePool, uid: &str, disabled: bool) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE accounts SET disabled = ? WHERE uid = ?")
        .bind(disabled)
        .bind(uid)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Account {uid}")));
    }
    Ok(())
}

pub async fn update_password(pool: &SqlitePool, uid: &str, password_hash: &str) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE accounts SET password_hash = ? WHERE uid = ?")
        .bind(password_hash)
        .bind(uid)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Account {uid}")));
    }
    Ok(())
}

/// Delete the account (pending reset tokens cascade). Profiles are untouched.
pub async fn delete(pool: &SqlitePool, uid: &str) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM accounts WHERE uid = ?")
        .bind(uid)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Account {uid}")));
    }
    Ok(())
}

// ==================== Password reset tokens ====================

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PasswordReset {
    pub token: String,
    pub uid: String,
    pub expires_at: i64,
    pub used: bool,
}

pub async fn create_reset(
    pool: &SqlitePool,
    token: &str,
    uid: &str,
    expires_at: i64,
) -> RepoResult<()> {
    sqlx::query("INSERT INTO password_resets (token, uid, expires_at, used) VALUES (?, ?, ?, 0)")
        .bind(token)
        .bind(uid)
        .bind(expires_at)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn find_reset(pool: &SqlitePool, token: &str) -> RepoResult<Option<PasswordReset>> {
    let reset = sqlx::query_as::<_, PasswordReset>(
        "SELECT token, uid, expires_at, used FROM password_resets WHERE token = ?",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;
    Ok(reset)
}

/// Mark a token used; `false` if it was already used (or unknown)
pub async fn mark_reset_used(pool: &SqlitePool, token: &str) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE password_resets SET used = 1 WHERE token = ? AND used = 0")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
