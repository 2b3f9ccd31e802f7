use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use async_trait::async_trait;
use chrono::Duration;
use shared::models::{Account, Identity, MIN_PASSWORD_LEN};
use shared::util::now_millis;
use shared::{AppError, AppResult, ErrorCode};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::IdentityProvider;
use crate::db::repository::{RepoError, account};

/// Accounts and reset tokens in the server's own SQLite database
#[derive(Clone)]
pub struct SqliteIdentityProvider {
    pool: SqlitePool,
    reset_link_base_url: String,
    reset_ttl: Duration,
}

impl SqliteIdentityProvider {
    pub fn new(pool: SqlitePool, reset_link_base_url: String, reset_ttl_minutes: i64) -> Self {
        Self {
            pool,
            reset_link_base_url,
            reset_ttl: Duration::minutes(reset_ttl_minutes),
        }
    }

    fn reset_link(&self, token: &str) -> String {
        let separator = if self.reset_link_base_url.contains('?') { '&' } else { '?' };
        format!("{}{separator}token={token}", self.reset_link_base_url)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn check_password(password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::with_message(
            ErrorCode::PasswordTooShort,
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    Ok(())
}

fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
}

fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

fn account_not_found(uid: &str) -> AppError {
    AppError::new(ErrorCode::AccountNotFound).with_detail("uid", uid)
}

#[async_trait]
impl IdentityProvider for SqliteIdentityProvider {
    async fn create_account(&self, email: &str, password: &str) -> AppResult<Identity> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(AppError::required_field("email"));
        }
        check_password(password)?;

        let account = Account {
            uid: Uuid::new_v4().to_string(),
            email,
            password_hash: hash_password(password)?,
            disabled: false,
            created_at: now_millis(),
        };
        account::create(&self.pool, &account)
            .await
            .map_err(|e| match e {
                RepoError::Duplicate(_) => AppError::new(ErrorCode::EmailAlreadyRegistered),
                other => other.into(),
            })?;

        tracing::info!(uid = %account.uid, "Account created");
        Ok(Identity::new(account.uid, account.email))
    }

    async fn verify_credentials(&self, email: &str, password: &str) -> AppResult<Identity> {
        let account = account::find_by_email(&self.pool, &normalize_email(email))
            .await?
            .filter(|a| verify_password(password, &a.password_hash))
            .ok_or_else(AppError::invalid_credentials)?;

        if account.disabled {
            return Err(AppError::new(ErrorCode::AccountDisabled));
        }
        Ok(Identity::new(account.uid, account.email))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        Ok(account::find_by_email(&self.pool, &normalize_email(email)).await?)
    }

    async fn find_by_uid(&self, uid: &str) -> AppResult<Option<Account>> {
        Ok(account::find_by_uid(&self.pool, uid).await?)
    }

    async fn delete_account(&self, uid: &str) -> AppResult<()> {
        account::delete(&self.pool, uid).await.map_err(|e| match e {
            RepoError::NotFound(_) => account_not_found(uid),
            other => other.into(),
        })
    }

    async fn set_disabled(&self, uid: &str, disabled: bool) -> AppResult<()> {
        account::set_disabled(&self.pool, uid, disabled)
            .await
            .map_err(|e| match e {
                RepoError::NotFound(_) => account_not_found(uid),
                other => other.into(),
            })
    }

    async fn generate_reset_link(&self, email: &str) -> AppResult<String> {
        let account = account::find_by_email(&self.pool, &normalize_email(email))
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::AccountNotFound).with_detail("email", email))?;

        let token = Uuid::new_v4().simple().to_string();
        let expires_at = now_millis() + self.reset_ttl.num_milliseconds();
        account::create_reset(&self.pool, &token, &account.uid, expires_at).await?;

        Ok(self.reset_link(&token))
    }

    async fn consume_reset(&self, token: &str, new_password: &str) -> AppResult<()> {
        check_password(new_password)?;

        let expired = || AppError::new(ErrorCode::ResetLinkExpired);
        let reset = account::find_reset(&self.pool, token)
            .await?
            .filter(|r| !r.used && r.expires_at > now_millis())
            .ok_or_else(expired)?;

        // Lost the race against a concurrent use of the same link
        if !account::mark_reset_used(&self.pool, token).await? {
            return Err(expired());
        }

        let hash = hash_password(new_password)?;
        account::update_password(&self.pool, &reset.uid, &hash).await?;
        tracing::info!(uid = %reset.uid, "Password reset via link");
        Ok(())
    }
}
