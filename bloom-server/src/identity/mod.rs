//! Identity provider
//!
//! Owns login accounts (email, password hash, disabled flag) and password
//! reset links. Profiles live elsewhere: deleting an account leaves the
//! profile record in place and the other way round.

mod sqlite;

use async_trait::async_trait;
use shared::AppResult;
use shared::models::{Account, Identity};

pub use sqlite::SqliteIdentityProvider;

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account; an existing email is `EmailAlreadyRegistered`
    async fn create_account(&self, email: &str, password: &str) -> AppResult<Identity>;

    /// Check email + password. Disabled accounts are refused.
    async fn verify_credentials(&self, email: &str, password: &str) -> AppResult<Identity>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    async fn find_by_uid(&self, uid: &str) -> AppResult<Option<Account>>;

    /// Remove the account; unknown uid is `AccountNotFound`
    async fn delete_account(&self, uid: &str) -> AppResult<()>;

    async fn set_disabled(&self, uid: &str, disabled: bool) -> AppResult<()>;

    /// Issue a single-use reset link for `email`. The link is returned, not sent.
    async fn generate_reset_link(&self, email: &str) -> AppResult<String>;

    /// Consume a reset token and set the new password
    async fn consume_reset(&self, token: &str, new_password: &str) -> AppResult<()>;
}
