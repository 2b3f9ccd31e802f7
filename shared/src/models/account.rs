//! Identity-provider Account Model

use serde::{Deserialize, Serialize};

/// Login identity. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Account {
    pub uid: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub disabled: bool,
    pub created_at: i64,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub registration_key: Option<String>,
    pub store: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Consume a password-reset link
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordConfirm {
    pub token: String,
    pub new_password: String,
}

/// Minimum password length accepted at registration/reset
pub const MIN_PASSWORD_LEN: usize = 6;
