//! Account Action Handlers

use axum::{Json, extract::State};
use serde::Deserialize;
use shared::error::MessageResponse;
use shared::{AppError, AppResult, ErrorCode};

use crate::auth::Session;
use crate::core::ServerState;
use crate::security_log;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeleteUserRequest {
    pub uid: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SetUserDisabledRequest {
    pub uid: Option<String>,
    pub disabled: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResetPasswordRequest {
    pub email: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Delete a login account
pub async fn delete_user(
    State(state): State<ServerState>,
    session: Session,
    Json(req): Json<DeleteUserRequest>,
) -> AppResult<Json<MessageResponse>> {
    let uid = present(req.uid).ok_or_else(|| AppError::required_field("uid"))?;
    state.identity.delete_account(&uid).await?;

    security_log!("INFO", "account_deleted", by = session.uid().to_string(), uid = uid);
    Ok(Json(MessageResponse::new("User deleted successfully")))
}

/// Enable or disable a login account
pub async fn set_user_disabled(
    State(state): State<ServerState>,
    session: Session,
    Json(req): Json<SetUserDisabledRequest>,
) -> AppResult<Json<MessageResponse>> {
    let (Some(uid), Some(disabled)) = (present(req.uid), req.disabled) else {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            "Missing uid or disabled flag",
        ));
    };
    state.identity.set_disabled(&uid, disabled).await?;

    security_log!(
        "INFO",
        "account_disabled_changed",
        by = session.uid().to_string(),
        uid = uid,
        disabled = disabled
    );
    let message = if disabled {
        "User disabled successfully"
    } else {
        "User enabled successfully"
    };
    Ok(Json(MessageResponse::new(message)))
}

/// Generate a password reset link. The link is returned, never emailed.
pub async fn reset_password(
    State(state): State<ServerState>,
    session: Session,
    Json(req): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let email = present(req.email).ok_or_else(|| AppError::required_field("email"))?;
    let link = state.identity.generate_reset_link(&email).await?;

    security_log!(
        "INFO",
        "reset_link_generated",
        by = session.uid().to_string(),
        email = email
    );
    Ok(Json(MessageResponse::with_link("Reset link generated", link)))
}
