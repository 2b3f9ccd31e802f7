//! Authentication Handlers

use std::collections::BTreeSet;

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use shared::error::MessageResponse;
use shared::models::{
    Identity, LoginRequest, Profile, RegisterRequest, ResetPasswordConfirm, roles,
};
use shared::util::now_millis;
use shared::{AppError, AppResult, ErrorCode};

use crate::core::ServerState;
use crate::db::repository::profile;
use crate::security_log;

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub profile: Profile,
}

fn issue_token(state: &ServerState, identity: &Identity) -> AppResult<String> {
    state
        .get_jwt_service()
        .generate_token(identity)
        .map_err(|e| AppError::internal(format!("Failed to issue token: {e}")))
}

/// Roles granted at registration: from the key when one is given, else the default role
fn registration_roles(state: &ServerState, key: Option<&str>) -> AppResult<BTreeSet<String>> {
    match key.map(str::trim).filter(|k| !k.is_empty()) {
        Some(key) => state
            .config
            .roles_for_key(key)
            .cloned()
            .ok_or_else(|| AppError::new(ErrorCode::RegistrationKeyInvalid)),
        None => Ok(BTreeSet::from([roles::DEFAULT.to_string()])),
    }
}

/// Register a new account and its profile
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<LoginResponse>)> {
    if req.email.trim().is_empty() {
        return Err(AppError::required_field("email"));
    }
    let role_set = registration_roles(&state, req.registration_key.as_deref())?;

    let identity = state.identity.create_account(&req.email, &req.password).await?;

    let mut new_profile = Profile::default_for(&identity);
    new_profile.roles = role_set;
    new_profile.store = req.store.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
    new_profile.created_at = Some(now_millis());
    if let Err(e) = profile::save(state.pool(), &new_profile).await {
        // No account without a profile
        if let Err(rollback) = state.identity.delete_account(&identity.uid).await {
            tracing::warn!(
                uid = %identity.uid,
                error = %rollback,
                "Failed to remove account after profile save failed"
            );
        }
        return Err(e.into());
    }

    security_log!(
        "INFO",
        "account_registered",
        uid = identity.uid.clone(),
        roles = format!("{:?}", new_profile.roles)
    );

    let token = issue_token(&state, &identity)?;
    Ok((
        StatusCode::CREATED,
        Json(LoginResponse {
            token,
            profile: new_profile,
        }),
    ))
}

/// Login with email + password
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let identity = match state.identity.verify_credentials(&req.email, &req.password).await {
        Ok(identity) => identity,
        Err(e) => {
            security_log!(
                "WARN",
                "login_failed",
                email = req.email.clone(),
                reason = e.code.to_string()
            );
            return Err(e);
        }
    };

    let profile = state.profiles.resolve(&identity).await?;
    let token = issue_token(&state, &identity)?;
    tracing::info!(uid = %identity.uid, "Login succeeded");

    Ok(Json(LoginResponse { token, profile }))
}

/// Set a new password through a reset link token
pub async fn reset(
    State(state): State<ServerState>,
    Json(req): Json<ResetPasswordConfirm>,
) -> AppResult<Json<MessageResponse>> {
    if req.token.trim().is_empty() {
        return Err(AppError::required_field("token"));
    }
    state
        .identity
        .consume_reset(req.token.trim(), &req.new_password)
        .await?;
    Ok(Json(MessageResponse::new("Password updated successfully")))
}
