//! User Management Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use shared::directory::{Page, UserQuery};
use shared::error::MessageResponse;
use shared::models::{Identity, Profile, ProfileUpsert};
use shared::util::now_millis;
use shared::{AppError, AppResult, ErrorCode};

use crate::auth::Session;
use crate::core::ServerState;
use crate::db::repository::{RepoError, profile};
use crate::security_log;

fn profile_not_found(uid: &str) -> AppError {
    AppError::new(ErrorCode::ProfileNotFound).with_detail("uid", uid)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// List profiles
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<UserQuery>,
) -> AppResult<Json<Page<Profile>>> {
    let profiles = profile::find_all(state.pool()).await?;
    Ok(Json(query.apply(profiles)))
}

/// Create the profile record for an existing account
pub async fn create(
    State(state): State<ServerState>,
    session: Session,
    Json(payload): Json<ProfileUpsert>,
) -> AppResult<(StatusCode, Json<Profile>)> {
    let email = non_blank(payload.email.clone()).ok_or_else(|| AppError::required_field("email"))?;
    let account = state
        .identity
        .find_by_email(&email)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::AccountNotFound).with_detail("email", email))?;

    let mut created = Profile::default_for(&Identity::new(account.uid, account.email));
    let role_set = payload.role_set();
    if !role_set.is_empty() {
        created.roles = role_set;
    }
    created.store = non_blank(payload.store);
    created.region = non_blank(payload.region);
    created.created_at = Some(now_millis());

    profile::create(state.pool(), &created).await.map_err(|e| match e {
        RepoError::Duplicate(_) => AppError::already_exists(format!("Profile {}", created.uid)),
        other => other.into(),
    })?;

    security_log!(
        "INFO",
        "profile_created",
        by = session.uid().to_string(),
        uid = created.uid.clone(),
        roles = format!("{:?}", created.roles)
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a profile record. Absent fields are left as they are.
pub async fn update(
    State(state): State<ServerState>,
    session: Session,
    Path(uid): Path<String>,
    Json(payload): Json<ProfileUpsert>,
) -> AppResult<Json<Profile>> {
    let mut updated = profile::find_by_uid(state.pool(), &uid)
        .await?
        .ok_or_else(|| profile_not_found(&uid))?;

    if let Some(email) = non_blank(payload.email.clone()) {
        updated.email = email;
    }
    let role_set = payload.role_set();
    if !role_set.is_empty() {
        updated.roles = role_set;
    }
    if payload.store.is_some() {
        updated.store = non_blank(payload.store);
    }
    if payload.region.is_some() {
        updated.region = non_blank(payload.region);
    }

    profile::save(state.pool(), &updated).await?;

    security_log!(
        "INFO",
        "profile_updated",
        by = session.uid().to_string(),
        uid = uid,
        roles = format!("{:?}", updated.roles)
    );
    Ok(Json(updated))
}

/// Delete a profile record. The login account is left alone.
pub async fn delete(
    State(state): State<ServerState>,
    session: Session,
    Path(uid): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    if !profile::delete(state.pool(), &uid).await? {
        return Err(profile_not_found(&uid));
    }
    security_log!("INFO", "profile_deleted", by = session.uid().to_string(), uid = uid);
    Ok(Json(MessageResponse::new("Profile deleted successfully")))
}
