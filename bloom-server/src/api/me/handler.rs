//! Session Handlers

use std::collections::BTreeSet;

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use shared::access::{AccessDecision, SessionState, evaluate, parse_role_list};
use shared::models::{Profile, SettingsUpdate};
use shared::util::now_millis;
use shared::AppResult;

use crate::auth::Session;
use crate::core::ServerState;
use crate::db::repository::profile;

pub async fn me(session: Session) -> Json<Profile> {
    Json(session.into_profile())
}

/// Update the caller's own settings. Creates the profile record on first save.
pub async fn update_settings(
    State(state): State<ServerState>,
    session: Session,
    Json(payload): Json<SettingsUpdate>,
) -> AppResult<Json<Profile>> {
    let mut updated = session.into_profile();
    if let Some(store) = payload.store {
        let store = store.trim();
        updated.store = (!store.is_empty()).then(|| store.to_string());
    }
    if let Some(notifications) = payload.notifications {
        updated.notifications = notifications;
    }
    updated.created_at.get_or_insert_with(now_millis);

    profile::save(state.pool(), &updated).await?;
    tracing::info!(uid = %updated.uid, "Settings updated");
    Ok(Json(updated))
}

#[derive(Debug, Deserialize)]
pub struct AccessQuery {
    #[serde(default)]
    pub roles: String,
}

#[derive(Debug, Serialize)]
pub struct AccessResponse {
    pub decision: AccessDecision,
    pub required: BTreeSet<String>,
}

/// Evaluate the access policy for the current session
pub async fn access(session: Session, Query(query): Query<AccessQuery>) -> Json<AccessResponse> {
    let required = parse_role_list(&query.roles);
    let required_list: Vec<&str> = required.iter().map(String::as_str).collect();
    let decision = evaluate(&SessionState::SignedIn(session.into_profile()), &required_list);
    Json(AccessResponse { decision, required })
}
