//! Shift Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use shared::access::ensure_store_scope;
use shared::error::MessageResponse;
use shared::models::{Shift, ShiftCreate, StaffHours, hours_by_staff};
use shared::{AppError, AppResult, ErrorCode};

use crate::auth::Session;
use crate::core::ServerState;
use crate::db::repository::{employee, shift};
use crate::live::{ChangeKind, keys, snapshot_stream};

pub async fn list(
    State(state): State<ServerState>,
    session: Session,
    Path(store): Path<String>,
) -> AppResult<Json<Vec<Shift>>> {
    ensure_store_scope(session.profile(), &store)?;
    Ok(Json(shift::find_all(state.pool(), &store).await?))
}

/// Hours per staff member over all of the store's shifts
pub async fn totals(
    State(state): State<ServerState>,
    session: Session,
    Path(store): Path<String>,
) -> AppResult<Json<Vec<StaffHours>>> {
    ensure_store_scope(session.profile(), &store)?;
    let shifts = shift::find_all(state.pool(), &store).await?;
    Ok(Json(hours_by_staff(&shifts)))
}

pub async fn stream(
    State(state): State<ServerState>,
    session: Session,
    Path(store): Path<String>,
) -> AppResult<impl IntoResponse> {
    ensure_store_scope(session.profile(), &store)?;

    let rx = state.hub.subscribe(&keys::shifts(&store));
    let pool = state.pool().clone();
    Ok(snapshot_stream(rx, move || {
        let pool = pool.clone();
        let store = store.clone();
        async move { Ok::<_, AppError>(shift::find_all(&pool, &store).await?) }
    }))
}

/// Add a shift. The staff member must be an employee of the same store.
pub async fn create(
    State(state): State<ServerState>,
    session: Session,
    Path(store): Path<String>,
    Json(payload): Json<ShiftCreate>,
) -> AppResult<(StatusCode, Json<Shift>)> {
    ensure_store_scope(session.profile(), &store)?;
    payload.validate()?;

    let staff = employee::find_by_id(state.pool(), &store, payload.staff_id)
        .await?
        .ok_or_else(|| {
            AppError::new(ErrorCode::EmployeeNotFound).with_detail("id", payload.staff_id)
        })?;

    let created = shift::create(state.pool(), &store, &staff.full_name(), payload).await?;
    state
        .hub
        .publish(&keys::shifts(&store), ChangeKind::Created, Some(created.id));

    tracing::info!(id = created.id, store = %store, staff = %created.staff_name, "Shift added");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn delete(
    State(state): State<ServerState>,
    session: Session,
    Path((store, id)): Path<(String, i64)>,
) -> AppResult<Json<MessageResponse>> {
    ensure_store_scope(session.profile(), &store)?;

    if !shift::delete(state.pool(), &store, id).await? {
        return Err(AppError::new(ErrorCode::ShiftNotFound).with_detail("id", id));
    }
    state
        .hub
        .publish(&keys::shifts(&store), ChangeKind::Deleted, Some(id));

    tracing::info!(id, store = %store, "Shift removed");
    Ok(Json(MessageResponse::new("Shift deleted successfully")))
}
