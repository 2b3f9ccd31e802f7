//! Employee Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use shared::access::ensure_store_scope;
use shared::error::MessageResponse;
use shared::models::{Employee, EmployeeCreate};
use shared::{AppError, AppResult, ErrorCode};

use crate::auth::Session;
use crate::core::ServerState;
use crate::db::repository::employee;
use crate::live::{ChangeKind, keys, snapshot_stream};

pub async fn list(
    State(state): State<ServerState>,
    session: Session,
    Path(store): Path<String>,
) -> AppResult<Json<Vec<Employee>>> {
    ensure_store_scope(session.profile(), &store)?;
    Ok(Json(employee::find_all(state.pool(), &store).await?))
}

/// SSE: the store's employee list on connect and after every change
pub async fn stream(
    State(state): State<ServerState>,
    session: Session,
    Path(store): Path<String>,
) -> AppResult<impl IntoResponse> {
    ensure_store_scope(session.profile(), &store)?;

    let rx = state.hub.subscribe(&keys::employees(&store));
    let pool = state.pool().clone();
    Ok(snapshot_stream(rx, move || {
        let pool = pool.clone();
        let store = store.clone();
        async move { Ok::<_, AppError>(employee::find_all(&pool, &store).await?) }
    }))
}

pub async fn create(
    State(state): State<ServerState>,
    session: Session,
    Path(store): Path<String>,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    ensure_store_scope(session.profile(), &store)?;
    payload.validate()?;

    let created = employee::create(state.pool(), &store, payload).await?;
    state
        .hub
        .publish(&keys::employees(&store), ChangeKind::Created, Some(created.id));

    tracing::info!(id = created.id, store = %store, by = %session.uid(), "Employee added");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn delete(
    State(state): State<ServerState>,
    session: Session,
    Path((store, id)): Path<(String, i64)>,
) -> AppResult<Json<MessageResponse>> {
    ensure_store_scope(session.profile(), &store)?;

    if !employee::delete(state.pool(), &store, id).await? {
        return Err(AppError::new(ErrorCode::EmployeeNotFound).with_detail("id", id));
    }
    state
        .hub
        .publish(&keys::employees(&store), ChangeKind::Deleted, Some(id));

    tracing::info!(id, store = %store, by = %session.uid(), "Employee removed");
    Ok(Json(MessageResponse::new("Employee deleted successfully")))
}
