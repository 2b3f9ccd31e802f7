//! Task Handlers
//!
//! Every write publishes to the `tasks` hub key after it is committed;
//! stream subscribers then reload the whole board.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use shared::error::MessageResponse;
use shared::models::{ColumnMove, Task, TaskCreate, TaskUpdate};
use shared::util::now_millis;
use shared::{AppError, AppResult, ErrorCode, TaskBoard, TaskStats};

use crate::auth::Session;
use crate::core::ServerState;
use crate::db::repository::task;
use crate::live::{ChangeKind, keys, snapshot_stream};

fn task_not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::TaskNotFound).with_detail("id", id)
}

/// All tasks in creation order
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Task>>> {
    Ok(Json(task::find_all(state.pool()).await?))
}

/// Tasks partitioned by column
pub async fn board(State(state): State<ServerState>) -> AppResult<Json<TaskBoard>> {
    let tasks = task::find_all(state.pool()).await?;
    Ok(Json(TaskBoard::from_tasks(tasks)))
}

/// SSE: a fresh board snapshot on connect and after every task change
pub async fn stream(State(state): State<ServerState>) -> impl IntoResponse {
    let rx = state.hub.subscribe(keys::TASKS);
    let pool = state.pool().clone();
    snapshot_stream(rx, move || {
        let pool = pool.clone();
        async move {
            let tasks = task::find_all(&pool).await?;
            Ok::<_, AppError>(TaskBoard::from_tasks(tasks))
        }
    })
}

/// Column counts and completions per day
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<TaskStats>> {
    let tasks = task::find_all(state.pool()).await?;
    Ok(Json(TaskStats::from_tasks(&tasks)))
}

pub async fn create(
    State(state): State<ServerState>,
    session: Session,
    Json(payload): Json<TaskCreate>,
) -> AppResult<(StatusCode, Json<Task>)> {
    payload.validate()?;
    let created = task::create(state.pool(), payload, now_millis()).await?;
    state.hub.publish(keys::TASKS, ChangeKind::Created, Some(created.id));

    tracing::info!(id = created.id, by = %session.uid(), "Task created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// Edit form save. The column is only changed through [`move_column`].
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<TaskUpdate>,
) -> AppResult<Json<Task>> {
    payload.validate()?;
    let mut existing = task::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| task_not_found(id))?;

    payload.apply(&mut existing, now_millis());
    task::save(state.pool(), &existing).await?;
    state.hub.publish(keys::TASKS, ChangeKind::Updated, Some(id));
    Ok(Json(existing))
}

/// Drag-and-drop move to another column
pub async fn move_column(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ColumnMove>,
) -> AppResult<Json<Task>> {
    let mut board = TaskBoard::from_tasks(task::find_all(state.pool()).await?);
    let moved = board
        .move_task(id, payload.column, now_millis())
        .cloned()
        .ok_or_else(|| task_not_found(id))?;

    task::save(state.pool(), &moved).await?;
    state.hub.publish(keys::TASKS, ChangeKind::Updated, Some(id));
    Ok(Json(moved))
}

pub async fn delete(
    State(state): State<ServerState>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    if !task::delete(state.pool(), id).await? {
        return Err(task_not_found(id));
    }
    state.hub.publish(keys::TASKS, ChangeKind::Deleted, Some(id));

    tracing::info!(id, by = %session.uid(), "Task deleted");
    Ok(Json(MessageResponse::new("Task deleted successfully")))
}
