//! Task Repository

use super::{RepoError, RepoResult};
use shared::models::{Task, TaskColumn, TaskCreate, TaskPriority, TaskSchedule};
use shared::util::snowflake_id;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, title, description, status, priority, store, assignee, \
                       due_date, start_date, end_date, created_at, updated_at, completed_at";

#[derive(Debug, sqlx::FromRow)]
struct TaskRow {
    id: i64,
    title: String,
    description: String,
    status: String,
    priority: String,
    store: Option<String>,
    assignee: Option<String>,
    due_date: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    created_at: i64,
    updated_at: i64,
    completed_at: Option<i64>,
}

impl TryFrom<TaskRow> for Task {
    type Error = RepoError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let column: TaskColumn = row
            .status
            .parse()
            .map_err(|_| RepoError::Database(format!("Task {} has bad status {}", row.id, row.status)))?;
        let priority: TaskPriority = row.priority.parse().map_err(|_| {
            RepoError::Database(format!("Task {} has bad priority {}", row.id, row.priority))
        })?;
        Ok(Task {
            id: row.id,
            title: row.title,
            description: row.description,
            column,
            priority,
            store: row.store,
            assignee: row.assignee,
            schedule: TaskSchedule::from_columns(row.due_date, row.start_date, row.end_date),
            created_at: row.created_at,
            updated_at: row.updated_at,
            completed_at: row.completed_at,
        })
    }
}

/// All tasks in creation order
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Task>> {
    let rows = sqlx::query_as::<_, TaskRow>(&format!(
        "SELECT {COLUMNS} FROM tasks ORDER BY created_at, id"
    ))
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(Task::try_from).collect()
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Task>> {
    let row = sqlx::query_as::<_, TaskRow>(&format!("SELECT {COLUMNS} FROM tasks WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(Task::try_from).transpose()
}

/// Insert a new task in the `todo` column
pub async fn create(pool: &SqlitePool, data: TaskCreate, now: i64) -> RepoResult<Task> {
    let task = Task {
        id: snowflake_id(),
        title: data.title.trim().to_string(),
        description: data.description,
        column: TaskColumn::default(),
        priority: data.priority,
        store: data.store.filter(|s| !s.is_empty()),
        assignee: data.assignee.filter(|a| !a.is_empty()),
        schedule: data.schedule,
        created_at: now,
        updated_at: now,
        completed_at: None,
    };
    let (due_date, start_date, end_date) = task.schedule.to_columns();
    sqlx::query(&format!(
        "INSERT INTO tasks ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
    ))
    .bind(task.id)
    .bind(&task.title)
    .bind(&task.description)
    .bind(task.column.as_str())
    .bind(task.priority.as_str())
    .bind(&task.store)
    .bind(&task.assignee)
    .bind(due_date)
    .bind(start_date)
    .bind(end_date)
    .bind(task.created_at)
    .bind(task.updated_at)
    .bind(task.completed_at)
    .execute(pool)
    .await?;
    Ok(task)
}

/// Write every mutable field of `task` back
pub async fn save(pool: &SqlitePool, task: &Task) -> RepoResult<()> {
    let (due_date, start_date, end_date) = task.schedule.to_columns();
    let rows = sqlx::query(
        "UPDATE tasks SET title = ?, description = ?, status = ?, priority = ?, store = ?, \
         assignee = ?, due_date = ?, start_date = ?, end_date = ?, updated_at = ?, \
         completed_at = ? WHERE id = ?",
    )
    .bind(&task.title)
    .bind(&task.description)
    .bind(task.column.as_str())
    .bind(task.priority.as_str())
    .bind(&task.store)
    .bind(&task.assignee)
    .bind(due_date)
    .bind(start_date)
    .bind(end_date)
    .bind(task.updated_at)
    .bind(task.completed_at)
    .bind(task.id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Task {}", task.id)));
    }
    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM tasks WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    fn create_payload(title: &str, schedule: TaskSchedule) -> TaskCreate {
        TaskCreate {
            title: title.into(),
            description: String::new(),
            priority: TaskPriority::High,
            store: Some("Mitte".into()),
            assignee: Some(String::new()),
            schedule,
        }
    }

    #[tokio::test]
    async fn test_create_and_reload_schedule() {
        let pool = DbService::in_memory().await.unwrap().pool;
        let schedule = TaskSchedule::Range {
            start_date: "2025-03-01".into(),
            end_date: "2025-03-04".into(),
        };
        let created = create(&pool, create_payload("  Restock cups ", schedule.clone()), 10)
            .await
            .unwrap();
        assert_eq!(created.title, "Restock cups");
        assert_eq!(created.column, TaskColumn::Todo);
        assert_eq!(created.assignee, None);

        let loaded = find_by_id(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(loaded, created);
        assert_eq!(loaded.schedule, schedule);
    }

    #[tokio::test]
    async fn test_save_moves_column() {
        let pool = DbService::in_memory().await.unwrap().pool;
        let mut task = create(&pool, create_payload("Clean grinder", TaskSchedule::None), 10)
            .await
            .unwrap();
        task.move_to(TaskColumn::Done, 20);
        save(&pool, &task).await.unwrap();

        let all = find_all(&pool).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].column, TaskColumn::Done);
        assert_eq!(all[0].completed_at, Some(20));

        assert!(delete(&pool, task.id).await.unwrap());
        assert!(matches!(save(&pool, &task).await, Err(RepoError::NotFound(_))));
    }
}
