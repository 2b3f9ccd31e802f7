//! Kanban Task Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, ErrorCode};
use crate::util::parse_date;

/// Board column (status bucket)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskColumn {
    #[default]
    Todo,
    Doing,
    Done,
}

impl TaskColumn {
    pub const ALL: [TaskColumn; 3] = [TaskColumn::Todo, TaskColumn::Doing, TaskColumn::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskColumn::Todo => "todo",
            TaskColumn::Doing => "doing",
            TaskColumn::Done => "done",
        }
    }
}

impl fmt::Display for TaskColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskColumn {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(TaskColumn::Todo),
            "doing" => Ok(TaskColumn::Doing),
            "done" => Ok(TaskColumn::Done),
            other => Err(AppError::with_message(
                ErrorCode::InvalidFormat,
                format!("Unknown column: {other}"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

impl FromStr for TaskPriority {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            other => Err(AppError::with_message(
                ErrorCode::InvalidFormat,
                format!("Unknown priority: {other}"),
            )),
        }
    }
}

/// Date scheduling: a single due date or a start/end range, never both
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum TaskSchedule {
    #[default]
    None,
    Due {
        due_date: String,
    },
    Range {
        start_date: String,
        end_date: String,
    },
}

impl TaskSchedule {
    /// Rebuild from the three nullable storage columns
    pub fn from_columns(
        due_date: Option<String>,
        start_date: Option<String>,
        end_date: Option<String>,
    ) -> Self {
        match (due_date, start_date, end_date) {
            (Some(due_date), _, _) => TaskSchedule::Due { due_date },
            (None, Some(start_date), Some(end_date)) => TaskSchedule::Range {
                start_date,
                end_date,
            },
            _ => TaskSchedule::None,
        }
    }

    /// `(due_date, start_date, end_date)` for storage
    pub fn to_columns(&self) -> (Option<&str>, Option<&str>, Option<&str>) {
        match self {
            TaskSchedule::None => (None, None, None),
            TaskSchedule::Due { due_date } => (Some(due_date), None, None),
            TaskSchedule::Range {
                start_date,
                end_date,
            } => (None, Some(start_date), Some(end_date)),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let invalid = |msg: String| AppError::with_message(ErrorCode::TaskScheduleInvalid, msg);
        match self {
            TaskSchedule::None => Ok(()),
            TaskSchedule::Due { due_date } => parse_date(due_date)
                .map(|_| ())
                .ok_or_else(|| invalid(format!("Invalid due date: {due_date}"))),
            TaskSchedule::Range {
                start_date,
                end_date,
            } => {
                let start = parse_date(start_date)
                    .ok_or_else(|| invalid(format!("Invalid start date: {start_date}")))?;
                let end = parse_date(end_date)
                    .ok_or_else(|| invalid(format!("Invalid end date: {end_date}")))?;
                if end < start {
                    return Err(invalid("End date is before start date".into()));
                }
                Ok(())
            }
        }
    }
}

/// Kanban task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub column: TaskColumn,
    pub priority: TaskPriority,
    pub store: Option<String>,
    pub assignee: Option<String>,
    #[serde(default)]
    pub schedule: TaskSchedule,
    pub created_at: i64,
    pub updated_at: i64,
    /// Set while the task sits in `done`
    pub completed_at: Option<i64>,
}

impl Task {
    /// Move to `column`, touching only the column and its bookkeeping timestamps
    pub fn move_to(&mut self, column: TaskColumn, now: i64) {
        if self.column == column {
            return;
        }
        self.completed_at = match column {
            TaskColumn::Done => Some(now),
            _ => None,
        };
        self.column = column;
        self.updated_at = now;
    }
}

/// Create task payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCreate {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: TaskPriority,
    pub store: Option<String>,
    pub assignee: Option<String>,
    #[serde(default)]
    pub schedule: TaskSchedule,
}

impl TaskCreate {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::new(ErrorCode::TaskTitleRequired));
        }
        self.schedule.validate()
    }
}

/// Update task payload (edit form). The column is moved separately.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub store: Option<String>,
    pub assignee: Option<String>,
    pub schedule: Option<TaskSchedule>,
}

impl TaskUpdate {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(AppError::new(ErrorCode::TaskTitleRequired));
        }
        match &self.schedule {
            Some(schedule) => schedule.validate(),
            None => Ok(()),
        }
    }

    pub fn apply(self, task: &mut Task, now: i64) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(store) = self.store {
            task.store = Some(store).filter(|s| !s.is_empty());
        }
        if let Some(assignee) = self.assignee {
            task.assignee = Some(assignee).filter(|a| !a.is_empty());
        }
        if let Some(schedule) = self.schedule {
            task.schedule = schedule;
        }
        task.updated_at = now;
    }
}

/// Column move payload (drag-and-drop)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ColumnMove {
    pub column: TaskColumn,
}
