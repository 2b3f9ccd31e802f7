//! Kanban board projection
//!
//! The board never owns tasks. It is rebuilt from the full task list every
//! time the collection changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Task, TaskColumn};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskBoard {
    pub todo: Vec<Task>,
    pub doing: Vec<Task>,
    pub done: Vec<Task>,
}

impl TaskBoard {
    /// Partition by column, keeping input order within each column
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut board = Self::default();
        for task in tasks {
            board.bucket_mut(task.column).push(task);
        }
        board
    }

    pub fn column(&self, column: TaskColumn) -> &[Task] {
        match column {
            TaskColumn::Todo => &self.todo,
            TaskColumn::Doing => &self.doing,
            TaskColumn::Done => &self.done,
        }
    }

    fn bucket_mut(&mut self, column: TaskColumn) -> &mut Vec<Task> {
        match column {
            TaskColumn::Todo => &mut self.todo,
            TaskColumn::Doing => &mut self.doing,
            TaskColumn::Done => &mut self.done,
        }
    }

    pub fn find(&self, id: i64) -> Option<&Task> {
        self.iter().find(|t| t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.todo.iter().chain(&self.doing).chain(&self.done)
    }

    pub fn len(&self) -> usize {
        self.todo.len() + self.doing.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Move a task to `column` (appended at the end). Returns the moved task.
    pub fn move_task(&mut self, id: i64, column: TaskColumn, now: i64) -> Option<&Task> {
        let mut task = self.take(id)?;
        task.move_to(column, now);
        let bucket = self.bucket_mut(column);
        bucket.push(task);
        bucket.last()
    }

    /// Drop a task from the board
    pub fn remove(&mut self, id: i64) -> Option<Task> {
        self.take(id)
    }

    fn take(&mut self, id: i64) -> Option<Task> {
        for column in TaskColumn::ALL {
            let bucket = self.bucket_mut(column);
            if let Some(pos) = bucket.iter().position(|t| t.id == id) {
                return Some(bucket.remove(pos));
            }
        }
        None
    }

    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(self.iter())
    }
}

/// Head-office task statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStats {
    pub todo: usize,
    pub doing: usize,
    pub done: usize,
    /// Completions per UTC day (`YYYY-MM-DD`)
    pub completed_per_day: BTreeMap<String, usize>,
}

impl TaskStats {
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut stats = Self::default();
        for task in tasks {
            match task.column {
                TaskColumn::Todo => stats.todo += 1,
                TaskColumn::Doing => stats.doing += 1,
                TaskColumn::Done => stats.done += 1,
            }
            let day = task
                .completed_at
                .and_then(DateTime::<Utc>::from_timestamp_millis)
                .map(|at| at.format("%Y-%m-%d").to_string());
            if let Some(day) = day {
                *stats.completed_per_day.entry(day).or_default() += 1;
            }
        }
        stats
    }
}
