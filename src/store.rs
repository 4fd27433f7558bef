//! SQLite task repository.
//!
//! `TaskStore` is the only component that touches the database. It is created
//! once at startup with an injected connection and shared for the life of the
//! process. Every operation is a single round trip.
//!
//! The schema is an external contract; the store neither creates nor migrates
//! it. It assumes a `tasks` table shaped like:
//!
//! ```sql
//! CREATE TABLE tasks (
//!     id        INTEGER PRIMARY KEY AUTOINCREMENT,
//!     title     TEXT NOT NULL,
//!     priority  TEXT NOT NULL DEFAULT 'Low',
//!     due_date  TEXT,
//!     completed BOOLEAN NOT NULL DEFAULT 0
//! );
//! ```

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{params, types::Value as SqlValue, Connection};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::task::Task;

/// An opaque failure from the persistence layer.
///
/// The store never interprets database error codes; every failure collapses
/// into this one kind and is terminal for the request.
#[derive(Debug, thiserror::Error)]
#[error("store operation failed")]
pub struct StoreError(#[from] rusqlite::Error);

/// SQLite-backed repository for tasks.
pub struct TaskStore {
    conn: Mutex<Connection>,
}

impl TaskStore {
    /// Wrap an already-open connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Open the database file at `path`.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Ok(Self::new(Connection::open(path)?))
    }

    /// Fetch all tasks in store-native order.
    pub async fn list(&self) -> Result<Vec<Task>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt =
            conn.prepare("SELECT id, title, priority, due_date, completed FROM tasks")?;
        let rows = stmt.query_map([], |row| {
            Ok(Task {
                id: row.get(0)?,
                title: row.get(1)?,
                priority: row.get(2)?,
                due_date: row.get(3)?,
                completed: row.get(4)?,
            })
        })?;

        let mut tasks = Vec::new();
        for task in rows {
            tasks.push(task?);
        }
        Ok(tasks)
    }

    /// Insert one task. The store assigns the id; `completed` takes the
    /// schema default. The created row is not returned.
    pub async fn create(
        &self,
        title: &str,
        priority: &str,
        due_date: Option<NaiveDate>,
    ) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO tasks (title, priority, due_date) VALUES (?1, ?2, ?3)",
            params![title, priority, due_date],
        )?;
        Ok(())
    }

    /// Update every mutable field of the task with the given id.
    ///
    /// A non-matching id is not distinguished from a successful update.
    pub async fn full_update(
        &self,
        id: i64,
        title: &str,
        priority: &str,
        due_date: Option<NaiveDate>,
        completed: bool,
    ) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "UPDATE tasks SET title = ?1, priority = ?2, due_date = ?3, completed = ?4 WHERE id = ?5",
            params![title, priority, due_date, completed, id],
        )?;
        Ok(())
    }

    /// Update only the `completed` column of the task with the given id.
    ///
    /// The value is the raw JSON from the request, stored structurally with
    /// no type check. Same non-matching-id ambiguity as `full_update`.
    pub async fn toggle_completion(&self, id: i64, completed: &Value) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "UPDATE tasks SET completed = ?1 WHERE id = ?2",
            params![raw_to_sql(completed), id],
        )?;
        Ok(())
    }

    /// Remove the task with the given id. Deleting a nonexistent id still
    /// reports success.
    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(())
    }
}

/// Map a raw JSON value onto a SQLite value without validating it.
fn raw_to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => n
            .as_i64()
            .map(SqlValue::Integer)
            .or_else(|| n.as_f64().map(SqlValue::Real))
            .unwrap_or(SqlValue::Null),
        Value::String(s) => SqlValue::Text(s.clone()),
        Value::Null => SqlValue::Null,
        other => SqlValue::Text(other.to_string()),
    }
}
