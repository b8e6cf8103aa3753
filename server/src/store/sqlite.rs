use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::TodoStore;
use crate::error::StoreError;
use crate::model::{NewTodo, Todo};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    description TEXT NOT NULL,
    completed INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;

const COLUMNS: &str = "id, description, completed, created_at, updated_at";

/// SQLite-backed store holding one `todos` table.
///
/// `rusqlite::Connection` is not `Sync`, so it lives behind a `Mutex`. Every
/// operation is a single statement and holds the lock only for its duration.
/// Those statements run inline on the async worker rather than through
/// `spawn_blocking`: a single-row SQLite statement is short and needs the
/// connection exclusively anyway.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create the database file at `path` and ensure the table exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path.as_ref())?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> Result<T, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(f(&conn)?)
    }
}

fn row_to_todo(row: &Row<'_>) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: row.get(0)?,
        description: row.get(1)?,
        completed: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

#[async_trait]
impl TodoStore for SqliteStore {
    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM todos ORDER BY id"))?;
            let todos = stmt
                .query_map([], row_to_todo)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(todos)
        })
    }

    async fn insert(&self, new: NewTodo) -> Result<Todo, StoreError> {
        let now = Utc::now();
        self.with_conn(|conn| {
            conn.query_row(
                &format!(
                    "INSERT INTO todos (description, completed, created_at, updated_at) \
                     VALUES (?1, ?2, ?3, ?3) RETURNING {COLUMNS}"
                ),
                params![new.description, new.completed, now],
                row_to_todo,
            )
        })
    }

    async fn find(&self, id: i64) -> Result<Option<Todo>, StoreError> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {COLUMNS} FROM todos WHERE id = ?1"),
                params![id],
                row_to_todo,
            )
            .optional()
        })
    }

    async fn save(&self, todo: &Todo) -> Result<Option<Todo>, StoreError> {
        let now = Utc::now();
        self.with_conn(|conn| {
            conn.query_row(
                &format!(
                    "UPDATE todos SET description = ?1, completed = ?2, updated_at = ?3 \
                     WHERE id = ?4 RETURNING {COLUMNS}"
                ),
                params![todo.description, todo.completed, now, todo.id],
                row_to_todo,
            )
            .optional()
        })
    }

    async fn remove(&self, id: i64) -> Result<bool, StoreError> {
        self.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM todos WHERE id = ?1", params![id])?;
            Ok(removed > 0)
        })
    }
}
