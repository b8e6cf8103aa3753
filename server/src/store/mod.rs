//! Durable state for todo records.
//!
//! # Design
//! `TodoStore` exposes single-statement primitives only. The service composes
//! them (lookup then save for toggle and update), so a read-modify-write is
//! two independent store calls with no isolation between them.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::{NewTodo, Todo};

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All records in ascending id order.
    async fn list(&self) -> Result<Vec<Todo>, StoreError>;

    /// Persist a new record. The store assigns a fresh id and timestamps.
    async fn insert(&self, new: NewTodo) -> Result<Todo, StoreError>;

    async fn find(&self, id: i64) -> Result<Option<Todo>, StoreError>;

    /// Overwrite `description` and `completed` of an existing record and
    /// refresh `updated_at`. Returns `None` if the record no longer exists.
    async fn save(&self, todo: &Todo) -> Result<Option<Todo>, StoreError>;

    /// Returns whether a record was removed.
    async fn remove(&self, id: i64) -> Result<bool, StoreError>;
}
