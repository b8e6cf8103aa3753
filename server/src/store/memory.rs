use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::TodoStore;
use crate::error::StoreError;
use crate::model::{NewTodo, Todo};

/// Non-durable store backed by an ordered map. Ids start at 1 and are never
/// reused, matching an auto-increment primary key.
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug)]
struct Inner {
    todos: BTreeMap<i64, Todo>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                todos: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.todos.values().cloned().collect())
    }

    async fn insert(&self, new: NewTodo) -> Result<Todo, StoreError> {
        let mut inner = self.inner.write().await;
        let now = Utc::now();
        let todo = Todo {
            id: inner.next_id,
            description: new.description,
            completed: new.completed,
            created_at: now,
            updated_at: now,
        };
        inner.next_id += 1;
        inner.todos.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn find(&self, id: i64) -> Result<Option<Todo>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.todos.get(&id).cloned())
    }

    async fn save(&self, todo: &Todo) -> Result<Option<Todo>, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(stored) = inner.todos.get_mut(&todo.id) else {
            return Ok(None);
        };
        stored.description = todo.description.clone();
        stored.completed = todo.completed;
        stored.updated_at = Utc::now();
        Ok(Some(stored.clone()))
    }

    async fn remove(&self, id: i64) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.todos.remove(&id).is_some())
    }
}
