//! CRUD operations over a `TodoStore`.
//!
//! Validation and not-found are decided here before or after the store is
//! consulted. Store failures are logged with their detail and surfaced as
//! `ServiceError::Backend` carrying only a generic context string.

use std::sync::Arc;

use crate::error::{ServiceError, StoreError};
use crate::model::{CreateTodo, Deleted, NewTodo, Todo, UpdateDescription};
use crate::store::TodoStore;

pub const DELETED_MESSAGE: &str = "todo deleted";

/// Stateless between requests; cloning shares the injected store handle.
#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn TodoStore>,
}

fn backend(context: &'static str) -> impl FnOnce(StoreError) -> ServiceError {
    move |source| {
        tracing::error!(error = %source, "{context}");
        ServiceError::Backend { context, source }
    }
}

impl TodoService {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Todo>, ServiceError> {
        self.store
            .list()
            .await
            .map_err(backend("failed to list todos"))
    }

    /// Rejects a missing or empty description without touching the store.
    /// `completed` defaults to false.
    pub async fn create(&self, input: CreateTodo) -> Result<Todo, ServiceError> {
        let description = match input.description {
            Some(description) if !description.is_empty() => description,
            _ => return Err(ServiceError::Validation("description is required".to_string())),
        };
        let todo = self
            .store
            .insert(NewTodo {
                description,
                completed: input.completed.unwrap_or(false),
            })
            .await
            .map_err(backend("failed to save todo"))?;
        tracing::debug!(id = todo.id, "todo created");
        Ok(todo)
    }

    pub async fn delete(&self, id: i64) -> Result<Deleted, ServiceError> {
        self.find(id).await?;
        let removed = self
            .store
            .remove(id)
            .await
            .map_err(backend("failed to delete todo"))?;
        if !removed {
            return Err(ServiceError::NotFound(id));
        }
        tracing::debug!(id, "todo deleted");
        Ok(Deleted {
            id,
            message: DELETED_MESSAGE.to_string(),
        })
    }

    /// Inverts `completed`. Not idempotent: applying it twice restores the
    /// original value.
    pub async fn toggle_completed(&self, id: i64) -> Result<Todo, ServiceError> {
        let mut todo = self.find(id).await?;
        todo.completed = !todo.completed;
        self.save(todo, "failed to change todo status").await
    }

    /// Overwrites the description. The new value is not validated; a missing
    /// field is stored as the empty string.
    pub async fn update_description(
        &self,
        id: i64,
        input: UpdateDescription,
    ) -> Result<Todo, ServiceError> {
        let mut todo = self.find(id).await?;
        todo.description = input.description.unwrap_or_default();
        self.save(todo, "failed to change todo description").await
    }

    async fn find(&self, id: i64) -> Result<Todo, ServiceError> {
        self.store
            .find(id)
            .await
            .map_err(backend("failed to look up todo"))?
            .ok_or(ServiceError::NotFound(id))
    }

    async fn save(&self, todo: Todo, context: &'static str) -> Result<Todo, ServiceError> {
        let id = todo.id;
        self.store
            .save(&todo)
            .await
            .map_err(backend(context))?
            .ok_or(ServiceError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::store::MemoryStore;

    fn service() -> TodoService {
        TodoService::new(Arc::new(MemoryStore::new()))
    }

    fn create(description: Option<&str>, completed: Option<bool>) -> CreateTodo {
        CreateTodo {
            description: description.map(str::to_string),
            completed,
        }
    }

    /// Store whose every call fails, for exercising the backend path.
    struct BrokenStore;

    #[async_trait]
    impl TodoStore for BrokenStore {
        async fn list(&self) -> Result<Vec<Todo>, StoreError> {
            Err(StoreError::Poisoned)
        }
        async fn insert(&self, _new: NewTodo) -> Result<Todo, StoreError> {
            Err(StoreError::Poisoned)
        }
        async fn find(&self, _id: i64) -> Result<Option<Todo>, StoreError> {
            Err(StoreError::Poisoned)
        }
        async fn save(&self, _todo: &Todo) -> Result<Option<Todo>, StoreError> {
            Err(StoreError::Poisoned)
        }
        async fn remove(&self, _id: i64) -> Result<bool, StoreError> {
            Err(StoreError::Poisoned)
        }
    }

    #[tokio::test]
    async fn create_defaults_completed_to_false() {
        let svc = service();
        let todo = svc.create(create(Some("buy milk"), None)).await.unwrap();
        assert_eq!(todo.description, "buy milk");
        assert!(!todo.completed);

        let other = svc.create(create(Some("done"), Some(true))).await.unwrap();
        assert!(other.completed);
        assert_ne!(other.id, todo.id);
    }

    #[tokio::test]
    async fn create_without_description_persists_nothing() {
        let svc = service();
        for input in [create(None, None), create(Some(""), Some(true))] {
            let err = svc.create(input).await.unwrap_err();
            assert!(matches!(err, ServiceError::Validation(_)));
        }
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_missing_leaves_store_unchanged() {
        let svc = service();
        let kept = svc.create(create(Some("keep"), None)).await.unwrap();

        let err = svc.delete(kept.id + 1).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(id) if id == kept.id + 1));
        assert_eq!(svc.list().await.unwrap(), vec![kept]);
    }

    #[tokio::test]
    async fn delete_returns_confirmation() {
        let svc = service();
        let todo = svc.create(create(Some("remove me"), None)).await.unwrap();
        let deleted = svc.delete(todo.id).await.unwrap();
        assert_eq!(deleted.id, todo.id);
        assert_eq!(deleted.message, DELETED_MESSAGE);
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn toggle_twice_restores_original_value() {
        let svc = service();
        let todo = svc.create(create(Some("flip"), None)).await.unwrap();

        let once = svc.toggle_completed(todo.id).await.unwrap();
        assert!(once.completed);
        assert_eq!(once.description, "flip");

        let twice = svc.toggle_completed(todo.id).await.unwrap();
        assert!(!twice.completed);
    }

    #[tokio::test]
    async fn toggle_missing_is_not_found() {
        let err = service().toggle_completed(5).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(5)));
    }

    #[tokio::test]
    async fn update_description_keeps_id_and_completed() {
        let svc = service();
        let todo = svc.create(create(Some("buy milk"), Some(true))).await.unwrap();

        let updated = svc
            .update_description(
                todo.id,
                UpdateDescription {
                    description: Some("buy oat milk".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.id, todo.id);
        assert!(updated.completed);

        let listed = svc.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].description, "buy oat milk");
    }

    #[tokio::test]
    async fn update_description_accepts_empty_and_missing_values() {
        let svc = service();
        let todo = svc.create(create(Some("text"), None)).await.unwrap();

        let emptied = svc
            .update_description(
                todo.id,
                UpdateDescription {
                    description: Some(String::new()),
                },
            )
            .await
            .unwrap();
        assert_eq!(emptied.description, "");

        let missing = svc
            .update_description(todo.id, UpdateDescription::default())
            .await
            .unwrap();
        assert_eq!(missing.description, "");
    }

    #[tokio::test]
    async fn store_failures_become_backend_errors() {
        let svc = TodoService::new(Arc::new(BrokenStore));

        let err = svc.list().await.unwrap_err();
        assert!(matches!(err, ServiceError::Backend { .. }));
        assert_eq!(err.to_string(), "failed to list todos");

        let err = svc.create(create(Some("x"), None)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Backend { .. }));

        // Validation is decided before the store is consulted.
        let err = svc.create(create(None, None)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let err = svc.toggle_completed(1).await.unwrap_err();
        assert!(matches!(err, ServiceError::Backend { .. }));
    }
}
