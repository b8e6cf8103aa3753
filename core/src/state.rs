//! Client-side mirror of the server's todo list.
//!
//! # Design
//! `TodosState` changes only through the three phases of an intent:
//! `pending` raises `loading`, `fulfilled` merges a server result and
//! `rejected` records a message. Nothing is applied optimistically and a
//! failure never rolls `todos` back or forward; it only sets `error`.
//!
//! Phases are public so a host that runs several requests at once can apply
//! them in whatever order responses arrive. Overlapping requests are not
//! coordinated: `loading` follows the last phase applied and the last
//! response merged wins.

use crate::error::ApiError;
use crate::types::{Deleted, Todo};

/// A user action that needs one round-trip to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Fetch,
    Add { description: String },
    Delete { id: i64 },
    ToggleCompleted { id: i64 },
    ChangeDescription { id: i64, description: String },
}

impl Intent {
    /// Text recorded in `error` when the failure carries no server message.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Intent::Fetch => "failed to load todos",
            Intent::Add { .. } => "failed to add todo",
            Intent::Delete { .. } => "failed to delete todo",
            Intent::ToggleCompleted { .. } => "failed to change todo status",
            Intent::ChangeDescription { .. } => "failed to change todo description",
        }
    }

    /// Best-effort human-readable message for a failed intent.
    pub fn failure_message(&self, error: &ApiError) -> String {
        error
            .server_message()
            .unwrap_or_else(|| self.fallback_message())
            .to_string()
    }
}

/// Successful result of an intent, ready to merge into the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Fetched(Vec<Todo>),
    Added(Todo),
    Deleted(Deleted),
    CompletedChanged(Todo),
    DescriptionChanged(Todo),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodosState {
    /// Items as of the last successful fetch or mutation.
    pub todos: Vec<Todo>,
    /// Placeholder for a selected item; always the empty todo.
    pub current_todo: Todo,
    /// Last failure message, cleared by the next successful action.
    pub error: Option<String>,
    pub loading: bool,
}

impl TodosState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&mut self) {
        self.loading = true;
    }

    pub fn fulfilled(&mut self, outcome: Outcome) {
        self.loading = false;
        self.error = None;
        match outcome {
            Outcome::Fetched(todos) => self.todos = todos,
            Outcome::Added(todo) => self.todos.push(todo),
            Outcome::Deleted(deleted) => self.todos.retain(|todo| todo.id != deleted.id),
            Outcome::CompletedChanged(changed) => {
                if let Some(todo) = self.todos.iter_mut().find(|t| t.id == changed.id) {
                    todo.completed = changed.completed;
                }
            }
            Outcome::DescriptionChanged(changed) => {
                if let Some(todo) = self.todos.iter_mut().find(|t| t.id == changed.id) {
                    *todo = changed;
                }
            }
        }
    }

    pub fn rejected(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }
}
