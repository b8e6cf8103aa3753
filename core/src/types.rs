//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the server's JSON schema but are defined independently
//! so the client does not depend on axum or the storage layer. Timestamps are
//! kept as the raw strings the server sends; the client only displays them.

use serde::{Deserialize, Serialize};

/// A single todo item returned by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub description: String,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Request payload for creating a new todo. `completed` is omitted from the
/// JSON when unset and the server defaults it to false.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl CreateTodo {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            completed: None,
        }
    }
}

/// Request payload for changing a todo's description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDescription {
    pub description: String,
}

/// Confirmation returned by a successful delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deleted {
    pub id: i64,
    pub message: String,
}

/// Error body sent by the server. Only `message` is used by the client.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
