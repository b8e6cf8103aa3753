//! Wire and storage types for todo items.
//!
//! `Todo` is both the stored row and the JSON body returned by every
//! successful mutation. Keys are camelCase on the wire so the timestamp
//! columns read as `createdAt` / `updatedAt`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields the store needs to persist a new record. The store assigns `id`
/// and both timestamps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTodo {
    pub description: String,
    pub completed: bool,
}

/// Body of `POST /todos`.
///
/// Both fields are optional at the serde level so a missing description is
/// reported as a validation error by the service instead of a JSON rejection.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTodo {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

/// Body of `PATCH /todos/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateDescription {
    #[serde(default)]
    pub description: Option<String>,
}

/// Body returned by `DELETE /todos/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deleted {
    pub id: i64,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Todo {
        let at = DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        Todo {
            id: 7,
            description: "buy milk".to_string(),
            completed: false,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn todo_serializes_with_camel_case_timestamps() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["description"], "buy milk");
        assert_eq!(json["completed"], false);
        assert_eq!(json["createdAt"], "2024-05-01T10:00:00Z");
        assert_eq!(json["updatedAt"], "2024-05-01T10:00:00Z");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn create_todo_accepts_missing_fields() {
        let input: CreateTodo = serde_json::from_str("{}").unwrap();
        assert!(input.description.is_none());
        assert!(input.completed.is_none());
    }

    #[test]
    fn create_todo_reads_explicit_completed() {
        let input: CreateTodo =
            serde_json::from_str(r#"{"description":"done already","completed":true}"#).unwrap();
        assert_eq!(input.description.as_deref(), Some("done already"));
        assert_eq!(input.completed, Some(true));
    }

    #[test]
    fn create_todo_rejects_non_string_description() {
        let result: Result<CreateTodo, _> = serde_json::from_str(r#"{"description":5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_description_allows_empty_body() {
        let input: UpdateDescription = serde_json::from_str("{}").unwrap();
        assert!(input.description.is_none());
    }
}
