use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};

use crate::error::ServiceError;
use crate::model::{CreateTodo, Deleted, Todo, UpdateDescription};
use crate::service::TodoService;

pub fn router(service: TodoService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            put(toggle_completed)
                .patch(update_description)
                .delete(delete_todo),
        )
        .with_state(service)
}

// Extractor rejections (bad JSON, non-integer id) are reported as validation
// failures with the same error body as every other failure.
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ServiceError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ServiceError::Validation(rejection.body_text()))
}

fn todo_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ServiceError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| ServiceError::Validation(rejection.body_text()))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_todos(State(service): State<TodoService>) -> Result<Json<Vec<Todo>>, ServiceError> {
    service.list().await.map(Json)
}

async fn create_todo(
    State(service): State<TodoService>,
    payload: Result<Json<CreateTodo>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ServiceError> {
    let todo = service.create(body(payload)?).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn delete_todo(
    State(service): State<TodoService>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Deleted>, ServiceError> {
    service.delete(todo_id(path)?).await.map(Json)
}

async fn toggle_completed(
    State(service): State<TodoService>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Todo>, ServiceError> {
    service.toggle_completed(todo_id(path)?).await.map(Json)
}

async fn update_description(
    State(service): State<TodoService>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateDescription>, JsonRejection>,
) -> Result<Json<Todo>, ServiceError> {
    let id = todo_id(path)?;
    service.update_description(id, body(payload)?).await.map(Json)
}
