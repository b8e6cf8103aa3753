//! Todo list HTTP service.
//!
//! # Overview
//! Five CRUD operations over a single `todos` table, exposed as a JSON REST
//! API with axum:
//!
//! | Method | Path          | Success                            |
//! |--------|---------------|------------------------------------|
//! | GET    | `/todos`      | 200, all todos                     |
//! | POST   | `/todos`      | 201, created todo                  |
//! | DELETE | `/todos/{id}` | 200, `{id, message}`               |
//! | PUT    | `/todos/{id}` | 200, todo with `completed` inverted |
//! | PATCH  | `/todos/{id}` | 200, todo with new description     |
//!
//! # Design
//! - The store handle is created once by the caller and injected into
//!   `TodoService`; nothing is process-global.
//! - Failures are `ServiceError` values that render as
//!   `{"error": kind, "message": text}` with status 400, 404 or 500.

pub mod config;
pub mod error;
pub mod model;
pub mod routes;
pub mod service;
pub mod store;

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use error::{ErrorBody, ServiceError, StoreError};
pub use model::{CreateTodo, Deleted, Todo, UpdateDescription};
pub use service::TodoService;
pub use store::{MemoryStore, SqliteStore, TodoStore};

/// Routes only, without CORS or tracing middleware.
pub fn app(store: Arc<dyn TodoStore>) -> Router {
    routes::router(TodoService::new(store))
}

/// Routes wrapped in the middleware the binary serves with.
pub fn http_app(store: Arc<dyn TodoStore>, config: &ServerConfig) -> Router {
    app(store)
        .layer(config.cors_layer())
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener, store: Arc<dyn TodoStore>) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store)).await
}
