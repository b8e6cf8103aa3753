//! Client core for the todo service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps the client's
//! `TodosState` in sync with server responses.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit. The host implements `Transport`.
//! - `Dispatcher` owns the one `TodosState` of a session and applies each
//!   intent's pending / fulfilled / rejected phases.
//! - DTOs are defined independently from the server crate; the integration
//!   test catches schema drift.

pub mod client;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod state;
pub mod types;

pub use client::{TodoClient, DEFAULT_API_URL};
pub use dispatch::Dispatcher;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use state::{Intent, Outcome, TodosState};
pub use types::{CreateTodo, Deleted, Todo, UpdateDescription};
