//! Server configuration loaded from the environment.
//!
//! Variables (a `.env` file in the working directory is honoured):
//! - `APP_HOST` (default `127.0.0.1`) and `PORT` (default `5001`)
//! - `DATABASE_URL`: SQLite file path, or `:memory:` for a non-durable store.
//!   When unset, `DB_NAME` (default `todos.db`) names the database file.
//! - `CORS_ORIGIN` (default `http://localhost:5173`)

use std::env;
use std::path::PathBuf;

use axum::http::{header, HeaderValue, Method};
use thiserror::Error;
use tower_http::cors::CorsLayer;

pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_DB_NAME: &str = "todos.db";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Database {
    Memory,
    File(PathBuf),
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database: Database,
    pub cors_origin: HeaderValue,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup. `from_env` passes
    /// the process environment; tests pass a map.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|e| ConfigError::InvalidValue {
                key: "PORT",
                message: format!("{raw:?}: {e}"),
            })?,
            None => DEFAULT_PORT,
        };

        let database = match lookup("DATABASE_URL") {
            Some(url) if url == ":memory:" => Database::Memory,
            Some(url) => Database::File(PathBuf::from(url.trim_start_matches("sqlite://"))),
            None => Database::File(PathBuf::from(
                lookup("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.to_string()),
            )),
        };

        let origin = lookup("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());
        let cors_origin = HeaderValue::from_str(&origin).map_err(|e| ConfigError::InvalidValue {
            key: "CORS_ORIGIN",
            message: e.to_string(),
        })?;

        Ok(Self {
            host,
            port,
            database,
            cors_origin,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn cors_layer(&self) -> CorsLayer {
        CorsLayer::new()
            .allow_origin(self.cors_origin.clone())
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
            ])
            .allow_headers([header::CONTENT_TYPE])
    }
}
