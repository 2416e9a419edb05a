//! Hierarchical database module.
//!
//! The database stores JSON records addressed by slash-separated paths. This
//! module exposes the four primitives the app depends on: one-shot reads,
//! whole-record writes, partial updates, and client-generated push keys.
//!
//! # Examples
//!
//! ```rust,ignore
//! # use sippure::Sippure;
//! # async fn run(app: Sippure) {
//! let db = app.db();
//! let key = db.push_id();
//! let _ = db.reference(&format!("notes/{}", key)).set(&"hello").await;
//! # }
//! ```

pub mod push_id;


use crate::core::parse_error_response;
use push_id::PushIdGenerator;
use reqwest::header;
use reqwest_middleware::ClientWithMiddleware;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during database operations.
#[derive(Error, Debug)]
pub enum DbError {
    /// Wrapper for `reqwest::Error`.
    #[error("HTTP Request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    /// Wrapper for `reqwest_middleware::Error`.
    #[error("Middleware error: {0}")]
    MiddlewareError(#[from] reqwest_middleware::Error),
    /// Errors returned by the database, surfaced with the service's own
    /// message.
    #[error("{0}")]
    ApiError(String),
    /// Wrapper for `serde_json::Error`.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Client for the hierarchical database.
#[derive(Clone)]
pub struct Database {
    client: ClientWithMiddleware,
    base_url: String,
    push_ids: Arc<PushIdGenerator>,
}

impl Database {
    pub fn new(client: ClientWithMiddleware, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            push_ids: Arc::new(PushIdGenerator::new()),
        }
    }

    /// Gets a `Reference` to the record at the specified path.
    ///
    /// # Arguments
    ///
    /// * `path` - The slash-separated path to the record (e.g. "Users/uid1").
    pub fn reference(&'_ self, path: &str) -> Reference<'_> {
        let escaped = path
            .trim_matches('/')
            .split('/')
            .map(|segment| {
                url::form_urlencoded::byte_serialize(segment.as_bytes()).collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("/");

        Reference {
            client: &self.client,
            url: format!("{}/{}.json", self.base_url, escaped),
        }
    }

    /// Generates a unique child key for a new record.
    pub fn push_id(&self) -> String {
        self.push_ids.generate()
    }
}

/// A reference to a single record in the database.
pub struct Reference<'a> {
    client: &'a ClientWithMiddleware,
    url: String,
}

impl Reference<'_> {
    /// Reads the record once. A missing record yields `None`.
    pub async fn get<T: DeserializeOwned>(&self) -> Result<Option<T>, DbError> {
        let response = self.client.get(&self.url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(DbError::ApiError(
                parse_error_response(response, "Read failed").await,
            ));
        }

        // The database answers a read of an absent path with a literal null.
        let value: serde_json::Value = response.json().await?;
        if value.is_null() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_value(value)?))
    }

    /// Writes the full record, replacing whatever was stored at the path.
    pub async fn set<T: Serialize>(&self, value: &T) -> Result<(), DbError> {
        let response = self
            .client
            .put(&self.url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(serde_json::to_vec(value)?)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DbError::ApiError(
                parse_error_response(response, "Write failed").await,
            ));
        }

        Ok(())
    }

    /// Overwrites only the named children of the record, leaving the rest
    /// untouched.
    pub async fn update<T: Serialize>(&self, fields: &T) -> Result<(), DbError> {
        let response = self
            .client
            .patch(&self.url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(serde_json::to_vec(fields)?)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DbError::ApiError(
                parse_error_response(response, "Update failed").await,
            ));
        }

        Ok(())
    }
}
