//! Backend API
//!
//! Abstract access to the `/api/bases` endpoints. The browser build talks to
//! the server through [`HttpSourceApi`]; tests substitute an in-memory fake.

mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Source, SourceBody, SourceId};

pub use http::HttpSourceApi;

/// Common result type for backend calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Backend call failures. `Display` is the message shown to the user.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response
    #[error("{0}")]
    Network(String),
    /// The server answered with a non-2xx status
    #[error("{message}")]
    Status { status: u16, message: String },
    /// The response body was not the expected JSON
    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),
    /// The configured base URL could not produce an endpoint
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// The embedded API configuration could not be parsed
    #[error("Invalid API config: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

/// Remote source collection
///
/// All operations are async and uncancellable. Futures are not `Send`: the
/// browser runs everything on one thread.
#[async_trait(?Send)]
pub trait SourceApi {
    /// Fetch every source
    async fn list(&self) -> ApiResult<Vec<Source>>;

    /// Create a source, returning the server-assigned id
    async fn create(&self, body: &SourceBody) -> ApiResult<SourceId>;

    /// Replace the name/path of an existing source
    async fn update(&self, id: SourceId, body: &SourceBody) -> ApiResult<()>;

    /// Delete a source
    async fn delete(&self, id: SourceId) -> ApiResult<()>;
}
