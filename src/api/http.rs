//! HTTP Backend
//!
//! `reqwest` bindings for the `/api/bases` endpoints. On wasm32 reqwest
//! delegates to the browser's `fetch`.

use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use super::{ApiError, ApiResult, SourceApi};
use crate::config::ApiConfig;
use crate::models::{CreatedSource, ErrorBody, Source, SourceBody, SourceId};

const BASES_PATH: &str = "api/bases";

/// The server registers creation under a custom `CREATE` method
fn create_method() -> Method {
    Method::from_bytes(b"CREATE").unwrap_or(Method::POST)
}

#[derive(Clone, Debug)]
pub struct HttpSourceApi {
    client: Client,
    base: Url,
}

impl HttpSourceApi {
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let mut base = Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { client: Client::new(), base })
    }

    fn bases_url(&self) -> ApiResult<Url> {
        self.base
            .join(BASES_PATH)
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))
    }

    fn base_url(&self, id: SourceId) -> ApiResult<Url> {
        self.base
            .join(&format!("{}/{}", BASES_PATH, id))
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))
    }

    async fn send(&self, method: Method, url: Url, body: Option<&SourceBody>) -> ApiResult<Response> {
        log::debug!("[Sources] {} {}", method, url);
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(status_error(status, &text))
        }
    }
}

/// Maps a non-2xx response to an error carrying the server's message
fn status_error(status: StatusCode, body: &str) -> ApiError {
    let parsed = serde_json::from_str::<ErrorBody>(body).unwrap_or_default();
    let message = match parsed.message() {
        Some(message) => message.to_string(),
        None => match status.canonical_reason() {
            Some(reason) => format!("{} {}", status.as_u16(), reason),
            None => format!("HTTP {}", status.as_u16()),
        },
    };
    ApiError::Status { status: status.as_u16(), message }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Reads an acknowledgement body, which may be empty or any JSON value
async fn acknowledge(response: Response) -> ApiResult<()> {
    let bytes = response.bytes().await?;
    if !bytes.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_slice::<serde_json::Value>(&bytes)?;
    }
    Ok(())
}

#[async_trait(?Send)]
impl SourceApi for HttpSourceApi {
    async fn list(&self) -> ApiResult<Vec<Source>> {
        let response = self.send(Method::GET, self.bases_url()?, None).await?;
        decode(response).await
    }

    async fn create(&self, body: &SourceBody) -> ApiResult<SourceId> {
        let response = self.send(create_method(), self.bases_url()?, Some(body)).await?;
        let created: CreatedSource = decode(response).await?;
        Ok(created.id)
    }

    async fn update(&self, id: SourceId, body: &SourceBody) -> ApiResult<()> {
        let response = self.send(Method::PUT, self.base_url(id)?, Some(body)).await?;
        acknowledge(response).await
    }

    async fn delete(&self, id: SourceId) -> ApiResult<()> {
        let response = self.send(Method::DELETE, self.base_url(id)?, None).await?;
        acknowledge(response).await
    }
}
