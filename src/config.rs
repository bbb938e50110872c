//! API Configuration

use serde::Deserialize;

use crate::api::{ApiError, ApiResult};

/// Local server address used outside the browser
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Where the `/api/bases` endpoints live
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: default_base_url() }
    }
}

impl ApiConfig {
    /// Parse an embedded JSON config, e.g. `{"base_url": "http://host:5000"}`
    pub fn from_json(json: &str) -> ApiResult<Self> {
        serde_json::from_str(json).map_err(|e| ApiError::Config(e.to_string()))
    }

    /// The origin the page was served from
    #[cfg(target_arch = "wasm32")]
    pub fn from_window() -> ApiResult<Self> {
        let origin = web_sys::window()
            .ok_or_else(|| ApiError::InvalidUrl("no window".into()))?
            .location()
            .origin()
            .map_err(|_| ApiError::InvalidUrl("window.location.origin unavailable".into()))?;
        Ok(Self { base_url: origin })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        assert_eq!(ApiConfig::default().base_url, "http://localhost:5000");
        assert_eq!(ApiConfig::from_json("{}").unwrap(), ApiConfig::default());
    }

    #[test]
    fn test_from_json() {
        let config = ApiConfig::from_json(r#"{"base_url": "http://10.0.0.2:8080"}"#).unwrap();
        assert_eq!(config.base_url, "http://10.0.0.2:8080");
    }

    #[test]
    fn test_bad_config_is_a_config_error() {
        let err = ApiConfig::from_json("[").unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
        assert!(err.to_string().starts_with("Invalid API config"));
    }
}
