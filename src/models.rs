//! Frontend Models
//!
//! Data structures matching the `/api/bases` payloads.

use serde::{Deserialize, Serialize};

/// Server-assigned source identifier
pub type SourceId = u32;

/// Source record (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub id: SourceId,
    pub name: String,
    pub path: String,
}

/// Request body for create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceBody {
    pub name: String,
    pub path: String,
}

impl SourceBody {
    /// Builds a body with surrounding whitespace stripped from both fields
    pub fn trimmed(name: &str, path: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            path: path.trim().to_string(),
        }
    }
}

/// Create response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedSource {
    pub id: SourceId,
}

/// Error payload returned by the server on non-2xx responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ErrorBody {
    /// The most specific message available
    pub fn message(&self) -> Option<&str> {
        self.description
            .as_deref()
            .or(self.error.as_deref())
            .filter(|m| !m.is_empty())
    }
}
