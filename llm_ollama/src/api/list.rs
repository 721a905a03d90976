use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{OllamaClient, api::types::ModelDetails, error::OllamaResult, transport::TransportExt};

impl OllamaClient {
    /// Models available locally.
    pub fn list_models(&self) -> OllamaResult<ModelList> {
        let list: ModelList = self.transport.get("/api/tags")?;
        crate::debug!(count = list.models.len(), "listed models");
        Ok(list)
    }
}

/// Response body of **`GET /api/tags`**.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelList {
    #[serde(default)]
    pub models: Vec<ModelInfo>,
}

impl ModelList {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|m| m.name.as_str())
    }

    /// Looks a model up by name. A name without a tag matches `:latest`.
    pub fn find(&self, name: &str) -> Option<&ModelInfo> {
        let qualified = if name.contains(':') {
            name.to_string()
        } else {
            format!("{name}:latest")
        };
        self.models
            .iter()
            .find(|m| m.name == name || m.name == qualified)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// `name:tag`, e.g. `llama3:latest`.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    pub modified_at: DateTime<Utc>,

    /// Size on disk in bytes.
    #[serde(default)]
    pub size: u64,

    #[serde(default)]
    pub digest: String,

    #[serde(default)]
    pub details: ModelDetails,
}
