use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{OllamaClient, api::types::ModelDetails, error::OllamaResult, transport::TransportExt};

impl OllamaClient {
    /// Models currently loaded into memory.
    pub fn process_status(&self) -> OllamaResult<ModelProcessStatus> {
        self.transport.get("/api/ps").map_err(Into::into)
    }
}

/// Response body of **`GET /api/ps`**.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelProcessStatus {
    #[serde(default)]
    pub models: Vec<RunningModel>,
}

impl ModelProcessStatus {
    pub fn model_names(&self) -> Vec<String> {
        self.models.iter().map(|m| m.name.clone()).collect()
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.models.iter().any(|m| m.name == name || m.model == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningModel {
    pub name: String,

    #[serde(default)]
    pub model: String,

    /// Total memory held, in bytes.
    #[serde(default)]
    pub size: u64,

    #[serde(default)]
    pub digest: String,

    #[serde(default)]
    pub details: ModelDetails,

    /// When the server will unload the model if it stays idle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    /// Portion of `size` resident in GPU memory, in bytes.
    #[serde(default)]
    pub size_vram: u64,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reports_loaded_models() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/api/ps")
            .with_status(200)
            .with_body(
                json!({
                    "models": [{
                        "name": "mistral:latest",
                        "model": "mistral:latest",
                        "size": 5137025024u64,
                        "digest": "2ae6f6dd7a3dd734790bbbf58b8909a606e0e7e97e94b7604e0aa7ae4490e6d8",
                        "details": {"format": "gguf", "family": "llama", "families": ["llama"], "parameter_size": "7.2B", "quantization_level": "Q4_0"},
                        "expires_at": "2024-06-04T14:38:31.83753-07:00",
                        "size_vram": 5137025024u64
                    }]
                })
                .to_string(),
            )
            .create();

        let client = OllamaClient::for_mock(&server);
        let status = client.process_status().unwrap();

        assert_eq!(status.model_names(), vec!["mistral:latest".to_string()]);
        assert!(status.is_loaded("mistral:latest"));
        assert!(!status.is_loaded("llama3:latest"));
        let running = &status.models[0];
        assert_eq!(running.size_vram, running.size);
        assert_eq!(running.details.families, Some(vec!["llama".to_string()]));
        assert!(running.expires_at.is_some());
        mock.assert();
    }
}
