use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    OllamaClient,
    api::types::ModelDetails,
    error::{OllamaResult, require_non_empty},
    transport::TransportExt,
};

impl OllamaClient {
    /// Modelfile, template, parameters and architecture facts of a model.
    /// `verbose` asks for the full tokenizer metadata in `model_info`.
    pub fn show_model(&self, model: &str, verbose: bool) -> OllamaResult<ModelInfoResult> {
        require_non_empty("model", model)?;
        self.transport
            .post("/api/show", &ShowRequest { model, verbose })
            .map_err(Into::into)
    }
}

#[derive(Debug, Serialize)]
struct ShowRequest<'a> {
    model: &'a str,
    verbose: bool,
}

/// Response body of **`POST /api/show`**.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelInfoResult {
    #[serde(default)]
    pub modelfile: String,

    /// Modelfile `PARAMETER` lines, newline separated.
    #[serde(default)]
    pub parameters: String,

    #[serde(default)]
    pub template: String,

    #[serde(default)]
    pub details: ModelDetails,

    /// GGUF metadata keys such as `general.architecture`.
    #[serde(default)]
    pub model_info: serde_json::Map<String, serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,

    /// e.g. `completion`, `vision`, `tools`, `embedding`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Vec<String>>,
}

impl ModelInfoResult {
    /// Context window from `model_info`, under `<architecture>.context_length`.
    pub fn context_length(&self) -> Option<u64> {
        let arch = self.model_info.get("general.architecture")?.as_str()?;
        self.model_info
            .get(&format!("{arch}.context_length"))?
            .as_u64()
    }

    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities
            .as_ref()
            .is_some_and(|caps| caps.iter().any(|c| c == capability))
    }
}
