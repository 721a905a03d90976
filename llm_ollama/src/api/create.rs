use std::collections::BTreeMap;

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{
    OllamaClient,
    api::{chat::Message, types::{ModelOptions, StatusResult}},
    error::{OllamaError, OllamaResult, require_non_empty},
    stream::StatusUpdate,
    transport::Verb,
};

/// Outcome of **`POST /api/create`**.
pub type CreateModelResult = StatusResult;

impl OllamaClient {
    /// Builds a new local model from an existing one, from uploaded blobs
    /// (see [`push_blob_file`](Self::push_blob_file)), or both.
    pub fn create_model(&self, request: &CreateModelRequest) -> OllamaResult<CreateModelResult> {
        self.create_model_with_progress(request, |_| {})
    }

    pub fn create_model_with_progress<F>(
        &self,
        request: &CreateModelRequest,
        on_update: F,
    ) -> OllamaResult<CreateModelResult>
    where
        F: FnMut(&StatusUpdate),
    {
        request.validate()?;
        crate::debug!(model = %request.model, from = ?request.from, "create");
        self.status_stream(Verb::Post, "/api/create", request, on_update)
            .map(StatusResult::from)
    }
}

/// Request body for **`POST /api/create`**.
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[builder(derive(Debug, Clone), finish_fn(vis = "", name = build_internal))]
pub struct CreateModelRequest {
    /// Name of the model to create.
    #[builder(into)]
    pub model: String,

    /// Existing model to start from.
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    /// File name to blob digest, e.g. `"model.gguf" => "sha256:..."`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<BTreeMap<String, String>>,

    /// LoRA adapter file name to blob digest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adapters: Option<BTreeMap<String, String>>,

    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// A single license string or a list of them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<serde_json::Value>,

    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ModelOptions>,

    /// Conversation baked into the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<Message>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,

    /// Quantization type for a non-quantized source, e.g. `q4_K_M`.
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantize: Option<String>,
}

impl CreateModelRequest {
    pub fn validate(&self) -> OllamaResult<()> {
        require_non_empty("model", &self.model)?;
        if let Some(license) = &self.license {
            let valid = match license {
                serde_json::Value::String(_) => true,
                serde_json::Value::Array(items) => items.iter().all(|v| v.is_string()),
                _ => false,
            };
            if !valid {
                return Err(OllamaError::invalid_request(
                    "license",
                    "`license` must be a string or an array of strings",
                ));
            }
        }
        Ok(())
    }
}

impl<S: create_model_request_builder::IsComplete> CreateModelRequestBuilder<S> {
    pub fn build(self) -> OllamaResult<CreateModelRequest> {
        let req = self.build_internal();
        req.validate()?;
        Ok(req)
    }
}
