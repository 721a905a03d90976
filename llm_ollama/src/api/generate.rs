use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    OllamaClient,
    api::types::{GenerationMetrics, KeepAlive, ModelOptions, ResponseFormat, Think},
    error::{OllamaError, OllamaResult, require_non_empty},
    stream::{ResponseStream, StreamChunk},
    transport::{TransportExt, Verb},
};

impl OllamaClient {
    /// Single completion for a prompt. The whole answer arrives in one body;
    /// `request.stream` is overridden to `false`.
    pub fn generate(&self, request: &GenerateRequest) -> OllamaResult<GenerateResponse> {
        request.validate()?;
        crate::debug!(model = %request.model, "generate");
        let body = GenerateRequest {
            stream: Some(false),
            ..request.clone()
        };
        self.transport.post("/api/generate", &body).map_err(Into::into)
    }

    /// Completion delivered chunk by chunk as the model produces it.
    pub fn generate_stream(
        &self,
        request: &GenerateRequest,
    ) -> OllamaResult<ResponseStream<GenerateResponse>> {
        request.validate()?;
        crate::debug!(model = %request.model, "generate (streaming)");
        let body = GenerateRequest {
            stream: Some(true),
            ..request.clone()
        };
        let reader = self.transport.stream(Verb::Post, "/api/generate", &body)?;
        Ok(ResponseStream::new(reader).with_timeout(self.config().timeout))
    }
}

/// Request body for **`POST /api/generate`**.
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[builder(derive(Debug, Clone), finish_fn(vis = "", name = build_internal))]
pub struct GenerateRequest {
    #[builder(into)]
    pub model: String,

    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    /// Text after the insertion point, for fill-in-the-middle models.
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,

    /// Overrides the system message of the model's Modelfile.
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Overrides the prompt template of the model's Modelfile.
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// Base64-encoded images for multimodal models.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,

    #[builder(into)]
    #[serde(default, skip_serializing_if = "crate::api::types::format_is_unset")]
    pub format: Option<ResponseFormat>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<ModelOptions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,

    /// Send the prompt verbatim, bypassing the template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<bool>,

    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_alive: Option<KeepAlive>,

    /// Token context returned by a previous response, for short-term memory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<i64>>,

    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub think: Option<Think>,
}

impl GenerateRequest {
    /// Checks what the types cannot: a model name is present, the format
    /// is usable, and no image is blank.
    pub fn validate(&self) -> OllamaResult<()> {
        require_non_empty("model", &self.model)?;
        if let Some(format) = &self.format {
            format.validate()?;
        }
        if let Some(images) = &self.images {
            if images.iter().any(|i| i.trim().is_empty()) {
                return Err(OllamaError::invalid_request(
                    "images",
                    "must contain base64 data, not empty strings",
                ));
            }
        }
        Ok(())
    }
}

impl<S: generate_request_builder::IsComplete> GenerateRequestBuilder<S> {
    pub fn build(self) -> OllamaResult<GenerateRequest> {
        let req = self.build_internal();
        req.validate()?;
        Ok(req)
    }
}

/// Response body of **`POST /api/generate`**; also one chunk of its stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub model: String,

    pub created_at: DateTime<Utc>,

    /// Generated text (a fragment of it when streaming).
    #[serde(default)]
    pub response: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking: Option<String>,

    /// Encoding of this exchange; pass it back in the next request's
    /// `context` to continue the conversation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<i64>>,

    pub done: bool,

    /// `stop`, `length`, `load`, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done_reason: Option<String>,

    #[serde(flatten)]
    pub metrics: GenerationMetrics,
}

impl StreamChunk for GenerateResponse {
    fn is_done(&self) -> bool {
        self.done
    }
}
