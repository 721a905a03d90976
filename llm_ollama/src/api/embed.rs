use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{
    OllamaClient,
    api::types::{KeepAlive, ModelOptions},
    error::{OllamaError, OllamaResult, require_non_empty},
    transport::TransportExt,
};

impl OllamaClient {
    /// Embedding vectors for one or more inputs, one vector per input.
    pub fn embed(&self, request: &EmbedRequest) -> OllamaResult<EmbedResponse> {
        request.validate()?;
        crate::debug!(model = %request.model, inputs = request.input.len(), "embed");
        let res: EmbedResponse = self.transport.post("/api/embed", request)?;
        if res.embeddings.len() != request.input.len() {
            crate::warn!(
                expected = request.input.len(),
                got = res.embeddings.len(),
                "embedding count differs from input count"
            );
        }
        Ok(res)
    }
}

/// Request body for **`POST /api/embed`**.
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[builder(derive(Debug, Clone), finish_fn(vis = "", name = build_internal))]
pub struct EmbedRequest {
    #[builder(into)]
    pub model: String,

    /// A single string *or* a list of strings to embed.
    #[builder(into)]
    pub input: EmbedInput,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<ModelOptions>,

    /// Cut inputs that exceed the context length instead of failing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truncate: Option<bool>,

    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_alive: Option<KeepAlive>,
}

impl EmbedRequest {
    pub fn validate(&self) -> OllamaResult<()> {
        require_non_empty("model", &self.model)?;
        match &self.input {
            EmbedInput::Single(s) if s.is_empty() => Err(OllamaError::invalid_request(
                "input",
                "`input` must contain a non-empty string or a non-empty array of non-empty strings",
            )),
            EmbedInput::Batch(v) if v.is_empty() || v.iter().any(|s| s.is_empty()) => {
                Err(OllamaError::invalid_request(
                    "input",
                    "`input` must contain a non-empty string or a non-empty array of non-empty strings",
                ))
            }
            _ => Ok(()),
        }
    }
}

impl<S: embed_request_builder::IsComplete> EmbedRequestBuilder<S> {
    pub fn build(self) -> OllamaResult<EmbedRequest> {
        let req = self.build_internal();
        req.validate()?;
        Ok(req)
    }
}

/// A single string *or* a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbedInput {
    Single(String),
    Batch(Vec<String>),
}

impl EmbedInput {
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Batch(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// --- single conversions ---
impl From<String> for EmbedInput {
    fn from(s: String) -> Self {
        Self::Single(s)
    }
}
impl From<&str> for EmbedInput {
    fn from(s: &str) -> Self {
        Self::Single(s.into())
    }
}
impl From<&String> for EmbedInput {
    fn from(s: &String) -> Self {
        Self::Single(s.clone())
    }
}

// --- batch conversions ---
impl From<Vec<String>> for EmbedInput {
    fn from(v: Vec<String>) -> Self {
        Self::Batch(v)
    }
}
impl From<Vec<&str>> for EmbedInput {
    fn from(v: Vec<&str>) -> Self {
        Self::Batch(v.into_iter().map(str::to_owned).collect())
    }
}
impl From<&[&str]> for EmbedInput {
    fn from(v: &[&str]) -> Self {
        Self::Batch(v.iter().map(|s| (*s).to_owned()).collect())
    }
}
impl From<&[String]> for EmbedInput {
    fn from(v: &[String]) -> Self {
        Self::Batch(v.to_vec())
    }
}

/// Response body for **`POST /api/embed`**.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedResponse {
    pub model: String,

    /// One vector per input, in input order.
    pub embeddings: Vec<Vec<f32>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_duration: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<u64>,
}

impl EmbedResponse {
    /// Width of the vectors, if any were returned.
    pub fn dimensions(&self) -> Option<usize> {
        self.embeddings.first().map(Vec::len)
    }
}
