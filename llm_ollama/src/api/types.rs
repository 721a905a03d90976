//! Building blocks shared by several endpoints.

use serde::{Deserialize, Serialize};

use crate::error::{OllamaError, OllamaResult};

/// Free-form model options (`temperature`, `num_ctx`, `seed`, ...).
pub type ModelOptions = serde_json::Map<String, serde_json::Value>;

/// Storage and architecture facts about a model, as reported by
/// `/api/tags`, `/api/ps` and `/api/show`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDetails {
    /// File format of the weights, e.g. `gguf`.
    #[serde(default)]
    pub format: String,

    /// Architecture family, e.g. `llama`.
    #[serde(default)]
    pub family: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub families: Option<Vec<String>>,

    /// Human readable parameter count, e.g. `8.0B`.
    #[serde(default)]
    pub parameter_size: String,

    /// e.g. `Q4_0`.
    #[serde(default)]
    pub quantization_level: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_model: Option<String>,
}

/// Shape constraint for model output: the string `"json"` or a JSON schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseFormat {
    Named(String),
    Schema(serde_json::Map<String, serde_json::Value>),
}

impl ResponseFormat {
    pub fn json() -> Self {
        Self::Named("json".to_string())
    }

    /// An empty name means "no format" and is left out of the request.
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Named(name) if name.is_empty())
    }

    pub(crate) fn validate(&self) -> OllamaResult<()> {
        match self {
            Self::Named(name) if !name.is_empty() && name.trim().is_empty() => {
                Err(OllamaError::invalid_request(
                    "format",
                    "must be a format name or a JSON schema object",
                ))
            }
            Self::Schema(schema) if schema.is_empty() => Err(OllamaError::invalid_request(
                "format",
                "schema object must not be empty",
            )),
            _ => Ok(()),
        }
    }
}

/// `skip_serializing_if` for request `format` fields.
pub(crate) fn format_is_unset(format: &Option<ResponseFormat>) -> bool {
    format.as_ref().is_none_or(ResponseFormat::is_unset)
}

impl From<&str> for ResponseFormat {
    fn from(s: &str) -> Self {
        Self::Named(s.to_string())
    }
}

impl From<String> for ResponseFormat {
    fn from(s: String) -> Self {
        Self::Named(s)
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for ResponseFormat {
    fn from(schema: serde_json::Map<String, serde_json::Value>) -> Self {
        Self::Schema(schema)
    }
}

impl TryFrom<serde_json::Value> for ResponseFormat {
    type Error = OllamaError;

    /// Only strings and objects are meaningful formats.
    fn try_from(value: serde_json::Value) -> OllamaResult<Self> {
        match value {
            serde_json::Value::String(s) => Ok(Self::Named(s)),
            serde_json::Value::Object(map) => Ok(Self::Schema(map)),
            other => Err(OllamaError::invalid_request(
                "format",
                format!("must be a string or an object, got `{other}`"),
            )),
        }
    }
}

/// How long the server keeps the model loaded after the request:
/// a duration string (`"10m"`, `"-1"`) or a number of seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeepAlive {
    Duration(String),
    Seconds(i64),
}

impl From<&str> for KeepAlive {
    fn from(s: &str) -> Self {
        Self::Duration(s.to_string())
    }
}

impl From<String> for KeepAlive {
    fn from(s: String) -> Self {
        Self::Duration(s)
    }
}

impl From<i64> for KeepAlive {
    fn from(secs: i64) -> Self {
        Self::Seconds(secs)
    }
}

impl From<std::time::Duration> for KeepAlive {
    fn from(d: std::time::Duration) -> Self {
        Self::Seconds(i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
    }
}

/// Reasoning switch for thinking-capable models.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Think {
    Enabled(bool),
    Level(ThinkLevel),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThinkLevel {
    High,
    Medium,
    Low,
}

impl From<bool> for Think {
    fn from(enabled: bool) -> Self {
        Self::Enabled(enabled)
    }
}

impl From<ThinkLevel> for Think {
    fn from(level: ThinkLevel) -> Self {
        Self::Level(level)
    }
}

/// Timing and token counters attached to the final inference chunk.
/// Durations are nanoseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_duration: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_eval_duration: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_duration: Option<u64>,
}

impl GenerationMetrics {
    /// Generated tokens per second, if both counters were reported.
    pub fn tokens_per_second(&self) -> Option<f64> {
        match (self.eval_count, self.eval_duration) {
            (Some(count), Some(nanos)) if nanos > 0 => Some(count as f64 / (nanos as f64 / 1e9)),
            _ => None,
        }
    }
}

/// Summary of a model-lifecycle call: every `status` string the server
/// streamed, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResult {
    pub status_messages: Vec<String>,
}

impl StatusResult {
    /// `true` when the final message is the server's `"success"`.
    pub fn succeeded(&self) -> bool {
        self.status_messages.last().is_some_and(|s| s == "success")
    }

    pub fn last_status(&self) -> Option<&str> {
        self.status_messages.last().map(String::as_str)
    }
}

impl From<Vec<String>> for StatusResult {
    fn from(status_messages: Vec<String>) -> Self {
        Self { status_messages }
    }
}
