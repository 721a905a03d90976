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
    /// Next assistant message for a conversation, in one body.
    /// `request.stream` is overridden to `false`.
    pub fn chat(&self, request: &ChatRequest) -> OllamaResult<ChatResponse> {
        request.validate()?;
        crate::debug!(model = %request.model, messages = request.messages.len(), "chat");
        let body = ChatRequest {
            stream: Some(false),
            ..request.clone()
        };
        self.transport.post("/api/chat", &body).map_err(Into::into)
    }

    /// Next assistant message, delivered as content fragments.
    pub fn chat_stream(&self, request: &ChatRequest) -> OllamaResult<ResponseStream<ChatResponse>> {
        request.validate()?;
        crate::debug!(model = %request.model, messages = request.messages.len(), "chat (streaming)");
        let body = ChatRequest {
            stream: Some(true),
            ..request.clone()
        };
        let reader = self.transport.stream(Verb::Post, "/api/chat", &body)?;
        Ok(ResponseStream::new(reader).with_timeout(self.config().timeout))
    }
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    #[default]
    User,
    Assistant,
    Tool,
}

/// One turn of a conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,

    #[serde(default)]
    pub content: String,

    /// Base64-encoded images attached to this turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,

    /// Tool invocations requested by the assistant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking: Option<String>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Result of a tool call, fed back to the model.
    pub fn tool(content: impl Into<String>) -> Self {
        Self::new(Role::Tool, content)
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = Some(images);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub function: ToolCallFunction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallFunction {
    pub name: String,
    #[serde(default)]
    pub arguments: serde_json::Value,
}

/// Request body for **`POST /api/chat`**.
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[builder(derive(Debug, Clone), finish_fn(vis = "", name = build_internal))]
pub struct ChatRequest {
    #[builder(into)]
    pub model: String,

    /// Conversation so far, oldest first.
    pub messages: Vec<Message>,

    /// Function definitions (JSON schema) the model may call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<serde_json::Value>>,

    #[builder(into)]
    #[serde(default, skip_serializing_if = "crate::api::types::format_is_unset")]
    pub format: Option<ResponseFormat>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<ModelOptions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,

    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_alive: Option<KeepAlive>,

    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub think: Option<Think>,
}

impl ChatRequest {
    pub fn validate(&self) -> OllamaResult<()> {
        require_non_empty("model", &self.model)?;
        if self.messages.is_empty() {
            return Err(OllamaError::invalid_request(
                "messages",
                "a chat needs at least one message",
            ));
        }
        if let Some(format) = &self.format {
            format.validate()?;
        }
        Ok(())
    }
}

impl<S: chat_request_builder::IsComplete> ChatRequestBuilder<S> {
    pub fn build(self) -> OllamaResult<ChatRequest> {
        let req = self.build_internal();
        req.validate()?;
        Ok(req)
    }
}

/// Response body of **`POST /api/chat`**; also one chunk of its stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub model: String,

    pub created_at: DateTime<Utc>,

    /// The assistant's turn (a fragment of it when streaming).
    #[serde(default)]
    pub message: Message,

    pub done: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done_reason: Option<String>,

    #[serde(flatten)]
    pub metrics: GenerationMetrics,
}

impl StreamChunk for ChatResponse {
    fn is_done(&self) -> bool {
        self.done
    }
}
