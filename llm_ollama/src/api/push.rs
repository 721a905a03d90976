use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{
    OllamaClient,
    api::types::StatusResult,
    error::{OllamaResult, require_non_empty},
    stream::StatusUpdate,
    transport::Verb,
};

/// Outcome of **`POST /api/push`**.
pub type PushModelResult = StatusResult;

impl OllamaClient {
    /// Uploads `model` (`namespace/name:tag`) to its registry.
    pub fn push_model(&self, model: &str) -> OllamaResult<PushModelResult> {
        self.push_model_with_progress(&PushRequest::builder().model(model).build(), |_| {})
    }

    pub fn push_model_with_progress<F>(
        &self,
        request: &PushRequest,
        on_update: F,
    ) -> OllamaResult<PushModelResult>
    where
        F: FnMut(&StatusUpdate),
    {
        require_non_empty("model", &request.model)?;
        crate::debug!(model = %request.model, "push");
        self.status_stream(Verb::Post, "/api/push", request, on_update)
            .map(StatusResult::from)
    }
}

/// Request body for **`POST /api/push`**.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[builder(derive(Debug, Clone))]
pub struct PushRequest {
    #[builder(into)]
    pub model: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,
}
