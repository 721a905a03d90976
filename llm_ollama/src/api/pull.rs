use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{
    OllamaClient,
    api::types::StatusResult,
    error::{OllamaResult, require_non_empty},
    stream::StatusUpdate,
    transport::Verb,
};

/// Outcome of **`POST /api/pull`**: the status lines in arrival order.
pub type PullModelResult = StatusResult;

impl OllamaClient {
    /// Downloads `model` from the registry and waits for the transfer to end.
    pub fn pull_model(&self, model: &str) -> OllamaResult<PullModelResult> {
        self.pull_model_with_progress(&PullRequest::builder().model(model).build(), |_| {})
    }

    /// Like [`pull_model`](Self::pull_model), reporting every progress line
    /// to `on_update` as it arrives.
    pub fn pull_model_with_progress<F>(
        &self,
        request: &PullRequest,
        on_update: F,
    ) -> OllamaResult<PullModelResult>
    where
        F: FnMut(&StatusUpdate),
    {
        require_non_empty("model", &request.model)?;
        crate::debug!(model = %request.model, "pull");
        self.status_stream(Verb::Post, "/api/pull", request, on_update)
            .map(StatusResult::from)
    }
}

/// Request body for **`POST /api/pull`**.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[builder(derive(Debug, Clone))]
pub struct PullRequest {
    #[builder(into)]
    pub model: String,

    /// Allow plain-http or self-signed registries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,
}
