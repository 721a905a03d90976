use serde::Serialize;

use crate::{
    OllamaClient,
    api::types::StatusResult,
    error::{OllamaResult, require_non_empty},
    transport::Verb,
};

impl OllamaClient {
    /// Removes a local model and any layers no other model references.
    pub fn delete_model(&self, model: &str) -> OllamaResult<StatusResult> {
        require_non_empty("model", model)?;
        crate::debug!(model, "delete");
        self.status_stream(Verb::Delete, "/api/delete", &DeleteRequest { model }, |_| {})
            .map(StatusResult::from)
    }
}

#[derive(Debug, Serialize)]
struct DeleteRequest<'a> {
    model: &'a str,
}
