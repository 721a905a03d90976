use serde::Serialize;

use crate::{
    OllamaClient,
    api::types::StatusResult,
    error::{OllamaResult, require_non_empty},
    transport::Verb,
};

impl OllamaClient {
    /// Creates `destination` as a copy of the local model `source`.
    pub fn copy_model(&self, source: &str, destination: &str) -> OllamaResult<StatusResult> {
        require_non_empty("source", source)?;
        require_non_empty("destination", destination)?;
        crate::debug!(source, destination, "copy");
        self.status_stream(
            Verb::Post,
            "/api/copy",
            &CopyRequest {
                source,
                destination,
            },
            |_| {},
        )
        .map(StatusResult::from)
    }
}

#[derive(Debug, Serialize)]
struct CopyRequest<'a> {
    source: &'a str,
    destination: &'a str,
}
