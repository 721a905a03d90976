// top-level error for the public API

#[derive(serde::Serialize, Debug, thiserror::Error)]
pub enum OllamaError {
    #[error(transparent)]
    Client(#[from] crate::transport::error::ClientError),

    #[error("invalid request {field}: {reason}")]
    InvalidRequest { field: &'static str, reason: String },

    #[error("invalid config {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("status stream exceeded the maximum of {limit} messages")]
    StreamLimit { limit: usize },

    /// An `{"error": ...}` object delivered inside a 2xx JSON-lines stream.
    #[error("server reported an error mid-stream: {message}")]
    Stream { message: String },

    #[error("{operation} failed for '{path}'")]
    FileSystem {
        operation: &'static str,
        path: std::path::PathBuf,
        #[source]
        #[serde(serialize_with = "std_io_error_to_string")]
        source: std::io::Error,
    },
}

pub type OllamaResult<T> = std::result::Result<T, OllamaError>;

impl OllamaError {
    pub fn file_system(
        operation: &'static str,
        path: impl Into<std::path::PathBuf>,
        err: impl Into<std::io::Error>,
    ) -> Self {
        Self::FileSystem {
            operation,
            path: path.into(),
            source: err.into(),
        }
    }

    pub(crate) fn invalid_request(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            field,
            reason: reason.into(),
        }
    }

    /// Reports a transport read that ran out of time as
    /// [`ClientError::Timeout`]`(limit)`.
    pub(crate) fn timed_out(self, limit: std::time::Duration) -> Self {
        match self {
            Self::Client(e) => Self::Client(e.timed_out(limit)),
            other => other,
        }
    }

    pub(crate) fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }

    /// HTTP status of a failed request, when the failure came from the server.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Client(crate::transport::error::ClientError::Remote { code, .. }) => Some(*code),
            _ => None,
        }
    }
}

pub(crate) fn std_io_error_to_string<S>(e: &impl std::fmt::Display, s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    s.serialize_str(&e.to_string())
}

/// Rejects blank identifiers such as model names before a request is sent.
pub(crate) fn require_non_empty(field: &'static str, value: &str) -> OllamaResult<()> {
    if value.trim().is_empty() {
        return Err(OllamaError::invalid_request(field, "must not be empty"));
    }
    Ok(())
}
