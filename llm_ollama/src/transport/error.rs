#[derive(serde::Serialize, Debug, thiserror::Error)]
pub enum ClientError {
    #[error("I/O error: {0}")]
    #[serde(serialize_with = "crate::error::std_io_error_to_string")]
    Io(#[from] std::io::Error),

    #[error("timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("serialization error: {0}")]
    #[serde(serialize_with = "crate::error::std_io_error_to_string")]
    Serde(#[from] serde_json::Error),

    #[error("remote error {code}: {message}")]
    Remote { code: u16, message: String },

    #[error("client setup error: {reason}")]
    Setup { reason: String },
}

pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    /// Builds a [`ClientError::Remote`] from a failed response body.
    ///
    /// The server answers failures with `{"error": "..."}`; that message is
    /// preferred, otherwise the (lossy) body text, otherwise the bare code.
    pub(crate) fn remote(code: u16, body: &[u8]) -> Self {
        let message = error_message(body).unwrap_or_else(|| {
            let text = String::from_utf8_lossy(body).trim().to_string();
            if text.is_empty() {
                format!("HTTP {code}")
            } else {
                text
            }
        });
        ClientError::Remote { code, message }
    }

    /// Failure while reading a response body. A read that ran out of time
    /// becomes [`ClientError::Timeout`] with the configured `limit`.
    pub(crate) fn from_body_io(err: std::io::Error, limit: std::time::Duration) -> Self {
        ClientError::Io(err).timed_out(limit)
    }

    /// Decode failure of a JSON-lines body. I/O failures underneath the
    /// decoder stay [`ClientError::Io`]; only malformed JSON is `Serde`.
    pub(crate) fn from_stream(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Io => ClientError::Io(err.into()),
            _ => ClientError::Serde(err),
        }
    }

    /// Rewrites a timed-out read into [`ClientError::Timeout`]; anything
    /// else passes through.
    pub(crate) fn timed_out(self, limit: std::time::Duration) -> Self {
        match self {
            ClientError::Io(e) if e.kind() == std::io::ErrorKind::TimedOut => {
                ClientError::Timeout(limit)
            }
            other => other,
        }
    }
}

/// Extracts the `error` string of a JSON error object, if `body` is one.
pub(crate) fn error_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    error_field(&value)
}

pub(crate) fn error_field(value: &serde_json::Value) -> Option<String> {
    value.get("error")?.as_str().map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_prefers_json_error_field() {
        let err = ClientError::remote(400, br#"{"error":"model is required"}"#);
        match err {
            ClientError::Remote { code, message } => {
                assert_eq!(code, 400);
                assert_eq!(message, "model is required");
            }
            other => panic!("expected Remote, got {other:?}"),
        }
    }

    #[test]
    fn remote_falls_back_to_text_then_code() {
        let text = ClientError::remote(502, b"  bad gateway\n");
        assert_eq!(text.to_string(), "remote error 502: bad gateway");

        let empty = ClientError::remote(500, b"");
        assert_eq!(empty.to_string(), "remote error 500: HTTP 500");
    }

    #[test]
    fn error_field_ignores_non_string_values() {
        assert_eq!(error_message(br#"{"error":{"code":1}}"#), None);
        assert_eq!(error_message(b"not json"), None);
    }

    #[test]
    fn timed_out_reads_become_timeouts() {
        let limit = std::time::Duration::from_secs(3);
        let stalled = std::io::Error::new(std::io::ErrorKind::TimedOut, "stalled");
        assert!(matches!(
            ClientError::from_body_io(stalled, limit),
            ClientError::Timeout(d) if d == limit
        ));

        let reset = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        assert!(matches!(ClientError::from_body_io(reset, limit), ClientError::Io(_)));
    }

    #[test]
    fn stream_decode_errors_split_io_from_syntax() {
        struct Stalls;
        impl std::io::Read for Stalls {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::TimedOut, "stalled"))
            }
        }

        let io_err = serde_json::from_reader::<_, serde_json::Value>(Stalls).unwrap_err();
        match ClientError::from_stream(io_err) {
            ClientError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::TimedOut),
            other => panic!("expected Io, got {other:?}"),
        }

        let syntax = serde_json::from_slice::<serde_json::Value>(b"{\"status\":").unwrap_err();
        assert!(matches!(ClientError::from_stream(syntax), ClientError::Serde(_)));
    }
}
