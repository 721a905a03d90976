use serde::{Deserialize, Serialize};

use crate::{OllamaClient, error::OllamaResult, transport::TransportExt};

impl OllamaClient {
    /// Version of the running server. Doubles as a cheap liveness probe.
    pub fn version(&self) -> OllamaResult<Version> {
        self.transport.get("/api/version").map_err(Into::into)
    }
}

/// Response body of **`GET /api/version`**.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_fetched() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/api/version")
            .with_status(200)
            .with_body(r#"{"version":"0.6.2"}"#)
            .create();

        let client = OllamaClient::for_mock(&server);
        let version = client.version().unwrap();
        assert_eq!(version.version, "0.6.2");
        assert_eq!(version.build_time, None);
        mock.assert();
    }

    #[test]
    fn undecodable_body_is_a_serde_error() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/api/version")
            .with_status(200)
            .with_body("<html>proxy</html>")
            .create();

        let client = OllamaClient::for_mock(&server);
        let err = client.version().unwrap_err();
        assert!(matches!(
            err,
            crate::OllamaError::Client(crate::transport::ClientError::Serde(_))
        ));
    }
}
