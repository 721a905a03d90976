//! Client – Handle
//! ===============
//!
//! [`OllamaClient`] is the single entry point of the crate. It owns a boxed
//! [`Transport`] plus the [`OllamaConfig`] it was built from; every endpoint
//! lives in its own module under [`crate::api`] as an `impl OllamaClient`
//! block, so the handle itself stays small.
//!
//! All calls block the current thread for one HTTP exchange. The handle is
//! `Send + Sync`; share it behind an `Arc` to issue calls from many threads.

use std::time::Duration;

use serde::Serialize;
use url::Url;

use crate::{
    config::OllamaConfig,
    error::OllamaResult,
    stream::{StatusUpdate, decode_status_stream},
    transport::{Transport, TransportExt, Verb, http::HttpTransport},
};

#[derive(Debug)]
pub struct OllamaClient {
    /// Low-level transport bound to the server's base URL.
    pub(crate) transport: Box<dyn Transport>,
    config: OllamaConfig,
}

impl OllamaClient {
    /// Client for the server at `base_url` whose requests give up after
    /// `timeout` (connect through the last byte of the body).
    ///
    /// ```
    /// use std::time::Duration;
    /// use llm_ollama::OllamaClient;
    ///
    /// let client = OllamaClient::new("http://localhost:11434", Duration::from_secs(300)).unwrap();
    /// assert_eq!(client.base_url().as_str(), "http://localhost:11434/");
    /// ```
    pub fn new(base_url: &str, timeout: Duration) -> OllamaResult<Self> {
        Self::from_config(
            OllamaConfig::builder()
                .host(base_url)
                .timeout(timeout)
                .build(),
        )
    }

    pub fn from_config(config: OllamaConfig) -> OllamaResult<Self> {
        config.validate()?;
        let transport = HttpTransport::new(config.base_url()?, config.timeout, &config.user_agent)?;
        Ok(Self::with_transport(config, Box::new(transport)))
    }

    /// Client configured from `OLLAMA_HOST` / `OLLAMA_TIMEOUT_SECS`.
    pub fn from_env() -> OllamaResult<Self> {
        Self::from_config(OllamaConfig::from_env()?)
    }

    /// Client over a caller-supplied transport; `config` still governs the
    /// status-stream limit.
    pub fn with_transport(config: OllamaConfig, transport: Box<dyn Transport>) -> Self {
        let client = Self { transport, config };
        crate::trace!("Client created: {client}");
        client
    }

    pub fn base_url(&self) -> &Url {
        self.transport.base_url()
    }

    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }

    /// Sends `body` and drains the JSON-lines status stream of the answer.
    pub(crate) fn status_stream<B, F>(
        &self,
        verb: Verb,
        path: &str,
        body: &B,
        on_update: F,
    ) -> OllamaResult<Vec<String>>
    where
        B: Serialize,
        F: FnMut(&StatusUpdate),
    {
        let reader = self.transport.stream(verb, path, body)?;
        let messages = decode_status_stream(reader, self.config.max_status_messages, on_update)
            .map_err(|e| e.timed_out(self.config.timeout))?;
        crate::trace!(path, count = messages.len(), "status stream finished");
        Ok(messages)
    }
}

impl std::fmt::Display for OllamaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OllamaClient({})", self.transport)
    }
}

#[cfg(test)]
impl OllamaClient {
    /// Client pointed at a mock server, with a short timeout.
    pub(crate) fn for_mock(server: &mockito::ServerGuard) -> Self {
        Self::new(&server.url(), Duration::from_secs(10)).expect("mock server URL is valid")
    }
}
