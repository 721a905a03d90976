//! Transport layer
//! ===============
//!
//! The [`Transport`] trait is the seam between the typed endpoint helpers in
//! [`crate::api`] and the wire. It deals only in raw bytes and status codes;
//! JSON (de)serialisation lives in [`TransportExt`] so every implementation
//! gets it for free.

pub mod error;
pub mod http;

use std::io::Read;

pub use error::*;

/// Unread body of a successful response, consumed incrementally by the
/// JSON-lines decoders in [`crate::stream`].
pub type BodyReader = Box<dyn Read + Send>;

/// HTTP verbs used by the server API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Head,
    Post,
    Delete,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Head => "HEAD",
            Verb::Post => "POST",
            Verb::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait Transport: std::fmt::Display + std::fmt::Debug + Send + Sync {
    /// `GET` returning the full body of a 2xx response.
    fn get_raw(&self, path: &str) -> Result<Vec<u8>>;

    /// `POST` with a JSON body, returning the full body of a 2xx response.
    fn post_raw(&self, path: &str, body: &[u8]) -> Result<Vec<u8>>;

    /// Sends a JSON body and hands back the unread body of a 2xx response.
    fn stream_raw(&self, verb: Verb, path: &str, body: &[u8]) -> Result<BodyReader>;

    /// `HEAD` returning the status code, whatever it is.
    fn head(&self, path: &str) -> Result<u16>;

    /// `POST` of raw octets. Returns status and body without judging the status.
    fn upload(&self, path: &str, content: &mut dyn Read) -> Result<(u16, Vec<u8>)>;

    /// Base every request path is resolved against.
    fn base_url(&self) -> &url::Url;
}

pub trait TransportExt: Transport {
    fn get<R: serde::de::DeserializeOwned>(&self, path: &str) -> Result<R> {
        let bytes = self.get_raw(path)?;
        serde_json::from_slice(&bytes).map_err(|e| e.into())
    }

    fn post<B: serde::Serialize, R: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R> {
        let body_bytes = serde_json::to_vec(body)?;
        let response_bytes = self.post_raw(path, &body_bytes)?;
        serde_json::from_slice(&response_bytes).map_err(|e| e.into())
    }

    fn stream<B: serde::Serialize>(&self, verb: Verb, path: &str, body: &B) -> Result<BodyReader> {
        let body_bytes = serde_json::to_vec(body)?;
        self.stream_raw(verb, path, &body_bytes)
    }
}

impl<T: Transport + ?Sized> TransportExt for T {}
