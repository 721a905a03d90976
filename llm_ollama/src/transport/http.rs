//! Transport – HTTP
//! ================
//!
//! Thin wrapper around [`ureq`] implementing [`Transport`] for a server
//! reachable over plain HTTP(S).
//!
//! * **One agent per client** – the [`ureq::Agent`] owns the connection pool,
//!   so every request made through one [`HttpTransport`] reuses sockets.
//! * **Global timeout** – the configured limit covers the *entire* exchange
//!   (connect + write + read of the full body), streamed bodies included.
//! * **Status codes are data** – the agent never turns 4xx/5xx into errors
//!   itself; [`HttpTransport`] reads the body and maps it to
//!   [`ClientError::Remote`] so the server's own message survives.

use std::{
    io::{self, Read},
    time::Duration,
};

use ureq::{Agent, Body, SendBody, http::Response};
use url::Url;

pub use super::Transport;
use super::{BodyReader, Verb, error::*};

/// Upper bound on how much of a failed *streamed* response is kept for the
/// error message. Streams can be long; only the head is useful.
pub const STREAM_ERROR_BODY_LIMIT: u64 = 512;

#[derive(Debug)]
pub struct HttpTransport {
    /// Underlying *ureq* connection-pool and HTTP state-machine.
    agent: Agent,
    /// Every request path is resolved against this URL.
    base_url: Url,
    /// Reported back in [`ClientError::Timeout`].
    timeout: Duration,
    /// Sent as the `User-Agent` header on every request.
    user_agent: String,
}

impl HttpTransport {
    pub fn new(base_url: Url, timeout: Duration, user_agent: impl Into<String>) -> Result<Self> {
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(ClientError::Setup {
                reason: format!("base URL `{base_url}` must be an http(s) URL"),
            });
        }
        if timeout.is_zero() {
            return Err(ClientError::Setup {
                reason: "timeout must be greater than zero".to_string(),
            });
        }

        let agent = Agent::new_with_config(
            Agent::config_builder()
                .timeout_global(Some(timeout))
                .http_status_as_error(false)
                .build(),
        );

        let transport = Self {
            agent,
            base_url,
            timeout,
            user_agent: user_agent.into(),
        };
        crate::trace!("Transport created: {transport}");
        Ok(transport)
    }

    /// Resolves `path` (which must start with `/`) against the base URL.
    /// An absolute path replaces whatever path the base URL carries.
    fn url(&self, path: &str) -> Result<Url> {
        debug_assert!(path.starts_with('/'));
        self.base_url.join(path).map_err(|e| ClientError::Setup {
            reason: format!("cannot resolve `{path}` against `{}`: {e}", self.base_url),
        })
    }

    /// Sends `body` as JSON on `POST` and `DELETE`; `GET` and `HEAD` carry none.
    fn send(&self, verb: Verb, path: &str, body: &[u8]) -> Result<Response<Body>> {
        let url = self.url(path)?;
        let url = url.as_str();
        let agent_header = self.user_agent.as_str();
        crate::debug!(%verb, url, "sending request");

        let response = match verb {
            Verb::Get => self.agent.get(url).header("User-Agent", agent_header).call(),

            Verb::Head => self.agent.head(url).header("User-Agent", agent_header).call(),

            Verb::Post => self
                .agent
                .post(url)
                .header("User-Agent", agent_header)
                .content_type("application/json")
                .send(body),

            // The API reads a JSON body on DELETE, which ureq only sends on request.
            Verb::Delete => self
                .agent
                .delete(url)
                .header("User-Agent", agent_header)
                .force_send_body()
                .content_type("application/json")
                .send(body),
        };

        response.map_err(|e| self.map_error(e))
    }

    /// Passes 2xx responses through; turns anything else into
    /// [`ClientError::Remote`], reading at most `limit` bytes of the body.
    fn checked(&self, response: Response<Body>, limit: Option<u64>) -> Result<Response<Body>> {
        let code = response.status().as_u16();
        if (200..300).contains(&code) {
            return Ok(response);
        }

        let mut body = Vec::new();
        let reader = body_reader(response);
        let read = match limit {
            Some(limit) => reader.take(limit).read_to_end(&mut body),
            None => {
                let mut reader = reader;
                reader.read_to_end(&mut body)
            }
        };
        read.map_err(|e| ClientError::from_body_io(e, self.timeout))?;
        crate::warn!(code, "request failed");
        Err(ClientError::remote(code, &body))
    }

    fn read_all(&self, response: Response<Body>) -> Result<Vec<u8>> {
        let mut body = Vec::new();
        body_reader(response)
            .read_to_end(&mut body)
            .map_err(|e| ClientError::from_body_io(e, self.timeout))?;
        Ok(body)
    }

    fn map_error(&self, err: ureq::Error) -> ClientError {
        match err {
            ureq::Error::StatusCode(code) => ClientError::Remote {
                code,
                message: format!("HTTP {code}"),
            },

            ureq::Error::Timeout(_) => ClientError::Timeout(self.timeout),

            ureq::Error::Io(e) => ClientError::Io(e),

            ureq::Error::Protocol(p) => ClientError::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("protocol error: {p}"),
            )),

            ureq::Error::BadUri(u) => ClientError::Setup {
                reason: format!("bad URI: {u}"),
            },

            other => ClientError::Io(io::Error::other(format!("ureq error: {other}"))),
        }
    }
}

/// Body of `response` as a reader whose timed-out reads report
/// [`io::ErrorKind::TimedOut`].
fn body_reader(response: Response<Body>) -> TimeoutAwareReader<ureq::BodyReader<'static>> {
    TimeoutAwareReader(response.into_body().into_reader())
}

/// ureq surfaces a body read that hits the global timeout as an
/// `ErrorKind::Other` wrapping [`ureq::Error::Timeout`]; this reader gives
/// it the `TimedOut` kind so layers above can recognise it.
struct TimeoutAwareReader<R>(R);

impl<R: Read> Read for TimeoutAwareReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf).map_err(normalize_timeout)
    }
}

fn normalize_timeout(err: io::Error) -> io::Error {
    let timed_out = err
        .get_ref()
        .and_then(|inner| inner.downcast_ref::<ureq::Error>())
        .is_some_and(|inner| matches!(inner, ureq::Error::Timeout(_)));
    if timed_out {
        io::Error::new(io::ErrorKind::TimedOut, err)
    } else {
        err
    }
}

impl std::fmt::Display for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HttpTransport({})", self.base_url)
    }
}

/* ───────────────────────── Transport impl ───────────────────────── */

impl Transport for HttpTransport {
    fn get_raw(&self, path: &str) -> Result<Vec<u8>> {
        let response = self.send(Verb::Get, path, &[])?;
        self.read_all(self.checked(response, None)?)
    }

    fn post_raw(&self, path: &str, body: &[u8]) -> Result<Vec<u8>> {
        let response = self.send(Verb::Post, path, body)?;
        self.read_all(self.checked(response, None)?)
    }

    fn stream_raw(&self, verb: Verb, path: &str, body: &[u8]) -> Result<BodyReader> {
        let response = self.send(verb, path, body)?;
        let response = self.checked(response, Some(STREAM_ERROR_BODY_LIMIT))?;
        Ok(Box::new(body_reader(response)))
    }

    fn head(&self, path: &str) -> Result<u16> {
        let response = self.send(Verb::Head, path, &[])?;
        Ok(response.status().as_u16())
    }

    fn upload(&self, path: &str, content: &mut dyn Read) -> Result<(u16, Vec<u8>)> {
        let url = self.url(path)?;
        crate::debug!(url = url.as_str(), "uploading octet stream");
        let response = self
            .agent
            .post(url.as_str())
            .header("User-Agent", self.user_agent.as_str())
            .content_type("application/octet-stream")
            .send(SendBody::from_reader(content))
            .map_err(|e| self.map_error(e))?;
        let code = response.status().as_u16();
        Ok((code, self.read_all(response)?))
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }
}
