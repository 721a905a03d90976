use std::time::Duration;

use bon::Builder;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{OllamaError, OllamaResult};

/// Address used when nothing else is configured.
pub const DEFAULT_HOST: &str = "http://127.0.0.1:11434";

/// Port assumed for plain-`http` hosts given without one.
pub const DEFAULT_PORT: u16 = 11434;

/// Whole-request timeout, streamed bodies included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Upper bound on status objects accepted from a lifecycle stream.
pub const DEFAULT_MAX_STATUS_MESSAGES: usize = 1000;

pub const DEFAULT_USER_AGENT: &str = concat!("llm_ollama/", env!("CARGO_PKG_VERSION"));

pub const HOST_ENV_VAR: &str = "OLLAMA_HOST";
pub const TIMEOUT_ENV_VAR: &str = "OLLAMA_TIMEOUT_SECS";

/// Connection settings for an [`OllamaClient`](crate::OllamaClient).
///
/// ```
/// use std::time::Duration;
/// use llm_ollama::OllamaConfig;
///
/// let config = OllamaConfig::builder()
///     .host("http://gpu-box:11434")
///     .timeout(Duration::from_secs(30))
///     .build();
/// assert_eq!(config.base_url().unwrap().as_str(), "http://gpu-box:11434/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Server address: a full URL or a bare `host[:port]`, as accepted by
    /// the server's own `OLLAMA_HOST` variable.
    #[builder(default = DEFAULT_HOST.to_string(), into)]
    pub host: String,

    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,

    #[builder(default = DEFAULT_MAX_STATUS_MESSAGES)]
    pub max_status_messages: usize,

    #[builder(default = DEFAULT_USER_AGENT.to_string(), into)]
    pub user_agent: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl OllamaConfig {
    /// Defaults overridden by `OLLAMA_HOST` and `OLLAMA_TIMEOUT_SECS`, read
    /// from the process environment or a `.env` file.
    pub fn from_env() -> OllamaResult<Self> {
        dotenvy::dotenv().ok();
        let mut config = Self::default();

        if let Ok(host) = dotenvy::var(HOST_ENV_VAR) {
            crate::trace!("Using {HOST_ENV_VAR} from environment");
            parse_host(&host)?;
            config.host = host;
        }

        if let Ok(secs) = dotenvy::var(TIMEOUT_ENV_VAR) {
            let secs: u64 = secs.trim().parse().map_err(|e| {
                OllamaError::invalid_config("timeout", format!("{TIMEOUT_ENV_VAR}=`{secs}`: {e}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    /// The validated base URL every request path is resolved against.
    pub fn base_url(&self) -> OllamaResult<Url> {
        parse_host(&self.host)
    }

    pub fn validate(&self) -> OllamaResult<()> {
        self.base_url()?;
        if self.timeout.is_zero() {
            return Err(OllamaError::invalid_config("timeout", "must be greater than zero"));
        }
        if self.max_status_messages == 0 {
            return Err(OllamaError::invalid_config(
                "max_status_messages",
                "must allow at least one message",
            ));
        }
        Ok(())
    }
}

/// Interprets a host setting the way the server does:
///
/// * blank → [`DEFAULT_HOST`],
/// * no scheme → `http://`,
/// * plain `http` without an explicit port → [`DEFAULT_PORT`].
pub fn parse_host(raw: &str) -> OllamaResult<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return parse_host(DEFAULT_HOST);
    }

    let (with_scheme, rest) = match raw.split_once("://") {
        Some((_, rest)) => (raw.to_string(), rest),
        None => (format!("http://{raw}"), raw),
    };

    let mut url = Url::parse(&with_scheme)
        .map_err(|e| OllamaError::invalid_config("host", format!("`{raw}`: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(OllamaError::invalid_config(
            "host",
            format!("`{raw}`: scheme must be http or https"),
        ));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(OllamaError::invalid_config("host", format!("`{raw}`: missing host name")));
    }

    if url.scheme() == "http" && !has_explicit_port(rest) {
        url.set_port(Some(DEFAULT_PORT))
            .map_err(|_| OllamaError::invalid_config("host", format!("`{raw}`: cannot set port")))?;
    }
    Ok(url)
}

/// `true` when the authority part of `rest` (everything after `scheme://`)
/// ends in `:<digits>`. Handles bracketed IPv6 literals.
fn has_explicit_port(rest: &str) -> bool {
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host_port = authority.rsplit('@').next().unwrap_or_default();
    host_port
        .rsplit_once(':')
        .is_some_and(|(host, port)| {
            !port.is_empty()
                && port.bytes().all(|b| b.is_ascii_digit())
                && (!host.starts_with('[') || host.ends_with(']'))
        })
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    fn defaults() {
        let config = OllamaConfig::default();
        assert_eq!(config.base_url().unwrap().as_str(), "http://127.0.0.1:11434/");
        assert_eq!(config.timeout, Duration::from_secs(300));
        assert_eq!(config.max_status_messages, 1000);
        assert!(config.user_agent.starts_with("llm_ollama/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn host_forms() {
        let cases = [
            ("", "http://127.0.0.1:11434/"),
            ("localhost", "http://localhost:11434/"),
            ("0.0.0.0:8080", "http://0.0.0.0:8080/"),
            ("http://example.com", "http://example.com:11434/"),
            ("https://example.com", "https://example.com/"),
            ("https://example.com:8443/", "https://example.com:8443/"),
            ("http://[::1]:9000", "http://[::1]:9000/"),
            ("[::1]", "http://[::1]:11434/"),
            ("http://example.com/ollama", "http://example.com:11434/ollama"),
        ];
        for (raw, expected) in cases {
            assert_eq!(parse_host(raw).unwrap().as_str(), expected, "host `{raw}`");
        }
    }

    #[test]
    fn rejects_bad_hosts() {
        for raw in ["ftp://example.com", "http://", "http://exa mple.com"] {
            let err = parse_host(raw).unwrap_err();
            assert!(
                matches!(err, OllamaError::InvalidConfig { field: "host", .. }),
                "host `{raw}` gave {err:?}"
            );
        }
    }

    #[test]
    fn validate_rejects_degenerate_limits() {
        let config = OllamaConfig::builder().timeout(Duration::ZERO).build();
        assert!(config.validate().is_err());

        let config = OllamaConfig::builder().max_status_messages(0).build();
        assert!(matches!(
            config.validate().unwrap_err(),
            OllamaError::InvalidConfig { field: "max_status_messages", .. }
        ));
    }

    #[test]
    #[serial]
    fn from_env_reads_host_and_timeout() {
        // SAFETY: env mutation is confined to #[serial] tests.
        unsafe {
            std::env::set_var(HOST_ENV_VAR, "gpu-box:9999");
            std::env::set_var(TIMEOUT_ENV_VAR, "42");
        }
        let config = OllamaConfig::from_env();
        unsafe {
            std::env::remove_var(HOST_ENV_VAR);
            std::env::remove_var(TIMEOUT_ENV_VAR);
        }

        let config = config.unwrap();
        assert_eq!(config.base_url().unwrap().as_str(), "http://gpu-box:9999/");
        assert_eq!(config.timeout, Duration::from_secs(42));
    }

    #[test]
    #[serial]
    fn from_env_rejects_malformed_timeout() {
        unsafe {
            std::env::set_var(TIMEOUT_ENV_VAR, "soon");
        }
        let result = OllamaConfig::from_env();
        unsafe {
            std::env::remove_var(TIMEOUT_ENV_VAR);
        }
        assert!(matches!(
            result.unwrap_err(),
            OllamaError::InvalidConfig { field: "timeout", .. }
        ));
    }
}
