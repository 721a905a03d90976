use std::path::PathBuf;

use tracing_subscriber::{Layer, layer::SubscriberExt};

use crate::error::{OllamaError, OllamaResult};

/// Opt-in tracing subscriber for applications that do not install their own.
///
/// The client only *emits* `tracing` events; nothing is printed until a
/// subscriber exists. [`LoggingConfig::init`] installs one globally: pretty
/// terminal output on stderr plus, when [`log_dir`](Self::log_dir) is set,
/// an hourly-rotated plain-text file keeping the six most recent files.
#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: tracing::Level,
    pub logging_enabled: bool,
    pub logger_name: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: tracing::Level::INFO,
            logging_enabled: true,
            logger_name: "llm_ollama".to_string(),
            log_dir: None,
        }
    }
}

impl LoggingConfig {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn logging_enabled(mut self, enabled: bool) -> Self {
        self.logging_enabled = enabled;
        self
    }

    pub fn logger_name<S: Into<String>>(mut self, logger_name: S) -> Self {
        self.logger_name = logger_name.into();
        self
    }

    /// Also write logs to rotating files in `dir` (created if missing).
    pub fn log_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    /// Use TRACE for purely "I am here!" logs, such as a stream finishing.
    pub fn log_level_trace(mut self) -> Self {
        self.level = tracing::Level::TRACE;
        self
    }

    /// Use DEBUG to see every request line the client sends.
    pub fn log_level_debug(mut self) -> Self {
        self.level = tracing::Level::DEBUG;
        self
    }

    pub fn log_level_info(mut self) -> Self {
        self.level = tracing::Level::INFO;
        self
    }

    /// WARN surfaces failed requests and truncated status streams.
    pub fn log_level_warn(mut self) -> Self {
        self.level = tracing::Level::WARN;
        self
    }

    pub fn log_level_error(mut self) -> Self {
        self.level = tracing::Level::ERROR;
        self
    }

    /// Installs the subscriber as the process-wide default.
    ///
    /// A no-op when logging is disabled. Fails with
    /// [`OllamaError::InvalidConfig`] if a global subscriber already exists.
    pub fn init(&self) -> OllamaResult<()> {
        if !self.logging_enabled {
            return Ok(());
        }

        let filter = tracing_subscriber::EnvFilter::builder()
            .with_default_directive(self.level.into())
            .from_env_lossy();

        let file_layer = match &self.log_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)
                    .map_err(|e| OllamaError::file_system("create log directory", dir, e))?;
                let file_appender = tracing_appender::rolling::RollingFileAppender::builder()
                    .rotation(tracing_appender::rolling::Rotation::HOURLY)
                    .max_log_files(6)
                    .filename_prefix(&self.logger_name)
                    .filename_suffix("log")
                    .build(dir)
                    .map_err(|e| OllamaError::invalid_config("log_dir", e.to_string()))?;
                Some(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false) // Disable ANSI codes for file output
                        .with_writer(file_appender)
                        .boxed(),
                )
            }
            None => None,
        };

        let terminal_layer = tracing_subscriber::fmt::layer()
            .pretty()
            .with_writer(std::io::stderr);

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(terminal_layer);

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| OllamaError::invalid_config("logging", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    fn builder_style_setters() {
        let config = LoggingConfig::new()
            .logger_name("ollama_app")
            .log_level_debug()
            .log_dir("/tmp/ollama-logs");
        assert_eq!(config.level, tracing::Level::DEBUG);
        assert_eq!(config.logger_name, "ollama_app");
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/ollama-logs")));
    }

    #[test]
    fn disabled_logging_installs_nothing() {
        assert!(LoggingConfig::new().logging_enabled(false).init().is_ok());
    }

    #[test]
    #[serial]
    fn second_global_install_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig::new().log_dir(dir.path());
        // Whichever call installs first, a subscriber exists afterwards.
        let _ = config.init();
        let err = config.init().unwrap_err();
        assert!(matches!(err, OllamaError::InvalidConfig { field: "logging", .. }));
        assert!(dir.path().exists());
    }
}
