// ABOUTME: Logging setup on top of tracing-subscriber.
// ABOUTME: RUST_LOG overrides the configured level; extra directives are appended.

use std::str::FromStr;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::TelemetryError;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Pretty,
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(TelemetryError::Format(other.to_string())),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
    pub directives: Vec<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new("info")
    }
}

impl LogConfig {
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            format: LogFormat::default(),
            directives: Vec::new(),
        }
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Add a filter directive such as `rolegate::authz=debug`.
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    /// Build the filter: `RUST_LOG` if set, else `level`, plus `directives`.
    pub fn filter(&self) -> Result<EnvFilter, TelemetryError> {
        let base = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(&self.level)
                .map_err(|e| TelemetryError::Filter(format!("{}: {e}", self.level)))?,
        };

        self.directives.iter().try_fold(base, |filter, directive| {
            let parsed = directive
                .parse()
                .map_err(|e| TelemetryError::Filter(format!("{directive}: {e}")))?;
            Ok(filter.add_directive(parsed))
        })
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn setup_logging(config: &LogConfig) -> Result<(), TelemetryError> {
    let filter = config.filter()?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init(),
        LogFormat::Compact => registry.with(fmt::layer().compact()).try_init(),
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
    };
    result.map_err(|e| TelemetryError::Init(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!(matches!(
            "xml".parse::<LogFormat>(),
            Err(TelemetryError::Format(ref f)) if f == "xml"
        ));
    }

    #[test]
    fn test_bad_directive_rejected() {
        let config = LogConfig::new("info").with_directive("rolegate=loud");
        assert!(matches!(config.filter(), Err(TelemetryError::Filter(_))));
    }

    #[test]
    fn test_second_install_fails() {
        let config = LogConfig::new("warn").with_directive("rolegate::authz=debug");
        let _ = setup_logging(&config);
        assert!(matches!(setup_logging(&config), Err(TelemetryError::Init(_))));
    }
}
