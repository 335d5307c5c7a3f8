use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Failed to initialize telemetry: {0}")]
    Init(String),
}

pub struct TelemetryConfig {
    pub level: tracing::Level,
    pub json_output: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            level: tracing::Level::INFO,
            json_output: false,
        }
    }
}

impl TelemetryConfig {
    /// Config at the level named by `level` ("debug", "warn", ...), INFO if unrecognized.
    pub fn with_level_name(level: &str) -> Self {
        Self {
            level: level.parse().unwrap_or(tracing::Level::INFO),
            ..Self::default()
        }
    }

    pub fn json(mut self, json_output: bool) -> Self {
        self.json_output = json_output;
        self
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json_output {
        registry
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init()
    };
    result.map_err(|e| TelemetryError::Init(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_name_parsing() {
        assert_eq!(TelemetryConfig::with_level_name("debug").level, tracing::Level::DEBUG);
        assert_eq!(TelemetryConfig::with_level_name("WARN").level, tracing::Level::WARN);
        assert_eq!(TelemetryConfig::with_level_name("chatty").level, tracing::Level::INFO);
    }

    #[test]
    fn test_json_output_toggle() {
        assert!(!TelemetryConfig::with_level_name("info").json_output);
        let config = TelemetryConfig::with_level_name("debug").json(true);
        assert!(config.json_output);
        assert_eq!(config.level, tracing::Level::DEBUG);
    }

    #[test]
    fn test_second_init_fails() {
        let config = TelemetryConfig::default();
        let _ = init_telemetry(&config);
        assert!(matches!(init_telemetry(&config), Err(TelemetryError::Init(_))));
    }
}
