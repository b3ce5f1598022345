use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::logger::{
    error::LoggerError,
    object::{LoggerFormat, LoggerLevel, LoggerTimeZone},
};

/// Filter expression, e.g. `info` or `jobrun_core=debug,info`.
pub const LOG_LEVEL_ENV: &str = "JOBRUN_LOG_LEVEL";
/// `text`, `json` or `journald`.
pub const LOG_FORMAT_ENV: &str = "JOBRUN_LOG_FORMAT";
/// `utc` or `local`.
pub const LOG_TZ_ENV: &str = "JOBRUN_LOG_TZ";

/// Logger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    pub level: LoggerLevel,
    /// Timezone for timestamps.
    pub tz: LoggerTimeZone,
    /// Include module/target names in log output.
    pub with_targets: bool,
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::default(),
            level: LoggerLevel::default(),
            tz: LoggerTimeZone::default(),
            with_targets: true,
            use_color: true,
        }
    }
}

impl LoggerConfig {
    /// Build the configuration from the `JOBRUN_LOG_*` process environment.
    ///
    /// Invalid values are reported on stderr and replaced by defaults: a bad
    /// log setting must not keep the job from running.
    pub fn from_env() -> Self {
        let (cfg, rejected) = Self::from_lookup(|key| std::env::var(key).ok());
        for err in rejected {
            eprintln!("jobrun: {err}; using default");
        }
        cfg
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// Returns the configuration plus every value that was rejected.
    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<LoggerError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let mut rejected = Vec::new();

        if let Some(raw) = lookup(LOG_LEVEL_ENV) {
            match raw.parse() {
                Ok(level) => cfg.level = level,
                Err(e) => rejected.push(e),
            }
        }
        if let Some(raw) = lookup(LOG_FORMAT_ENV) {
            match raw.parse() {
                Ok(format) => cfg.format = format,
                Err(e) => rejected.push(e),
            }
        }
        if let Some(raw) = lookup(LOG_TZ_ENV) {
            match raw.parse() {
                Ok(tz) => cfg.tz = tz,
                Err(e) => rejected.push(e),
            }
        }
        (cfg, rejected)
    }

    /// Color only when enabled and stderr (the log sink) is a terminal.
    pub fn should_use_color(&self) -> bool {
        self.use_color && std::io::stderr().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn default_values() {
        let config = LoggerConfig::default();

        assert_eq!(config.format, LoggerFormat::Text);
        assert_eq!(config.tz, LoggerTimeZone::Utc);
        assert_eq!(config.level.as_str(), "info");
        assert!(config.with_targets);
        assert!(config.use_color);
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let (cfg, rejected) = LoggerConfig::from_lookup(lookup(&[]));
        assert!(rejected.is_empty());
        assert_eq!(cfg.format, LoggerFormat::Text);
        assert_eq!(cfg.level.as_str(), "info");
    }

    #[test]
    fn environment_overrides_defaults() {
        let (cfg, rejected) = LoggerConfig::from_lookup(lookup(&[
            (LOG_LEVEL_ENV, "jobrun_core=debug,warn"),
            (LOG_FORMAT_ENV, "JSON"),
            (LOG_TZ_ENV, "local"),
        ]));

        assert!(rejected.is_empty());
        assert_eq!(cfg.level.as_str(), "jobrun_core=debug,warn");
        assert_eq!(cfg.format, LoggerFormat::Json);
        assert_eq!(cfg.tz, LoggerTimeZone::Local);
    }

    #[test]
    fn invalid_values_fall_back_individually() {
        let (cfg, rejected) = LoggerConfig::from_lookup(lookup(&[
            (LOG_LEVEL_ENV, "jobrun_core=loud"),
            (LOG_FORMAT_ENV, "xml"),
            (LOG_TZ_ENV, "utc"),
        ]));

        assert_eq!(rejected.len(), 2);
        assert!(matches!(rejected[0], LoggerError::InvalidLevel(_)));
        assert!(matches!(rejected[1], LoggerError::InvalidFormat(_)));
        assert_eq!(cfg.level.as_str(), "info");
        assert_eq!(cfg.format, LoggerFormat::Text);
        assert_eq!(cfg.tz, LoggerTimeZone::Utc);
    }

    #[test]
    fn serde_uses_defaults_for_missing_fields() {
        let config: LoggerConfig =
            serde_json::from_str(r#"{"format": "json", "level": "debug"}"#).unwrap();

        assert_eq!(config.format, LoggerFormat::Json);
        assert_eq!(config.level.as_str(), "debug");
        assert_eq!(config.tz, LoggerTimeZone::Utc);
        assert!(config.with_targets);
    }
}
