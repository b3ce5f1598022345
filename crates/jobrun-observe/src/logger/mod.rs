mod config;
mod error;
mod log;
mod object;

pub use config::{LOG_FORMAT_ENV, LOG_LEVEL_ENV, LOG_TZ_ENV, LoggerConfig};
pub use error::{LoggerError, LoggerResult};
pub use object::{LoggerFormat, LoggerLevel, LoggerRfc3339, LoggerTimeZone, init_local_offset};

/// Installs the global tracing subscriber described by `cfg`.
///
/// Once installed, all `tracing` macros (`info!`, `debug!`, ...) use this
/// configuration. Can only succeed once per process.
///
/// For [`LoggerTimeZone::Local`] call [`init_local_offset`] first, before any
/// thread is spawned.
///
/// # Examples
/// ```rust
/// use jobrun_observe::{LoggerConfig, init_logger};
///
/// let config = LoggerConfig::default();
/// init_logger(&config).expect("logger");
/// tracing::info!("logger ready");
/// ```
pub fn init_logger(cfg: &LoggerConfig) -> LoggerResult<()> {
    match cfg.format {
        LoggerFormat::Text => log::logger_text(cfg),
        LoggerFormat::Json => log::logger_json(cfg),
        LoggerFormat::Journald => log::logger_journald(cfg),
    }
}
