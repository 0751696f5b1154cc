//! Logger and logging macros
//!
//! The macros forward to the `log` facade so that crates of the workspace log through
//! `headerdb_core::{info, warn, ...}` without depending on `log` directly.

use self::{
    appender::AppenderSpec,
    consts::{CONSOLE_APPENDER, DEFAULT_LOG_LEVEL, DEFAULT_LOGGER_ENV, ERR_LOG_FILE_APPENDER, ERR_LOG_FILE_NAME, LOG_FILE_APPENDER, LOG_FILE_NAME},
};
use log4rs::config::{Config, Root};
use std::path::Path;
use thiserror::Error;

mod appender;
pub mod consts;
mod logger;

#[doc(hidden)]
pub use ::log as __private_log;
pub use ::log::{Level, LevelFilter};

#[derive(Clone, Debug, Error)]
pub enum LogError {
    #[error("Logger spec parsing error: {0}")]
    ParseLoggerSpecError(String),

    #[error("Log appender error: {0}")]
    Appender(String),

    #[error("Logger configuration error: {0}")]
    Config(String),

    #[error("A global logger is already set")]
    AlreadyInitialized,
}

/// Initializes the global logger.
///
/// `filters` is a `level` or `target=level,...` expression, extended by the `RUST_LOG` environment variable.
/// When `log_dir` is set, everything is also written to a rolled log file, and warnings and errors
/// additionally to a separate error file.
pub fn init_logger(log_dir: Option<&Path>, filters: &str) -> Result<(), LogError> {
    let filters = if filters.is_empty() { DEFAULT_LOG_LEVEL } else { filters };
    let mut builder = logger::Builder::new();
    builder.parse_env(DEFAULT_LOGGER_ENV).parse_expression(filters);
    for rejected in builder.rejected() {
        eprintln!("Ignoring invalid logging spec '{}'", rejected);
    }
    let loggers = builder.build();

    let mut appenders = vec![AppenderSpec::console(CONSOLE_APPENDER, None)];
    if let Some(log_dir) = log_dir {
        appenders.push(AppenderSpec::roller(LOG_FILE_APPENDER, None, log_dir, LOG_FILE_NAME)?);
        appenders.push(AppenderSpec::roller(ERR_LOG_FILE_APPENDER, Some(LevelFilter::Warn), log_dir, ERR_LOG_FILE_NAME)?);
    }

    let names = appenders.iter().map(|x| x.name).collect::<Vec<_>>();
    let config = Config::builder()
        .appenders(appenders.iter_mut().filter_map(|x| x.appender()))
        .loggers(loggers.items())
        .build(Root::builder().appenders(names).build(loggers.root_level()))
        .map_err(|err| LogError::Config(err.to_string()))?;

    log4rs::init_config(config).map_err(|_| LogError::AlreadyInitialized)?;
    Ok(())
}

#[macro_export]
macro_rules! trace {
    ($($t:tt)*) => ( $crate::log::__private_log::trace!($($t)*) )
}

#[macro_export]
macro_rules! debug {
    ($($t:tt)*) => ( $crate::log::__private_log::debug!($($t)*) )
}

#[macro_export]
macro_rules! info {
    ($($t:tt)*) => ( $crate::log::__private_log::info!($($t)*) )
}

#[macro_export]
macro_rules! warn {
    ($($t:tt)*) => ( $crate::log::__private_log::warn!($($t)*) )
}

#[macro_export]
macro_rules! error {
    ($($t:tt)*) => ( $crate::log::__private_log::error!($($t)*) )
}
