// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! Log backend implementation.
//!
//! This module provides the default backend when using the `log` crate. The
//! logger name becomes the record target, so target-based filters (for example
//! `RUST_LOG=my_crate::db=debug` with `env_logger`) apply per logger.
//!
//! `log` has no slot for an attached error, so the full rendering of the cause
//! ([`Cause::full`]) is appended to the message on its own lines.

use crate::{Backend, Cause, Level};

impl Level {
    /// Converts this level to the corresponding `log::Level`.
    pub const fn to_log_level(self) -> log::Level {
        match self {
            Level::Error => log::Level::Error,
            Level::Warn => log::Level::Warn,
            Level::Info => log::Level::Info,
            Level::Debug => log::Level::Debug,
        }
    }
}

/// Backend that forwards to whatever `log::Log` implementation is installed.
///
/// # Example
///
/// ```
/// use fmtlog::{LogBackend, Logger};
/// use std::sync::Arc;
///
/// let log = Logger::named("my_app::db").with_backend(Arc::new(LogBackend));
/// log.infof("connected to %s", &["primary".into()]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LogBackend;

impl Backend for LogBackend {
    fn enabled(&self, logger: &str, level: Level) -> bool {
        log::log_enabled!(target: logger, level.to_log_level())
    }

    fn emit(&self, logger: &str, level: Level, cause: Option<Cause<'_>>, message: &str) {
        let level = level.to_log_level();
        match cause {
            Some(cause) => log::log!(target: logger, level, "{message}\n{}", cause.full()),
            None => log::log!(target: logger, level, "{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_mapping() {
        let mapped: Vec<log::Level> = Level::ALL.iter().map(|l| l.to_log_level()).collect();
        assert_eq!(
            mapped,
            [
                log::Level::Debug,
                log::Level::Info,
                log::Level::Warn,
                log::Level::Error
            ]
        );
    }

    #[test]
    fn nothing_enabled_without_a_logger() {
        // no `log::Log` is installed in unit tests, so the max level stays Off
        for level in Level::ALL {
            assert!(!LogBackend.enabled("fmtlog::tests", level));
        }
    }
}
