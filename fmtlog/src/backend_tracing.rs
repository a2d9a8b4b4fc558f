// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! Tracing backend implementation.
//!
//! This module provides the default backend when using the `tracing` crate.
//! Tracing targets are fixed at the callsite, so the logger name travels as the
//! `logger` field instead, and an attached cause uses tracing's native `error`
//! field (subscribers render its `source()` chain themselves).
//!
//! Enablement is answered by the current subscriber per level; per-logger
//! filtering has to match on the `logger` field.

use crate::{Backend, Cause, Level};

impl Level {
    /// Converts this level to the corresponding `tracing::Level`.
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Level::Error => tracing::Level::ERROR,
            Level::Warn => tracing::Level::WARN,
            Level::Info => tracing::Level::INFO,
            Level::Debug => tracing::Level::DEBUG,
        }
    }
}

/// Tracing levels must be constants at the callsite, so each of our levels gets
/// its own arm with the tracing level bound to `$lvl`.
macro_rules! per_level {
    ($level:expr, |$lvl:ident| $body:expr) => {
        match $level {
            Level::Error => {
                const $lvl: tracing::Level = tracing::Level::ERROR;
                $body
            }
            Level::Warn => {
                const $lvl: tracing::Level = tracing::Level::WARN;
                $body
            }
            Level::Info => {
                const $lvl: tracing::Level = tracing::Level::INFO;
                $body
            }
            Level::Debug => {
                const $lvl: tracing::Level = tracing::Level::DEBUG;
                $body
            }
        }
    };
}

/// Backend that forwards to the current `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingBackend;

impl Backend for TracingBackend {
    fn enabled(&self, _logger: &str, level: Level) -> bool {
        per_level!(level, |LEVEL| tracing::enabled!(LEVEL))
    }

    fn emit(&self, logger: &str, level: Level, cause: Option<Cause<'_>>, message: &str) {
        match cause {
            Some(cause) => {
                let error = cause.error();
                per_level!(level, |LEVEL| tracing::event!(LEVEL, logger, error, "{message}"));
            }
            None => per_level!(level, |LEVEL| tracing::event!(LEVEL, logger, "{message}")),
        }
    }
}
