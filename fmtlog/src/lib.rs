// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! # fmtlog
//!
//! A leveled logging facade that renders printf-style templates and forwards the
//! result to an existing logging backend.
//!
//! The facade itself owns no destinations and no thresholds. It only needs a
//! [`Backend`] that can answer "is this level enabled for this logger name" and
//! accept a rendered message with an optional attached error.
//!
//! ## Features
//!
//! - `backend_log` (default): the default backend forwards to the
//!   [`log`](https://docs.rs/log) crate, using the logger name as the target.
//!
//! - `backend_tracing`: the default backend forwards to the
//!   [`tracing`](https://docs.rs/tracing) crate. The logger name is recorded as the
//!   `logger` field and an attached error as the native `error` field.
//!
//! When both features are enabled, `backend_tracing` takes precedence. Either
//! default can be replaced at runtime with [`set_backend`].
//!
//! ## Templates
//!
//! Templates use printf conventions (`%s`, `%d`, `%x`, `%.2f`, `%-8s`, `%2$s`, ...),
//! see [`format`](crate::format()). Templates are interpreted at runtime, so a bad
//! template or an argument whose `Display` fails cannot break the caller: the call
//! degrades to a `Bogus format string: ...` diagnostic at WARN (or ERROR, when the
//! original call was at ERROR).
//!
//! ## Debug-aware logging
//!
//! The `*_debug` family attaches the full error only when DEBUG is enabled for the
//! logger. Otherwise the error is folded into the message as a one-line summary.
//!
//! ## Example
//!
//! ```
//! use fmtlog::{Logger, errorf, infof, logger, warn_debugf};
//!
//! static LOG: Logger = logger!();
//!
//! fn open(path: &str) {
//!     infof!(LOG, "opening %s", path);
//!
//!     if let Err(e) = std::fs::File::open(path) {
//!         warn_debugf!(LOG, err = &e; "unable to open %s", path);
//!         errorf!(LOG, err = &e; "giving up after %d attempts", 3);
//!     }
//! }
//! # open("/nonexistent");
//! ```

#[cfg(not(any(feature = "backend_log", feature = "backend_tracing")))]
compile_error!("Either `backend_log` or `backend_tracing` feature must be enabled.");

#[macro_use]
mod macros;

mod backend;
mod capture;
mod cause;
mod format;
mod logger;

#[cfg(all(feature = "backend_log", not(feature = "backend_tracing")))]
mod backend_log;

#[cfg(feature = "backend_tracing")]
mod backend_tracing;

use core::fmt;
use core::str::FromStr;

pub use backend::{Backend, SetBackendError, backend, set_backend};
pub use capture::{CapturingBackend, Event};
pub use cause::Cause;
pub use format::{Arg, ArgFailure, FormatError, format, render_args};
pub use logger::Logger;

#[cfg(all(feature = "backend_log", not(feature = "backend_tracing")))]
pub use backend_log::LogBackend;

#[cfg(feature = "backend_tracing")]
pub use backend_tracing::TracingBackend;

/// Log level that abstracts over backend-specific level types.
///
/// Levels are ordered from least severe to most severe:
/// `Debug` < `Info` < `Warn` < `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Debugging information useful during development.
    Debug,
    /// General informational messages.
    Info,
    /// Potential issues or unexpected situations.
    Warn,
    /// Serious problems that need immediate attention.
    Error,
}

impl Level {
    /// All levels, least severe first.
    pub const ALL: [Level; 4] = [Level::Debug, Level::Info, Level::Warn, Level::Error];

    /// The upper-case name of this level.
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Returned when a string does not name a [`Level`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown log level `{0}`, expected one of debug, info, warn, error")]
pub struct ParseLevelError(String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            _ => Err(ParseLevelError(s.to_owned())),
        }
    }
}
