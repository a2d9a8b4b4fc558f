// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! The seam between the facade and the logging system that owns output.

use once_cell::sync::OnceCell;

use crate::{Cause, Level};

/// A logging system the facade forwards to.
///
/// Implementations own destinations, thresholds and thread-safety. The facade
/// passes the logger name with every call; that name is the only scoping it
/// relies on.
pub trait Backend: Send + Sync {
    /// Whether `level` is enabled for the logger called `logger`.
    fn enabled(&self, logger: &str, level: Level) -> bool;

    /// Emits an already rendered `message`.
    ///
    /// The facade checks [`enabled`](Backend::enabled) first, but implementations
    /// may filter again.
    fn emit(&self, logger: &str, level: Level, cause: Option<Cause<'_>>, message: &str);
}

/// Returned by [`set_backend`] when a backend is already installed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("a global log backend has already been installed")]
pub struct SetBackendError(());

static BACKEND: OnceCell<Box<dyn Backend>> = OnceCell::new();

/// Installs the process-wide backend used by loggers without their own.
///
/// Can succeed at most once. Until it is called, loggers forward to the
/// backend selected by the crate features.
///
/// # Errors
///
/// Fails if a backend was already installed. The existing backend is kept.
pub fn set_backend(backend: impl Backend + 'static) -> Result<(), SetBackendError> {
    BACKEND
        .set(Box::new(backend))
        .map_err(|_| SetBackendError(()))
}

/// The process-wide backend.
pub fn backend() -> &'static dyn Backend {
    match BACKEND.get() {
        Some(backend) => backend.as_ref(),
        None => default_backend(),
    }
}

#[cfg(all(feature = "backend_log", not(feature = "backend_tracing")))]
fn default_backend() -> &'static dyn Backend {
    &crate::LogBackend
}

#[cfg(feature = "backend_tracing")]
fn default_backend() -> &'static dyn Backend {
    &crate::TracingBackend
}

