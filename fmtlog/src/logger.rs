// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! The named logger handle.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::{Arg, Backend, Cause, FormatError, Level, render_args};

/// Joins a message and the one-line cause summary when DEBUG is disabled.
const SWITCH_TO_DEBUG: &str = " (Switch to DEBUG for full stack trace): ";

/// A logging handle scoped to a name.
///
/// Usually declared as a static named after the enclosing module with
/// [`logger!`](crate::logger):
///
/// ```
/// use fmtlog::{Logger, logger};
///
/// static LOG: Logger = logger!();
/// assert_eq!(LOG.name(), module_path!());
/// ```
///
/// Three families of methods exist for every level:
///
/// - `info(message)`: the message is logged verbatim.
/// - `infof(template, args)`: the template is rendered with [`format`](crate::format())
///   only when the level is enabled.
/// - `info_debug(cause, message)` / `info_debugf(cause, template, args)`: the cause
///   is attached only when DEBUG is enabled; otherwise its one-line summary is
///   appended to the message.
///
/// A template that fails to render never reaches the caller. It is reported as
/// `Bogus format string: <LEVEL> <template> [<args>] (<error>)` at WARN, or at
/// ERROR when the call was at ERROR.
#[derive(Clone)]
pub struct Logger {
    name: Cow<'static, str>,
    backend: Option<Arc<dyn Backend>>,
}

macro_rules! level_methods {
    ($level:ident, $plain:ident, $formatted:ident) => {
        #[doc = concat!("Logs `message` verbatim at ", stringify!($level), " level.")]
        pub fn $plain(&self, message: &str) {
            self.log(Level::$level, None, message);
        }

        #[doc = concat!("Renders `template` with `args` at ", stringify!($level), " level.")]
        pub fn $formatted(&self, template: &str, args: &[Arg<'_>]) {
            self.logf(Level::$level, None, template, args);
        }
    };
}

macro_rules! debug_aware_methods {
    ($level:ident, $plain:ident, $formatted:ident) => {
        #[doc = concat!("Debug-aware ", stringify!($level), " logging of a verbatim message.")]
        pub fn $plain(&self, cause: Option<Cause<'_>>, message: &str) {
            self.log_debug(Level::$level, cause, message);
        }

        #[doc = concat!("Debug-aware ", stringify!($level), " logging of a template.")]
        pub fn $formatted(&self, cause: Option<Cause<'_>>, template: &str, args: &[Arg<'_>]) {
            self.log_debugf(Level::$level, cause, template, args);
        }
    };
}

impl Logger {
    /// Creates a logger forwarding to the global [`backend`](crate::backend()).
    pub const fn new(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            backend: None,
        }
    }

    /// Creates a logger with a name computed at runtime.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            backend: None,
        }
    }

    /// Forwards to `backend` instead of the global one.
    #[must_use]
    pub fn with_backend(mut self, backend: Arc<dyn Backend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_enabled_for(&self, level: Level) -> bool {
        self.backend().enabled(&self.name, level)
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.is_enabled_for(Level::Debug)
    }

    fn backend(&self) -> &dyn Backend {
        match &self.backend {
            Some(backend) => backend.as_ref(),
            None => crate::backend(),
        }
    }

    fn emit(&self, level: Level, cause: Option<Cause<'_>>, message: &str) {
        self.backend().emit(&self.name, level, cause, message);
    }

    /// Logs `message` verbatim with an optional cause.
    pub fn log(&self, level: Level, cause: Option<Cause<'_>>, message: &str) {
        if self.is_enabled_for(level) {
            self.emit(level, cause, message);
        }
    }

    /// Renders `template` with `args` and logs it with an optional cause.
    ///
    /// Nothing is rendered when `level` is disabled.
    pub fn logf(&self, level: Level, cause: Option<Cause<'_>>, template: &str, args: &[Arg<'_>]) {
        if !self.is_enabled_for(level) {
            return;
        }
        match crate::format(template, args) {
            Ok(message) => self.emit(level, cause, &message),
            Err(err) => {
                let (level, message) = bogus(level, template, args, &err);
                self.log(level, cause, &message);
            }
        }
    }

    /// Logs `message`, attaching `cause` only if DEBUG is enabled.
    ///
    /// With DEBUG disabled the message becomes
    /// `<message> (Switch to DEBUG for full stack trace): <summary>` and no cause
    /// is attached. Without a cause this is [`log`](Logger::log).
    pub fn log_debug(&self, level: Level, cause: Option<Cause<'_>>, message: &str) {
        match cause {
            Some(cause) if !self.is_debug_enabled() => {
                if self.is_enabled_for(level) {
                    let message = format!("{message}{SWITCH_TO_DEBUG}{}", cause.summary());
                    self.emit(level, None, &message);
                }
            }
            cause => self.log(level, cause, message),
        }
    }

    /// Template form of [`log_debug`](Logger::log_debug).
    pub fn log_debugf(
        &self,
        level: Level,
        cause: Option<Cause<'_>>,
        template: &str,
        args: &[Arg<'_>],
    ) {
        if !self.is_enabled_for(level) {
            return;
        }
        match crate::format(template, args) {
            Ok(message) => self.log_debug(level, cause, &message),
            Err(err) => {
                let (level, message) = bogus(level, template, args, &err);
                self.log_debug(level, cause, &message);
            }
        }
    }

    level_methods!(Debug, debug, debugf);
    level_methods!(Info, info, infof);
    level_methods!(Warn, warn, warnf);
    level_methods!(Error, error, errorf);

    debug_aware_methods!(Info, info_debug, info_debugf);
    debug_aware_methods!(Warn, warn_debug, warn_debugf);
    debug_aware_methods!(Error, error_debug, error_debugf);
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("own_backend", &self.backend.is_some())
            .finish()
    }
}

/// The level and text reporting a template that failed to render.
fn bogus(level: Level, template: &str, args: &[Arg<'_>], err: &FormatError) -> (Level, String) {
    let message = format!(
        "Bogus format string: {level} {template} [{}] ({err})",
        render_args(args)
    );
    (level.max(Level::Warn), message)
}
