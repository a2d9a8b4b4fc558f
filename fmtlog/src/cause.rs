// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! Errors attached to log calls.

use core::fmt::{self, Write as _};
use std::error::Error;

use crate::format::guarded;

/// An error attached to a log call.
///
/// Carries the error itself and, when it was built from a concrete type, that
/// type's name. Backends print [`Cause::full`]; the debug-aware methods of
/// [`Logger`](crate::Logger) fold [`Cause::summary`] into the message instead.
#[derive(Clone, Copy)]
pub struct Cause<'a> {
    error: &'a (dyn Error + 'static),
    type_name: Option<&'static str>,
}

impl<'a> Cause<'a> {
    /// Wraps a concrete error, remembering its type name.
    pub fn new<E: Error + 'static>(error: &'a E) -> Self {
        Self {
            error,
            type_name: Some(core::any::type_name::<E>()),
        }
    }

    /// Wraps a type-erased error. The summary will not carry a type name.
    pub fn from_dyn(error: &'a (dyn Error + 'static)) -> Self {
        Self {
            error,
            type_name: None,
        }
    }

    /// The wrapped error.
    pub fn error(&self) -> &'a (dyn Error + 'static) {
        self.error
    }

    /// The concrete type name, if known.
    pub fn type_name(&self) -> Option<&'static str> {
        self.type_name
    }

    /// The compact single-line form: `<type>: <first line of message>`.
    ///
    /// Falls back to the type name alone when the message is empty, and to the
    /// first line alone when the type is unknown.
    pub fn summary(&self) -> String {
        let message = message(self.error);
        let first_line = message.lines().next().unwrap_or_default();
        match (self.type_name, first_line.is_empty()) {
            (Some(ty), true) => ty.to_owned(),
            (Some(ty), false) => format!("{ty}: {first_line}"),
            (None, true) => "unknown error".to_owned(),
            (None, false) => first_line.to_owned(),
        }
    }

    /// The full rendering: the [`Display`](fmt::Display) header followed by one
    /// `Caused by:` line per error in the `source()` chain.
    pub fn full(&self) -> String {
        let mut out = self.header();
        let mut source = self.error.source();
        while let Some(err) = source {
            out.push_str("\nCaused by: ");
            out.push_str(&message(err));
            source = err.source();
        }
        out
    }

    fn header(&self) -> String {
        let message = message(self.error);
        match self.type_name {
            Some(ty) if message.is_empty() => ty.to_owned(),
            Some(ty) => format!("{ty}: {message}"),
            None => message,
        }
    }
}

/// The error's `Display` output. An implementation that fails or panics is
/// replaced by the failure text.
fn message(error: &dyn Error) -> String {
    guarded(|buf| write!(buf, "{error}")).unwrap_or_else(|failure| failure.to_string())
}

impl<'a, E: Error + 'static> From<&'a E> for Cause<'a> {
    fn from(error: &'a E) -> Self {
        Cause::new(error)
    }
}

macro_rules! impl_from_dyn {
    ($($bounds:tt)*) => {
        impl<'a> From<&'a (dyn Error $($bounds)* + 'static)> for Cause<'a> {
            fn from(error: &'a (dyn Error $($bounds)* + 'static)) -> Self {
                Cause::from_dyn(error)
            }
        }
    };
}

impl_from_dyn!();
impl_from_dyn!(+ Send);
impl_from_dyn!(+ Send + Sync);

/// `<type>: <message>`, or the message alone when the type is unknown.
impl fmt::Display for Cause<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.header())
    }
}

impl fmt::Debug for Cause<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cause")
            .field("error", &self.error)
            .field("type_name", &self.type_name)
            .finish()
    }
}
