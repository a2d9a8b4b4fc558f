// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! Public logging macros.
//!
//! All formatting macros support three forms:
//! - Verbatim message: `infof!(LOG, "100% done")`
//! - Template with arguments: `infof!(LOG, "took %d ms", elapsed)`
//! - Attached error: `infof!(LOG, err = &e; "took %d ms", elapsed)`
//!
//! Arguments are converted with [`Arg::from`](crate::Arg), errors with
//! [`Cause::from`](crate::Cause). A boxed error is passed as `err = &*boxed`.

/// Creates a [`Logger`](crate::Logger) named after the invoking module, or with
/// the given static name.
///
/// Expands to a constant expression, so it can initialize a `static`.
#[macro_export]
macro_rules! logger {
    () => {
        $crate::Logger::new(::core::module_path!())
    };
    ($name:expr) => {
        $crate::Logger::new($name)
    };
}

/// Log at the specified level.
#[macro_export]
macro_rules! logf {
    ($logger:expr, $level:expr, err = $cause:expr; $template:expr $(,)?) => {
        $logger.log(
            $level,
            ::core::option::Option::Some($crate::Cause::from($cause)),
            $template,
        )
    };
    ($logger:expr, $level:expr, err = $cause:expr; $template:expr, $($arg:expr),+ $(,)?) => {
        $logger.logf(
            $level,
            ::core::option::Option::Some($crate::Cause::from($cause)),
            $template,
            &[$($crate::Arg::from($arg)),+],
        )
    };
    ($logger:expr, $level:expr, $template:expr $(,)?) => {
        $logger.log($level, ::core::option::Option::None, $template)
    };
    ($logger:expr, $level:expr, $template:expr, $($arg:expr),+ $(,)?) => {
        $logger.logf(
            $level,
            ::core::option::Option::None,
            $template,
            &[$($crate::Arg::from($arg)),+],
        )
    };
}

/// Debug-aware logging at the specified level.
///
/// The error is attached only when DEBUG is enabled for the logger; otherwise
/// its one-line summary is appended to the message. Without an error this is
/// [`logf!`].
#[macro_export]
macro_rules! log_debugf {
    ($logger:expr, $level:expr, err = $cause:expr; $template:expr $(,)?) => {
        $logger.log_debug(
            $level,
            ::core::option::Option::Some($crate::Cause::from($cause)),
            $template,
        )
    };
    ($logger:expr, $level:expr, err = $cause:expr; $template:expr, $($arg:expr),+ $(,)?) => {
        $logger.log_debugf(
            $level,
            ::core::option::Option::Some($crate::Cause::from($cause)),
            $template,
            &[$($crate::Arg::from($arg)),+],
        )
    };
    ($logger:expr, $level:expr, $($rest:tt)+) => {
        $crate::logf!($logger, $level, $($rest)+)
    };
}

/// Helper macro to work around the inability to use `$` in nested macro definitions.
macro_rules! with_dollar_sign {
    ($($body:tt)*) => {
        macro_rules! __with_dollar_sign { $($body)* }
        __with_dollar_sign!($);
    }
}

macro_rules! define_log_macro {
    ($name:ident, $level:ident) => {
        with_dollar_sign! {
            ($d:tt) => {
                #[doc = concat!("Log at the ", stringify!($level), " level. See [`logf!`].")]
                #[macro_export]
                macro_rules! $name {
                    ($d logger:expr, $d($d rest:tt)+) => {
                        $crate::logf!($d logger, $crate::Level::$level, $d($d rest)+)
                    };
                }
            }
        }
    };
}

macro_rules! define_debug_aware_macro {
    ($name:ident, $level:ident) => {
        with_dollar_sign! {
            ($d:tt) => {
                #[doc = concat!("Debug-aware logging at the ", stringify!($level), " level. See [`log_debugf!`].")]
                #[macro_export]
                macro_rules! $name {
                    ($d logger:expr, $d($d rest:tt)+) => {
                        $crate::log_debugf!($d logger, $crate::Level::$level, $d($d rest)+)
                    };
                }
            }
        }
    };
}

define_log_macro!(debugf, Debug);
define_log_macro!(infof, Info);
define_log_macro!(warnf, Warn);
define_log_macro!(errorf, Error);

define_debug_aware_macro!(info_debugf, Info);
define_debug_aware_macro!(warn_debugf, Warn);
define_debug_aware_macro!(error_debugf, Error);
