// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! Installing a process-wide backend. Kept in its own test binary since the
//! backend can only be set once per process.

use std::sync::Arc;

use fmtlog::{Backend, CapturingBackend, Cause, Level, Logger, infof, logger, set_backend};

/// Shares a capturing backend between the global slot and the test.
struct Shared(Arc<CapturingBackend>);

impl Backend for Shared {
    fn enabled(&self, logger: &str, level: Level) -> bool {
        self.0.enabled(logger, level)
    }

    fn emit(&self, logger: &str, level: Level, cause: Option<Cause<'_>>, message: &str) {
        self.0.emit(logger, level, cause, message);
    }
}

static LOG: Logger = logger!();

#[test]
fn set_backend_once() {
    let capture = Arc::new(CapturingBackend::new(Level::Info));
    set_backend(Shared(capture.clone())).unwrap();

    LOG.debug("below threshold");
    infof!(LOG, "%d workers started", 4);

    let events = capture.take();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].logger, "global_backend");
    assert_eq!(events[0].message, "4 workers started");

    let second = Arc::new(CapturingBackend::new(Level::Debug));
    let err = set_backend(Shared(second.clone())).unwrap_err();
    assert_eq!(err.to_string(), "a global log backend has already been installed");

    // the first backend stays installed
    LOG.debug("still below threshold");
    assert!(capture.take().is_empty());
    assert!(second.take().is_empty());
    assert!(fmtlog::backend().enabled("anything", Level::Warn));
}
