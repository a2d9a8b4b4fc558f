// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! In-memory backend for asserting on log output in tests.

use std::collections::VecDeque;

use spin::Mutex;

use crate::{Backend, Cause, Level};

/// A captured log call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub logger: String,
    pub level: Level,
    pub message: String,
    /// Header line of the attached cause (`<type>: <message>`), if any.
    pub cause: Option<String>,
}

/// Backend that records every emitted message in memory.
///
/// A level is enabled when it is at or above the threshold; with no threshold
/// nothing is enabled. The threshold applies to every logger name.
///
/// ```
/// use fmtlog::{CapturingBackend, Level, Logger};
/// use std::sync::Arc;
///
/// let capture = Arc::new(CapturingBackend::new(Level::Info));
/// let log = Logger::named("demo").with_backend(capture.clone());
///
/// log.debug("dropped");
/// log.infof("kept %d", &[7.into()]);
///
/// let events = capture.take();
/// assert_eq!(events.len(), 1);
/// assert_eq!(events[0].message, "kept 7");
/// ```
#[derive(Debug)]
pub struct CapturingBackend {
    threshold: Mutex<Option<Level>>,
    events: Mutex<VecDeque<Event>>,
}

impl CapturingBackend {
    /// Creates a backend enabling `threshold` and everything above it.
    pub fn new(threshold: Level) -> Self {
        Self {
            threshold: Mutex::new(Some(threshold)),
            events: Mutex::new(VecDeque::new()),
        }
    }

    /// Creates a backend with every level disabled.
    pub fn disabled() -> Self {
        Self {
            threshold: Mutex::new(None),
            events: Mutex::new(VecDeque::new()),
        }
    }

    /// Changes the threshold; `None` disables every level.
    pub fn set_level(&self, threshold: Option<Level>) {
        *self.threshold.lock() = threshold;
    }

    /// Removes and returns the captured events, oldest first.
    pub fn take(&self) -> Vec<Event> {
        self.events.lock().drain(..).collect()
    }

    /// Removes and returns the oldest captured event.
    pub fn pop(&self) -> Option<Event> {
        self.events.lock().pop_front()
    }
}

impl Backend for CapturingBackend {
    fn enabled(&self, _logger: &str, level: Level) -> bool {
        self.threshold.lock().is_some_and(|threshold| level >= threshold)
    }

    fn emit(&self, logger: &str, level: Level, cause: Option<Cause<'_>>, message: &str) {
        if !self.enabled(logger, level) {
            return;
        }
        self.events.lock().push_back(Event {
            logger: logger.to_owned(),
            level,
            message: message.to_owned(),
            cause: cause.map(|c| c.to_string()),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_returns_oldest_first() {
        let capture = CapturingBackend::new(Level::Info);
        for n in 0..3 {
            capture.emit("queue", Level::Warn, None, &n.to_string());
        }
        capture.emit("queue", Level::Debug, None, "below threshold");

        assert_eq!(capture.pop().map(|e| e.message), Some("0".to_owned()));
        let rest: Vec<String> = capture.take().into_iter().map(|e| e.message).collect();
        assert_eq!(rest, ["1", "2"]);
        assert_eq!(capture.pop(), None);
    }
}
