//! # MemorySink - buffered handler failures
//!
//! Keeps every reported failure until [`MemorySink::take`] drains them. Useful to
//! forward failures in batches to a telemetry collaborator, and to assert on them
//! in tests.

use std::cell::RefCell;

use crate::error::HandlerError;
use crate::sinks::ErrorSink;

/// A reported failure, detached from the original error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SinkRecord {
    /// Wire name of the event being delivered.
    pub event: &'static str,
    /// Stable label, see [`HandlerError::as_label`].
    pub label: &'static str,
    /// Human-readable message, see [`HandlerError::as_message`].
    pub message: String,
}

/// Sink buffering failures in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: RefCell<Vec<SinkRecord>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every buffered record, oldest first.
    pub fn take(&self) -> Vec<SinkRecord> {
        std::mem::take(&mut *self.records.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl ErrorSink for MemorySink {
    fn report(&self, err: &HandlerError) {
        self.records.borrow_mut().push(SinkRecord {
            event: err.event(),
            label: err.as_label(),
            message: err.as_message(),
        });
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
