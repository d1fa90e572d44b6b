//! # LogSink - handler failures to `tracing`
//!
//! The default sink of a [`Context`](crate::Context). Returned errors are logged at
//! `WARN`, panics at `ERROR`.
//!
//! ## Example output
//! ```text
//! WARN commentary::sinks::log: handler failed event="comment-fetched" label="handler_failed" err="render: missing node"
//! ERROR commentary::sinks::log: handler panicked event="list-reload" label="handler_panicked" info="index out of bounds"
//! ```

use crate::error::HandlerError;
use crate::sinks::ErrorSink;

/// Sink writing handler failures through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl LogSink {
    /// Construct a new [`LogSink`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ErrorSink for LogSink {
    fn report(&self, err: &HandlerError) {
        match err {
            HandlerError::Failed { event, source } => {
                tracing::warn!(event, label = err.as_label(), err = %source, "handler failed");
            }
            HandlerError::Panicked { event, info } => {
                tracing::error!(event, label = err.as_label(), info = %info, "handler panicked");
            }
        }
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
