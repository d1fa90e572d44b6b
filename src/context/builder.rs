use std::rc::Rc;

use super::context::Context;
use crate::config::{Conf, ConfPatch};
use crate::sinks::{ErrorSink, LogSink};

/// Builder for constructing a [`Context`].
pub struct ContextBuilder {
    conf: Conf,
    sink: Option<Rc<dyn ErrorSink>>,
}

impl ContextBuilder {
    /// Creates a builder with [`Conf::default`] and the [`LogSink`].
    pub fn new() -> Self {
        Self {
            conf: Conf::default(),
            sink: None,
        }
    }

    /// Sets the initial configuration.
    pub fn conf(mut self, conf: Conf) -> Self {
        self.conf = conf;
        self
    }

    /// Merges `patch` into the initial configuration.
    ///
    /// No event is emitted; nothing can be subscribed yet.
    pub fn patch(mut self, patch: ConfPatch) -> Self {
        self.conf.merge(patch);
        self
    }

    /// Sets where handler failures are reported.
    pub fn error_sink(mut self, sink: Rc<dyn ErrorSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Builds the context in the `Uninitialized` state.
    ///
    /// The returned handle is the one every subsystem should receive.
    pub fn build(self) -> Rc<Context> {
        let mut conf = self.conf;
        conf.normalize();

        let sink = self.sink.unwrap_or_else(|| Rc::new(LogSink::new()));
        tracing::debug!(sink = sink.name(), server = %conf.server, "context created");
        Rc::new(Context::new_internal(conf, sink))
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
