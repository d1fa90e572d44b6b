//! # Typed publish/subscribe event manager.
//!
//! [`EventManager`] keeps the subscriptions of every catalog event and delivers
//! payloads to them synchronously, on the calling thread, before `emit` returns.
//!
//! ## Architecture
//! ```text
//! emit(CommentFetched, comments)
//!     │
//!     └──► Listeners.comment_fetched (Channel<Vec<CommentData>>)
//!              │  snapshot in registration order
//!              ├──► h1(&comments) ── Err/panic ──► ErrorSink::report(HandlerError)
//!              ├──► h2(&comments) ── emit(ListReload, ()) ──► runs to completion here
//!              └──► h3(&comments)
//! ```
//!
//! ## Rules
//! - **Registration order**: `h1` returns before `h2` starts, for every emission.
//! - **Depth-first**: a nested `emit` completes before the outer one continues,
//!   giving a single global delivery order.
//! - **Isolation**: a failing handler never prevents its siblings from running and
//!   never makes `emit` fail.
//! - **No subscribers**: emitting is a silent no-op.
//! - **`off` is idempotent**: removing an unknown subscription returns `false`.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;

use super::catalog::{Event, EventName, JsonHandler, Listeners};
use super::handler::{erase, Handler, HandlerOutput};
use crate::error::ContextError;
use crate::sinks::ErrorSink;

static NEXT_MANAGER: AtomicU64 = AtomicU64::new(0);

/// Token returned by `on`/`once`, used to unsubscribe.
///
/// Scoped to the manager that issued it; other managers ignore it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId {
    manager: u64,
    event: EventName,
    seq: u64,
}

impl SubscriptionId {
    /// The event this subscription listens to.
    #[inline]
    pub fn event(&self) -> EventName {
        self.event
    }

    /// Registration sequence number (unique per manager, increasing).
    #[inline]
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Synchronous event manager over the closed catalog.
pub struct EventManager {
    id: u64,
    listeners: Listeners,
    next_seq: Cell<u64>,
    sink: Rc<dyn ErrorSink>,
}

impl EventManager {
    /// Creates a manager reporting handler failures to `sink`.
    pub fn new(sink: Rc<dyn ErrorSink>) -> Self {
        Self {
            id: NEXT_MANAGER.fetch_add(1, Ordering::Relaxed),
            listeners: Listeners::default(),
            next_seq: Cell::new(0),
            sink,
        }
    }

    /// Subscribes `handler` to every future emission of `event`.
    ///
    /// ## Example
    /// ```rust
    /// use std::{cell::Cell, rc::Rc};
    /// use commentary::{events::{EventManager, DarkModeChanged}, LogSink};
    ///
    /// let events = EventManager::new(Rc::new(LogSink));
    /// let seen = Rc::new(Cell::new(false));
    /// let s = Rc::clone(&seen);
    /// events.on(DarkModeChanged, move |on| s.set(*on));
    ///
    /// events.emit(DarkModeChanged, true);
    /// assert!(seen.get());
    /// ```
    pub fn on<E, F, R>(&self, event: E, handler: F) -> SubscriptionId
    where
        E: Event,
        F: Fn(&E::Payload) -> R + 'static,
        R: HandlerOutput,
    {
        self.subscribe(event, false, erase(handler))
    }

    /// Like [`on`](Self::on), but the subscription is removed right before its first
    /// invocation, whether or not the handler then succeeds.
    pub fn once<E, F, R>(&self, event: E, handler: F) -> SubscriptionId
    where
        E: Event,
        F: Fn(&E::Payload) -> R + 'static,
        R: HandlerOutput,
    {
        self.subscribe(event, true, erase(handler))
    }

    pub(crate) fn subscribe<E: Event>(
        &self,
        _event: E,
        once: bool,
        handler: Handler<E::Payload>,
    ) -> SubscriptionId {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        E::channel(&self.listeners).push(seq, once, handler);
        tracing::trace!(event = E::NAME.as_str(), seq, once, "subscribed");
        SubscriptionId {
            manager: self.id,
            event: E::NAME,
            seq,
        }
    }

    /// Removes a subscription. Returns `false` (and does nothing) if it is not present.
    pub fn off(&self, id: SubscriptionId) -> bool {
        let removed = id.manager == self.id && self.listeners.remove(id.event, id.seq);
        tracing::trace!(event = id.event.as_str(), seq = id.seq, removed, "unsubscribed");
        removed
    }

    /// Delivers `payload` to every current subscriber of `event`, in registration order.
    ///
    /// Returns the number of handlers invoked (failed ones included).
    pub fn emit<E: Event>(&self, _event: E, payload: E::Payload) -> usize {
        let delivered = E::channel(&self.listeners).dispatch(E::NAME.as_str(), &payload, &*self.sink);
        tracing::trace!(event = E::NAME.as_str(), delivered, "emitted");
        delivered
    }

    /// Emits by wire name with a JSON payload.
    ///
    /// ### Errors
    /// - [`ContextError::UnknownEvent`] if `name` is not in the catalog
    /// - [`ContextError::PayloadMismatch`] if `payload` does not decode into the declared type
    pub fn emit_named(&self, name: &str, payload: Value) -> Result<usize, ContextError> {
        EventName::parse(name)?.emit_json(self, payload)
    }

    /// Subscribes by wire name; the handler receives the payload encoded as JSON.
    pub fn on_named<F, R>(&self, name: &str, handler: F) -> Result<SubscriptionId, ContextError>
    where
        F: Fn(&Value) -> R + 'static,
        R: HandlerOutput,
    {
        let event = EventName::parse(name)?;
        Ok(event.subscribe_json(self, false, json_handler(handler)))
    }

    /// One-shot variant of [`on_named`](Self::on_named).
    pub fn once_named<F, R>(&self, name: &str, handler: F) -> Result<SubscriptionId, ContextError>
    where
        F: Fn(&Value) -> R + 'static,
        R: HandlerOutput,
    {
        let event = EventName::parse(name)?;
        Ok(event.subscribe_json(self, true, json_handler(handler)))
    }

    /// Number of live subscriptions for `event`.
    pub fn subscriber_count<E: Event>(&self, _event: E) -> usize {
        self.listeners.len(E::NAME)
    }

    /// Number of live subscriptions across the whole catalog.
    pub fn total_subscribers(&self) -> usize {
        EventName::ALL.iter().map(|name| self.listeners.len(*name)).sum()
    }

    /// Drops every subscription.
    pub fn clear(&self) {
        self.listeners.clear();
    }
}

fn json_handler<F, R>(f: F) -> JsonHandler
where
    F: Fn(&Value) -> R + 'static,
    R: HandlerOutput,
{
    Rc::new(move |v: &Value| f(v).into_result())
}
