//! # Per-event subscriber list.
//!
//! A [`Channel`] holds the subscriptions of exactly one event, in registration
//! order, and delivers one payload type to them.
//!
//! ## Rules
//! - **Snapshot delivery**: `dispatch` copies the list before invoking anyone, so a
//!   handler may subscribe, unsubscribe or emit while being called.
//! - **Late additions**: subscriptions added during a dispatch are not invoked by it.
//! - **Late removals**: subscriptions removed during a dispatch and not reached yet are
//!   skipped.
//! - **One-shot**: a `once` entry is removed right before it runs; if a nested
//!   dispatch got to it first, the outer dispatch skips it.
//! - **Isolation**: an `Err` or a panic is turned into a [`HandlerError`] and handed
//!   to the sink; the remaining subscribers still run.
//!
//! **Warning**: panics are caught with `AssertUnwindSafe`. A handler panicking
//! halfway through mutating shared state may leave that state inconsistent.

use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use super::handler::Handler;
use crate::error::HandlerError;
use crate::sinks::ErrorSink;

struct Entry<P> {
    seq: u64,
    once: bool,
    handler: Handler<P>,
}

/// Subscriptions of one event.
pub struct Channel<P> {
    entries: RefCell<Vec<Entry<P>>>,
}

impl<P> Default for Channel<P> {
    fn default() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
        }
    }
}

impl<P> Channel<P> {
    pub(crate) fn push(&self, seq: u64, once: bool, handler: Handler<P>) {
        self.entries.borrow_mut().push(Entry { seq, once, handler });
    }

    /// Removes the entry with `seq`; returns whether it was present.
    pub(crate) fn remove(&self, seq: u64) -> bool {
        let mut entries = self.entries.borrow_mut();
        match entries.iter().position(|e| e.seq == seq) {
            Some(idx) => {
                entries.remove(idx);
                true
            }
            None => false,
        }
    }

    fn contains(&self, seq: u64) -> bool {
        self.entries.borrow().iter().any(|e| e.seq == seq)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub(crate) fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    /// Delivers `payload` to every live subscriber; returns how many were invoked.
    pub(crate) fn dispatch(&self, event: &'static str, payload: &P, sink: &dyn ErrorSink) -> usize {
        let snapshot: Vec<(u64, bool, Handler<P>)> = self
            .entries
            .borrow()
            .iter()
            .map(|e| (e.seq, e.once, Rc::clone(&e.handler)))
            .collect();

        let mut delivered = 0;
        for (seq, once, handler) in snapshot {
            let live = if once {
                self.remove(seq)
            } else {
                self.contains(seq)
            };
            if !live {
                continue;
            }
            delivered += 1;

            match panic::catch_unwind(AssertUnwindSafe(|| handler(payload))) {
                Ok(Ok(())) => {}
                Ok(Err(source)) => sink.report(&HandlerError::Failed { event, source }),
                Err(panic_err) => {
                    let info = if let Some(msg) = panic_err.downcast_ref::<&'static str>() {
                        (*msg).to_string()
                    } else if let Some(msg) = panic_err.downcast_ref::<String>() {
                        msg.clone()
                    } else {
                        "unknown panic".to_string()
                    };
                    sink.report(&HandlerError::Panicked { event, info });
                }
            }
        }
        delivered
    }
}
