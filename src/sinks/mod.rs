//! # Error sinks for handler failures.
//!
//! This module provides the [`ErrorSink`] trait and built-in implementations
//! receiving the [`HandlerError`](crate::HandlerError)s the event manager catches.
//!
//! ## Architecture
//! ```text
//! emit(E, payload)
//!     ├──► h1 ── Ok
//!     ├──► h2 ── Err / panic ──► ErrorSink::report(&HandlerError)
//!     │                               │
//!     │                      ┌────────┴────────┐
//!     │                      ▼                 ▼
//!     │                   LogSink          MemorySink / custom
//!     └──► h3 ── Ok      (tracing)      (telemetry, test capture)
//! ```
//!
//! ## Implementing a custom sink
//! ```no_run
//! use commentary::{ErrorSink, HandlerError};
//!
//! struct Telemetry;
//!
//! impl ErrorSink for Telemetry {
//!     fn report(&self, err: &HandlerError) {
//!         // forward err.as_label() to a counter, etc.
//!         let _ = err.as_label();
//!     }
//!
//!     fn name(&self) -> &'static str { "telemetry" }
//! }
//! ```

mod log;
mod memory;
mod sink;

pub use log::LogSink;
pub use memory::{MemorySink, SinkRecord};
pub use sink::ErrorSink;
