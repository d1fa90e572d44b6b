//! Error types used by the widget context and its collaborators.
//!
//! This module defines three error types:
//!
//! - [`ContextError`] - errors surfaced to the caller of a [`Context`](crate::Context)
//!   operation (bootstrap/ordering bugs, dynamic-boundary rejections, service failures).
//! - [`HandlerError`] - failures of individual event handlers. These never reach the
//!   emitter; they are reported to an [`ErrorSink`](crate::ErrorSink) and swallowed.
//! - [`ServiceError`] - failures returned by injected collaborators (API client, ...).
//!
//! All three provide `as_label` for logs/metrics; [`ContextError`] and
//! [`HandlerError`] also provide `as_message`.

use thiserror::Error;

/// Boxed error returned by fallible event handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// # Errors produced by the context.
///
/// `UnknownEvent`, `ServiceNotRegistered` and `ContextDestroyed` indicate a
/// bootstrap or ordering bug and are surfaced immediately; nothing in the core
/// retries them.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ContextError {
    /// An event name outside the closed catalog was used at the string boundary.
    #[error("unknown event {name:?}")]
    UnknownEvent {
        /// The rejected name.
        name: String,
    },

    /// A service name outside the closed key set was used at the dynamic boundary.
    #[error("unknown service {name:?}")]
    UnknownService {
        /// The rejected name.
        name: String,
    },

    /// `get` was called for a slot nothing has been injected into.
    #[error("service {key:?} is not registered")]
    ServiceNotRegistered {
        /// Key of the empty slot.
        key: &'static str,
    },

    /// A dynamically injected instance does not implement the slot's capability.
    #[error("service {key:?} expects {expected}")]
    TypeMismatch {
        /// Key of the slot.
        key: &'static str,
        /// Type name the slot accepts.
        expected: &'static str,
    },

    /// A payload crossing the string boundary does not match the event's declared shape.
    #[error("payload for event {event:?} does not match: {reason}")]
    PayloadMismatch {
        /// Name of the event.
        event: &'static str,
        /// Decoder message.
        reason: String,
    },

    /// A facade method was called before the context was mounted.
    #[error("context is not mounted")]
    NotMounted,

    /// `mount` was called on an already active context.
    #[error("context is already mounted")]
    AlreadyMounted,

    /// Any call after teardown.
    #[error("context destroyed")]
    ContextDestroyed,

    /// A collaborating service failed.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl ContextError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use commentary::ContextError;
    ///
    /// let err = ContextError::ServiceNotRegistered { key: "api" };
    /// assert_eq!(err.as_label(), "context_service_not_registered");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ContextError::UnknownEvent { .. } => "context_unknown_event",
            ContextError::UnknownService { .. } => "context_unknown_service",
            ContextError::ServiceNotRegistered { .. } => "context_service_not_registered",
            ContextError::TypeMismatch { .. } => "context_type_mismatch",
            ContextError::PayloadMismatch { .. } => "context_payload_mismatch",
            ContextError::NotMounted => "context_not_mounted",
            ContextError::AlreadyMounted => "context_already_mounted",
            ContextError::ContextDestroyed => "context_destroyed",
            ContextError::Service(e) => e.as_label(),
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ContextError::UnknownEvent { name } => format!("unknown event: {name}"),
            ContextError::UnknownService { name } => format!("unknown service: {name}"),
            ContextError::ServiceNotRegistered { key } => format!("not registered: {key}"),
            ContextError::TypeMismatch { key, expected } => {
                format!("type mismatch for {key}: expected {expected}")
            }
            ContextError::PayloadMismatch { event, reason } => {
                format!("payload mismatch for {event}: {reason}")
            }
            ContextError::NotMounted => "not mounted".to_string(),
            ContextError::AlreadyMounted => "already mounted".to_string(),
            ContextError::ContextDestroyed => "destroyed".to_string(),
            ContextError::Service(e) => format!("service: {e}"),
        }
    }

    /// Indicates an error caused by calling the context in the wrong lifecycle state.
    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            ContextError::NotMounted | ContextError::AlreadyMounted | ContextError::ContextDestroyed
        )
    }
}

/// # Errors produced by event handlers.
///
/// Caught by the event manager, reported to the error sink and swallowed, so
/// sibling subscribers of the same emission still run.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum HandlerError {
    /// The handler returned an error.
    #[error("handler for {event:?} failed: {source}")]
    Failed {
        /// Name of the event being delivered.
        event: &'static str,
        /// The error returned by the handler.
        source: BoxError,
    },

    /// The handler panicked.
    #[error("handler for {event:?} panicked: {info}")]
    Panicked {
        /// Name of the event being delivered.
        event: &'static str,
        /// Panic message, if it was a string.
        info: String,
    },
}

impl HandlerError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            HandlerError::Failed { .. } => "handler_failed",
            HandlerError::Panicked { .. } => "handler_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            HandlerError::Failed { source, .. } => format!("error: {source}"),
            HandlerError::Panicked { info, .. } => format!("panic: {info}"),
        }
    }

    /// Name of the event whose delivery failed.
    pub fn event(&self) -> &'static str {
        match self {
            HandlerError::Failed { event, .. } | HandlerError::Panicked { event, .. } => event,
        }
    }
}

/// # Errors returned by collaborating services.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The request could not be sent or did not complete.
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status.
    #[error("server responded {status}: {msg}")]
    Status {
        /// HTTP-like status code.
        status: u16,
        /// Message from the server.
        msg: String,
    },

    /// The response could not be decoded.
    #[error("invalid response: {0}")]
    Decode(String),

    /// The service does not implement this operation.
    #[error("operation not supported: {0}")]
    Unsupported(&'static str),
}

impl ServiceError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use commentary::ServiceError;
    ///
    /// let err = ServiceError::Status { status: 502, msg: "bad gateway".into() };
    /// assert_eq!(err.as_label(), "service_status");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ServiceError::Request(_) => "service_request",
            ServiceError::Status { .. } => "service_status",
            ServiceError::Decode(_) => "service_decode",
            ServiceError::Unsupported(_) => "service_unsupported",
        }
    }

    /// Indicates whether retrying the same call may succeed.
    ///
    /// Returns `true` for [`ServiceError::Request`] and 5xx [`ServiceError::Status`].
    pub fn is_retryable(&self) -> bool {
        match self {
            ServiceError::Request(_) => true,
            ServiceError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_converts_into_context_error() {
        let err: ContextError = ServiceError::Request("timeout".into()).into();
        assert_eq!(err.as_label(), "service_request");
        assert_eq!(err.to_string(), "request failed: timeout");
    }

    #[test]
    fn test_lifecycle_classification() {
        assert!(ContextError::ContextDestroyed.is_lifecycle());
        assert!(ContextError::NotMounted.is_lifecycle());
        assert!(!ContextError::ServiceNotRegistered { key: "api" }.is_lifecycle());
    }

    #[test]
    fn test_retryable_statuses() {
        let upstream = ServiceError::Status { status: 503, msg: "busy".into() };
        let client = ServiceError::Status { status: 404, msg: "gone".into() };
        assert!(upstream.is_retryable());
        assert!(!client.is_retryable());
        assert!(!ServiceError::Unsupported("delete").is_retryable());
    }

    #[test]
    fn test_handler_error_reports_event() {
        let err = HandlerError::Panicked { event: "list-reload", info: "boom".into() };
        assert_eq!(err.event(), "list-reload");
        assert_eq!(err.as_message(), "panic: boom");
    }
}
