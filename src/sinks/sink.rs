use crate::error::HandlerError;

/// Receiver of handler failures.
///
/// Called synchronously from inside an emission, between two handlers.
///
/// ### Implementation requirements
/// - Return quickly; the remaining handlers of the emission wait for it.
/// - Do not panic; a panicking sink aborts the rest of the emission.
/// - Do not emit events from `report`.
pub trait ErrorSink: 'static {
    /// Processes a single failure.
    fn report(&self, err: &HandlerError);

    /// Returns the sink name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
