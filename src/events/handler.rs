//! Handler return values.
//!
//! Event handlers may return `()` or `Result<(), E>` for any `E: Into<BoxError>`
//! (`&str`, `String`, any `std::error::Error + Send + Sync`). Both are converted
//! into one shape by [`HandlerOutput`] at subscription time.

use std::rc::Rc;

use crate::error::BoxError;

/// Type-erased handler as stored by a channel.
pub(crate) type Handler<P> = Rc<dyn Fn(&P) -> Result<(), BoxError>>;

/// Return type accepted from event handlers.
pub trait HandlerOutput {
    fn into_result(self) -> Result<(), BoxError>;
}

impl HandlerOutput for () {
    #[inline]
    fn into_result(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<E> HandlerOutput for Result<(), E>
where
    E: Into<BoxError>,
{
    #[inline]
    fn into_result(self) -> Result<(), BoxError> {
        self.map_err(Into::into)
    }
}

/// Erases a user closure into a [`Handler`].
pub(crate) fn erase<P, F, R>(f: F) -> Handler<P>
where
    P: 'static,
    F: Fn(&P) -> R + 'static,
    R: HandlerOutput,
{
    Rc::new(move |payload: &P| f(payload).into_result())
}
