//! The coordination object shared by every subsystem of the widget.
//!
//! - [`Context`]: events, services and configuration behind one handle, plus the
//!   facade methods collaborators call instead of referencing each other;
//! - [`ContextBuilder`]: the first bootstrap step;
//! - [`Lifecycle`]: `Uninitialized → Active → Destroyed`.

mod builder;
#[allow(clippy::module_inception)]
mod context;
mod facade;
mod lifecycle;

pub use builder::ContextBuilder;
pub use context::Context;
pub use lifecycle::Lifecycle;
