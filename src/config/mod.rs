//! Widget-wide configuration.
//!
//! - [`Conf`]: the complete option set held by the context (every field always set).
//! - [`ConfPatch`]: a partial update; `None` fields leave the current value untouched.
//!
//! See [`Context::update_conf`](crate::Context::update_conf) for how updates are
//! merged and announced.

mod conf;
mod patch;

pub use conf::{Conf, FlatMode, Gravatar, Pagination};
pub use patch::{ConfPatch, GravatarPatch, PaginationPatch};
