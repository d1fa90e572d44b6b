//! Collaborating services: capability traits and the typed registry.
//!
//! - [`capabilities`](self): what each collaborator must implement
//!   ([`ApiClient`], [`DataManager`], [`Translator`], [`MarkdownRenderer`],
//!   [`SidebarController`], [`EditorController`], [`Checker`]);
//! - [`ServiceRegistry`] and [`key`]: where the bootstrap puts them and how the
//!   rest of the widget finds them.

mod capabilities;
mod registry;

pub use capabilities::{
    ApiClient, Checker, DataManager, EditorController, MarkdownRenderer, SidebarController,
    Translator,
};
pub use registry::{key, ServiceKey, ServiceRegistry};
