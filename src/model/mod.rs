//! Data shared between the context and its collaborators.
//!
//! These types are the payloads of the event catalog and the arguments of the
//! capability traits. They carry no behaviour beyond small accessors; storage,
//! rendering and transport belong to the collaborators.

mod comment;
mod ui;

pub use comment::{CommentData, ListFailure, ListFetchParams, SortBy};
pub use ui::{
    Callback, CaptchaPayload, CheckerPayload, CommentTarget, ElementRef, NotifyLevel,
    SidebarShowPayload, SidebarView,
};
