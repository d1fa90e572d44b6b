//! Typed events: catalog and synchronous manager.
//!
//! This module groups the event **catalog** (marker types, their payloads and
//! wire names) and the **manager** that delivers them.
//!
//! ## Contents
//! - [`Event`], [`EventName`] and the marker types: the closed catalog
//! - [`EventManager`], [`SubscriptionId`]: subscribe, unsubscribe, emit
//! - [`HandlerOutput`]: what a handler may return
//!
//! ## Quick reference
//! - **Publishers**: the [`Context`](crate::Context) facade (lifecycle, list,
//!   configuration events) and every collaborator holding the context.
//! - **Consumers**: collaborators subscribing at bootstrap; plugins through
//!   [`EventManager::on_named`].

mod catalog;
mod channel;
mod handler;
mod manager;

pub use catalog::{
    AdminVisibility, CommentDeleted, CommentEdit, CommentFetched, CommentInserted, CommentReply,
    CommentUpdated, ConfUpdated, DarkModeChanged, EditorReset, EditorSubmitted, Event, EventName,
    ListFailed, ListFetch, ListGotoFirst, ListReload, Mounted, SidebarHidden, SidebarShown,
    Unmounted,
};
pub use handler::HandlerOutput;
pub use manager::{EventManager, SubscriptionId};
