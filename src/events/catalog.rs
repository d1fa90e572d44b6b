//! # Event catalog.
//!
//! The complete, closed set of events the widget exchanges, each bound to one
//! payload type. Every event is a zero-sized marker type implementing [`Event`];
//! the same declaration also produces the [`EventName`] enum (the kebab-case wire
//! names used at the string boundary) and one typed listener list per event.
//!
//! Adding an event is a change to the `event_catalog!` invocation below; there is
//! no runtime registration.
//!
//! | Category      | Events                                                                  |
//! |---------------|-------------------------------------------------------------------------|
//! | **Lifecycle** | [`Mounted`], [`Unmounted`]                                              |
//! | **List**      | [`ListFetch`], [`CommentFetched`], [`ListFailed`], [`ListReload`], [`ListGotoFirst`] |
//! | **Comments**  | [`CommentReply`], [`CommentEdit`], [`CommentInserted`], [`CommentUpdated`], [`CommentDeleted`] |
//! | **UI**        | [`SidebarShown`], [`SidebarHidden`], [`EditorSubmitted`], [`EditorReset`], [`AdminVisibility`] |
//! | **Config**    | [`ConfUpdated`], [`DarkModeChanged`]                                    |

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde_json::Value;

use super::channel::Channel;
use super::handler::Handler;
use super::manager::{EventManager, SubscriptionId};
use crate::config::Conf;
use crate::error::{BoxError, ContextError};
use crate::model::{CommentData, CommentTarget, ListFailure, ListFetchParams, SidebarShowPayload};

/// An event of the catalog and the payload type delivered with it.
///
/// Implemented only by the marker types of this module.
pub trait Event: Copy + fmt::Debug + 'static {
    /// Data handed to every subscriber.
    type Payload: 'static;

    /// Wire name of the event.
    const NAME: EventName;

    #[doc(hidden)]
    fn channel(listeners: &Listeners) -> &Channel<Self::Payload>;
}

/// Handler shape used at the string boundary.
pub(crate) type JsonHandler = Rc<dyn Fn(&Value) -> Result<(), BoxError>>;

macro_rules! event_catalog {
    ($(
        $(#[$meta:meta])*
        $ty:ident($field:ident) => $name:literal : $payload:ty;
    )+) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
            pub struct $ty;

            impl Event for $ty {
                type Payload = $payload;
                const NAME: EventName = EventName::$ty;

                #[inline]
                fn channel(listeners: &Listeners) -> &Channel<$payload> {
                    &listeners.$field
                }
            }
        )+

        /// Name of an event in the catalog.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum EventName {
            $($ty,)+
        }

        impl EventName {
            /// Every event, in declaration order.
            pub const ALL: &'static [EventName] = &[$(EventName::$ty,)+];

            /// Returns the kebab-case wire name.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(EventName::$ty => $name,)+
                }
            }

            /// Resolves a wire name; fails with [`ContextError::UnknownEvent`].
            pub fn parse(name: &str) -> Result<Self, ContextError> {
                match name {
                    $($name => Ok(EventName::$ty),)+
                    _ => Err(ContextError::UnknownEvent { name: name.to_string() }),
                }
            }

            /// Decodes `payload` into the declared type and emits it.
            pub(crate) fn emit_json(
                self,
                manager: &EventManager,
                payload: Value,
            ) -> Result<usize, ContextError> {
                match self {
                    $(EventName::$ty => {
                        let payload: $payload = serde_json::from_value(payload).map_err(|e| {
                            ContextError::PayloadMismatch { event: $name, reason: e.to_string() }
                        })?;
                        Ok(manager.emit($ty, payload))
                    })+
                }
            }

            /// Subscribes a JSON handler; the typed payload is encoded per delivery.
            pub(crate) fn subscribe_json(
                self,
                manager: &EventManager,
                once: bool,
                handler: JsonHandler,
            ) -> SubscriptionId {
                match self {
                    $(EventName::$ty => {
                        let typed: Handler<$payload> = Rc::new(move |p: &$payload| {
                            let value = serde_json::to_value(p)?;
                            handler(&value)
                        });
                        manager.subscribe($ty, once, typed)
                    })+
                }
            }
        }

        /// One listener list per event.
        #[doc(hidden)]
        #[derive(Default)]
        pub struct Listeners {
            $($field: Channel<$payload>,)+
        }

        impl Listeners {
            pub(crate) fn remove(&self, name: EventName, seq: u64) -> bool {
                match name {
                    $(EventName::$ty => self.$field.remove(seq),)+
                }
            }

            pub(crate) fn len(&self, name: EventName) -> usize {
                match name {
                    $(EventName::$ty => self.$field.len(),)+
                }
            }

            pub(crate) fn clear(&self) {
                $(self.$field.clear();)+
            }
        }
    };
}

event_catalog! {
    /// The context became active (root attached, services injected).
    Mounted(mounted) => "mounted": ();
    /// The context is being torn down; last event ever delivered.
    Unmounted(unmounted) => "unmounted": ();

    /// A list fetch is about to be sent with these parameters.
    ListFetch(list_fetch) => "list-fetch": ListFetchParams;
    /// A list fetch completed; payload is the returned comments.
    CommentFetched(comment_fetched) => "comment-fetched": Vec<CommentData>;
    /// A list fetch failed.
    ListFailed(list_failed) => "list-failed": ListFailure;
    /// The list should be fetched again from the first page.
    ListReload(list_reload) => "list-reload": ();
    /// The list should scroll to its first comment.
    ListGotoFirst(list_goto_first) => "list-goto-first": ();

    /// The user asked to reply to a comment.
    CommentReply(comment_reply) => "comment-reply": CommentTarget;
    /// The user asked to edit a comment.
    CommentEdit(comment_edit) => "comment-edit": CommentTarget;
    CommentInserted(comment_inserted) => "comment-inserted": CommentData;
    CommentUpdated(comment_updated) => "comment-updated": CommentData;
    CommentDeleted(comment_deleted) => "comment-deleted": CommentData;

    SidebarShown(sidebar_shown) => "sidebar-shown": SidebarShowPayload;
    SidebarHidden(sidebar_hidden) => "sidebar-hidden": ();
    /// The editor posted a new comment.
    EditorSubmitted(editor_submitted) => "editor-submitted": CommentData;
    EditorReset(editor_reset) => "editor-reset": ();
    /// Elements visible only to admins should re-evaluate their visibility.
    AdminVisibility(admin_visibility) => "admin-visibility": ();

    /// Configuration changed; payload is the merged configuration.
    ConfUpdated(conf_updated) => "conf-updated": Conf;
    /// Dark mode flipped; emitted after [`ConfUpdated`].
    DarkModeChanged(dark_mode_changed) => "dark-mode-changed": bool;
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventName {
    type Err = ContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip_through_parse() {
        for name in EventName::ALL {
            assert_eq!(EventName::parse(name.as_str()).unwrap(), *name);
        }
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let err = "comment-exploded".parse::<EventName>().unwrap_err();
        assert!(matches!(err, ContextError::UnknownEvent { ref name } if name == "comment-exploded"));
    }

    #[test]
    fn test_marker_carries_its_name() {
        assert_eq!(CommentFetched::NAME.as_str(), "comment-fetched");
        assert_eq!(DarkModeChanged::NAME.to_string(), "dark-mode-changed");
    }
}
