//! # Service registry - typed dependency injection.
//!
//! The registry maps a closed set of keys to live service instances. Every key is
//! a marker type in [`key`] carrying the capability type of its slot, so
//! `get(key::Api)` returns `Rc<dyn ApiClient>` without a cast on the caller side.
//!
//! ## Architecture
//! ```text
//! bootstrap                         runtime
//!   inject(key::Api, api)  ──┐        ┌──► get(key::Api)    → Rc<dyn ApiClient>
//!   inject(key::Data, data) ─┼─► Slots ┼──► get(key::Editor) → Err(ServiceNotRegistered)
//!   inject(key::Editor, ..) ─┘        └──► try_get(key::Marked) → Option<..>
//! ```
//!
//! ## Rules
//! - A slot is empty or holds exactly one instance; re-injection overwrites.
//! - `get` on an empty slot fails with [`ContextError::ServiceNotRegistered`].
//! - There is no per-slot removal; [`ServiceRegistry::clear`] empties everything at teardown.
//! - A replaced or cleared instance is dropped after the slot is released, so its
//!   `Drop` may use the registry.

use std::any::{type_name, Any};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::ContextError;
use crate::services::capabilities::{
    ApiClient, Checker, DataManager, EditorController, MarkdownRenderer, SidebarController,
    Translator,
};

/// A slot of the registry and the capability type it accepts.
///
/// Implemented only by the marker types of [`key`].
pub trait ServiceKey: Copy + fmt::Debug + 'static {
    /// Capability stored in this slot (a trait object).
    type Service: ?Sized + 'static;

    /// Name of the slot, as used at the dynamic boundary and in logs.
    const NAME: &'static str;

    #[doc(hidden)]
    fn slot(slots: &Slots) -> &RefCell<Option<Rc<Self::Service>>>;
}

macro_rules! service_keys {
    ($(
        $(#[$meta:meta])*
        $key:ident($field:ident) => $name:literal : $service:ty;
    )+) => {
        /// Keys of the service registry.
        pub mod key {
            $(
                $(#[$meta])*
                #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
                pub struct $key;
            )+
        }

        $(
            impl ServiceKey for key::$key {
                type Service = $service;
                const NAME: &'static str = $name;

                #[inline]
                fn slot(slots: &Slots) -> &RefCell<Option<Rc<$service>>> {
                    &slots.$field
                }
            }
        )+

        #[doc(hidden)]
        #[derive(Default)]
        pub struct Slots {
            $($field: RefCell<Option<Rc<$service>>>,)+
        }

        impl ServiceRegistry {
            /// Every slot name, in declaration order.
            pub const KEYS: &'static [&'static str] = &[$($name,)+];

            /// Injects a type-erased instance by slot name.
            ///
            /// `instance` must be a `Box<Rc<dyn Capability>>` of the named slot, e.g.
            /// `Box::new(api as Rc<dyn ApiClient>)` for `"api"`.
            ///
            /// ### Errors
            /// - [`ContextError::UnknownService`] if `name` is not a slot
            /// - [`ContextError::TypeMismatch`] if the box holds anything else
            pub fn inject_any(&self, name: &str, instance: Box<dyn Any>) -> Result<(), ContextError> {
                match name {
                    $($name => {
                        let service = instance.downcast::<Rc<$service>>().map_err(|_| {
                            ContextError::TypeMismatch {
                                key: $name,
                                expected: type_name::<Rc<$service>>(),
                            }
                        })?;
                        self.inject(key::$key, *service);
                        Ok(())
                    })+
                    _ => Err(ContextError::UnknownService { name: name.to_string() }),
                }
            }

            /// Names of the populated slots, in declaration order.
            pub fn registered(&self) -> Vec<&'static str> {
                let mut names = Vec::new();
                $(
                    if self.slots.$field.borrow().is_some() {
                        names.push($name);
                    }
                )+
                names
            }

            /// Empties every slot.
            pub fn clear(&self) {
                $(
                    let dropped = self.slots.$field.borrow_mut().take();
                    drop(dropped);
                )+
                tracing::debug!("service registry cleared");
            }
        }
    };
}

/// Typed registry of the widget's collaborators.
#[derive(Default)]
pub struct ServiceRegistry {
    slots: Slots,
}

service_keys! {
    /// HTTP API client.
    Api(api) => "api": dyn ApiClient;
    /// Comment list and fetch state.
    Data(data) => "data": dyn DataManager;
    /// UI string translator.
    I18n(i18n) => "i18n": dyn Translator;
    /// Markdown renderer.
    Marked(marked) => "marked": dyn MarkdownRenderer;
    Sidebar(sidebar) => "sidebar": dyn SidebarController;
    Editor(editor) => "editor": dyn EditorController;
    /// Captcha and admin checker.
    Checker(checker) => "checker": dyn Checker;
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `service` under `key`, replacing any previous instance.
    pub fn inject<K: ServiceKey>(&self, _key: K, service: Rc<K::Service>) {
        let previous = K::slot(&self.slots).borrow_mut().replace(service);
        tracing::debug!(service = K::NAME, replaced = previous.is_some(), "service injected");
        drop(previous);
    }

    /// Returns the instance stored under `key`.
    ///
    /// ### Errors
    /// [`ContextError::ServiceNotRegistered`] if nothing was injected for `key`.
    pub fn get<K: ServiceKey>(&self, key: K) -> Result<Rc<K::Service>, ContextError> {
        self.try_get(key)
            .ok_or(ContextError::ServiceNotRegistered { key: K::NAME })
    }

    /// Returns the instance stored under `key`, if any.
    pub fn try_get<K: ServiceKey>(&self, _key: K) -> Option<Rc<K::Service>> {
        K::slot(&self.slots).borrow().clone()
    }

    #[inline]
    pub fn contains<K: ServiceKey>(&self, _key: K) -> bool {
        K::slot(&self.slots).borrow().is_some()
    }
}
