//! # Context: the single shared handle of the widget.
//!
//! The [`Context`] owns the [`EventManager`], the [`ServiceRegistry`], the widget
//! [`Conf`] and the root element. Every subsystem receives the same `Rc<Context>`
//! and talks to every other subsystem through it, never directly.
//!
//! ## Bootstrap
//! ```text
//! Context::builder().conf(..).build()        → Uninitialized
//!   ├─► inject(key::Api, api)                 (one per collaborator)
//!   ├─► on(ListReload, ..)                    (initial subscriptions)
//!   └─► mount(root)                           → Active, emits Mounted
//! runtime
//!   facade call ─┬─► get(key) ─► service method
//!                └─► emit(E, payload) ─► subscribers
//! destroy()                                   → emits Unmounted, clears all, Destroyed
//! ```
//!
//! ## Rules
//! - Calls after `destroy()` fail with [`ContextError::ContextDestroyed`].
//! - Facade methods (see the `facade` module) need `Active`; before `mount` they fail with
//!   [`ContextError::NotMounted`].
//! - No `RefCell` borrow is held while a handler or a service runs, so both may call
//!   back into the context.
//!
//! ## Example
//! ```rust
//! use std::{cell::Cell, rc::Rc};
//! use commentary::{events::Mounted, Context, ConfPatch, ElementRef, LogSink};
//!
//! let ctx = Context::builder()
//!     .patch(ConfPatch::from_json(r#"{"server": "https://example.org/"}"#).unwrap())
//!     .error_sink(Rc::new(LogSink))
//!     .build();
//!
//! let mounted = Rc::new(Cell::new(false));
//! let m = Rc::clone(&mounted);
//! ctx.on(Mounted, move |_| m.set(true)).unwrap();
//!
//! ctx.mount(ElementRef::new("#comments")).unwrap();
//! assert!(mounted.get());
//! assert_eq!(ctx.conf().server, "https://example.org");
//!
//! ctx.destroy();
//! assert!(ctx.emit(Mounted, ()).is_err());
//! ```

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde_json::Value;

use super::builder::ContextBuilder;
use super::lifecycle::Lifecycle;
use crate::config::{Conf, ConfPatch};
use crate::error::ContextError;
use crate::events::{
    ConfUpdated, DarkModeChanged, Event, EventManager, HandlerOutput, Mounted, SubscriptionId,
    Unmounted,
};
use crate::model::ElementRef;
use crate::services::{ServiceKey, ServiceRegistry};
use crate::sinks::ErrorSink;

/// Coordination object of one widget instance.
pub struct Context {
    state: Cell<Lifecycle>,
    tearing_down: Cell<bool>,
    root: RefCell<Option<ElementRef>>,
    conf: RefCell<Conf>,
    /// Last dark mode value announced through `DarkModeChanged`.
    announced_dark: Cell<bool>,
    events: EventManager,
    services: ServiceRegistry,
}

impl Context {
    /// Returns a [`ContextBuilder`].
    pub fn builder() -> ContextBuilder {
        ContextBuilder::new()
    }

    pub(crate) fn new_internal(conf: Conf, sink: Rc<dyn ErrorSink>) -> Self {
        Self {
            state: Cell::new(Lifecycle::Uninitialized),
            tearing_down: Cell::new(false),
            root: RefCell::new(None),
            announced_dark: Cell::new(conf.dark_mode),
            conf: RefCell::new(conf),
            events: EventManager::new(sink),
            services: ServiceRegistry::new(),
        }
    }

    // ---------------------------
    // Lifecycle
    // ---------------------------

    #[inline]
    pub fn state(&self) -> Lifecycle {
        self.state.get()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state.get() == Lifecycle::Active
    }

    /// Attaches the root element and finishes bootstrap (`Uninitialized → Active`).
    ///
    /// Emits [`Mounted`] once the state is `Active`.
    pub fn mount(&self, root: ElementRef) -> Result<(), ContextError> {
        match self.state.get() {
            Lifecycle::Destroyed => return Err(ContextError::ContextDestroyed),
            Lifecycle::Active => return Err(ContextError::AlreadyMounted),
            Lifecycle::Uninitialized => {}
        }

        tracing::info!(
            root = %root,
            services = ?self.services.registered(),
            subscriptions = self.events.total_subscribers(),
            "context mounted"
        );
        *self.root.borrow_mut() = Some(root);
        self.state.set(Lifecycle::Active);
        self.events.emit(Mounted, ());
        Ok(())
    }

    /// Tears the context down (terminal).
    ///
    /// 1. emits [`Unmounted`] while everything is still reachable (only if the
    ///    context was mounted)
    /// 2. drops every subscription
    /// 3. empties the service registry (breaking `Rc` cycles with services that hold the context)
    /// 4. detaches the root element
    ///
    /// Calling it again, or from an `Unmounted` handler, does nothing.
    pub fn destroy(&self) {
        if self.state.get() == Lifecycle::Destroyed || self.tearing_down.replace(true) {
            return;
        }

        if self.state.get() == Lifecycle::Active {
            self.events.emit(Unmounted, ());
        }
        self.state.set(Lifecycle::Destroyed);
        self.events.clear();
        self.services.clear();
        let root = self.root.borrow_mut().take();
        tracing::info!(root = ?root, "context destroyed");
    }

    /// The widget's root element.
    pub fn root(&self) -> Result<ElementRef, ContextError> {
        self.ensure_active()?;
        self.root.borrow().clone().ok_or(ContextError::NotMounted)
    }

    pub(crate) fn ensure_alive(&self) -> Result<(), ContextError> {
        if self.state.get() == Lifecycle::Destroyed {
            Err(ContextError::ContextDestroyed)
        } else {
            Ok(())
        }
    }

    pub(crate) fn ensure_active(&self) -> Result<(), ContextError> {
        match self.state.get() {
            Lifecycle::Active => Ok(()),
            Lifecycle::Uninitialized => Err(ContextError::NotMounted),
            Lifecycle::Destroyed => Err(ContextError::ContextDestroyed),
        }
    }

    // ---------------------------
    // Service registry
    // ---------------------------

    /// Stores `service` under `key`, overwriting any previous instance.
    pub fn inject<K: ServiceKey>(&self, key: K, service: Rc<K::Service>) -> Result<(), ContextError> {
        self.ensure_alive()?;
        self.services.inject(key, service);
        Ok(())
    }

    /// Dynamic variant of [`inject`](Self::inject), see [`ServiceRegistry::inject_any`].
    pub fn inject_any(&self, name: &str, instance: Box<dyn Any>) -> Result<(), ContextError> {
        self.ensure_alive()?;
        self.services.inject_any(name, instance)
    }

    /// Returns the service stored under `key`.
    ///
    /// ### Errors
    /// - [`ContextError::ServiceNotRegistered`] if nothing was injected yet
    /// - [`ContextError::ContextDestroyed`] after teardown
    pub fn get<K: ServiceKey>(&self, key: K) -> Result<Rc<K::Service>, ContextError> {
        self.ensure_alive()?;
        self.services.get(key)
    }

    /// Returns the service stored under `key`, or `None` (also after teardown).
    pub fn try_get<K: ServiceKey>(&self, key: K) -> Option<Rc<K::Service>> {
        self.services.try_get(key)
    }

    // ---------------------------
    // Events
    // ---------------------------

    /// Subscribes `handler` to `event`, see [`EventManager::on`].
    pub fn on<E, F, R>(&self, event: E, handler: F) -> Result<SubscriptionId, ContextError>
    where
        E: Event,
        F: Fn(&E::Payload) -> R + 'static,
        R: HandlerOutput,
    {
        self.ensure_alive()?;
        Ok(self.events.on(event, handler))
    }

    /// One-shot subscription, see [`EventManager::once`].
    pub fn once<E, F, R>(&self, event: E, handler: F) -> Result<SubscriptionId, ContextError>
    where
        E: Event,
        F: Fn(&E::Payload) -> R + 'static,
        R: HandlerOutput,
    {
        self.ensure_alive()?;
        Ok(self.events.once(event, handler))
    }

    /// Removes a subscription; `Ok(false)` if it was not present.
    pub fn off(&self, id: SubscriptionId) -> Result<bool, ContextError> {
        self.ensure_alive()?;
        Ok(self.events.off(id))
    }

    /// Delivers `payload` to every subscriber of `event`, synchronously.
    ///
    /// Handler failures are reported to the error sink, never returned here.
    pub fn emit<E: Event>(&self, event: E, payload: E::Payload) -> Result<(), ContextError> {
        self.ensure_alive()?;
        self.events.emit(event, payload);
        Ok(())
    }

    /// String-boundary emit, see [`EventManager::emit_named`].
    pub fn emit_named(&self, name: &str, payload: Value) -> Result<(), ContextError> {
        self.ensure_alive()?;
        self.events.emit_named(name, payload).map(|_| ())
    }

    /// String-boundary subscription, see [`EventManager::on_named`].
    pub fn on_named<F, R>(&self, name: &str, handler: F) -> Result<SubscriptionId, ContextError>
    where
        F: Fn(&Value) -> R + 'static,
        R: HandlerOutput,
    {
        self.ensure_alive()?;
        self.events.on_named(name, handler)
    }

    /// String-boundary one-shot subscription.
    pub fn once_named<F, R>(&self, name: &str, handler: F) -> Result<SubscriptionId, ContextError>
    where
        F: Fn(&Value) -> R + 'static,
        R: HandlerOutput,
    {
        self.ensure_alive()?;
        self.events.once_named(name, handler)
    }

    /// Number of live subscriptions for `event`.
    pub fn subscriber_count<E: Event>(&self, event: E) -> usize {
        self.events.subscriber_count(event)
    }

    pub(crate) fn events(&self) -> &EventManager {
        &self.events
    }

    pub(crate) fn services(&self) -> &ServiceRegistry {
        &self.services
    }

    // ---------------------------
    // Configuration
    // ---------------------------

    /// Snapshot of the current configuration.
    pub fn conf(&self) -> Conf {
        self.conf.borrow().clone()
    }

    pub(crate) fn page_size(&self) -> usize {
        self.conf.borrow().page_size_clamped()
    }

    /// Merges `patch` into the configuration.
    ///
    /// Emits [`ConfUpdated`] with the merged configuration, then
    /// [`DarkModeChanged`] if the dark mode flag now differs from the last
    /// announced value. A `ConfUpdated` subscriber may update the configuration
    /// again; the flag is re-read once it returns, so observers never receive a
    /// value that contradicts [`conf`](Self::conf). Allowed during bootstrap.
    pub fn update_conf(&self, patch: ConfPatch) -> Result<(), ContextError> {
        self.ensure_alive()?;

        let conf = {
            let mut current = self.conf.borrow_mut();
            current.merge(patch);
            current.clone()
        };
        tracing::debug!(dark_mode = conf.dark_mode, "configuration updated");
        self.events.emit(ConfUpdated, conf);

        let dark_mode = self.conf.borrow().dark_mode;
        if dark_mode != self.announced_dark.replace(dark_mode) {
            self.events.emit(DarkModeChanged, dark_mode);
        }
        Ok(())
    }
}
