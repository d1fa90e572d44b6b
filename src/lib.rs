//! # commentary
//!
//! **commentary** is the coordination core of an embeddable comment widget.
//!
//! The widget is made of subsystems that know nothing about each other: an HTTP
//! API client, a data manager, the editor, the sidebar, a captcha/admin checker,
//! a translator, a markdown renderer. They all hold the same [`Context`] and
//! communicate exclusively through it, either by looking each other up in its
//! typed service registry or by emitting and observing typed events.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  ApiClient   │   │    Editor    │   │   Sidebar    │   ... collaborators
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            │ inject / get     │ on / emit        │ facade calls
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Context (Rc, one per widget instance)                            │
//! │  - ServiceRegistry (key::Api → Rc<dyn ApiClient>, ...)            │
//! │  - EventManager    (closed catalog, synchronous, ordered)         │
//! │  - Conf            (merged by ConfPatch, announced by events)     │
//! │  - Lifecycle       (Uninitialized → Active → Destroyed)           │
//! └──────────────────────────────┬────────────────────────────────────┘
//!                                │ handler Err / panic
//!                                ▼
//!                          ErrorSink (LogSink → tracing)
//! ```
//!
//! ### Lifecycle
//! ```text
//! Context::builder().build() ──► inject(..) ──► on(..) ──► mount(root)
//!
//! runtime:
//!   ├─► facade call ─► get(key) ─► service method
//!   └─► facade call ─► emit(E, payload)
//!           ├─► h1(&payload)
//!           ├─► h2(&payload) ── emit(E2, ..) ─► runs to completion first
//!           └─► h3(&payload)
//!
//! destroy() ─► Unmounted ─► subscriptions cleared ─► registry cleared
//! ```
//!
//! ## Features
//! | Area              | Description                                                      | Key types / traits                          |
//! |-------------------|------------------------------------------------------------------|---------------------------------------------|
//! | **Events**        | Closed typed catalog, ordered synchronous delivery, `once`/`off`.| [`events::Event`], [`EventManager`]         |
//! | **Services**      | Typed slots for every collaborator.                              | [`ServiceRegistry`], [`key`], [`ApiClient`] |
//! | **Facade**        | Delegation methods collaborators call on the context.            | [`Context`]                                 |
//! | **Configuration** | Widget options with partial, announced updates.                  | [`Conf`], [`ConfPatch`]                     |
//! | **Errors**        | Typed errors; handler failures isolated and reported.            | [`ContextError`], [`HandlerError`], [`ErrorSink`] |
//!
//! ## Example
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//! use commentary::{
//!     events::CommentFetched, key, ApiClient, CommentData, Context, ElementRef,
//!     ListFetchParams, ServiceError,
//! };
//!
//! struct Fixed;
//!
//! #[async_trait::async_trait(?Send)]
//! impl ApiClient for Fixed {
//!     async fn fetch_comments(&self, _p: &ListFetchParams) -> Result<Vec<CommentData>, ServiceError> {
//!         Ok(vec![CommentData::new(1, "first!")])
//!     }
//!     async fn add_comment(&self, c: &CommentData) -> Result<CommentData, ServiceError> { Ok(c.clone()) }
//!     async fn update_comment(&self, c: &CommentData) -> Result<CommentData, ServiceError> { Ok(c.clone()) }
//!     async fn delete_comment(&self, _id: u64) -> Result<(), ServiceError> { Ok(()) }
//! }
//!
//! # block_on(async {
//! let ctx = Context::builder().build();
//! let api: Rc<dyn ApiClient> = Rc::new(Fixed);
//! ctx.inject(key::Api, api)?;
//!
//! let fetched = Rc::new(RefCell::new(Vec::new()));
//! let f = Rc::clone(&fetched);
//! ctx.on(CommentFetched, move |list: &Vec<CommentData>| f.borrow_mut().extend(list.iter().map(|c| c.id)))?;
//!
//! ctx.mount(ElementRef::new("#comments"))?;
//! ctx.fetch(ListFetchParams::at(0)).await?;
//!
//! assert_eq!(*fetched.borrow(), vec![1]);
//! # Ok::<(), commentary::ContextError>(())
//! # }).unwrap();
//! # fn block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

mod config;
mod context;
mod error;
pub mod events;
mod model;
mod services;
mod sinks;

// ---- Public re-exports ----

pub use config::{Conf, ConfPatch, FlatMode, Gravatar, GravatarPatch, Pagination, PaginationPatch};
pub use context::{Context, ContextBuilder, Lifecycle};
pub use error::{BoxError, ContextError, HandlerError, ServiceError};
pub use events::{EventManager, EventName, HandlerOutput, SubscriptionId};
pub use model::{
    Callback, CaptchaPayload, CheckerPayload, CommentData, CommentTarget, ElementRef, ListFailure,
    ListFetchParams, NotifyLevel, SidebarShowPayload, SidebarView, SortBy,
};
pub use services::{
    key, ApiClient, Checker, DataManager, EditorController, MarkdownRenderer, ServiceKey,
    ServiceRegistry, SidebarController, Translator,
};
pub use sinks::{ErrorSink, LogSink, MemorySink, SinkRecord};
