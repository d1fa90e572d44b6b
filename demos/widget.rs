//! # Example: widget
//!
//! Bootstraps a widget from in-memory collaborators and drives one page fetch.
//!
//! Demonstrates how to:
//! - Build a [`Context`] and inject services into its registry.
//! - Let subsystems talk only through events (`list-fetch`, `comment-fetched`, `list-failed`).
//! - Update the configuration and observe `dark-mode-changed`.
//! - Tear the widget down.
//!
//! ## Flow
//! ```text
//! Context::builder().build()
//!     ├─► inject(api, data, editor)
//!     ├─► on(CommentFetched) ─► list renderer
//!     ├─► on(ListFailed)     ─► editor.notify(..)
//!     ├─► mount("#comments")
//!     ├─► fetch(offset 0) ─► ListFetch ─► api ─► data.load ─► CommentFetched
//!     ├─► fetch(offset 2) ─► ListFetch ─► api ─► ListFailed
//!     ├─► set_dark_mode(true) ─► ConfUpdated ─► DarkModeChanged
//!     └─► destroy() ─► Unmounted
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=commentary=debug cargo run --example widget
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use async_trait::async_trait;
use tracing_subscriber::EnvFilter;

use commentary::events::{CommentFetched, DarkModeChanged, ListFailed, Unmounted};
use commentary::{
    key, ApiClient, CommentData, Context, ContextError, DataManager, EditorController, ElementRef,
    ListFetchParams, NotifyLevel, ServiceError,
};

/// Serves a fixed thread; anything past it is a 404.
struct MemoryApi {
    thread: Vec<CommentData>,
}

#[async_trait(?Send)]
impl ApiClient for MemoryApi {
    async fn fetch_comments(&self, params: &ListFetchParams) -> Result<Vec<CommentData>, ServiceError> {
        if params.offset >= self.thread.len() {
            return Err(ServiceError::Status { status: 404, msg: "no more comments".into() });
        }
        let limit = params.limit.unwrap_or(self.thread.len());
        Ok(self.thread.iter().skip(params.offset).take(limit).cloned().collect())
    }

    async fn add_comment(&self, comment: &CommentData) -> Result<CommentData, ServiceError> {
        Ok(comment.clone())
    }

    async fn update_comment(&self, comment: &CommentData) -> Result<CommentData, ServiceError> {
        Ok(comment.clone())
    }

    async fn delete_comment(&self, _id: u64) -> Result<(), ServiceError> {
        Err(ServiceError::Unsupported("delete_comment"))
    }
}

#[derive(Default)]
struct MemoryData {
    list: RefCell<Vec<CommentData>>,
    last: RefCell<Option<ListFetchParams>>,
}

impl DataManager for MemoryData {
    fn comments(&self) -> Vec<CommentData> {
        self.list.borrow().clone()
    }

    fn load(&self, params: &ListFetchParams, comments: Vec<CommentData>) {
        let mut list = self.list.borrow_mut();
        if params.is_first_page() {
            list.clear();
        }
        list.extend(comments);
        *self.last.borrow_mut() = Some(params.clone());
    }

    fn insert(&self, comment: CommentData) {
        self.list.borrow_mut().push(comment);
    }

    fn update(&self, comment: CommentData) {
        if let Some(c) = self.list.borrow_mut().iter_mut().find(|c| c.id == comment.id) {
            *c = comment;
        }
    }

    fn remove(&self, id: u64) {
        self.list.borrow_mut().retain(|c| c.id != id);
    }

    fn last_fetch(&self) -> Option<ListFetchParams> {
        self.last.borrow().clone()
    }
}

/// Prints notifications instead of rendering them.
struct ConsoleEditor;

impl EditorController for ConsoleEditor {
    fn show_loading(&self) {
        println!("[editor] loading...");
    }

    fn hide_loading(&self) {
        println!("[editor] idle");
    }

    fn notify(&self, msg: &str, level: NotifyLevel) {
        println!("[editor] {level:?}: {msg}");
    }

    fn reset_state(&self) {
        println!("[editor] reset");
    }
}

/// Wires the list renderer and the failure notifier.
///
/// Handlers hold a `Weak` so the subscriptions do not keep the context alive.
fn wire(ctx: &Rc<Context>) -> Result<(), ContextError> {
    ctx.on(CommentFetched, |list: &Vec<CommentData>| {
        for c in list {
            let indent = if c.is_root() { "" } else { "  ↳ " };
            println!("[list] {indent}#{} {}: {}", c.id, c.nick, c.content);
        }
    })?;

    let weak: Weak<Context> = Rc::downgrade(ctx);
    ctx.on(ListFailed, move |failure| -> Result<(), ContextError> {
        if let Some(ctx) = weak.upgrade() {
            ctx.editor_show_notify(&failure.msg, NotifyLevel::Error)?;
        }
        Ok(())
    })?;

    ctx.on(DarkModeChanged, |on: &bool| println!("[theme] dark mode: {on}"))?;
    ctx.on(Unmounted, |_| println!("[widget] unmounted"))?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), ContextError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let ctx = Context::builder()
        .patch(commentary::ConfPatch::page_size(2))
        .build();

    let api: Rc<dyn ApiClient> = Rc::new(MemoryApi {
        thread: vec![
            CommentData::new(1, "Great write-up!").with_nick("ada"),
            CommentData::new(2, "Agreed, thanks.").with_nick("grace").with_reply_to(1),
        ],
    });
    let data = Rc::new(MemoryData::default());
    let as_data: Rc<dyn DataManager> = data.clone();
    let editor: Rc<dyn EditorController> = Rc::new(ConsoleEditor);
    ctx.inject(key::Api, api)?;
    ctx.inject(key::Data, as_data)?;
    ctx.inject(key::Editor, editor)?;

    wire(&ctx)?;
    ctx.mount(ElementRef::new("#comments"))?;

    ctx.fetch(ListFetchParams::at(0)).await?;
    println!("[data] {} comments loaded", data.comments().len());

    if let Err(err) = ctx.fetch(ListFetchParams::at(2)).await {
        println!("[widget] second page: {} ({})", err, err.as_label());
    }

    ctx.set_dark_mode(true)?;
    ctx.destroy();
    Ok(())
}
