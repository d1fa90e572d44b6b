//! # Capability traits of the collaborating subsystems.
//!
//! One trait per service slot. The context only consumes these; concrete
//! implementations (HTTP client, DOM editor, ...) live with the embedding widget.
//!
//! All traits are single-threaded (`!Send` implementations are fine) and take
//! `&self`: implementations that keep state use interior mutability, because the
//! same instance is shared by the registry and by whoever else holds it.

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::model::{
    CaptchaPayload, CheckerPayload, CommentData, ListFetchParams, NotifyLevel, SidebarShowPayload,
};

/// HTTP operations for listing and editing comments.
#[async_trait(?Send)]
pub trait ApiClient {
    /// Fetches one page of comments.
    async fn fetch_comments(&self, params: &ListFetchParams) -> Result<Vec<CommentData>, ServiceError>;

    /// Posts a new comment and returns it as stored by the server.
    async fn add_comment(&self, comment: &CommentData) -> Result<CommentData, ServiceError>;

    /// Updates an existing comment and returns it as stored by the server.
    async fn update_comment(&self, comment: &CommentData) -> Result<CommentData, ServiceError>;

    async fn delete_comment(&self, id: u64) -> Result<(), ServiceError>;
}

/// In-memory comment list and the state of the last fetch.
pub trait DataManager {
    /// Comments currently loaded, in display order.
    fn comments(&self) -> Vec<CommentData>;

    /// Stores the result of a fetch: replaces the list for the first page,
    /// appends otherwise.
    fn load(&self, params: &ListFetchParams, comments: Vec<CommentData>);

    fn insert(&self, comment: CommentData);
    fn update(&self, comment: CommentData);
    fn remove(&self, id: u64);

    /// Parameters of the last fetch, if any.
    fn last_fetch(&self) -> Option<ListFetchParams>;
}

/// Lookup and interpolation of UI strings.
pub trait Translator {
    /// Returns the text for `key` with `{name}` placeholders replaced from `args`.
    fn translate(&self, key: &str, args: &[(&str, &str)]) -> String;
}

pub trait MarkdownRenderer {
    /// Renders markdown source to HTML.
    fn render(&self, src: &str) -> String;
}

pub trait SidebarController {
    fn show(&self, payload: SidebarShowPayload);
    fn hide(&self);
}

/// The comment editor.
pub trait EditorController {
    fn show_loading(&self);
    fn hide_loading(&self);
    /// Shows a transient message; the only user-visible error channel.
    fn notify(&self, msg: &str, level: NotifyLevel);
    /// Clears reply/edit state and the input.
    fn reset_state(&self);
}

/// Captcha and admin-password checks.
pub trait Checker {
    fn check_captcha(&self, payload: CaptchaPayload);
    fn check_admin(&self, payload: CheckerPayload);
}
