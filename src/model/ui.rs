use std::fmt;

use serde::{Deserialize, Serialize};

use super::CommentData;

/// Opaque handle to a UI element owned by the rendering layer.
///
/// The context never inspects it; it only carries it between collaborators
/// (root element, the node of the comment being replied to, ...).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementRef(String);

impl ElementRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Payload of `comment-reply` and `comment-edit`: the comment and its rendered node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentTarget {
    pub comment: CommentData,
    pub element: ElementRef,
}

/// Sidebar view to open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SidebarView {
    #[default]
    Comments,
    Sites,
    Pages,
    Transfer,
    Settings,
}

/// Payload of `sidebar-shown`, argument of [`SidebarController::show`](crate::SidebarController::show).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarShowPayload {
    pub view: Option<SidebarView>,
}

/// Severity of an editor notification.
///
/// Wire names are the single letters the editor uses (`"i"`, `"s"`, `"w"`, `"e"`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotifyLevel {
    #[default]
    #[serde(rename = "i")]
    Info,
    #[serde(rename = "s")]
    Success,
    #[serde(rename = "w")]
    Warning,
    #[serde(rename = "e")]
    Error,
}

/// One-shot continuation passed to the checker.
pub type Callback = Box<dyn FnOnce()>;

/// Argument of [`Checker::check_admin`](crate::Checker::check_admin).
#[derive(Default)]
pub struct CheckerPayload {
    pub on_success: Option<Callback>,
    pub on_cancel: Option<Callback>,
}

impl CheckerPayload {
    #[must_use]
    pub fn on_success(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_success = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_cancel(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_cancel = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for CheckerPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckerPayload")
            .field("on_success", &self.on_success.is_some())
            .field("on_cancel", &self.on_cancel.is_some())
            .finish()
    }
}

/// Argument of [`Checker::check_captcha`](crate::Checker::check_captcha).
///
/// Either `img_data` (inline image) or `iframe` (URL of a captcha page) is set
/// by the API layer when the server demands a captcha.
#[derive(Debug, Default)]
pub struct CaptchaPayload {
    pub img_data: Option<String>,
    pub iframe: Option<String>,
    pub checker: CheckerPayload,
}
