//! Facade methods of [`Context`].
//!
//! Each method either looks a service up and calls it, or emits an event; none
//! keeps state of its own. All of them need an `Active` context unless
//! documented otherwise.

use std::rc::Rc;

use super::context::Context;
use crate::config::ConfPatch;
use crate::error::{ContextError, ServiceError};
use crate::events::{
    AdminVisibility, CommentEdit, CommentFetched, CommentReply, ListFailed, ListFetch,
    ListGotoFirst, ListReload,
};
use crate::model::{
    CaptchaPayload, CheckerPayload, CommentData, CommentTarget, ElementRef, ListFailure,
    ListFetchParams, NotifyLevel, SidebarShowPayload,
};
use crate::services::{key, ApiClient, DataManager, MarkdownRenderer};

impl Context {
    /// The API client.
    pub fn api(&self) -> Result<Rc<dyn ApiClient>, ContextError> {
        self.ensure_active()?;
        self.services().get(key::Api)
    }

    /// The data manager.
    pub fn data(&self) -> Result<Rc<dyn DataManager>, ContextError> {
        self.ensure_active()?;
        self.services().get(key::Data)
    }

    /// The markdown renderer, if one was injected.
    ///
    /// Absent-safe: returns `None` when no renderer is registered or the context
    /// is not active.
    pub fn marked(&self) -> Option<Rc<dyn MarkdownRenderer>> {
        self.ensure_active().ok()?;
        self.try_get(key::Marked)
    }

    /// Translates `name`, replacing `{arg}` placeholders from `args`.
    ///
    /// Absent-safe: without an injected translator (or outside `Active`) the key
    /// itself is returned.
    pub fn t(&self, name: &str, args: &[(&str, &str)]) -> String {
        match self.try_get(key::I18n) {
            Some(i18n) if self.is_active() => i18n.translate(name, args),
            _ => name.to_string(),
        }
    }

    /// Fetches a page of comments.
    ///
    /// 1. fills `params.limit` from `pagination.page_size` when unset
    /// 2. emits [`ListFetch`] with the final parameters
    /// 3. awaits [`ApiClient::fetch_comments`]
    /// 4. on success loads the list into the data manager (skipped when none is
    ///    registered) and emits [`CommentFetched`] once
    /// 5. on failure emits [`ListFailed`] and returns [`ContextError::Service`]
    ///
    /// If the context is destroyed by a [`ListFetch`] subscriber, no request is
    /// sent. If it is destroyed while the request is in flight, nothing is
    /// emitted. Both return [`ContextError::ContextDestroyed`].
    pub async fn fetch(&self, mut params: ListFetchParams) -> Result<(), ContextError> {
        self.ensure_active()?;
        let api = self.services().get(key::Api)?;
        if params.limit.is_none() {
            params.limit = Some(self.page_size());
        }

        self.events().emit(ListFetch, params.clone());
        self.ensure_alive()?;
        let result = api.fetch_comments(&params).await;
        self.ensure_alive()?;

        match result {
            Ok(comments) => {
                tracing::debug!(offset = params.offset, count = comments.len(), "comments fetched");
                if let Some(data) = self.try_get(key::Data) {
                    data.load(&params, comments.clone());
                }
                self.events().emit(CommentFetched, comments);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(offset = params.offset, label = err.as_label(), err = %err, "comment fetch failed");
                let status = match &err {
                    ServiceError::Status { status, .. } => Some(*status),
                    _ => None,
                };
                self.events().emit(
                    ListFailed,
                    ListFailure {
                        msg: err.to_string(),
                        status,
                    },
                );
                Err(err.into())
            }
        }
    }

    /// Asks the list to refetch from the first page (emits [`ListReload`]).
    pub fn reload(&self) -> Result<(), ContextError> {
        self.ensure_active()?;
        self.events().emit(ListReload, ());
        Ok(())
    }

    /// Asks the list to scroll to its first comment (emits [`ListGotoFirst`]).
    pub fn list_goto_first(&self) -> Result<(), ContextError> {
        self.ensure_active()?;
        self.events().emit(ListGotoFirst, ());
        Ok(())
    }

    /// Starts a reply to `comment` rendered at `element` (emits [`CommentReply`]).
    pub fn reply_comment(&self, comment: CommentData, element: ElementRef) -> Result<(), ContextError> {
        self.ensure_active()?;
        self.events().emit(CommentReply, CommentTarget { comment, element });
        Ok(())
    }

    /// Starts editing `comment` rendered at `element` (emits [`CommentEdit`]).
    pub fn edit_comment(&self, comment: CommentData, element: ElementRef) -> Result<(), ContextError> {
        self.ensure_active()?;
        self.events().emit(CommentEdit, CommentTarget { comment, element });
        Ok(())
    }

    pub fn show_sidebar(&self, payload: SidebarShowPayload) -> Result<(), ContextError> {
        self.ensure_active()?;
        self.services().get(key::Sidebar)?.show(payload);
        Ok(())
    }

    pub fn hide_sidebar(&self) -> Result<(), ContextError> {
        self.ensure_active()?;
        self.services().get(key::Sidebar)?.hide();
        Ok(())
    }

    pub fn editor_show_loading(&self) -> Result<(), ContextError> {
        self.ensure_active()?;
        self.services().get(key::Editor)?.show_loading();
        Ok(())
    }

    pub fn editor_hide_loading(&self) -> Result<(), ContextError> {
        self.ensure_active()?;
        self.services().get(key::Editor)?.hide_loading();
        Ok(())
    }

    /// Shows `msg` in the editor's notification area.
    pub fn editor_show_notify(&self, msg: &str, level: NotifyLevel) -> Result<(), ContextError> {
        self.ensure_active()?;
        self.services().get(key::Editor)?.notify(msg, level);
        Ok(())
    }

    pub fn editor_reset_state(&self) -> Result<(), ContextError> {
        self.ensure_active()?;
        self.services().get(key::Editor)?.reset_state();
        Ok(())
    }

    pub fn check_captcha(&self, payload: CaptchaPayload) -> Result<(), ContextError> {
        self.ensure_active()?;
        self.services().get(key::Checker)?.check_captcha(payload);
        Ok(())
    }

    pub fn check_admin(&self, payload: CheckerPayload) -> Result<(), ContextError> {
        self.ensure_active()?;
        self.services().get(key::Checker)?.check_admin(payload);
        Ok(())
    }

    /// Asks admin-only elements to refresh their visibility (emits [`AdminVisibility`]).
    pub fn check_admin_show_el(&self) -> Result<(), ContextError> {
        self.ensure_active()?;
        self.events().emit(AdminVisibility, ());
        Ok(())
    }

    /// Shorthand for [`update_conf`](Self::update_conf) with only `dark_mode` set.
    ///
    /// Allowed during bootstrap.
    pub fn set_dark_mode(&self, dark_mode: bool) -> Result<(), ContextError> {
        self.update_conf(ConfPatch::dark_mode(dark_mode))
    }
}
