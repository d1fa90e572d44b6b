//! # Widget configuration.
//!
//! Provides [`Conf`], the centralized options every subsystem reads through the context.
//!
//! ## Sentinel values
//! - `server = ""` → no backend configured yet (set by the embedding page)
//! - `req_timeout_ms = 0` → no request timeout (see [`Conf::request_timeout`])

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::SortBy;

/// Whether comments are rendered as a flat list or as nested threads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlatMode {
    /// Flat on narrow viewports, nested elsewhere (decided by the renderer).
    #[default]
    Auto,
    Always,
    Never,
}

/// List pagination options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Comments requested per page (min 1; clamped by [`Conf::normalize`]).
    pub page_size: usize,
    /// Show a "read more" button instead of numbered pages.
    pub read_more: bool,
    /// Load the next page when the list scrolls to the bottom.
    pub auto_load: bool,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_size: 20,
            read_more: true,
            auto_load: true,
        }
    }
}

/// Avatar source options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gravatar {
    pub mirror: String,
    pub params: String,
}

impl Default for Gravatar {
    fn default() -> Self {
        Self {
            mirror: "https://www.gravatar.com/avatar/".to_string(),
            params: "sha256=1&d=mp&s=240".to_string(),
        }
    }
}

/// Widget-wide configuration.
///
/// Defines:
/// - **Endpoints**: backend `server`, `site` and page identity
/// - **Display**: dark mode, flat/nested layout, sort order, feature toggles
/// - **Editor**: placeholder and button texts, image upload
/// - **List**: pagination
///
/// ## Notes
/// All fields are public. Mutate it through
/// [`Context::update_conf`](crate::Context::update_conf) so subscribers of
/// `conf-updated` observe the change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Conf {
    /// Backend base URL, without trailing slash.
    pub server: String,
    /// Site name the page belongs to.
    pub site: String,
    /// Key identifying the page (usually its path).
    pub page_key: String,
    pub page_title: String,
    pub locale: String,

    pub dark_mode: bool,
    pub flat_mode: FlatMode,
    /// Maximum nesting depth in nested mode.
    pub nest_max: u32,
    pub nest_sort: SortBy,
    /// Show the sort dropdown above the list.
    pub list_sort: bool,
    pub vote: bool,
    pub vote_down: bool,
    pub ua_badge: bool,
    /// Show the markdown preview button in the editor.
    pub preview: bool,

    pub img_upload: bool,
    pub placeholder: String,
    pub no_comment: String,
    pub send_btn: String,

    /// Per-request timeout in milliseconds (`0` = none).
    pub req_timeout_ms: u64,
    /// Let the backend override local options on load.
    pub use_backend_conf: bool,

    pub pagination: Pagination,
    pub gravatar: Gravatar,
}

impl Conf {
    /// Returns the request timeout as an `Option`.
    ///
    /// - `None` → no timeout
    /// - `Some(d)` → timeout applied per request
    #[inline]
    pub fn request_timeout(&self) -> Option<Duration> {
        if self.req_timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.req_timeout_ms))
        }
    }

    /// Returns the page size clamped to a minimum of 1.
    #[inline]
    pub fn page_size_clamped(&self) -> usize {
        self.pagination.page_size.max(1)
    }

    /// Brings the options into canonical form.
    ///
    /// - trailing `/` removed from `server`
    /// - `pagination.page_size` clamped to a minimum of 1
    pub fn normalize(&mut self) {
        let trimmed = self.server.trim_end_matches('/').len();
        self.server.truncate(trimmed);
        self.pagination.page_size = self.page_size_clamped();
    }
}

impl Default for Conf {
    /// Default configuration:
    ///
    /// - no server, site or page identity
    /// - light mode, `FlatMode::Auto`, nesting up to 2 levels sorted by date
    /// - voting enabled, down-votes disabled
    /// - `req_timeout_ms = 15000`
    /// - pagination of 20 with "read more" and auto-load
    fn default() -> Self {
        Self {
            server: String::new(),
            site: String::new(),
            page_key: String::new(),
            page_title: String::new(),
            locale: "en".to_string(),
            dark_mode: false,
            flat_mode: FlatMode::default(),
            nest_max: 2,
            nest_sort: SortBy::DateAsc,
            list_sort: true,
            vote: true,
            vote_down: false,
            ua_badge: false,
            preview: true,
            img_upload: true,
            placeholder: String::new(),
            no_comment: String::new(),
            send_btn: String::new(),
            req_timeout_ms: 15_000,
            use_backend_conf: true,
            pagination: Pagination::default(),
            gravatar: Gravatar::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_trailing_slashes() {
        let mut conf = Conf {
            server: "https://comments.example.org//".to_string(),
            ..Conf::default()
        };
        conf.normalize();
        assert_eq!(conf.server, "https://comments.example.org");
    }

    #[test]
    fn test_normalize_clamps_page_size() {
        let mut conf = Conf::default();
        conf.pagination.page_size = 0;
        conf.normalize();
        assert_eq!(conf.pagination.page_size, 1);
    }

    #[test]
    fn test_zero_timeout_means_none() {
        let conf = Conf { req_timeout_ms: 0, ..Conf::default() };
        assert_eq!(conf.request_timeout(), None);
        assert_eq!(
            Conf::default().request_timeout(),
            Some(Duration::from_secs(15))
        );
    }
}
