//! # Partial configuration updates.
//!
//! [`ConfPatch`] mirrors [`Conf`] with every field optional. Merging copies the
//! `Some` fields and leaves the rest of the target untouched, so a merged
//! configuration never has a partially undefined field.
//!
//! ## Example
//! ```rust
//! use commentary::{Conf, ConfPatch};
//!
//! let mut conf = Conf::default();
//! conf.pagination.page_size = 20;
//!
//! conf.merge(ConfPatch::from_json(r#"{"darkMode": true}"#).unwrap());
//!
//! assert!(conf.dark_mode);
//! assert_eq!(conf.pagination.page_size, 20);
//! ```

use serde::Deserialize;

use super::conf::{Conf, FlatMode, Gravatar, Pagination};
use crate::model::SortBy;

/// Copies every `Some` field of `$patch` into `$target`.
macro_rules! merge_fields {
    ($target:expr, $patch:expr; $($field:ident),+ $(,)?) => {
        $(
            if let Some(v) = $patch.$field {
                $target.$field = v;
            }
        )+
    };
}

/// Partial [`Pagination`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaginationPatch {
    pub page_size: Option<usize>,
    pub read_more: Option<bool>,
    pub auto_load: Option<bool>,
}

/// Partial [`Gravatar`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GravatarPatch {
    pub mirror: Option<String>,
    pub params: Option<String>,
}

/// Partial [`Conf`]; accepted by [`Context::update_conf`](crate::Context::update_conf).
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfPatch {
    pub server: Option<String>,
    pub site: Option<String>,
    pub page_key: Option<String>,
    pub page_title: Option<String>,
    pub locale: Option<String>,
    pub dark_mode: Option<bool>,
    pub flat_mode: Option<FlatMode>,
    pub nest_max: Option<u32>,
    pub nest_sort: Option<SortBy>,
    pub list_sort: Option<bool>,
    pub vote: Option<bool>,
    pub vote_down: Option<bool>,
    pub ua_badge: Option<bool>,
    pub preview: Option<bool>,
    pub img_upload: Option<bool>,
    pub placeholder: Option<String>,
    pub no_comment: Option<String>,
    pub send_btn: Option<String>,
    pub req_timeout_ms: Option<u64>,
    pub use_backend_conf: Option<bool>,
    pub pagination: Option<PaginationPatch>,
    pub gravatar: Option<GravatarPatch>,
}

impl ConfPatch {
    /// Parses a camelCase JSON object; unknown keys are ignored.
    pub fn from_json(src: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(src)
    }

    /// Patch that only toggles dark mode.
    pub fn dark_mode(on: bool) -> Self {
        Self {
            dark_mode: Some(on),
            ..Self::default()
        }
    }

    /// Patch that only changes the page size.
    pub fn page_size(n: usize) -> Self {
        Self {
            pagination: Some(PaginationPatch {
                page_size: Some(n),
                ..PaginationPatch::default()
            }),
            ..Self::default()
        }
    }

    /// Returns `true` if applying this patch cannot change anything.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Pagination {
    fn merge(&mut self, patch: PaginationPatch) {
        merge_fields!(self, patch; page_size, read_more, auto_load);
    }
}

impl Gravatar {
    fn merge(&mut self, patch: GravatarPatch) {
        merge_fields!(self, patch; mirror, params);
    }
}

impl Conf {
    /// Merges `patch` into this configuration and normalizes the result.
    pub fn merge(&mut self, patch: ConfPatch) {
        merge_fields!(self, patch;
            server, site, page_key, page_title, locale,
            dark_mode, flat_mode, nest_max, nest_sort, list_sort,
            vote, vote_down, ua_badge, preview,
            img_upload, placeholder, no_comment, send_btn,
            req_timeout_ms, use_backend_conf,
        );
        if let Some(p) = patch.pagination {
            self.pagination.merge(p);
        }
        if let Some(g) = patch.gravatar {
            self.gravatar.merge(g);
        }
        self.normalize();
    }
}
