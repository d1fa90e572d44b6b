use serde::{Deserialize, Serialize};

/// A single comment as returned by the API.
///
/// `rid` is the id of the comment this one replies to; `0` marks a root comment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentData {
    pub id: u64,
    pub rid: u64,
    pub content: String,
    pub nick: String,
    pub email_encrypted: String,
    pub link: String,
    pub ua: String,
    /// Creation time as sent by the server (already formatted).
    pub date: String,
    pub page_key: String,
    pub site_name: String,
    pub badge_name: String,
    pub badge_color: String,
    pub vote_up: u32,
    pub vote_down: u32,
    pub is_collapsed: bool,
    pub is_pending: bool,
    pub is_pinned: bool,
}

impl CommentData {
    /// Creates a root comment with the given id and content.
    pub fn new(id: u64, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            ..Self::default()
        }
    }

    /// Marks this comment as a reply to `rid`.
    #[inline]
    pub fn with_reply_to(mut self, rid: u64) -> Self {
        self.rid = rid;
        self
    }

    /// Attaches the author's nickname.
    #[inline]
    pub fn with_nick(mut self, nick: impl Into<String>) -> Self {
        self.nick = nick.into();
        self
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.rid == 0
    }
}

/// Ordering of comments inside a list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortBy {
    #[default]
    DateAsc,
    DateDesc,
    VoteUpDesc,
}

/// Parameters of one list fetch.
///
/// `limit = None` means "use the configured page size"; the context fills it
/// in before the request reaches the API client.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListFetchParams {
    pub offset: usize,
    pub limit: Option<usize>,
    pub flat_mode: Option<bool>,
    pub sort_by: Option<SortBy>,
    pub view_only_admin: bool,
}

impl ListFetchParams {
    /// Parameters starting at `offset`, everything else default.
    pub fn at(offset: usize) -> Self {
        Self {
            offset,
            ..Self::default()
        }
    }

    /// Whether this fetch replaces the list rather than appending a page.
    #[inline]
    pub fn is_first_page(&self) -> bool {
        self.offset == 0
    }
}

/// Payload of `list-failed`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListFailure {
    pub msg: String,
    pub status: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_params_accept_partial_json() {
        let params: ListFetchParams = serde_json::from_str(r#"{"offset": 20}"#).unwrap();
        assert_eq!(params, ListFetchParams::at(20));
        assert!(!params.is_first_page());
    }

    #[test]
    fn test_sort_wire_names() {
        let s = serde_json::to_string(&SortBy::VoteUpDesc).unwrap();
        assert_eq!(s, r#""VOTE_UP_DESC""#);
    }

    #[test]
    fn test_reply_is_not_root() {
        let c = CommentData::new(7, "hi").with_reply_to(3);
        assert!(!c.is_root());
        assert!(CommentData::new(3, "root").is_root());
    }
}
