//! # Request Tokens
//!
//! Typed view of the request parameters that select a revision: the action,
//! the `oldid`/`diff` pointers, the `direction` hint and the `stable`
//! preference. Raw query values are translated here, once, so the rest of
//! the crate never sees the zero-as-latest convention or malformed input.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::revision::{RevisionId, Title};

/// Request action kinds.
///
/// Only the actions the whitelist handles get their own variant; every other
/// action name is carried verbatim in `Other`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum RequestAction {
    /// Page view (the default action).
    #[default]
    View,

    /// Purge the page cache, then view.
    Purge,

    /// Render the page without the surrounding interface.
    Render,

    /// Edit form, or "view source" for readers who cannot edit.
    Edit,

    /// Revision history listing.
    History,

    /// Any other action.
    Other(String),
}

impl RequestAction {
    /// Parse an action name. Unknown names are kept in `Other`.
    ///
    /// # Example
    ///
    /// ```
    /// use stable_access_core::RequestAction;
    ///
    /// assert_eq!(RequestAction::parse("Edit"), RequestAction::Edit);
    /// assert_eq!(
    ///     RequestAction::parse("delete"),
    ///     RequestAction::Other("delete".to_string())
    /// );
    /// ```
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "view" => RequestAction::View,
            "purge" => RequestAction::Purge,
            "render" => RequestAction::Render,
            "edit" => RequestAction::Edit,
            "history" => RequestAction::History,
            _ => RequestAction::Other(s.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RequestAction::View => "view",
            RequestAction::Purge => "purge",
            RequestAction::Render => "render",
            RequestAction::Edit => "edit",
            RequestAction::History => "history",
            RequestAction::Other(name) => name,
        }
    }

    /// Check if this action displays page content like a plain view.
    pub fn is_page_view(&self) -> bool {
        matches!(
            self,
            RequestAction::View | RequestAction::Purge | RequestAction::Render
        )
    }
}

impl fmt::Display for RequestAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A revision pointer as given in `oldid` or a numeric `diff`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RevisionToken {
    /// `0`, or anything that does not name a revision: the latest revision.
    Latest,

    /// An explicit revision ID.
    Id(RevisionId),
}

impl RevisionToken {
    /// Parse a raw value. Non-numeric, zero and negative values all fall
    /// back to `Latest`.
    pub fn parse(raw: &str) -> Self {
        raw.trim()
            .parse::<i64>()
            .ok()
            .and_then(RevisionId::from_signed)
            .map_or(RevisionToken::Latest, RevisionToken::Id)
    }
}

impl From<RevisionId> for RevisionToken {
    fn from(id: RevisionId) -> Self {
        RevisionToken::Id(id)
    }
}

/// Value of the `diff` parameter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiffToken {
    /// Compare with the following revision.
    Next,

    /// Compare with the preceding revision.
    Prev,

    /// Compare with a specific revision.
    Revision(RevisionToken),
}

impl DiffToken {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "next" => DiffToken::Next,
            "prev" => DiffToken::Prev,
            other => DiffToken::Revision(RevisionToken::parse(other)),
        }
    }
}

/// Value of the `direction` parameter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Next,
    Prev,
}

impl Direction {
    /// Parse a direction hint. Anything but `next`/`prev` is ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "next" => Some(Direction::Next),
            "prev" => Some(Direction::Prev),
            _ => None,
        }
    }
}

/// Revision-selecting parameters of one request.
///
/// # Example
///
/// ```
/// use stable_access_core::{DiffToken, Direction, RequestAction, RequestTokens, RevisionToken};
///
/// let tokens = RequestTokens::from_query([("oldid", "0"), ("diff", "prev"), ("direction", "next")]);
/// assert_eq!(tokens.action, RequestAction::View);
/// assert_eq!(tokens.old, Some(RevisionToken::Latest));
/// assert_eq!(tokens.diff, Some(DiffToken::Prev));
/// assert_eq!(tokens.direction, Some(Direction::Next));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequestTokens {
    /// Requested action
    #[serde(default)]
    pub action: RequestAction,

    /// `oldid`: a single revision to view
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old: Option<RevisionToken>,

    /// `diff`: a second revision to compare against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<DiffToken>,

    /// `direction`: step the `oldid` revision forward or back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,

    /// `stable`: explicit preference for (1) or against (0) the approved
    /// revision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stable: Option<i64>,
}

impl RequestTokens {
    /// Tokens for a plain request of the given action.
    pub fn for_action(action: RequestAction) -> Self {
        Self {
            action,
            ..Self::default()
        }
    }

    /// Build tokens from raw query parameters.
    ///
    /// Unknown parameters are ignored and later values win over earlier
    /// ones. A missing `action` means `view`.
    pub fn from_query<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut tokens = Self::default();
        for (key, value) in params {
            let value = value.as_ref();
            match key.as_ref() {
                "action" => tokens.action = RequestAction::parse(value),
                "oldid" => tokens.old = Some(RevisionToken::parse(value)),
                "diff" => tokens.diff = Some(DiffToken::parse(value)),
                "direction" => tokens.direction = Direction::parse(value),
                "stable" => tokens.stable = value.trim().parse().ok(),
                _ => {}
            }
        }
        tokens
    }

    /// Check if the request names a specific revision or comparison.
    pub fn names_revision(&self) -> bool {
        self.old.is_some() || self.diff.is_some()
    }
}

/// Request-scoped state the host hands to the whitelist decision.
///
/// Holds the title being rendered by the active request, if any, and the
/// request's tokens. The tokens are mutable only through
/// [`RequestContext::force_default_to_approved`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    current_title: Option<Title>,
    tokens: RequestTokens,
}

impl RequestContext {
    /// Context for a request that renders `title`.
    pub fn for_page(title: Title, tokens: RequestTokens) -> Self {
        Self {
            current_title: Some(title),
            tokens,
        }
    }

    /// Context with no page being rendered, such as search or API lookups.
    pub fn detached(tokens: RequestTokens) -> Self {
        Self {
            current_title: None,
            tokens,
        }
    }

    pub fn current_title(&self) -> Option<&Title> {
        self.current_title.as_ref()
    }

    pub fn tokens(&self) -> &RequestTokens {
        &self.tokens
    }

    /// Check if `title` is the page this request renders.
    pub fn is_current_page(&self, title: &Title) -> bool {
        self.current_title.as_ref() == Some(title)
    }

    /// Make the approved revision the default view for this request.
    ///
    /// The host's "showing approved" check otherwise follows user
    /// preferences and configured exceptions, which may pick the latest
    /// revision even when readers are limited to approved ones. Setting
    /// `stable=1` overrides both. An explicit `stable` value is left alone.
    ///
    /// Returns `true` if the tokens were changed.
    pub fn force_default_to_approved(&mut self) -> bool {
        if self.tokens.stable.is_some() {
            return false;
        }
        self.tokens.stable = Some(1);
        true
    }
}
