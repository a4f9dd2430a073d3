//! Requesting identities
//!
//! An identity is the user (or anonymous visitor) a request is made by,
//! together with the groups it belongs to.

use serde::{Deserialize, Serialize};

/// The implicit group every identity belongs to, including anonymous visitors.
pub const ALL_USERS_GROUP: &str = "*";

/// The user a request is evaluated for.
///
/// # Examples
///
/// ```
/// use stable_access_rbac::Identity;
///
/// let user = Identity::new("Alice").with_group("editor");
/// assert!(user.in_group("editor"));
/// assert!(user.in_group("*"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    /// User name, or `None` for an anonymous visitor
    pub name: Option<String>,

    /// Explicit group memberships (the `*` group is implicit)
    #[serde(default)]
    pub groups: Vec<String>,
}

impl Identity {
    /// Creates a named identity with no explicit groups.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            groups: Vec::new(),
        }
    }

    /// Creates an anonymous identity.
    pub fn anonymous() -> Self {
        Self {
            name: None,
            groups: Vec::new(),
        }
    }

    /// Adds a group membership, ignoring duplicates.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        let group = group.into();
        if !self.groups.contains(&group) {
            self.groups.push(group);
        }
        self
    }

    /// Check whether this identity belongs to a group.
    pub fn in_group(&self, group: &str) -> bool {
        group == ALL_USERS_GROUP || self.groups.iter().any(|g| g == group)
    }

    /// Iterate every effective group, starting with `*`.
    pub fn effective_groups(&self) -> impl Iterator<Item = &str> {
        std::iter::once(ALL_USERS_GROUP).chain(self.groups.iter().map(String::as_str))
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_none()
    }
}
