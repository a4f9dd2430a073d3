//! # Group Grants
//!
//! Maps user groups to the rights they hold, and answers whether an
//! identity holds a right through any of its groups.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{RightsError, RightsResult};
use crate::identity::{Identity, ALL_USERS_GROUP};
use crate::rights::Right;

/// Groups granted `readstable` out of the box.
///
/// The `*` entry makes approved revisions readable by everyone unless a
/// deployment revokes it.
pub const DEFAULT_READ_STABLE_GROUPS: &[&str] =
    &[ALL_USERS_GROUP, "autoreview", "editor", "reviewer", "sysop"];

/// A table of rights granted per group.
///
/// # Example
///
/// ```
/// use stable_access_rbac::{GroupPermissions, Identity, Right};
///
/// let mut grants = GroupPermissions::new();
/// grants.grant("editor", Right::ReadStable);
///
/// let user = Identity::new("Alice").with_group("editor");
/// assert!(grants.is_allowed(&user, Right::ReadStable));
/// assert!(!grants.is_allowed(&Identity::anonymous(), Right::ReadStable));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupPermissions {
    groups: BTreeMap<String, BTreeSet<Right>>,
}

impl GroupPermissions {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            groups: BTreeMap::new(),
        }
    }

    /// Create the default table, granting `readstable` to
    /// [`DEFAULT_READ_STABLE_GROUPS`].
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        for group in DEFAULT_READ_STABLE_GROUPS {
            table.grant(*group, Right::ReadStable);
        }
        table
    }

    /// Build a table from `(group, right name)` pairs.
    ///
    /// # Errors
    ///
    /// Fails on an unknown right name or an empty group name.
    pub fn from_pairs<'a, I>(pairs: I) -> RightsResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut table = Self::new();
        for (group, right) in pairs {
            if group.is_empty() {
                return Err(RightsError::EmptyGroup);
            }
            table.grant(group, right.parse()?);
        }
        Ok(table)
    }

    /// Grant a right to a group.
    pub fn grant(&mut self, group: impl Into<String>, right: Right) {
        self.groups.entry(group.into()).or_default().insert(right);
    }

    /// Revoke a right from a group.
    ///
    /// Returns `true` if the group held the right.
    pub fn revoke(&mut self, group: &str, right: Right) -> bool {
        let Some(rights) = self.groups.get_mut(group) else {
            return false;
        };
        let removed = rights.remove(&right);
        if rights.is_empty() {
            self.groups.remove(group);
        }
        removed
    }

    /// Check whether a group holds a right, directly or by implication.
    pub fn group_has(&self, group: &str, right: Right) -> bool {
        self.groups
            .get(group)
            .is_some_and(|rights| rights.contains(&right))
    }

    /// Check whether an identity holds a right through any effective group.
    pub fn is_allowed(&self, identity: &Identity, right: Right) -> bool {
        identity
            .effective_groups()
            .any(|group| self.group_has(group, right))
    }

    /// Groups that hold a right.
    pub fn groups_with(&self, right: Right) -> Vec<&str> {
        self.groups
            .keys()
            .filter(|group| self.group_has(group, right))
            .map(String::as_str)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
