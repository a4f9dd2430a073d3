//! # Rights
//!
//! Defines the user rights that matter to stable-revision access control.
//! A right is a named capability granted to groups of users.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RightsError;

/// Rights that can be granted to user groups.
///
/// Only a handful of the host platform's rights are modelled here:
/// - **Read**: Full read access to every revision of a page
/// - **ReadStable**: Read access limited to approved ("stable") revisions
///
/// Rights are flat: holding `Read` does not grant `ReadStable`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Right {
    /// Read any revision.
    Read,

    /// Read approved revisions of pages under access control.
    ///
    /// Checked by the whitelist decision when `Read` is missing.
    ReadStable,
}

impl Right {
    /// Get the string representation used in permission tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            Right::Read => "read",
            Right::ReadStable => "readstable",
        }
    }

    /// Parse a right from its table name.
    ///
    /// # Example
    ///
    /// ```
    /// use stable_access_rbac::Right;
    ///
    /// assert_eq!(Right::parse("readstable"), Some(Right::ReadStable));
    /// assert_eq!(Right::parse("read-stable"), Some(Right::ReadStable));
    /// assert_eq!(Right::parse("purge"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "read" => Some(Right::Read),
            "readstable" | "read-stable" | "read_stable" => Some(Right::ReadStable),
            _ => None,
        }
    }

    /// Get all rights.
    pub fn all() -> Vec<Self> {
        vec![Right::Read, Right::ReadStable]
    }
}

impl fmt::Display for Right {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Right {
    type Err = RightsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Right::parse(s).ok_or_else(|| RightsError::UnknownRight(s.to_string()))
    }
}
