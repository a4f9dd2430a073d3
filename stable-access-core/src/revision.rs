//! # Revisions
//!
//! Identity types for documents and their revisions.
//!
//! Revision IDs are positive integers. The host platform uses `0` to mean
//! "no revision"; here that convention ends at the boundary and absence is
//! always an `Option<RevisionId>`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;

/// Identifier of an existing revision.
///
/// # Example
///
/// ```
/// use stable_access_core::RevisionId;
///
/// assert_eq!(RevisionId::new(0), None);
/// assert_eq!(RevisionId::new(42).map(RevisionId::get), Some(42));
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct RevisionId(NonZeroU64);

impl RevisionId {
    /// Wrap a raw ID, mapping `0` to `None`.
    pub fn new(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    /// Parse a raw signed value as sent by clients.
    ///
    /// Zero and negative values do not name a revision.
    pub fn from_signed(raw: i64) -> Option<Self> {
        u64::try_from(raw).ok().and_then(Self::new)
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl From<NonZeroU64> for RevisionId {
    fn from(raw: NonZeroU64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A document namespace, identified by its numeric index.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Namespace(pub i32);

impl Namespace {
    /// The main (article) namespace.
    pub const MAIN: Namespace = Namespace(0);
}

/// A document's identity: namespace plus title text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Title {
    /// Namespace the document lives in
    pub namespace: Namespace,

    /// Title text within the namespace
    pub text: String,
}

impl Title {
    pub fn new(namespace: Namespace, text: impl Into<String>) -> Self {
        Self {
            namespace,
            text: text.into(),
        }
    }

    /// Shorthand for a title in the main namespace.
    pub fn main(text: impl Into<String>) -> Self {
        Self::new(Namespace::MAIN, text)
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace.0, self.text)
    }
}

/// An immutable revision record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Revision {
    /// Revision ID
    pub id: RevisionId,

    /// Document the revision belongs to
    pub title: Title,

    /// Revision content
    pub content: String,

    /// When the revision was saved
    pub timestamp: DateTime<Utc>,
}

impl Revision {
    /// Creates a revision saved now.
    pub fn new(id: RevisionId, title: Title, content: impl Into<String>) -> Self {
        Self {
            id,
            title,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}
