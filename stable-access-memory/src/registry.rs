//! In-memory approval registry
//!
//! Records which revisions have been reviewed. The approved ("stable")
//! revision of a page is its newest reviewed revision.

use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use stable_access_core::{ApprovalRegistry, Revision, RevisionId, Title};

use crate::store::{MemoryStoreResult, MemoryWiki};

/// Reviewed revisions per page.
///
/// # Example
///
/// ```
/// use stable_access_core::{ApprovalRegistry, Title};
/// use stable_access_memory::{MemoryApprovalRegistry, MemoryWiki};
///
/// let mut wiki = MemoryWiki::new();
/// let home = Title::main("Home");
/// let reviewed = wiki.edit(home.clone(), "Checked text");
/// wiki.edit(home.clone(), "Draft text");
///
/// let mut registry = MemoryApprovalRegistry::new();
/// registry.review(&wiki, &home, reviewed).unwrap();
/// assert_eq!(registry.lookup_approved(&home).map(|r| r.id), Some(reviewed));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryApprovalRegistry {
    reviewed: HashMap<Title, BTreeMap<RevisionId, Revision>>,
}

impl MemoryApprovalRegistry {
    pub fn new() -> Self {
        Self {
            reviewed: HashMap::new(),
        }
    }

    /// Mark a stored revision as reviewed.
    ///
    /// # Errors
    ///
    /// Fails if the page or revision does not exist in `wiki`.
    pub fn review(
        &mut self,
        wiki: &MemoryWiki,
        title: &Title,
        id: RevisionId,
    ) -> MemoryStoreResult<()> {
        let revision = wiki.revision(title, id)?.clone();
        self.review_revision(revision);
        Ok(())
    }

    /// Mark a revision as reviewed.
    pub fn review_revision(&mut self, revision: Revision) {
        debug!(title = %revision.title, revision = %revision.id, "revision reviewed");
        self.reviewed
            .entry(revision.title.clone())
            .or_default()
            .insert(revision.id, revision);
    }

    /// Withdraw a review. Returns `true` if the revision was reviewed.
    pub fn unreview(&mut self, title: &Title, id: RevisionId) -> bool {
        let Some(revisions) = self.reviewed.get_mut(title) else {
            return false;
        };
        let removed = revisions.remove(&id).is_some();
        if revisions.is_empty() {
            self.reviewed.remove(title);
        }
        if removed {
            debug!(title = %title, revision = %id, "review withdrawn");
        }
        removed
    }

    /// Reviewed revision IDs of a page, oldest first.
    pub fn reviewed_ids(&self, title: &Title) -> Vec<RevisionId> {
        self.reviewed
            .get(title)
            .map(|revisions| revisions.keys().copied().collect())
            .unwrap_or_default()
    }
}

impl ApprovalRegistry for MemoryApprovalRegistry {
    fn lookup_by_exact_id(&self, title: &Title, id: RevisionId) -> Option<Revision> {
        self.reviewed.get(title)?.get(&id).cloned()
    }

    fn lookup_approved(&self, title: &Title) -> Option<Revision> {
        self.reviewed
            .get(title)?
            .values()
            .next_back()
            .cloned()
    }
}
