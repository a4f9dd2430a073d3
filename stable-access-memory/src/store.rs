//! In-memory revision store
//!
//! Holds page histories in memory. Revision IDs are allocated from a single
//! counter shared by all pages, so IDs increase across the whole store the
//! way they do in the host's database.

use std::collections::{BTreeMap, HashMap};
use std::num::NonZeroU64;
use thiserror::Error;
use tracing::debug;

use stable_access_core::{DocumentHistory, Revision, RevisionId, Title};

/// In-memory store errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemoryStoreError {
    /// No page with this title
    #[error("Page not found: {0}")]
    PageNotFound(Title),

    /// The page has no revision with this ID
    #[error("Revision {id} not found on page {title}")]
    RevisionNotFound {
        /// Page title
        title: Title,
        /// Requested revision
        id: RevisionId,
    },
}

/// Result type for in-memory store operations.
pub type MemoryStoreResult<T> = Result<T, MemoryStoreError>;

/// One page and its revisions, ordered by ID.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    title: Title,
    revisions: BTreeMap<RevisionId, Revision>,
}

impl MemoryDocument {
    fn new(title: Title) -> Self {
        Self {
            title,
            revisions: BTreeMap::new(),
        }
    }

    /// Look up a revision of this page.
    pub fn revision(&self, id: RevisionId) -> Option<&Revision> {
        self.revisions.get(&id)
    }

    /// Revision IDs, oldest first.
    pub fn revision_ids(&self) -> impl Iterator<Item = RevisionId> + '_ {
        self.revisions.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.revisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revisions.is_empty()
    }
}

impl DocumentHistory for MemoryDocument {
    fn title(&self) -> &Title {
        &self.title
    }

    fn latest_revision_id(&self) -> Option<RevisionId> {
        self.revisions.keys().next_back().copied()
    }

    fn first_revision(&self) -> Option<Revision> {
        self.revisions.values().next().cloned()
    }

    fn next_revision_id(&self, after: RevisionId) -> Option<RevisionId> {
        self.revisions
            .range((std::ops::Bound::Excluded(after), std::ops::Bound::Unbounded))
            .next()
            .map(|(id, _)| *id)
    }

    fn previous_revision_id(&self, before: RevisionId) -> Option<RevisionId> {
        self.revisions
            .range(..before)
            .next_back()
            .map(|(id, _)| *id)
    }
}

/// A collection of pages sharing one revision ID counter.
///
/// # Example
///
/// ```
/// use stable_access_core::{DocumentHistory, Title};
/// use stable_access_memory::MemoryWiki;
///
/// let mut wiki = MemoryWiki::new();
/// let first = wiki.edit(Title::main("Home"), "Hello");
/// let second = wiki.edit(Title::main("Home"), "Hello, world");
///
/// let page = wiki.page(&Title::main("Home")).unwrap();
/// assert_eq!(page.latest_revision_id(), Some(second));
/// assert_eq!(page.previous_revision_id(second), Some(first));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryWiki {
    pages: HashMap<Title, MemoryDocument>,
    revisions_saved: u64,
}

impl Default for MemoryWiki {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryWiki {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            revisions_saved: 0,
        }
    }

    /// Save a new revision of `title`, creating the page if needed.
    pub fn edit(&mut self, title: Title, content: impl Into<String>) -> RevisionId {
        let id = RevisionId::from(NonZeroU64::MIN.saturating_add(self.revisions_saved));
        self.revisions_saved += 1;

        let page = self
            .pages
            .entry(title.clone())
            .or_insert_with(|| MemoryDocument::new(title.clone()));
        page.revisions.insert(id, Revision::new(id, title, content));

        debug!(title = %page.title, revision = %id, "saved revision");
        id
    }

    /// Register a page with no revisions.
    pub fn create_empty(&mut self, title: Title) -> &MemoryDocument {
        self.pages
            .entry(title.clone())
            .or_insert_with(|| MemoryDocument::new(title))
    }

    pub fn page(&self, title: &Title) -> Option<&MemoryDocument> {
        self.pages.get(title)
    }

    /// Fetch a revision of a page.
    pub fn revision(&self, title: &Title, id: RevisionId) -> MemoryStoreResult<&Revision> {
        let page = self
            .page(title)
            .ok_or_else(|| MemoryStoreError::PageNotFound(title.clone()))?;
        page.revision(id)
            .ok_or_else(|| MemoryStoreError::RevisionNotFound {
                title: title.clone(),
                id,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revision_ids_are_global() {
        let mut wiki = MemoryWiki::new();
        let a1 = wiki.edit(Title::main("A"), "a1");
        let b1 = wiki.edit(Title::main("B"), "b1");
        let a2 = wiki.edit(Title::main("A"), "a2");

        assert_eq!((a1.get(), b1.get(), a2.get()), (1, 2, 3));
        let a = wiki.page(&Title::main("A")).unwrap();
        assert_eq!(a.revision_ids().collect::<Vec<_>>(), vec![a1, a2]);
        assert_eq!(a.next_revision_id(a1), Some(a2));
        assert_eq!(a.previous_revision_id(a2), Some(a1));
    }

    #[test]
    fn test_revisions_are_stamped_in_save_order() {
        let mut wiki = MemoryWiki::new();
        let title = Title::main("A");
        let first = wiki.edit(title.clone(), "one");
        let second = wiki.edit(title.clone(), "two");

        let saved_first = wiki.revision(&title, first).unwrap().timestamp;
        let saved_second = wiki.revision(&title, second).unwrap().timestamp;
        assert!(saved_first <= saved_second);
    }

    #[test]
    fn test_history_edges() {
        let mut wiki = MemoryWiki::new();
        let first = wiki.edit(Title::main("A"), "one");
        let last = wiki.edit(Title::main("A"), "two");
        let page = wiki.page(&Title::main("A")).unwrap();

        assert_eq!(page.first_revision().map(|r| r.id), Some(first));
        assert_eq!(page.latest_revision_id(), Some(last));
        assert_eq!(page.next_revision_id(last), None);
        assert_eq!(page.previous_revision_id(first), None);
    }

    #[test]
    fn test_neighbours_of_foreign_revision() {
        let mut wiki = MemoryWiki::new();
        let a1 = wiki.edit(Title::main("A"), "a1");
        let b1 = wiki.edit(Title::main("B"), "b1");
        let a2 = wiki.edit(Title::main("A"), "a2");
        let a = wiki.page(&Title::main("A")).unwrap();

        // Neighbours are found by position even for IDs of other pages.
        assert_eq!(a.next_revision_id(b1), Some(a2));
        assert_eq!(a.previous_revision_id(b1), Some(a1));
    }

    #[test]
    fn test_empty_page() {
        let mut wiki = MemoryWiki::new();
        let page = wiki.create_empty(Title::main("Blank"));
        assert!(page.is_empty());
        assert_eq!(page.latest_revision_id(), None);
        assert_eq!(page.first_revision(), None);
    }

    #[test]
    fn test_revision_lookup_errors() {
        let mut wiki = MemoryWiki::new();
        let id = wiki.edit(Title::main("A"), "text");

        assert_eq!(wiki.revision(&Title::main("A"), id).unwrap().content, "text");
        assert_eq!(
            wiki.revision(&Title::main("Z"), id),
            Err(MemoryStoreError::PageNotFound(Title::main("Z")))
        );
        let missing = RevisionId::new(99).unwrap();
        assert_eq!(
            wiki.revision(&Title::main("A"), missing).unwrap_err().to_string(),
            "Revision 99 not found on page 0:A"
        );
    }
}
