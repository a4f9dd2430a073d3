//! Collaborator interfaces
//!
//! The decision logic never owns data. Revision history, the approval
//! registry, user rights, the set of access-controlled namespaces and the
//! active page view all belong to the host platform and are reached through
//! the traits in this module. Every lookup is a synchronous, read-only query.

use stable_access_rbac::{GroupPermissions, Identity, Right};

use crate::request::RequestTokens;
use crate::revision::{Revision, RevisionId, Title};

/// Read access to one document's revision history.
pub trait DocumentHistory {
    /// The document's identity.
    fn title(&self) -> &Title;

    /// The newest revision, or `None` if the document has no revisions.
    fn latest_revision_id(&self) -> Option<RevisionId>;

    /// The oldest revision.
    fn first_revision(&self) -> Option<Revision>;

    /// The revision directly after `after`, if any.
    fn next_revision_id(&self, after: RevisionId) -> Option<RevisionId>;

    /// The revision directly before `before`, if any.
    fn previous_revision_id(&self, before: RevisionId) -> Option<RevisionId>;
}

/// Registry of reviewed revisions.
pub trait ApprovalRegistry {
    /// The reviewed revision with exactly this ID, whether or not it is the
    /// current approved one.
    fn lookup_by_exact_id(&self, title: &Title, id: RevisionId) -> Option<Revision>;

    /// The currently approved ("stable") revision of a document.
    fn lookup_approved(&self, title: &Title) -> Option<Revision>;
}

/// User rights checks.
pub trait Capabilities {
    fn has(&self, identity: &Identity, right: Right) -> bool;
}

impl Capabilities for GroupPermissions {
    fn has(&self, identity: &Identity, right: Right) -> bool {
        self.is_allowed(identity, right)
    }
}

/// Which documents are subject to access control.
pub trait AccessDomain {
    fn is_restricted(&self, title: &Title) -> bool;
}

/// The page view rendering the active request.
pub trait ActiveRender {
    /// Whether the view of `title` for these tokens shows its approved
    /// revision.
    fn is_showing_approved(&self, title: &Title, tokens: &RequestTokens) -> bool;
}

/// Deployment policy switches.
pub trait PolicyFlags {
    /// Whether revision history may be listed for access-controlled pages.
    fn allow_history_view(&self) -> bool;
}
