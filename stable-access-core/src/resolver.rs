//! # Revision Resolution
//!
//! Turns the `oldid`, `diff` and `direction` tokens of a request into
//! concrete revision IDs using the document's history. Resolution is pure
//! identifier arithmetic: it never loads revision content and never checks
//! that an explicitly named revision exists. Callers that fetch revisions
//! find that out themselves.
//!
//! The edges of history follow the host's diff view: stepping past the first
//! or last revision compares a revision with itself rather than failing.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::collab::DocumentHistory;
use crate::request::{DiffToken, Direction, RequestTokens, RevisionToken};
use crate::revision::RevisionId;

/// The revisions a request refers to.
///
/// `diff` is only ever set together with `old`, which then holds the
/// revision the diff is taken against. The two may be equal at the edges of
/// history.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolvedReference {
    pub old: Option<RevisionId>,
    pub diff: Option<RevisionId>,
}

impl ResolvedReference {
    pub fn is_empty(&self) -> bool {
        self.old.is_none()
    }

    /// The resolved revisions, diff target first.
    pub fn revisions(&self) -> impl Iterator<Item = RevisionId> {
        self.diff.into_iter().chain(self.old)
    }
}

/// A resolved comparison: `diff` compared against `old`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffPair {
    pub old: RevisionId,
    pub diff: RevisionId,
}

fn resolve_token<D>(token: RevisionToken, document: &D) -> Option<RevisionId>
where
    D: DocumentHistory + ?Sized,
{
    match token {
        RevisionToken::Latest => document.latest_revision_id(),
        RevisionToken::Id(id) => Some(id),
    }
}

/// Resolve the `oldid` revision, applying the `direction` hint.
///
/// Returns `None` when no `oldid` was given, or when it asks for the latest
/// revision of a document without revisions. A direction that would step
/// past either end of history keeps the revision as it is.
pub fn resolve_old<D>(tokens: &RequestTokens, document: &D) -> Option<RevisionId>
where
    D: DocumentHistory + ?Sized,
{
    let old = resolve_token(tokens.old?, document)?;
    let stepped = match tokens.direction {
        Some(Direction::Next) => document.next_revision_id(old),
        Some(Direction::Prev) => document.previous_revision_id(old),
        None => return Some(old),
    };
    if stepped.is_none() {
        trace!(title = %document.title(), old = %old, "no revision in requested direction");
    }
    Some(stepped.unwrap_or(old))
}

/// Resolve the `diff` revision and the revision it is compared against.
///
/// `reference` is the revision to compare against when the caller already
/// knows it; `Latest` stands for the document's newest revision. With no
/// reference, the comparison point comes from [`resolve_old`] or, failing
/// that, from the diff token itself:
///
/// - `next` with no anchor compares the first revision with itself.
/// - `prev` with no anchor compares the latest revision with itself.
/// - a numeric target with no anchor compares against the revision before
///   the target (or the target itself if it is the first).
///
/// Returns `None` when no `diff` was given or it cannot be resolved, in
/// which case the caller's reference stands unchanged.
///
/// # Example
///
/// ```
/// # use stable_access_core::{DocumentHistory, Revision, RevisionId, Title};
/// # struct Three(Title);
/// # impl DocumentHistory for Three {
/// #     fn title(&self) -> &Title { &self.0 }
/// #     fn latest_revision_id(&self) -> Option<RevisionId> { RevisionId::new(3) }
/// #     fn first_revision(&self) -> Option<Revision> {
/// #         Some(Revision::new(RevisionId::new(1)?, self.0.clone(), ""))
/// #     }
/// #     fn next_revision_id(&self, after: RevisionId) -> Option<RevisionId> {
/// #         RevisionId::new(after.get() + 1).filter(|id| id.get() <= 3)
/// #     }
/// #     fn previous_revision_id(&self, before: RevisionId) -> Option<RevisionId> {
/// #         RevisionId::new(before.get() - 1)
/// #     }
/// # }
/// use stable_access_core::{resolve_diff, RequestTokens};
///
/// let document = Three(Title::main("Home"));
/// let tokens = RequestTokens::from_query([("diff", "next")]);
/// let pair = resolve_diff(&tokens, &document, None).unwrap();
/// assert_eq!((pair.old.get(), pair.diff.get()), (1, 1));
/// ```
pub fn resolve_diff<D>(
    tokens: &RequestTokens,
    document: &D,
    reference: Option<RevisionToken>,
) -> Option<DiffPair>
where
    D: DocumentHistory + ?Sized,
{
    let diff = tokens.diff?;
    let anchor = match reference {
        Some(token) => resolve_token(token, document),
        None => resolve_old(tokens, document),
    };

    let pair = match (diff, anchor) {
        (DiffToken::Next, None) => {
            let first = document.first_revision()?.id;
            DiffPair {
                old: first,
                diff: first,
            }
        }
        (DiffToken::Next, Some(old)) => DiffPair {
            old,
            diff: document.next_revision_id(old).unwrap_or(old),
        },
        (DiffToken::Prev, None) => {
            let latest = document.latest_revision_id()?;
            DiffPair {
                old: latest,
                diff: latest,
            }
        }
        (DiffToken::Prev, Some(old)) => DiffPair {
            old,
            diff: document.previous_revision_id(old).unwrap_or(old),
        },
        (DiffToken::Revision(token), anchor) => {
            let target = resolve_token(token, document)?;
            let old = anchor.unwrap_or_else(|| {
                document.previous_revision_id(target).unwrap_or(target)
            });
            DiffPair { old, diff: target }
        }
    };

    trace!(
        title = %document.title(),
        old = %pair.old,
        diff = %pair.diff,
        "resolved diff"
    );
    Some(pair)
}

/// Resolve both the `oldid` and `diff` revisions of a request.
pub fn resolve_reference<D>(tokens: &RequestTokens, document: &D) -> ResolvedReference
where
    D: DocumentHistory + ?Sized,
{
    let old = resolve_old(tokens, document);
    match resolve_diff(tokens, document, old.map(RevisionToken::Id)) {
        Some(pair) => ResolvedReference {
            old: Some(pair.old),
            diff: Some(pair.diff),
        },
        None => ResolvedReference { old, diff: None },
    }
}
