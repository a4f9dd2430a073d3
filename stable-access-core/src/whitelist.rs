//! # Whitelist Decision
//!
//! Decides whether a request for a page may bypass the host's stricter read
//! checks because it only shows approved content.
//!
//! ## Rules
//!
//! ```text
//! unrestricted page            -> bypass
//! no `readstable` right        -> no bypass
//! page rendered by the request:
//!   view / purge / render
//!     oldid/diff given         -> bypass iff every named revision is reviewed
//!     neither                  -> force approved default, bypass iff shown
//!   edit
//!     oldid given              -> bypass iff that revision is reviewed
//!     none                     -> bypass iff approved revision exists,
//!                                 overriding "view source" with it
//!   history                    -> bypass iff history view is allowed
//!   other                      -> no bypass
//! any other page (search etc.) -> bypass iff an approved revision exists
//! ```
//!
//! "No bypass" is never an error: the host's own permission checks decide.

use serde::{Deserialize, Serialize};
use stable_access_rbac::{Identity, Right};
use tracing::{debug, instrument};

use crate::collab::{
    AccessDomain, ActiveRender, ApprovalRegistry, Capabilities, DocumentHistory, PolicyFlags,
};
use crate::request::{RequestAction, RequestContext};
use crate::resolver::{resolve_old, resolve_reference};
use crate::revision::{Revision, RevisionId, Title};

/// Content substitution for the edit form's "view source" mode.
///
/// Produced by the edit rule and consumed once by [`apply_override`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OverrideRecord {
    pub revision: Revision,
}

/// Outcome of a whitelist decision.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Decision {
    /// Whether the request may bypass stricter access checks
    pub bypass: bool,

    /// Revision to show in place of the latest one when editing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_record: Option<OverrideRecord>,
}

impl Decision {
    pub fn allow() -> Self {
        Self {
            bypass: true,
            override_record: None,
        }
    }

    pub fn deny() -> Self {
        Self::default()
    }

    fn from_bool(bypass: bool) -> Self {
        Self {
            bypass,
            override_record: None,
        }
    }
}

/// The rule that produced a decision, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Unrestricted,
    MissingRight,
    SpecificRevision,
    DefaultView,
    EditRevision,
    EditSource,
    History,
    UnhandledAction,
    OtherContext,
}

/// Per-action branch of the decision.
enum Dispatch {
    PageView,
    Edit,
    History,
    Unhandled,
}

impl From<&RequestAction> for Dispatch {
    fn from(action: &RequestAction) -> Self {
        match action {
            RequestAction::View | RequestAction::Purge | RequestAction::Render => {
                Dispatch::PageView
            }
            RequestAction::Edit => Dispatch::Edit,
            RequestAction::History => Dispatch::History,
            RequestAction::Other(_) => Dispatch::Unhandled,
        }
    }
}

/// Whitelist decision engine over the host's collaborators.
///
/// # Example
///
/// ```
/// # use stable_access_core::*;
/// # struct NoHistory(Title);
/// # impl DocumentHistory for NoHistory {
/// #     fn title(&self) -> &Title { &self.0 }
/// #     fn latest_revision_id(&self) -> Option<RevisionId> { None }
/// #     fn first_revision(&self) -> Option<Revision> { None }
/// #     fn next_revision_id(&self, _: RevisionId) -> Option<RevisionId> { None }
/// #     fn previous_revision_id(&self, _: RevisionId) -> Option<RevisionId> { None }
/// # }
/// # struct Empty;
/// # impl ApprovalRegistry for Empty {
/// #     fn lookup_by_exact_id(&self, _: &Title, _: RevisionId) -> Option<Revision> { None }
/// #     fn lookup_approved(&self, _: &Title) -> Option<Revision> { None }
/// # }
/// # impl ActiveRender for Empty {
/// #     fn is_showing_approved(&self, _: &Title, _: &RequestTokens) -> bool { false }
/// # }
/// use stable_access_rbac::Identity;
///
/// let config = AccessControlConfig::default();
/// let decider = WhitelistDecider::new(&Empty, config.rights(), &config, &Empty, &config);
///
/// // User pages are outside the reviewed namespaces
/// let page = NoHistory(Title::new(Namespace(2), "Alice"));
/// let mut ctx = RequestContext::for_page(page.0.clone(), RequestTokens::default());
/// let decision = decider.decide(&page, &Identity::anonymous(), &mut ctx);
/// assert!(decision.bypass);
/// ```
pub struct WhitelistDecider<'a> {
    registry: &'a dyn ApprovalRegistry,
    capabilities: &'a dyn Capabilities,
    domain: &'a dyn AccessDomain,
    render: &'a dyn ActiveRender,
    policy: &'a dyn PolicyFlags,
}

impl<'a> WhitelistDecider<'a> {
    pub fn new(
        registry: &'a dyn ApprovalRegistry,
        capabilities: &'a dyn Capabilities,
        domain: &'a dyn AccessDomain,
        render: &'a dyn ActiveRender,
        policy: &'a dyn PolicyFlags,
    ) -> Self {
        Self {
            registry,
            capabilities,
            domain,
            render,
            policy,
        }
    }

    /// Decide whether `identity` may bypass stricter checks for `document`.
    ///
    /// For a plain view of the page being rendered this sets `stable=1` on
    /// the request unless it already carries a `stable` value. Repeating the
    /// call with the same inputs gives the same decision.
    #[instrument(level = "debug", skip_all, fields(title = %document.title()))]
    pub fn decide(
        &self,
        document: &dyn DocumentHistory,
        identity: &Identity,
        ctx: &mut RequestContext,
    ) -> Decision {
        let (rule, decision) = self.evaluate(document, identity, ctx);
        debug!(
            action = %ctx.tokens().action,
            rule = ?rule,
            bypass = decision.bypass,
            override_revision = ?decision.override_record.as_ref().map(|o| o.revision.id.get()),
            "whitelist decision"
        );
        decision
    }

    fn evaluate(
        &self,
        document: &dyn DocumentHistory,
        identity: &Identity,
        ctx: &mut RequestContext,
    ) -> (Rule, Decision) {
        let title = document.title();

        if !self.domain.is_restricted(title) {
            return (Rule::Unrestricted, Decision::allow());
        }
        if !self.capabilities.has(identity, Right::ReadStable) {
            return (Rule::MissingRight, Decision::deny());
        }
        if !ctx.is_current_page(title) {
            // Search and similar listings only need to know the reader can
            // see some version of the page.
            let approved = self.registry.lookup_approved(title).is_some();
            return (Rule::OtherContext, Decision::from_bool(approved));
        }

        let dispatch = Dispatch::from(&ctx.tokens().action);
        match dispatch {
            Dispatch::PageView => self.page_view(document, ctx),
            Dispatch::Edit => self.edit(document, ctx),
            Dispatch::History => (
                Rule::History,
                Decision::from_bool(self.policy.allow_history_view()),
            ),
            Dispatch::Unhandled => (Rule::UnhandledAction, Decision::deny()),
        }
    }

    fn page_view(
        &self,
        document: &dyn DocumentHistory,
        ctx: &mut RequestContext,
    ) -> (Rule, Decision) {
        let title = document.title();
        let resolved = resolve_reference(ctx.tokens(), document);

        if !resolved.is_empty() {
            let all_reviewed = resolved
                .revisions()
                .all(|id| self.is_reviewed(title, id));
            return (Rule::SpecificRevision, Decision::from_bool(all_reviewed));
        }

        ctx.force_default_to_approved();
        let showing = self.render.is_showing_approved(title, ctx.tokens());
        (Rule::DefaultView, Decision::from_bool(showing))
    }

    fn edit(&self, document: &dyn DocumentHistory, ctx: &RequestContext) -> (Rule, Decision) {
        let title = document.title();

        if let Some(old) = resolve_old(ctx.tokens(), document) {
            return (
                Rule::EditRevision,
                Decision::from_bool(self.is_reviewed(title, old)),
            );
        }

        match self.registry.lookup_approved(title) {
            Some(revision) => (
                Rule::EditSource,
                Decision {
                    bypass: true,
                    override_record: Some(OverrideRecord { revision }),
                },
            ),
            None => (Rule::EditSource, Decision::deny()),
        }
    }

    fn is_reviewed(&self, title: &Title, id: RevisionId) -> bool {
        self.registry.lookup_by_exact_id(title, id).is_some()
    }
}

/// The edit form's target: which page and revision it shows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EditView {
    pub title: Title,

    /// Revision shown, or `None` for the latest
    pub revision_id: Option<RevisionId>,
}

impl EditView {
    /// Edit view of the latest revision of `title`.
    pub fn latest(title: Title) -> Self {
        Self {
            title,
            revision_id: None,
        }
    }
}

/// Point the edit form at the override revision, if one was decided.
///
/// Consumes the record. Returns `true` if the view was changed.
pub fn apply_override(view: &mut EditView, record: Option<OverrideRecord>) -> bool {
    let Some(OverrideRecord { revision }) = record else {
        return false;
    };
    debug!(
        title = %revision.title,
        revision = %revision.id,
        saved_at = %revision.timestamp,
        "showing approved revision source"
    );
    view.title = revision.title;
    view.revision_id = Some(revision.id);
    true
}
