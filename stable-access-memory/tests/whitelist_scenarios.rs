//! End-to-end tests for whitelist decisions over the in-memory collaborators.
//!
//! Each test builds a small wiki, reviews some revisions, and runs the
//! decider the way the host's read check would: once per request, with the
//! request's query parameters and the page being rendered.
//!
//! Scenarios:
//! 1. Pages outside reviewed namespaces
//! 2. Readers without `readstable`
//! 3. Plain views, specific revisions and diffs
//! 4. Edit / view source with override
//! 5. History listing policy
//! 6. Lookups outside the rendered page (search)

use stable_access_core::{
    apply_override, AccessControlConfig, Decision, DocumentHistory, EditView, Namespace,
    RequestContext, RequestTokens, RevisionId, Title, WhitelistDecider,
};
use stable_access_memory::{MemoryApprovalRegistry, MemoryWiki, PageView};
use stable_access_rbac::{GroupPermissions, Identity, Right};

/// Test fixture: one reviewed page with a draft on top, one unreviewed page
/// and one page outside the reviewed namespaces.
struct TestFixture {
    /// Page histories.
    wiki: MemoryWiki,
    /// Reviewed revisions.
    registry: MemoryApprovalRegistry,
    /// Access control settings.
    config: AccessControlConfig,
    /// Whether page views default to the approved revision.
    stable_by_default: bool,
    /// `Home` revisions, oldest first: reviewed, reviewed, draft.
    home_revisions: Vec<RevisionId>,
    /// The same revisions as query parameter values.
    home_params: Vec<String>,
}

impl TestFixture {
    fn new() -> Self {
        let mut wiki = MemoryWiki::new();
        let home = home();
        let home_revisions = vec![
            wiki.edit(home.clone(), "First checked version"),
            wiki.edit(home.clone(), "Second checked version"),
            wiki.edit(home.clone(), "Unchecked draft"),
        ];
        wiki.edit(draft(), "Never reviewed");
        wiki.edit(user_page(), "About me");

        let mut registry = MemoryApprovalRegistry::new();
        registry.review(&wiki, &home, home_revisions[0]).unwrap();
        registry.review(&wiki, &home, home_revisions[1]).unwrap();

        let home_params = home_revisions.iter().map(ToString::to_string).collect();
        Self {
            wiki,
            registry,
            config: AccessControlConfig::default(),
            stable_by_default: true,
            home_revisions,
            home_params,
        }
    }

    /// Decide a request for `title` rendered by the request itself.
    fn decide(&self, title: &Title, identity: &Identity, params: &[(&str, &str)]) -> Decision {
        let tokens = RequestTokens::from_query(params.iter().copied());
        let mut ctx = RequestContext::for_page(title.clone(), tokens);
        self.decide_in(title, identity, &mut ctx)
    }

    fn decide_in(&self, title: &Title, identity: &Identity, ctx: &mut RequestContext) -> Decision {
        let view = if self.stable_by_default {
            PageView::new(&self.registry)
        } else {
            PageView::new(&self.registry).prefer_latest()
        };
        let decider = WhitelistDecider::new(
            &self.registry,
            self.config.rights(),
            &self.config,
            &view,
            &self.config,
        );
        let page = self.wiki.page(title).expect("fixture page exists");
        decider.decide(page, identity, ctx)
    }

    /// Query value for the `index`th revision of `Home`.
    fn rev(&self, index: usize) -> &str {
        &self.home_params[index]
    }
}

fn home() -> Title {
    Title::main("Home")
}

fn draft() -> Title {
    Title::main("Draft")
}

fn user_page() -> Title {
    Title::new(Namespace(2), "Alice")
}

fn reader() -> Identity {
    Identity::anonymous()
}

// =============================================================================
// Scenario 1: Unrestricted pages
// =============================================================================

#[test]
fn test_unrestricted_page_bypasses_for_everyone() {
    let mut fixture = TestFixture::new();
    fixture.config.rights = GroupPermissions::new();

    for action in ["view", "edit", "history", "delete"] {
        let decision = fixture.decide(&user_page(), &reader(), &[("action", action)]);
        assert_eq!(decision, Decision::allow(), "action {action}");
    }
}

// =============================================================================
// Scenario 2: Readers without readstable
// =============================================================================

#[test]
fn test_reader_without_right_gets_no_bypass() {
    let mut fixture = TestFixture::new();
    fixture.config.rights.revoke("*", Right::ReadStable);

    let decision = fixture.decide(&home(), &reader(), &[]);
    assert_eq!(decision, Decision::deny());

    let editor = Identity::new("Ed").with_group("editor");
    assert!(fixture.decide(&home(), &editor, &[]).bypass);
}

// =============================================================================
// Scenario 3: Page views
// =============================================================================

#[test]
fn test_plain_view_with_approved_revision() {
    let fixture = TestFixture::new();
    let tokens = RequestTokens::default();
    let mut ctx = RequestContext::for_page(home(), tokens);

    let decision = fixture.decide_in(&home(), &reader(), &mut ctx);
    assert!(decision.bypass);
    assert_eq!(ctx.tokens().stable, Some(1));
}

#[test]
fn test_plain_view_overrides_latest_preference() {
    let mut fixture = TestFixture::new();
    fixture.stable_by_default = false;
    assert!(fixture.decide(&home(), &reader(), &[]).bypass);
}

#[test]
fn test_plain_view_with_explicit_latest_request() {
    let fixture = TestFixture::new();
    assert!(!fixture.decide(&home(), &reader(), &[("stable", "0")]).bypass);
}

#[test]
fn test_plain_view_of_unreviewed_page() {
    let fixture = TestFixture::new();
    assert!(!fixture.decide(&draft(), &reader(), &[]).bypass);
}

#[test]
fn test_specific_revisions() {
    let fixture = TestFixture::new();
    let first = fixture.rev(0);
    let draft_rev = fixture.rev(2);

    assert!(fixture.decide(&home(), &reader(), &[("oldid", first)]).bypass);
    assert!(!fixture.decide(&home(), &reader(), &[("oldid", draft_rev)]).bypass);
    // oldid=0 is the latest revision, which is the unchecked draft
    assert!(!fixture.decide(&home(), &reader(), &[("oldid", "0")]).bypass);
    // Stepping back from the draft lands on a reviewed revision
    assert!(fixture
        .decide(&home(), &reader(), &[("oldid", draft_rev), ("direction", "prev")])
        .bypass);
    // Revisions that do not exist are never whitelisted
    assert!(!fixture.decide(&home(), &reader(), &[("oldid", "9999")]).bypass);
}

#[test]
fn test_latest_token_once_draft_is_reviewed() {
    let mut fixture = TestFixture::new();
    let draft_id = fixture.home_revisions[2];
    fixture.registry.review(&fixture.wiki, &home(), draft_id).unwrap();

    let tokens = RequestTokens::from_query([("oldid", "0")]);
    let mut ctx = RequestContext::for_page(home(), tokens);
    let decision = fixture.decide_in(&home(), &reader(), &mut ctx);
    assert_eq!(decision, Decision::allow());
    assert_eq!(ctx.tokens().stable, None);
}

#[test]
fn test_read_only_group_gets_no_bypass() {
    let mut fixture = TestFixture::new();
    fixture.config.rights = GroupPermissions::new();
    fixture.config.rights.grant("user", Right::Read);
    let user = Identity::new("Uma").with_group("user");

    assert_eq!(fixture.decide(&home(), &user, &[]), Decision::deny());
    let decision = fixture.decide(&home(), &user, &[("action", "edit")]);
    assert_eq!(decision, Decision::deny());
}

#[test]
fn test_diffs() {
    let fixture = TestFixture::new();
    let first = fixture.rev(0);
    let second = fixture.rev(1);

    assert!(fixture
        .decide(&home(), &reader(), &[("oldid", first), ("diff", "next")])
        .bypass);
    assert!(!fixture
        .decide(&home(), &reader(), &[("oldid", second), ("diff", "next")])
        .bypass);
    // diff=next alone compares the first revision with itself
    assert!(fixture.decide(&home(), &reader(), &[("diff", "next")]).bypass);
    // diff=prev alone compares the latest (draft) revision with itself
    assert!(!fixture.decide(&home(), &reader(), &[("diff", "prev")]).bypass);
    // a numeric diff compares with the revision before it
    assert!(fixture.decide(&home(), &reader(), &[("diff", second)]).bypass);
    assert!(!fixture.decide(&home(), &reader(), &[("diff", "cur")]).bypass);
}

#[test]
fn test_purge_and_render() {
    let fixture = TestFixture::new();
    assert!(fixture.decide(&home(), &reader(), &[("action", "purge")]).bypass);
    assert!(fixture.decide(&home(), &reader(), &[("action", "render")]).bypass);
}

// =============================================================================
// Scenario 4: Edit / view source
// =============================================================================

#[test]
fn test_view_source_shows_approved_revision() {
    let fixture = TestFixture::new();
    let decision = fixture.decide(&home(), &reader(), &[("action", "edit")]);
    assert!(decision.bypass);

    let record = decision.override_record.clone().expect("override record");
    assert_eq!(record.revision.id, fixture.home_revisions[1]);
    assert_eq!(record.revision.content, "Second checked version");

    let mut view = EditView::latest(home());
    assert!(apply_override(&mut view, decision.override_record));
    assert_eq!(view.revision_id, Some(fixture.home_revisions[1]));
    assert_eq!(view.title, home());
}

#[test]
fn test_view_source_of_unreviewed_page() {
    let fixture = TestFixture::new();
    let decision = fixture.decide(&draft(), &reader(), &[("action", "edit")]);
    assert_eq!(decision, Decision::deny());

    let mut view = EditView::latest(draft());
    assert!(!apply_override(&mut view, decision.override_record));
    assert_eq!(view.revision_id, None);
}

#[test]
fn test_view_source_of_specific_revision() {
    let fixture = TestFixture::new();
    let first = fixture.rev(0);
    let draft_rev = fixture.rev(2);

    let decision = fixture.decide(&home(), &reader(), &[("action", "edit"), ("oldid", first)]);
    assert_eq!(decision, Decision::allow());
    let decision = fixture.decide(&home(), &reader(), &[("action", "edit"), ("oldid", draft_rev)]);
    assert_eq!(decision, Decision::deny());
}

// =============================================================================
// Scenario 5: History
// =============================================================================

#[test]
fn test_history_policy() {
    let mut fixture = TestFixture::new();
    assert!(fixture.decide(&draft(), &reader(), &[("action", "history")]).bypass);

    fixture.config = AccessControlConfig::from_json(r#"{"allow_history_view": false}"#).unwrap();
    assert!(!fixture.decide(&home(), &reader(), &[("action", "history")]).bypass);
}

// =============================================================================
// Scenario 6: Other contexts
// =============================================================================

#[test]
fn test_search_context_checks_for_approved_revision() {
    let fixture = TestFixture::new();
    let tokens = RequestTokens::from_query([("action", "edit")]);

    let mut ctx = RequestContext::detached(tokens.clone());
    let decision = fixture.decide_in(&home(), &reader(), &mut ctx);
    assert_eq!(decision, Decision::allow());

    let mut ctx = RequestContext::for_page(home(), tokens);
    let decision = fixture.decide_in(&draft(), &reader(), &mut ctx);
    assert_eq!(decision, Decision::deny());
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_repeated_decisions_agree() {
    let fixture = TestFixture::new();
    let first = fixture.rev(0);
    let requests: Vec<Vec<(&str, &str)>> = vec![
        vec![],
        vec![("action", "edit")],
        vec![("oldid", first), ("diff", "next")],
        vec![("action", "history")],
    ];

    for params in requests {
        let tokens = RequestTokens::from_query(params.iter().copied());
        let mut ctx = RequestContext::for_page(home(), tokens);
        let once = fixture.decide_in(&home(), &reader(), &mut ctx);
        let twice = fixture.decide_in(&home(), &reader(), &mut ctx);
        assert_eq!(once, twice, "params {params:?}");
    }
}

#[test]
fn test_decision_serializes_for_hosts() {
    let fixture = TestFixture::new();
    let decision = fixture.decide(&home(), &reader(), &[("action", "edit")]);
    let json = serde_json::to_value(&decision).unwrap();

    assert_eq!(json["bypass"], true);
    assert_eq!(
        json["override_record"]["revision"]["id"],
        fixture.home_revisions[1].get()
    );
    assert_eq!(
        fixture.wiki.page(&home()).unwrap().latest_revision_id(),
        Some(fixture.home_revisions[2])
    );
}
