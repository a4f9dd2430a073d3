//! # Stable Access Core
//!
//! Access-control decisions for approved ("stable") revisions of documents.
//!
//! ## Overview
//!
//! Pages in reviewed namespaces are normally hidden from readers without the
//! `read` right. This crate lets readers holding `readstable` through to the
//! approved versions of those pages. It supplements the host's permission
//! system and never denies anything itself: a negative decision just leaves
//! the host's own checks in charge.
//!
//! The crate handles:
//! - **Revision resolution**: Mapping `oldid`, `diff` and `direction`
//!   request parameters to concrete revision IDs
//! - **Whitelist decisions**: Per-action rules for bypassing stricter checks
//! - **View source override**: Substituting the approved revision in the
//!   edit form of readers who cannot edit
//!
//! ## Architecture
//!
//! ```text
//! RequestTokens ─→ resolver ─→ ResolvedReference
//!                                   │
//! RequestContext ─→ WhitelistDecider ─→ Decision { bypass, override_record }
//!                     │                                   │
//!     DocumentHistory, ApprovalRegistry,            apply_override ─→ EditView
//!     Capabilities, AccessDomain,
//!     ActiveRender, PolicyFlags
//! ```
//!
//! All collaborators are host-owned and reached through the traits in
//! [`collab`]. Decisions are synchronous and request-scoped.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stable_access_core::{
//!     apply_override, AccessControlConfig, ActiveRender, ApprovalRegistry, DocumentHistory,
//!     EditView, RequestContext, RequestTokens, WhitelistDecider,
//! };
//! use stable_access_rbac::Identity;
//!
//! fn on_read_check(
//!     page: &dyn DocumentHistory,
//!     registry: &dyn ApprovalRegistry,
//!     view: &dyn ActiveRender,
//!     user: &Identity,
//!     query: &[(&str, &str)],
//! ) -> bool {
//!     let config = AccessControlConfig::from_env().unwrap_or_default();
//!     let decider = WhitelistDecider::new(registry, config.rights(), &config, view, &config);
//!
//!     let tokens = RequestTokens::from_query(query.iter().copied());
//!     let mut ctx = RequestContext::for_page(page.title().clone(), tokens);
//!     let decision = decider.decide(page, user, &mut ctx);
//!
//!     let mut edit_view = EditView::latest(page.title().clone());
//!     apply_override(&mut edit_view, decision.override_record);
//!     decision.bypass
//! }
//! ```

pub mod collab;
pub mod config;
pub mod error;
pub mod request;
pub mod resolver;
pub mod revision;
pub mod whitelist;

// Re-export main types for convenience
pub use collab::{
    AccessDomain, ActiveRender, ApprovalRegistry, Capabilities, DocumentHistory, PolicyFlags,
};
pub use config::AccessControlConfig;
pub use error::{ConfigError, ConfigResult};
pub use request::{
    DiffToken, Direction, RequestAction, RequestContext, RequestTokens, RevisionToken,
};
pub use resolver::{resolve_diff, resolve_old, resolve_reference, DiffPair, ResolvedReference};
pub use revision::{Namespace, Revision, RevisionId, Title};
pub use whitelist::{apply_override, Decision, EditView, OverrideRecord, WhitelistDecider};
