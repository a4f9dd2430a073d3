//! # Stable Access Memory
//!
//! In-memory implementations of the collaborators the stable access
//! decision consults.
//!
//! ## Overview
//!
//! - **MemoryWiki**: Page histories with globally increasing revision IDs
//! - **MemoryApprovalRegistry**: Reviewed revisions and the approved one
//! - **PageView**: Which revision a plain page view shows
//!
//! Suitable for single-process hosts and testing. Hosts with a database
//! implement the `stable_access_core::collab` traits over their own storage.
//!
//! ## Usage
//!
//! ```rust
//! use stable_access_core::{AccessControlConfig, RequestContext, RequestTokens, Title, WhitelistDecider};
//! use stable_access_memory::{MemoryApprovalRegistry, MemoryWiki, PageView};
//! use stable_access_rbac::Identity;
//!
//! let mut wiki = MemoryWiki::new();
//! let home = Title::main("Home");
//! let checked = wiki.edit(home.clone(), "Checked text");
//! wiki.edit(home.clone(), "Unchecked draft");
//!
//! let mut registry = MemoryApprovalRegistry::new();
//! registry.review(&wiki, &home, checked).unwrap();
//!
//! let config = AccessControlConfig::default();
//! let view = PageView::new(&registry);
//! let decider = WhitelistDecider::new(&registry, config.rights(), &config, &view, &config);
//!
//! let page = wiki.page(&home).unwrap();
//! let mut ctx = RequestContext::for_page(home.clone(), RequestTokens::default());
//! assert!(decider.decide(page, &Identity::anonymous(), &mut ctx).bypass);
//! ```

pub mod registry;
pub mod store;
pub mod view;

// Re-export main types for convenience
pub use registry::MemoryApprovalRegistry;
pub use store::{MemoryDocument, MemoryStoreError, MemoryStoreResult, MemoryWiki};
pub use view::PageView;
