//! # Stable Access RBAC
//!
//! User rights and group grants consulted by the stable-revision access
//! control decision.
//!
//! ## Overview
//!
//! The stable-access-rbac crate handles:
//! - **Rights**: The rights relevant to reading reviewed pages
//! - **Identities**: Who a request is made by, and their groups
//! - **Group Grants**: Which groups hold which rights
//!
//! ## Usage
//!
//! ```rust
//! use stable_access_rbac::{GroupPermissions, Identity, Right};
//!
//! // Everyone may read approved revisions by default
//! let grants = GroupPermissions::with_defaults();
//! assert!(grants.is_allowed(&Identity::anonymous(), Right::ReadStable));
//!
//! // Rights are flat: full read is a separate grant
//! let mut grants = GroupPermissions::new();
//! grants.grant("sysop", Right::Read);
//! let admin = Identity::new("Root").with_group("sysop");
//! assert!(!grants.is_allowed(&admin, Right::ReadStable));
//! ```

pub mod error;
pub mod grants;
pub mod identity;
pub mod rights;

// Re-export main types for convenience
pub use error::{RightsError, RightsResult};
pub use grants::{GroupPermissions, DEFAULT_READ_STABLE_GROUPS};
pub use identity::{Identity, ALL_USERS_GROUP};
pub use rights::Right;
