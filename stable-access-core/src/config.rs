//! Access control configuration
//!
//! Deployment settings for stable-revision access control: which namespaces
//! are under review, whether history may be listed, and which groups hold
//! `readstable`. Configuration is loaded from environment variables or a
//! JSON document, with defaults matching a permissive install.

use serde::{Deserialize, Serialize};
use stable_access_rbac::{GroupPermissions, Right};

use crate::collab::{AccessDomain, PolicyFlags};
use crate::error::{ConfigError, ConfigResult};
use crate::revision::{Namespace, Title};

/// Environment variable toggling history listing.
pub const ENV_ALLOW_HISTORY: &str = "STABLE_ACCESS_ALLOW_HISTORY";
/// Environment variable listing reviewed namespace indexes, comma-separated.
pub const ENV_REVIEW_NAMESPACES: &str = "STABLE_ACCESS_REVIEW_NAMESPACES";
/// Environment variable listing groups granted `readstable`, comma-separated.
pub const ENV_READ_STABLE_GROUPS: &str = "STABLE_ACCESS_READSTABLE_GROUPS";

/// Stable-revision access control settings.
///
/// # Examples
///
/// ```
/// use stable_access_core::{AccessControlConfig, AccessDomain, Namespace, PolicyFlags, Title};
///
/// let config = AccessControlConfig::default();
/// assert!(config.allow_history_view());
/// assert!(config.is_restricted(&Title::main("Home")));
/// assert!(!config.is_restricted(&Title::new(Namespace(2), "Alice")));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessControlConfig {
    /// Allow listing revision history of access-controlled pages
    #[serde(default = "default_true")]
    pub allow_history_view: bool,

    /// Namespaces whose pages are subject to review and access control
    #[serde(default = "default_review_namespaces")]
    pub review_namespaces: Vec<Namespace>,

    /// Rights granted per group
    #[serde(default = "GroupPermissions::with_defaults")]
    pub rights: GroupPermissions,
}

fn default_true() -> bool {
    true
}

fn default_review_namespaces() -> Vec<Namespace> {
    vec![Namespace::MAIN]
}

impl Default for AccessControlConfig {
    fn default() -> Self {
        Self {
            allow_history_view: true,
            review_namespaces: default_review_namespaces(),
            rights: GroupPermissions::with_defaults(),
        }
    }
}

impl AccessControlConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `STABLE_ACCESS_ALLOW_HISTORY`: allow history listing (default: true)
    /// - `STABLE_ACCESS_REVIEW_NAMESPACES`: reviewed namespaces (default: `0`)
    /// - `STABLE_ACCESS_READSTABLE_GROUPS`: groups granted `readstable`
    ///   (default: `*,autoreview,editor,reviewer,sysop`)
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();

        let allow_history_view = match lookup(ENV_ALLOW_HISTORY) {
            Some(raw) => parse_flag(ENV_ALLOW_HISTORY, &raw)?,
            None => default.allow_history_view,
        };

        let review_namespaces = match lookup(ENV_REVIEW_NAMESPACES) {
            Some(raw) => parse_namespaces(&raw)?,
            None => default.review_namespaces,
        };

        let rights = match lookup(ENV_READ_STABLE_GROUPS) {
            Some(raw) => GroupPermissions::from_pairs(
                raw.split(',')
                    .map(str::trim)
                    .map(|group| (group, Right::ReadStable.as_str())),
            )?,
            None => default.rights,
        };

        let config = Self {
            allow_history_view,
            review_namespaces,
            rights,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a JSON document. Missing keys take their
    /// defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration is usable.
    ///
    /// An empty namespace list is valid and leaves every page unrestricted.
    /// Negative (virtual) namespaces hold no revisions and cannot be reviewed.
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(ns) = self.review_namespaces.iter().find(|ns| ns.0 < 0) {
            return Err(ConfigError::invalid(
                ENV_REVIEW_NAMESPACES,
                format!("virtual namespace {} cannot be reviewed", ns.0),
            ));
        }
        Ok(())
    }

    /// The group rights table, usable as the capability check.
    pub fn rights(&self) -> &GroupPermissions {
        &self.rights
    }
}

fn parse_flag(key: &str, raw: &str) -> ConfigResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(ConfigError::invalid(key, format!("{other:?} is not a boolean"))),
    }
}

fn parse_namespaces(raw: &str) -> ConfigResult<Vec<Namespace>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i32>().map(Namespace).map_err(|e| {
                ConfigError::invalid(ENV_REVIEW_NAMESPACES, format!("{part:?}: {e}"))
            })
        })
        .collect()
}

impl PolicyFlags for AccessControlConfig {
    fn allow_history_view(&self) -> bool {
        self.allow_history_view
    }
}

impl AccessDomain for AccessControlConfig {
    fn is_restricted(&self, title: &Title) -> bool {
        self.review_namespaces.contains(&title.namespace)
    }
}
