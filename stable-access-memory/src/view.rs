//! Approved-revision page view
//!
//! Decides which revision a plain page view shows, following the host's
//! rules: an explicit `stable` parameter wins, otherwise the view's default
//! applies. A request naming a specific revision or a diff never shows the
//! approved revision by default.

use stable_access_core::{ActiveRender, ApprovalRegistry, RequestTokens, Title};

/// The page view of the active request.
///
/// `stable_by_default` models the user preference and configuration
/// exceptions that choose between the approved and the latest revision when
/// the request does not say.
///
/// # Example
///
/// ```
/// use stable_access_core::{ActiveRender, RequestTokens, Title};
/// use stable_access_memory::{MemoryApprovalRegistry, MemoryWiki, PageView};
///
/// let mut wiki = MemoryWiki::new();
/// let home = Title::main("Home");
/// let id = wiki.edit(home.clone(), "Checked");
/// let mut registry = MemoryApprovalRegistry::new();
/// registry.review(&wiki, &home, id).unwrap();
///
/// let view = PageView::new(&registry).prefer_latest();
/// assert!(!view.is_showing_approved(&home, &RequestTokens::default()));
/// let forced = RequestTokens::from_query([("stable", "1")]);
/// assert!(view.is_showing_approved(&home, &forced));
/// ```
#[derive(Debug)]
pub struct PageView<'r, R: ?Sized> {
    registry: &'r R,
    stable_by_default: bool,
}

impl<'r, R> PageView<'r, R>
where
    R: ApprovalRegistry + ?Sized,
{
    /// A view showing the approved revision by default.
    pub fn new(registry: &'r R) -> Self {
        Self {
            registry,
            stable_by_default: true,
        }
    }

    /// Show the latest revision unless the request asks otherwise.
    pub fn prefer_latest(mut self) -> Self {
        self.stable_by_default = false;
        self
    }

    pub fn stable_by_default(&self) -> bool {
        self.stable_by_default
    }
}

impl<R> ActiveRender for PageView<'_, R>
where
    R: ApprovalRegistry + ?Sized,
{
    fn is_showing_approved(&self, title: &Title, tokens: &RequestTokens) -> bool {
        if tokens.names_revision() {
            return false;
        }
        if self.registry.lookup_approved(title).is_none() {
            return false;
        }
        match tokens.stable {
            Some(1) => true,
            Some(0) => false,
            _ => self.stable_by_default,
        }
    }
}
