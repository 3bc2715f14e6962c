//! Click-through links to external pages

use crate::config::SocialLink;

/// Browsing context an external link opens in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    /// New top-level context
    Blank,
}

/// Request for the host to open an external page
///
/// The new context must not get a handle to its opener nor a referrer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenLinkRequest {
    pub url: String,
    pub target: LinkTarget,
    pub no_opener: bool,
    pub no_referrer: bool,
}

impl OpenLinkRequest {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            target: LinkTarget::Blank,
            no_opener: true,
            no_referrer: true,
        }
    }
}

/// Ordered marker → URL table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SocialLinkTable {
    links: Vec<SocialLink>,
}

impl SocialLinkTable {
    pub fn new(links: Vec<SocialLink>) -> Self {
        Self { links }
    }

    /// First link whose marker `name` contains
    pub fn lookup(&self, name: &str) -> Option<&SocialLink> {
        self.links
            .iter()
            .find(|link| name.contains(link.marker.as_str()))
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
