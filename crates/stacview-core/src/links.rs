//! Link filtering and rewriting for in-app navigation.

use serde::{Deserialize, Serialize};

use crate::origin::ProxyOrigin;

/// A directional relation from one resource to another. Extra members on
/// the wire (media type, etc.) are tolerated and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Link {
    /// Human-facing label: the title when present, else the rel.
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.rel)
    }
}

/// First link with the given rel, if any.
pub fn find_link<'a>(links: &'a [Link], rel: &str) -> Option<&'a Link> {
    links.iter().find(|link| link.rel == rel)
}

/// Links worth presenting: everything except the resource's own address.
///
/// The filter is by href equality with the first `self` link, so a non-self
/// link that happens to share the self href is dropped too. That is the
/// established navigation behavior; callers accept it. Without a self link
/// all links pass through. Order is preserved.
pub fn significant_links(links: &[Link]) -> Vec<Link> {
    let self_href = find_link(links, "self").map(|link| link.href.clone());
    links
        .iter()
        .filter(|link| self_href.as_deref() != Some(link.href.as_str()))
        .cloned()
        .collect()
}

/// Rewrites an href under the proxy origin into an internal, router-relative
/// path (`/...`). Anything else is an external link, returned unchanged.
pub fn internal_href(origin: &ProxyOrigin, href: &str) -> String {
    match href.strip_prefix(origin.as_str()) {
        Some(rest) => format!("/{rest}"),
        None => href.to_string(),
    }
}
