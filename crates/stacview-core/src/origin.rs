//! Proxy origin resolution.
//!
//! All resource fetches are routed through a single absolute base URL,
//! resolved once at startup from configuration and passed by reference into
//! the fetch pipeline and link rewriter. There is no ambient global.

use anyhow::{Context, Result};
use url::Url;

/// Base URL used when no proxy is configured.
pub const DEFAULT_PROXY_ORIGIN: &str = "http://localhost:8000/";

/// The absolute URL through which all resource fetches are routed.
///
/// Immutable for the process lifetime. Cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyOrigin {
    url: Url,
}

impl ProxyOrigin {
    /// Resolves the configured proxy value into an absolute origin.
    ///
    /// An absent or empty value yields [`DEFAULT_PROXY_ORIGIN`]. A relative
    /// value (e.g. `"stac/"`) is resolved against the default origin, which
    /// stands in for the document location in a native client. Malformed
    /// values are fatal; the error propagates to startup.
    pub fn resolve(configured: Option<&str>) -> Result<Self> {
        let base = Url::parse(DEFAULT_PROXY_ORIGIN).expect("default origin parses");
        Self::resolve_against(configured, &base)
    }

    /// Like [`ProxyOrigin::resolve`], for callers that have a real base
    /// location to resolve relative values against.
    pub fn resolve_against(configured: Option<&str>, base: &Url) -> Result<Self> {
        let url = match configured.map(str::trim).filter(|v| !v.is_empty()) {
            None => base.clone(),
            Some(value) => base
                .join(value)
                .with_context(|| format!("invalid proxy origin: {value}"))?,
        };
        Ok(Self { url })
    }

    /// Resolves a resource reference (path or URL) against the origin.
    pub fn resource_url(&self, reference: &str) -> Result<Url> {
        self.url
            .join(reference)
            .with_context(|| format!("invalid resource reference: {reference}"))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_proxy_falls_back_to_default() {
        let origin = ProxyOrigin::resolve(None).unwrap();
        assert_eq!(origin.as_str(), DEFAULT_PROXY_ORIGIN);
        let empty = ProxyOrigin::resolve(Some("")).unwrap();
        assert_eq!(empty.as_str(), DEFAULT_PROXY_ORIGIN);
        let blank = ProxyOrigin::resolve(Some("   ")).unwrap();
        assert_eq!(blank.as_str(), DEFAULT_PROXY_ORIGIN);
    }

    #[test]
    fn absolute_proxy_passes_through() {
        let origin = ProxyOrigin::resolve(Some("https://stac.example.com/api/")).unwrap();
        assert_eq!(origin.as_str(), "https://stac.example.com/api/");
    }

    #[test]
    fn relative_proxy_resolves_against_default() {
        let origin = ProxyOrigin::resolve(Some("/proxy/")).unwrap();
        assert_eq!(origin.as_str(), "http://localhost:8000/proxy/");
    }

    #[test]
    fn relative_proxy_resolves_against_given_base() {
        let base = Url::parse("https://viewer.example.com/view/").unwrap();
        let origin = ProxyOrigin::resolve_against(Some("upstream/"), &base).unwrap();
        assert_eq!(origin.as_str(), "https://viewer.example.com/view/upstream/");
    }

    #[test]
    fn resource_url_joins_path_against_origin() {
        let origin = ProxyOrigin::resolve(None).unwrap();
        let url = origin.resource_url("collections/sentinel-2").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/collections/sentinel-2");
    }

    #[test]
    fn resource_url_empty_reference_is_the_origin() {
        let origin = ProxyOrigin::resolve(None).unwrap();
        let url = origin.resource_url("").unwrap();
        assert_eq!(url.as_str(), DEFAULT_PROXY_ORIGIN);
    }

    #[test]
    fn resource_url_absolute_reference_passes_through() {
        let origin = ProxyOrigin::resolve(None).unwrap();
        let url = origin.resource_url("https://other.example.com/catalog").unwrap();
        assert_eq!(url.as_str(), "https://other.example.com/catalog");
    }
}
