//! Viewer session: ties the origin, fetch pipeline, classifier, and link
//! rewriter together and publishes the current view state.
//!
//! Navigation is last-key-wins: each `navigate` bumps a generation counter
//! and a fetch outcome is applied only if its generation is still current.
//! A superseded transfer is not aborted in flight; its result is discarded
//! on arrival so stale data never reaches current state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;
use tokio::sync::watch;

use crate::fetch::{FetchCache, RequestOptions};
use crate::links::{internal_href, significant_links, Link};
use crate::origin::ProxyOrigin;
use crate::resource::{classify, ResourceType};

/// A classified resource ready for rendering. Links have already been
/// filtered of the resource's own address and rewritten for in-app
/// navigation. `kind` may be [`ResourceType::Unknown`]; that is a valid
/// view the renderer handles with a fallback, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceView {
    pub kind: ResourceType,
    pub resource: Value,
    pub links: Vec<Link>,
}

/// Observable session state.
#[derive(Debug, Clone)]
pub enum ViewState {
    /// Nothing loaded (initial, or the active resource had no content).
    Idle,
    /// A fetch for the active path is in flight.
    Loading,
    /// The active path's fetch failed; terminal until the next navigation.
    Error(String),
    Ready(ResourceView),
}

pub struct Viewer {
    origin: ProxyOrigin,
    cache: Arc<FetchCache>,
    generation: AtomicU64,
    state: watch::Sender<ViewState>,
}

impl Viewer {
    pub fn new(origin: ProxyOrigin) -> Self {
        Self::with_cache(origin, Arc::new(FetchCache::new()))
    }

    /// Builds a viewer over a shared fetch cache.
    pub fn with_cache(origin: ProxyOrigin, cache: Arc<FetchCache>) -> Self {
        let (state, _) = watch::channel(ViewState::Idle);
        Self {
            origin,
            cache,
            generation: AtomicU64::new(0),
            state,
        }
    }

    pub fn origin(&self) -> &ProxyOrigin {
        &self.origin
    }

    /// Receiver for state changes. Every navigation publishes `Loading`
    /// followed by `Ready`, `Error`, or `Idle` (no content).
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    pub fn current_state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// One-shot load of a resource path: fetch, classify, rewrite links.
    /// `None` means the proxy answered with no content. Does not touch the
    /// published session state.
    pub async fn load(&self, path: &str) -> Result<Option<ResourceView>> {
        let url = self.origin.resource_url(path)?;
        let body = self
            .cache
            .fetch_json(url.as_str(), &RequestOptions::default(), None)
            .await?;
        Ok(body.map(|resource| self.build_view(resource)))
    }

    /// Navigates the session to `path`, publishing state transitions.
    ///
    /// If another `navigate` starts before this one's fetch resolves, the
    /// stale outcome is discarded on arrival (last-key-wins).
    pub async fn navigate(&self, path: &str) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let url = match self.origin.resource_url(path) {
            Ok(url) => url,
            Err(err) => {
                self.publish(generation, ViewState::Error(format!("{err:#}")));
                return;
            }
        };

        self.publish(generation, ViewState::Loading);

        let outcome = self
            .cache
            .fetch_json(url.as_str(), &RequestOptions::default(), None)
            .await;

        let state = match outcome {
            Ok(Some(resource)) => ViewState::Ready(self.build_view(resource)),
            Ok(None) => ViewState::Idle,
            Err(err) => ViewState::Error(err.to_string()),
        };
        self.publish(generation, state);
    }

    /// Applies a state change only if `generation` is still the active one.
    fn publish(&self, generation: u64, state: ViewState) {
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("discarding superseded navigation result");
            return;
        }
        self.state.send_replace(state);
    }

    fn build_view(&self, resource: Value) -> ResourceView {
        let kind = classify(&resource);
        let links = extract_links(&resource);
        let links = significant_links(&links)
            .into_iter()
            .map(|mut link| {
                link.href = internal_href(&self.origin, &link.href);
                link
            })
            .collect();
        ResourceView {
            kind,
            resource,
            links,
        }
    }
}

/// Links from `resource["links"]`. Entries that do not deserialize as a
/// link are skipped, not fatal to the view.
fn extract_links(resource: &Value) -> Vec<Link> {
    let Some(entries) = resource.get("links").and_then(Value::as_array) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| match serde_json::from_value(entry.clone()) {
            Ok(link) => Some(link),
            Err(err) => {
                tracing::debug!("skipping malformed link entry: {err}");
                None
            }
        })
        .collect()
}
