//! Cached fetch pipeline.
//!
//! One request per cache key: concurrent calls for the same URL share a
//! single in-flight transfer and its outcome, success or failure. An
//! outcome is terminal for its key until the key is invalidated. The cache
//! is process-wide and mutated only by this pipeline.

mod error;
mod http;
mod status;

pub use error::FetchError;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tokio::sync::OnceCell;

use http::RawResponse;

const NO_CONTENT: u32 = 204;

/// HTTP verb for a request. The viewer itself only issues GETs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

/// Per-request options. Headers are merged over the forced
/// `content-type: application/json`; a present body is serialized as JSON.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
}

/// Normalized outcome for one key: `Ok(None)` is the explicit "no data"
/// result of an HTTP 204 (and of an absent extract key).
type Outcome = Result<Option<Value>, FetchError>;

/// Observable state of a cache key.
#[derive(Debug, Clone)]
pub enum FetchState {
    /// Requested, no outcome yet.
    Loading,
    /// Terminal failure for this key until it is invalidated.
    Error(FetchError),
    /// Latest successful payload (`None` for no-content).
    Data(Option<Value>),
}

/// Request-key cache with in-flight deduplication.
#[derive(Debug, Default)]
pub struct FetchCache {
    entries: Mutex<HashMap<String, Arc<OnceCell<Outcome>>>>,
}

impl FetchCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches `url` and normalizes the response to JSON.
    ///
    /// Failure statuses reject with [`FetchError::RequestFailed`], carrying
    /// the body's `message` field when one can be extracted and the status
    /// text otherwise. A 204 resolves to `None` without touching the body.
    /// With `extract_key`, the named member of the body is returned instead
    /// of the whole body.
    ///
    /// Outcomes are cached by `url`; concurrent calls for the same key
    /// share one network request.
    pub async fn fetch_json(
        &self,
        url: &str,
        options: &RequestOptions,
        extract_key: Option<&str>,
    ) -> Result<Option<Value>, FetchError> {
        let cell = {
            let mut entries = self.entries.lock().unwrap();
            entries.entry(url.to_string()).or_default().clone()
        };

        let outcome = cell
            .get_or_init(|| {
                let url = url.to_string();
                let options = options.clone();
                async move {
                    let handle = tokio::task::spawn_blocking(move || http::perform(&url, &options));
                    match handle.await {
                        Ok(Ok(response)) => decode(response),
                        Ok(Err(err)) => Err(err),
                        Err(err) => Err(FetchError::Transport(format!("fetch task failed: {err}"))),
                    }
                }
            })
            .await;

        match (outcome, extract_key) {
            (Ok(Some(body)), Some(key)) => Ok(body.get(key).cloned()),
            (Ok(None), Some(_)) => Ok(None),
            (Ok(body), None) => Ok(body.clone()),
            (Err(err), _) => Err(err.clone()),
        }
    }

    /// Current state of a key, or `None` if it was never requested.
    pub fn state(&self, url: &str) -> Option<FetchState> {
        let entries = self.entries.lock().unwrap();
        let cell = entries.get(url)?;
        Some(match cell.get() {
            None => FetchState::Loading,
            Some(Ok(body)) => FetchState::Data(body.clone()),
            Some(Err(err)) => FetchState::Error(err.clone()),
        })
    }

    /// Drops the cached outcome for `url` so the next fetch hits the
    /// network again. The terminal-error contract holds until this is
    /// called (or the consumer moves to a different key).
    pub fn invalidate(&self, url: &str) {
        self.entries.lock().unwrap().remove(url);
    }
}

fn decode(response: RawResponse) -> Outcome {
    if !(200..300).contains(&response.status) {
        return Err(FetchError::RequestFailed(failure_message(&response)));
    }
    if response.status == NO_CONTENT {
        return Ok(None);
    }
    let body: Value = serde_json::from_slice(&response.body)?;
    Ok(Some(body))
}

/// Message for a failure status: the body's `message` field when the body
/// is JSON and carries a non-empty string there. Any problem reading the
/// failure body is swallowed; the status-text fallback is always produced.
fn failure_message(response: &RawResponse) -> String {
    serde_json::from_slice::<Value>(&response.body)
        .ok()
        .and_then(|body| {
            body.get("message")?
                .as_str()
                .filter(|m| !m.is_empty())
                .map(String::from)
        })
        .unwrap_or_else(|| format!("Unexpected response: {}", status::reason(response.status)))
}
