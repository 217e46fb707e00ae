//! Fetch error taxonomy.
//!
//! Outcomes are cached per request key and observed by every waiter on that
//! key, so the error type is cloneable: underlying curl/serde errors are
//! flattened to their messages at construction.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Non-2xx HTTP response. The message comes from the response body's
    /// `message` field when available, else from the status text. Terminal
    /// for the fetch key; not retried.
    #[error("{0}")]
    RequestFailed(String),

    /// Success body claimed JSON but failed to parse. Only the failure-body
    /// parse is swallowed; this one propagates.
    #[error("malformed JSON body: {0}")]
    MalformedJson(String),

    /// Transport-level failure (connect, DNS, TLS, ...).
    #[error("transport: {0}")]
    Transport(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::MalformedJson(err.to_string())
    }
}

impl From<curl::Error> for FetchError {
    fn from(err: curl::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}
