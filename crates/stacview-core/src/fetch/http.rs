//! Blocking HTTP transfer via the curl easy API.
//!
//! Runs in the current thread; the async pipeline calls this from
//! `spawn_blocking`. One shot per call: no retries, no backoff.

use std::time::Duration;

use super::error::FetchError;
use super::{Method, RequestOptions};

/// Raw response: status code plus the collected body bytes.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

/// Performs one request and collects the response body.
///
/// A present JSON body is serialized and sent with the request, and
/// `content-type: application/json` is always set. Redirects are followed.
pub(crate) fn perform(url: &str, options: &RequestOptions) -> Result<RawResponse, FetchError> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(Duration::from_secs(15))?;

    match options.method {
        Method::Get => {}
        Method::Post => easy.post(true)?,
        Method::Put => easy.custom_request("PUT")?,
        Method::Delete => easy.custom_request("DELETE")?,
    }

    if let Some(body) = &options.body {
        let payload = serde_json::to_vec(body)?;
        easy.post_fields_copy(&payload)?;
    }

    let mut list = curl::easy::List::new();
    list.append("content-type: application/json")?;
    for (k, v) in &options.headers {
        if k.trim().eq_ignore_ascii_case("content-type") {
            continue;
        }
        list.append(&format!("{}: {}", k.trim(), v.trim()))?;
    }
    easy.http_headers(list)?;

    let mut body = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    tracing::debug!(url, status, bytes = body.len(), "fetched");

    Ok(RawResponse { status, body })
}
