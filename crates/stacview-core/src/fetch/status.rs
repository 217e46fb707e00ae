//! Status text for failure messages.
//!
//! libcurl exposes the numeric response code but not the reason phrase, so
//! the fallback message is derived from the registry text for common codes.

/// Registry reason phrase for `code`, or `HTTP <code>` for anything else.
pub(crate) fn reason(code: u32) -> String {
    let text = match code {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        406 => "Not Acceptable",
        408 => "Request Timeout",
        409 => "Conflict",
        410 => "Gone",
        415 => "Unsupported Media Type",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => return format!("HTTP {code}"),
    };
    text.to_string()
}
