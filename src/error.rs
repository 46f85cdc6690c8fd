//! Error types for the docling-client library.
//!
//! The variants map one-to-one onto the distinct ways a conversion request
//! can fail, so callers can match on the failure class instead of parsing
//! message strings:
//!
//! * [`Error::Encode`] — the options value could not be turned into form
//!   fields. Raised before any bytes reach the network for JSON requests,
//!   or mid-stream for multipart requests.
//! * [`Error::FileRead`] — reading an upload's bytes failed; the in-flight
//!   request is aborted, nothing is retried.
//! * [`Error::Http`] — the server answered with a non-2xx status. Carries
//!   the status code and the raw (unparsed) response body.
//! * [`Error::Decode`] — the server answered 2xx but the body did not match
//!   the expected response shape. Kept separate from [`Error::Http`] so
//!   callers can tell "server rejected" from "server replied oddly".
//!
//! Retry and backoff are deliberately the caller's decision; nothing in this
//! crate retries on its own.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors returned by the docling-client library.
#[derive(Debug, Error)]
pub enum Error {
    /// The base URL given to [`crate::Client::builder`] is not a usable
    /// HTTP(S) base.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// A conversion-options value could not be encoded as form data.
    #[error("failed to encode conversion options: {0}")]
    Encode(#[source] serde_json::Error),

    /// Reading the bytes of an uploaded file failed.
    #[error("failed to read upload '{name}': {source}")]
    FileRead {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP transport stopped reading the request body before it was
    /// fully written (request aborted or connection dropped). The producer
    /// task exits on the next write; the transport failure itself is what
    /// the caller sees.
    #[error("request body consumer went away before the body was fully written")]
    BodyAborted,

    /// Sending the request failed at the transport level (connect, TLS,
    /// timeout, or a body-stream failure surfaced through the send).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status code.
    ///
    /// `body` is the raw response text, not parsed into any typed shape.
    #[error("unexpected HTTP status {status}: {body}")]
    Http { status: u16, body: String },

    /// A 2xx response body failed structural decoding.
    #[error("failed to decode response body: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_display_includes_status_and_body() {
        let e = Error::Http {
            status: 422,
            body: "{\"detail\":\"bad page_range\"}".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("422"), "got: {msg}");
        assert!(msg.contains("bad page_range"), "got: {msg}");
    }

    #[test]
    fn file_read_display_names_the_upload() {
        let e = Error::FileRead {
            name: "report.pdf".into(),
            source: std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated"),
        };
        assert!(e.to_string().contains("report.pdf"));
    }

    #[test]
    fn invalid_base_url_display() {
        let e = Error::InvalidBaseUrl {
            url: "not a url".into(),
            reason: "relative URL without a base".into(),
        };
        assert!(e.to_string().contains("not a url"));
    }

    #[test]
    fn decode_error_is_distinct_from_http() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e = Error::Decode { source };
        assert!(e.to_string().starts_with("failed to decode"));
    }
}
