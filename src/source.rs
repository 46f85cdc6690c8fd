//! Document sources for the URL-based conversion endpoints.
//!
//! On the wire a source is a JSON object whose first key, `kind`, names the
//! variant (`file`, `http`, `s3`) followed by the variant's own fields. The
//! discriminator is injected by serialization, never stored; the enum stays
//! a plain closed sum type. Decoding an object with an unrecognized `kind`
//! fails with an unknown-variant error.

use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Where the server should take a document from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Source {
    /// An inline document, carried base64-encoded in the request itself.
    File {
        base64_string: String,
        filename: String,
    },
    /// A document the server downloads over HTTP(S).
    Http {
        url: String,
        /// Extra headers for the server's download request.
        #[serde(default, skip_serializing_if = "HashMap::is_empty")]
        headers: HashMap<String, String>,
    },
    /// A document the server fetches from an S3-compatible store.
    S3 {
        endpoint: String,
        /// Server default: true.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        verify_ssl: Option<bool>,
        access_key: String,
        secret_key: String,
        bucket: String,
        /// Server default: "".
        #[serde(default, skip_serializing_if = "String::is_empty")]
        key_prefix: String,
    },
}

impl Source {
    /// Inline an in-memory document.
    pub fn from_bytes(filename: impl Into<String>, bytes: impl AsRef<[u8]>) -> Self {
        Source::File {
            base64_string: BASE64.encode(bytes.as_ref()),
            filename: filename.into(),
        }
    }

    /// Inline a document read from the local filesystem. The part's filename
    /// is the path's base name.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path.to_string_lossy().into_owned();
        let bytes = tokio::fs::read(path).await.map_err(|source| Error::FileRead {
            name: name.clone(),
            source,
        })?;
        let filename = path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or(name);
        Ok(Self::from_bytes(filename, bytes))
    }

    /// A document the server downloads itself, with no extra headers.
    pub fn url(url: impl Into<String>) -> Self {
        Source::Http {
            url: url.into(),
            headers: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_is_the_first_key() {
        let json = serde_json::to_string(&Source::url("https://example.com/a.pdf")).unwrap();
        assert!(
            json.starts_with(r#"{"kind":"http""#),
            "discriminator must lead the object, got: {json}"
        );
    }

    #[test]
    fn file_source_carries_base64_contents() {
        let source = Source::from_bytes("doc.pdf", b"abc");
        let json = serde_json::to_value(&source).unwrap();
        assert_eq!(json["kind"], "file");
        assert_eq!(json["filename"], "doc.pdf");
        assert_eq!(json["base64_string"], "YWJj");
    }

    #[test]
    fn empty_headers_are_omitted() {
        let json = serde_json::to_value(Source::url("https://example.com/a.pdf")).unwrap();
        assert!(json.get("headers").is_none());

        let with_headers = Source::Http {
            url: "https://example.com/a.pdf".into(),
            headers: [("Authorization".to_string(), "Bearer t".to_string())].into(),
        };
        let json = serde_json::to_value(&with_headers).unwrap();
        assert_eq!(json["headers"]["Authorization"], "Bearer t");
    }

    #[test]
    fn s3_source_round_trips() {
        let source = Source::S3 {
            endpoint: "minio.local:9000".into(),
            verify_ssl: Some(false),
            access_key: "ak".into(),
            secret_key: "sk".into(),
            bucket: "inbox".into(),
            key_prefix: "scans/".into(),
        };
        let json = serde_json::to_string(&source).unwrap();
        let back: Source = serde_json::from_str(&json).unwrap();
        assert_eq!(back, source);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = serde_json::from_str::<Source>(r#"{"kind":"carrier-pigeon"}"#).unwrap_err();
        assert!(
            err.to_string().contains("unknown variant"),
            "got: {err}"
        );
    }
}
