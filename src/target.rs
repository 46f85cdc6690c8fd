//! Conversion targets: where the server puts converted documents.
//!
//! Serialized the same way as [`crate::Source`]: a JSON object led by a
//! `kind` discriminator that is injected at encode time, not stored.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where converted documents end up for the URL-based endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Target {
    /// Return converted documents inline in the response body.
    #[serde(rename = "inbody")]
    InBody,
    /// Upload each converted document with an HTTP PUT to the given URL.
    Put { url: String },
    /// Write converted documents to an S3-compatible store.
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
    /// Return all converted documents as a single zip archive.
    Zip,
}

/// Response packaging for the file-upload endpoints, transmitted as a plain
/// trailing form field rather than a tagged object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    /// Converted documents inline in the response body.
    InBody,
    /// A single zip archive.
    Zip,
}

impl TargetType {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetType::InBody => "inbody",
            TargetType::Zip => "zip",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
