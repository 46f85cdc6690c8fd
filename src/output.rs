//! Response types returned by the conversion service.
//!
//! These are decoded pass-throughs of what the server reports; the client
//! adds no state of its own. Unknown enum values map to an `Unknown` variant
//! instead of failing the whole decode, since the service grows statuses
//! faster than clients are redeployed.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Result of a synchronous conversion, or of fetching a finished task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertResponse {
    /// The converted document with its requested content forms.
    pub document: Document,
    /// Overall outcome for the conversion.
    pub status: ConversionStatus,
    /// Per-component errors reported by the server pipeline.
    #[serde(default)]
    pub errors: Vec<ConversionIssue>,
    /// Total server-side processing time in seconds.
    #[serde(default)]
    pub processing_time: f64,
    /// Named per-stage timing breakdowns.
    #[serde(default)]
    pub timings: HashMap<String, TimingEntry>,
}

/// Server-reported outcome of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionStatus {
    Pending,
    Started,
    Failure,
    Success,
    PartialSuccess,
    Skipped,
    /// A status this client version does not know about.
    #[serde(other)]
    Unknown,
}

/// One error reported by a server pipeline component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionIssue {
    /// Component that failed: document_backend, model, doc_assembler, user_input.
    #[serde(default)]
    pub component_type: String,
    #[serde(default)]
    pub module_name: String,
    #[serde(default)]
    pub error_message: String,
}

/// Timing breakdown for one named server stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimingEntry {
    /// Granularity of the measurements: "page" or "document".
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub times: Vec<f64>,
    #[serde(default)]
    pub start_timestamps: Vec<String>,
}

/// A converted document and whichever content forms were requested.
///
/// The server sends one field per output format; fields for formats that
/// were not requested come back empty or absent. The accessors below return
/// `None` in that case so callers never have to test for empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub filename: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub md_content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_content: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub html_content: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub doctags_content: String,
}

impl Document {
    /// Markdown content, if it was requested and produced.
    pub fn markdown(&self) -> Option<&str> {
        (!self.md_content.is_empty()).then_some(self.md_content.as_str())
    }

    /// Structured JSON content, if it was requested and produced.
    pub fn json(&self) -> Option<&serde_json::Value> {
        self.json_content.as_ref()
    }

    /// HTML content, if it was requested and produced.
    pub fn html(&self) -> Option<&str> {
        (!self.html_content.is_empty()).then_some(self.html_content.as_str())
    }

    /// DocTags content, if it was requested and produced.
    pub fn doctags(&self) -> Option<&str> {
        (!self.doctags_content.is_empty()).then_some(self.doctags_content.as_str())
    }
}

/// State of an asynchronous conversion task, as last reported by the server.
///
/// Returned when a task is submitted and again on every poll. The client
/// keeps nothing between polls; callers decide their own polling cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStatus {
    pub task_id: String,
    /// Kind of work queued: "convert" or "chunk".
    #[serde(default)]
    pub task_type: String,
    /// Coarse lifecycle state, e.g. "pending", "started", "success",
    /// "failure".
    #[serde(default)]
    pub task_status: String,
    /// Position in the server queue while pending.
    #[serde(default)]
    pub task_position: u64,
    #[serde(default)]
    pub task_meta: TaskMeta,
}

/// Per-document progress counters for an asynchronous task.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TaskMeta {
    #[serde(default)]
    pub num_docs: u64,
    #[serde(default)]
    pub num_processed: u64,
    #[serde(default)]
    pub num_succeeded: u64,
    #[serde(default)]
    pub num_failed: u64,
}

/// Response of the service liveness probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}
