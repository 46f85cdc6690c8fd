//! # docling-client
//!
//! Async Rust client for the docling-serve document conversion API.
//!
//! ## What it does
//!
//! The service converts documents (PDF, DOCX, images, …) to Markdown, HTML,
//! JSON, or DocTags. This crate wraps its HTTP API with typed requests and
//! responses and takes care of the one genuinely tricky part: uploading
//! files as a **streaming** `multipart/form-data` body. Conversion options
//! are flattened into form fields, file bytes are copied through a
//! backpressured channel while the request is already in flight, and memory
//! stays bounded to roughly one part regardless of upload size.
//!
//! ## Request paths
//!
//! ```text
//! convert_file / convert_file_async
//!  │
//!  ├─ options  ConvertOptions → ordered form fields (serde-driven)
//!  ├─ files    File streams   → multipart file parts, chunk by chunk
//!  └─ trailer  target_type    → final form field + closing boundary
//!
//! convert_source / convert_source_async
//!  └─ JSON body {options, sources, target} with kind-tagged variants
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docling_client::{Client, ConvertOptions, File, InputFormat, OutputFormat, TargetType};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::builder("https://docling.example.com")
//!         .api_key(std::env::var("DOCLING_API_KEY")?)
//!         .build()?;
//!
//!     let options = ConvertOptions::default()
//!         .with_from_formats([InputFormat::Pdf])
//!         .with_to_formats([OutputFormat::Md]);
//!
//!     let file = File::from_path("report.pdf").await?;
//!     let response = client
//!         .convert_file(vec![file], TargetType::InBody, &options)
//!         .await?;
//!
//!     if let Some(markdown) = response.document.markdown() {
//!         println!("{markdown}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Asynchronous conversions
//!
//! The `*_async` endpoints queue the work and return a
//! [`TaskStatus`] immediately. Poll [`Client::task_status`] until the task
//! reaches a terminal state, then fetch the output with
//! [`Client::task_result`]. How often to poll, and whether to retry failed
//! requests at all, is left entirely to the caller.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod client;
pub mod convert;
pub mod error;
pub mod files;
mod multipart;
pub mod options;
pub mod output;
pub mod source;
pub mod target;
pub mod tasks;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use client::{Client, ClientBuilder};
pub use error::{Error, Result};
pub use files::File;
pub use options::{
    ConvertOptions, GenerationConfig, ImageExportMode, InferenceFramework, InputFormat, OcrEngine,
    OutputFormat, PdfBackend, PictureDescriptionApi, PictureDescriptionLocal, Pipeline,
    ResponseFormat, TableMode, TransformersModelType, VlmModelApi, VlmModelLocal, VlmModelPreset,
};
pub use output::{
    ConversionIssue, ConversionStatus, ConvertResponse, Document, HealthStatus, TaskMeta,
    TaskStatus, TimingEntry,
};
pub use source::Source;
pub use target::{Target, TargetType};
