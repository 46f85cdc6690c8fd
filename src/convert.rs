//! Conversion endpoints.
//!
//! Two families, each in a blocking and a fire-and-forget flavour:
//!
//! * **File upload** (`convert/file`): documents are streamed up as
//!   multipart parts. The request body is produced concurrently with the
//!   send, so a gigabyte of PDFs never sits in memory at once.
//! * **By reference** (`convert/source`): the request is plain JSON and the
//!   server fetches the documents itself from the given [`Source`]s,
//!   delivering results to the given [`Target`].
//!
//! The async variants return immediately with a [`TaskStatus`] to poll via
//! [`Client::task_status`](crate::Client::task_status).

use crate::client::Client;
use crate::error::Result;
use crate::files::File;
use crate::multipart::{streaming_form, FormField};
use crate::options::ConvertOptions;
use crate::output::{ConvertResponse, TaskStatus};
use crate::source::Source;
use crate::target::{Target, TargetType};
use serde::Serialize;

impl Client {
    /// Upload documents and wait for the converted results.
    ///
    /// Parts go out in a fixed order: the encoded `options` fields, then one
    /// `files` part per upload in the given order, then the `target_type`
    /// field.
    pub async fn convert_file(
        &self,
        files: Vec<File>,
        target_type: TargetType,
        options: &ConvertOptions,
    ) -> Result<ConvertResponse> {
        let form = self.file_form(files, target_type, options);
        self.post_multipart(&["convert", "file"], form).await
    }

    /// Upload documents for background conversion; returns the queued task.
    pub async fn convert_file_async(
        &self,
        files: Vec<File>,
        target_type: TargetType,
        options: &ConvertOptions,
    ) -> Result<TaskStatus> {
        let form = self.file_form(files, target_type, options);
        self.post_multipart(&["convert", "file", "async"], form).await
    }

    /// Convert documents the server fetches itself, waiting for the results.
    pub async fn convert_source(
        &self,
        sources: &[Source],
        target: &Target,
        options: &ConvertOptions,
    ) -> Result<ConvertResponse> {
        let request = SourceConvertRequest {
            options,
            sources,
            target,
        };
        self.post_json(&["convert", "source"], &request).await
    }

    /// Convert server-fetched documents in the background; returns the
    /// queued task.
    pub async fn convert_source_async(
        &self,
        sources: &[Source],
        target: &Target,
        options: &ConvertOptions,
    ) -> Result<TaskStatus> {
        let request = SourceConvertRequest {
            options,
            sources,
            target,
        };
        self.post_json(&["convert", "source", "async"], &request).await
    }

    fn file_form(
        &self,
        files: Vec<File>,
        target_type: TargetType,
        options: &ConvertOptions,
    ) -> crate::multipart::StreamingForm {
        streaming_form(
            options.clone(),
            "files",
            files,
            vec![FormField::new("target_type", target_type.as_str())],
        )
    }
}

/// JSON body of the `convert/source` endpoints.
#[derive(Serialize)]
struct SourceConvertRequest<'a> {
    options: &'a ConvertOptions,
    sources: &'a [Source],
    target: &'a Target,
}
