//! The `multipart/form-data` encoder behind the file-conversion endpoints.
//!
//! The service accepts conversion options as individual form fields rather
//! than a JSON document, so [`ConvertOptions`](crate::ConvertOptions) (or any
//! other serializable record) has to be flattened into named parts:
//!
//! * scalars become one field in their display form (`true`, `-1`, `1.5`),
//! * nested records and maps become one field holding compact JSON,
//! * lists repeat the field name once per element,
//! * unset optionals and fields skipped by their omission attributes
//!   produce nothing.
//!
//! Field enumeration itself is delegated to the derived `Serialize` impl via
//! `serde_json::to_value`: wire names, omission rules, and declaration order
//! all come from the struct's serde attributes (`serde_json` is built with
//! `preserve_order`, so the intermediate object keeps field order).
//!
//! ## Streaming
//!
//! [`streaming_form`] assembles the full request body — encoded fields,
//! then file parts, then trailing fields, then the closing boundary — on a
//! spawned task that pushes chunks into a capacity-1 channel. The HTTP
//! transport reads the other end via `Body::wrap_stream`, so a write blocks
//! until the transport has consumed the previous chunk: memory stays bounded
//! to roughly one part no matter how large the upload is. Any encode or
//! file-read failure is delivered through the same channel and surfaces as a
//! request-send error; if the transport abandons the body, the next write
//! fails and the producer stops.

use crate::error::{Error, Result};
use crate::files::File;
use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tokio::io::AsyncReadExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, warn};
use uuid::Uuid;

/// One named text field destined for the form body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FormField {
    pub(crate) name: String,
    pub(crate) value: String,
}

impl FormField {
    pub(crate) fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A fully assembled streaming request body plus its content-type header.
pub(crate) struct StreamingForm {
    pub(crate) content_type: String,
    pub(crate) body: reqwest::Body,
}

/// Flatten a serializable record into its ordered form fields.
///
/// The record must serialize to a JSON object; anything else (a bare scalar,
/// a sequence) cannot name its fields and is rejected.
pub(crate) fn encode_fields<T: Serialize>(value: &T) -> Result<Vec<FormField>> {
    let tree = serde_json::to_value(value).map_err(Error::Encode)?;
    let Value::Object(entries) = tree else {
        return Err(Error::Encode(serde::ser::Error::custom(
            "form encoding requires a struct or map at the top level",
        )));
    };
    let mut fields = Vec::new();
    for (name, entry) in entries {
        push_value(&mut fields, &name, entry);
    }
    Ok(fields)
}

/// Emit the fields for one introspected value.
///
/// Arrays recurse per element under the same name, so a list of records
/// yields one JSON field per record, not one combined array.
fn push_value(fields: &mut Vec<FormField>, name: &str, value: Value) {
    match value {
        // An optional left unset: nothing to transmit.
        Value::Null => {}
        Value::Bool(b) => fields.push(FormField::new(name, b.to_string())),
        Value::Number(n) => fields.push(FormField::new(name, n.to_string())),
        Value::String(s) => fields.push(FormField::new(name, s)),
        Value::Array(items) => {
            for item in items {
                push_value(fields, name, item);
            }
        }
        Value::Object(_) => fields.push(FormField::new(name, value.to_string())),
    }
}

/// Build a streaming multipart body from a serializable record, an ordered
/// list of file uploads sharing `file_field`, and trailing text fields.
pub(crate) fn streaming_form<T>(
    options: T,
    file_field: impl Into<String>,
    files: Vec<File>,
    trailer: Vec<FormField>,
) -> StreamingForm
where
    T: Serialize + Send + Sync + 'static,
{
    let (content_type, stream) = form_stream(options, file_field.into(), files, trailer);
    StreamingForm {
        content_type,
        body: reqwest::Body::wrap_stream(stream),
    }
}

/// Same as [`streaming_form`] but exposing the raw chunk stream, which the
/// tests consume directly.
pub(crate) fn form_stream<T>(
    options: T,
    file_field: String,
    files: Vec<File>,
    trailer: Vec<FormField>,
) -> (String, ReceiverStream<Result<Bytes>>)
where
    T: Serialize + Send + Sync + 'static,
{
    let boundary = Uuid::new_v4().simple().to_string();
    let content_type = format!("multipart/form-data; boundary={boundary}");

    // Capacity 1: each chunk must be read before the next can be written,
    // which is what keeps the producer from running ahead of the transport.
    let (tx, rx) = mpsc::channel::<Result<Bytes>>(1);
    let writer = FormWriter { boundary, tx };

    tokio::spawn(async move {
        match writer.write_form(&options, &file_field, files, &trailer).await {
            Ok(()) => {}
            Err(Error::BodyAborted) => {
                debug!("multipart body reader went away, stopping producer");
            }
            Err(e) => {
                warn!("multipart body failed: {e}");
                // Deliver the failure as a read error on the stream so the
                // transport reports the request as failed. If the reader is
                // already gone there is nobody left to tell.
                let _ = writer.tx.send(Err(e)).await;
            }
        }
        // The sender drops here on every path, which closes the stream.
    });

    (content_type, ReceiverStream::new(rx))
}

struct FormWriter {
    boundary: String,
    tx: mpsc::Sender<Result<Bytes>>,
}

impl FormWriter {
    async fn write_form<T: Serialize>(
        &self,
        options: &T,
        file_field: &str,
        files: Vec<File>,
        trailer: &[FormField],
    ) -> Result<()> {
        for field in encode_fields(options)? {
            self.field(&field.name, &field.value).await?;
        }
        for file in files {
            self.file(file_field, file).await?;
        }
        for field in trailer {
            self.field(&field.name, &field.value).await?;
        }
        self.send(Bytes::from(format!("--{}--\r\n", self.boundary)))
            .await
    }

    async fn field(&self, name: &str, value: &str) -> Result<()> {
        let part = format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
            self.boundary,
            escape_quotes(name),
            value
        );
        self.send(Bytes::from(part)).await
    }

    async fn file(&self, field_name: &str, file: File) -> Result<()> {
        let (name, mut reader) = file.into_parts();
        let filename = Path::new(&name)
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.clone());

        let header = format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n",
            self.boundary,
            escape_quotes(field_name),
            escape_quotes(&filename)
        );
        self.send(Bytes::from(header)).await?;

        let mut buf = vec![0u8; 8 * 1024];
        loop {
            let n = reader.read(&mut buf).await.map_err(|e| Error::FileRead {
                name: name.clone(),
                source: e,
            })?;
            if n == 0 {
                break;
            }
            self.send(Bytes::copy_from_slice(&buf[..n])).await?;
        }
        self.send(Bytes::from_static(b"\r\n")).await
    }

    async fn send(&self, chunk: Bytes) -> Result<()> {
        self.tx.send(Ok(chunk)).await.map_err(|_| Error::BodyAborted)
    }
}

/// Escape a field or file name for a Content-Disposition header.
fn escape_quotes(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
