//! File uploads for the multipart conversion endpoints.

use crate::error::{Error, Result};
use std::fmt;
use std::io::Cursor;
use std::path::Path;
use tokio::io::AsyncRead;

/// A document to upload: a display name plus the byte stream holding its
/// contents.
///
/// The stream is owned by the request for exactly one upload; it is drained
/// to the end while the body is produced and cannot be reused. Only the base
/// name of `name` is transmitted as the part's filename.
pub struct File {
    name: String,
    reader: Box<dyn AsyncRead + Send + Unpin>,
}

impl File {
    /// Wrap an arbitrary async byte stream. The caller remains responsible
    /// for any resource behind the reader once the request completes.
    pub fn new(name: impl Into<String>, reader: impl AsyncRead + Send + Unpin + 'static) -> Self {
        Self {
            name: name.into(),
            reader: Box::new(reader),
        }
    }

    /// Upload an in-memory document.
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(name, Cursor::new(bytes.into()))
    }

    /// Upload a document from the local filesystem.
    ///
    /// The file is read in full and closed here, before any request body is
    /// produced, so no file handle stays open for the lifetime of the
    /// upload. The part's filename is the path's base name.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path.to_string_lossy().into_owned();
        let bytes = tokio::fs::read(path).await.map_err(|source| Error::FileRead {
            name: name.clone(),
            source,
        })?;
        Ok(Self::from_bytes(name, bytes))
    }

    /// The display name given at construction.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn into_parts(self) -> (String, Box<dyn AsyncRead + Send + Unpin>) {
        (self.name, self.reader)
    }
}

impl fmt::Debug for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("File")
            .field("name", &self.name)
            .field("reader", &"<dyn AsyncRead>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn from_path_reads_the_whole_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"%PDF-1.7 fake contents").unwrap();

        let file = File::from_path(tmp.path()).await.unwrap();
        assert_eq!(file.name(), tmp.path().to_string_lossy());

        let (_, mut reader) = file.into_parts();
        let mut contents = Vec::new();
        tokio::io::AsyncReadExt::read_to_end(&mut reader, &mut contents)
            .await
            .unwrap();
        assert_eq!(contents, b"%PDF-1.7 fake contents");
    }

    #[tokio::test]
    async fn from_path_missing_file_is_a_read_error() {
        let err = File::from_path("/definitely/not/here.pdf").await.unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }), "got: {err:?}");
    }
}
