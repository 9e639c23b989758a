//! Local directory that uploaded product images are written to.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::{Stream, TryStreamExt};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio_util::io::StreamReader;

/// Multipart field name that carries image files.
pub const IMAGES_FIELD: &str = "images";

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid multipart data: {0}")]
    Multipart(String),
    #[error("Unexpected file field: {0}")]
    UnexpectedField(String),
    #[error("Request body is not multipart/form-data")]
    NotMultipart,
    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),
}

pub struct UploadDir {
    base_path: PathBuf,
}

impl UploadDir {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Result<Self, std::io::Error> {
        let base_path = base_path.as_ref().to_path_buf();
        std::fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Stream one uploaded file to disk and return the path it was written to.
    ///
    /// The returned path is the upload directory joined with the generated
    /// name, so it stays relative when the directory was configured relative.
    pub async fn store<S, E>(
        &self,
        original_name: Option<&str>,
        submitted_at: DateTime<Utc>,
        body: S,
    ) -> Result<String, IntakeError>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let path = self.base_path.join(stored_name(original_name, submitted_at));

        let reader = StreamReader::new(body.map_err(std::io::Error::other));
        tokio::pin!(reader);

        let mut file = tokio::fs::File::create(&path).await?;
        let written = tokio::io::copy(&mut reader, &mut file).await?;

        tracing::debug!(path = %path.display(), bytes = written, "Stored upload");
        Ok(path.to_string_lossy().into_owned())
    }
}

/// Name a stored file `<millis>-<random hex><ext>`.
///
/// The random token keeps two files with the same extension from the same
/// millisecond apart.
pub fn stored_name(original_name: Option<&str>, submitted_at: DateTime<Utc>) -> String {
    format!(
        "{}-{}{}",
        submitted_at.timestamp_millis(),
        uuid::Uuid::new_v4().simple(),
        original_extension(original_name)
    )
}

/// Final extension of the client file name including the dot, or empty.
/// Dotfiles such as `.env` have no extension.
fn original_extension(original_name: Option<&str>) -> String {
    original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}
