//! Image uploads written to local disk and served under `/uploads`.

use std::{
    io,
    path::{Path, PathBuf},
};

use salvo::{
    http::{
        ParseError,
        form::{FilePart, FormData},
    },
    prelude::{Request, StatusError},
};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::observability;

/// Public URL prefix uploaded files are served from.
pub(crate) const PUBLIC_PREFIX: &str = "/uploads";

/// Room for the text fields and part headers around uploaded files.
const FORM_FIELDS_ALLOWANCE: u64 = 64 * 1024;

static ALLOWED_TYPES: [(&str, &[&str]); 4] = [
    ("image/jpeg", &["jpg", "jpeg"]),
    ("image/png", &["png"]),
    ("image/gif", &["gif"]),
    ("image/webp", &["webp"]),
];

#[derive(Debug, Error)]
pub(crate) enum UploadError {
    #[error("file of {size} bytes exceeds the {max} byte limit")]
    TooLarge { size: u64, max: u64 },

    #[error("only jpeg, png, gif and webp images are allowed")]
    UnsupportedType,

    #[error("failed to store upload")]
    Io(#[from] io::Error),
}

impl UploadError {
    pub(crate) fn into_status_error(self) -> StatusError {
        match self {
            Self::TooLarge { .. } | Self::UnsupportedType => {
                StatusError::bad_request().brief(self.to_string())
            }
            Self::Io(source) => {
                error!("failed to store upload: {source}");

                StatusError::internal_server_error()
            }
        }
    }
}

/// A file accepted into the upload directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StoredUpload {
    /// Path clients fetch the file from.
    pub(crate) url: String,
    disk_path: PathBuf,
}

#[derive(Debug, Clone)]
pub(crate) struct UploadStore {
    root: PathBuf,
    max_size: u64,
}

impl UploadStore {
    #[must_use]
    pub(crate) fn new(root: impl Into<PathBuf>, max_size: u64) -> Self {
        Self {
            root: root.into(),
            max_size,
        }
    }

    pub(crate) fn root(&self) -> &Path {
        &self.root
    }

    /// Validate and copy a multipart file part into the upload directory.
    ///
    /// `label` names the file on disk, e.g. the product name.
    /// Body ceiling for a multipart request carrying up to `files` uploads.
    pub(crate) fn form_limit(&self, files: u64) -> usize {
        let limit = self
            .max_size
            .saturating_mul(files)
            .saturating_add(FORM_FIELDS_ALLOWANCE);

        usize::try_from(limit).unwrap_or(usize::MAX)
    }

    /// Parse a multipart body sized for `files` uploads.
    pub(crate) async fn read_form<'r>(
        &self,
        req: &'r mut Request,
        files: u64,
    ) -> Result<&'r FormData, StatusError> {
        let limit = self.form_limit(files);

        req.form_data_max_size(limit).await.map_err(|error| match error {
            ParseError::PayloadTooLarge => {
                StatusError::payload_too_large().brief("Upload exceeds the size limit")
            }
            other => {
                debug!(limit, "unreadable multipart body: {other}");

                StatusError::bad_request().brief("expected multipart form data")
            }
        })
    }

    pub(crate) async fn store(
        &self,
        file: &FilePart,
        label: &str,
    ) -> Result<StoredUpload, UploadError> {
        let content_type = file
            .content_type()
            .map(|mime| mime.essence_str().to_ascii_lowercase());

        self.store_file(
            file.path(),
            file.name(),
            content_type.as_deref(),
            file.size(),
            label,
        )
        .await
    }

    pub(crate) async fn store_file(
        &self,
        source: &Path,
        original_name: Option<&str>,
        content_type: Option<&str>,
        size: u64,
        label: &str,
    ) -> Result<StoredUpload, UploadError> {
        if size > self.max_size {
            return Err(UploadError::TooLarge {
                size,
                max: self.max_size,
            });
        }

        let extension = accepted_extension(original_name, content_type)?;
        let file_name = format!("{}-{}.{extension}", slug(label), Uuid::now_v7().simple());
        let disk_path = self.root.join(&file_name);

        fs::create_dir_all(&self.root).await?;
        fs::copy(source, &disk_path).await?;

        info!(file = %file_name, size, "stored upload");

        observability::record_upload(size);

        Ok(StoredUpload {
            url: format!("{PUBLIC_PREFIX}/{file_name}"),
            disk_path,
        })
    }

    /// Remove files whose owning record was never written.
    pub(crate) async fn discard(&self, uploads: &[StoredUpload]) {
        for upload in uploads {
            if let Err(source) = fs::remove_file(&upload.disk_path).await {
                warn!(path = %upload.disk_path.display(), "failed to discard upload: {source}");
            }
        }
    }
}

fn accepted_extension(
    original_name: Option<&str>,
    content_type: Option<&str>,
) -> Result<&'static str, UploadError> {
    let extension = original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or(UploadError::UnsupportedType)?;

    let (_, extensions) = ALLOWED_TYPES
        .iter()
        .find(|(mime, _)| Some(*mime) == content_type)
        .ok_or(UploadError::UnsupportedType)?;

    extensions
        .iter()
        .copied()
        .find(|allowed| *allowed == extension)
        .ok_or(UploadError::UnsupportedType)
}

/// Lowercase alphanumerics with single dashes, falling back to `upload`.
fn slug(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());

    for c in label.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    let slug = slug.trim_end_matches('-');

    if slug.is_empty() {
        "upload".to_owned()
    } else {
        slug.to_owned()
    }
}
