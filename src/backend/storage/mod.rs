//! Blob Storage
//!
//! Uploaded files (verification documents, profile images, post videos,
//! résumés) are written to `<upload_dir>/<folder>/<uuid>.<ext>` and served
//! back under `/uploads`. Handlers validate type and size before storing.
//!
//! The extension comes from the validated MIME type, never from the client's
//! file name, since the static file service picks the response content type
//! from it. Types outside the known media list are stored without one.

mod form;

pub use form::{FormData, UploadedFile};

use std::path::{Path, PathBuf};

use uuid::Uuid;

/// URL prefix the upload directory is served under
pub const UPLOADS_ROUTE: &str = "/uploads";

/// Filesystem-backed blob store
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
    base_url: String,
}

impl MediaStore {
    pub fn new(root: impl AsRef<Path>, base_url: &str) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Directory served at [`UPLOADS_ROUTE`]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `bytes` into `folder` and return the public URL
    ///
    /// The stored name is a fresh UUID with the extension of `mime`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the folder cannot be created or
    /// the file cannot be written.
    pub async fn store(&self, folder: &str, mime: &str, bytes: &[u8]) -> std::io::Result<String> {
        let dir = self.root.join(folder);
        tokio::fs::create_dir_all(&dir).await?;

        let file_name = match extension_for_mime(mime) {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };

        tokio::fs::write(dir.join(&file_name), bytes).await?;
        tracing::debug!("Stored {} bytes as {}/{}", bytes.len(), folder, file_name);

        Ok(format!(
            "{}{}/{}/{}",
            self.base_url, UPLOADS_ROUTE, folder, file_name
        ))
    }

    /// Store an uploaded form file under the extension of its declared type
    pub async fn store_file(&self, folder: &str, file: &UploadedFile) -> std::io::Result<String> {
        self.store(folder, file.mime(), &file.bytes).await
    }
}

/// File extension for an accepted upload type
///
/// Scriptable types such as `text/html` or `image/svg+xml` have none, so
/// they are served as opaque bytes.
pub fn extension_for_mime(mime: &str) -> Option<&'static str> {
    let essence = mime.split(';').next().unwrap_or_default().trim();
    let ext = match essence.to_ascii_lowercase().as_str() {
        "video/mp4" => "mp4",
        "video/webm" => "webm",
        "video/ogg" => "ogv",
        "video/quicktime" => "mov",
        "video/x-matroska" => "mkv",
        "video/x-msvideo" => "avi",
        "video/mpeg" => "mpeg",
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/heic" => "heic",
        "application/pdf" => "pdf",
        "application/msword" => "doc",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => "docx",
        _ => return None,
    };
    Some(ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;

    #[test]
    fn test_extension_for_mime() {
        assert_eq!(extension_for_mime("video/mp4"), Some("mp4"));
        assert_eq!(extension_for_mime("Application/PDF"), Some("pdf"));
        assert_eq!(extension_for_mime("image/jpeg; charset=binary"), Some("jpg"));
        assert_eq!(extension_for_mime("image/svg+xml"), None);
        assert_eq!(extension_for_mime("text/html"), None);
    }

    #[tokio::test]
    async fn test_store_writes_file_and_returns_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path(), "http://localhost:5000/");

        let url = store
            .store("videos", "video/mp4", b"fake video")
            .await
            .unwrap();

        assert!(url.starts_with("http://localhost:5000/uploads/videos/"));
        assert!(url.ends_with(".mp4"));

        let file_name = url.rsplit('/').next().unwrap();
        let stored = tokio::fs::read(dir.path().join("videos").join(file_name))
            .await
            .unwrap();
        assert_eq!(stored, b"fake video");
    }

    #[tokio::test]
    async fn test_store_unknown_type_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path(), "");

        let url = store
            .store("documents", "application/octet-stream", b"data")
            .await
            .unwrap();
        assert!(url.starts_with("/uploads/documents/"));
        assert!(!url.rsplit('/').next().unwrap().contains('.'));
    }

    #[tokio::test]
    async fn test_store_file_ignores_client_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path(), "");

        let file = UploadedFile {
            file_name: Some("payload.html".to_string()),
            content_type: Some("video/mp4".to_string()),
            bytes: Bytes::from_static(b"<script>alert(1)</script>"),
        };
        let url = store.store_file("content", &file).await.unwrap();
        assert!(url.ends_with(".mp4"));
        assert!(!url.contains("html"));
    }
}
