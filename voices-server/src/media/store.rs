//! Filesystem store for post images.
//!
//! Uploads land in a single directory under generated names; reads only ever
//! see the basename of what the caller asked for, so a crafted path cannot
//! escape the uploads directory.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::domain::images::PUBLIC_UPLOAD_PREFIX;

const ALLOWED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

#[derive(Debug, Error)]
pub(crate) enum MediaError {
    #[error("Invalid file format. Only JPG, JPEG, PNG, and GIF are allowed.")]
    InvalidExtension,

    #[error("Invalid file type. Only JPG, JPEG, PNG, and GIF are allowed.")]
    InvalidMime,

    #[error("File size is too large. Maximum size is 5MB.")]
    TooLarge,

    #[error("Image not found")]
    NotFound,

    #[error("Invalid path")]
    InvalidPath,

    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub(crate) struct StoredImage {
    pub(crate) filename: String,
    pub(crate) public_path: String,
}

#[derive(Debug, Clone)]
pub(crate) struct MediaStore {
    root: PathBuf,
    max_bytes: usize,
}

impl MediaStore {
    pub(crate) fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    pub(crate) async fn ensure_root(&self) -> Result<(), MediaError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Validates and persists one uploaded image, returning its generated
    /// name and public path.
    pub(crate) async fn save(
        &self,
        original_name: &str,
        declared_mime: Option<&str>,
        data: &[u8],
    ) -> Result<StoredImage, MediaError> {
        let ext = extension_of(original_name).ok_or(MediaError::InvalidExtension)?;
        if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(MediaError::InvalidExtension);
        }

        // Browsers disagree on exact image MIME strings, so the declared type
        // only has to mention an allowed format.
        if let Some(mime) = declared_mime
            && !ALLOWED_EXTENSIONS.iter().any(|allowed| mime.contains(allowed))
        {
            return Err(MediaError::InvalidMime);
        }

        if data.len() > self.max_bytes {
            return Err(MediaError::TooLarge);
        }

        self.ensure_root().await?;

        let filename = format!("{}.{ext}", Uuid::new_v4().simple());
        let final_path = self.root.join(&filename);
        let tmp_path = self.root.join(format!("{filename}.tmp"));

        tokio::fs::write(&tmp_path, data).await?;
        tokio::fs::rename(&tmp_path, &final_path).await?;

        debug!(filename = %filename, bytes = data.len(), "stored uploaded image");

        Ok(StoredImage {
            public_path: format!("{PUBLIC_UPLOAD_PREFIX}/{filename}"),
            filename,
        })
    }

    /// Reads an image by (sanitized) filename, returning its bytes and the
    /// content type inferred from the extension.
    pub(crate) async fn open(&self, filename: &str) -> Result<(Vec<u8>, String), MediaError> {
        let name = sanitize_filename(filename).ok_or(MediaError::NotFound)?;
        let path = self.root.join(&name);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(MediaError::NotFound);
            }
            Err(err) => return Err(err.into()),
        };

        let content_type = mime_guess::from_path(&name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok((bytes, content_type))
    }

    /// Proxy form: accepts a relative path but only into the uploads area,
    /// then serves by basename.
    pub(crate) async fn open_proxied(&self, path: &str) -> Result<(Vec<u8>, String), MediaError> {
        if !path.contains("uploads") {
            return Err(MediaError::InvalidPath);
        }
        self.open(path).await
    }
}

fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
}

/// Keeps only the final path component; rejects names that would not address
/// a regular file.
fn sanitize_filename(raw: &str) -> Option<String> {
    let name = Path::new(raw.trim())
        .file_name()
        .and_then(|name| name.to_str())?;
    if name.is_empty() || name == "." || name == ".." {
        return None;
    }
    Some(name.to_string())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::{MediaError, MediaStore, sanitize_filename};

    const MAX: usize = 5 * 1024 * 1024;

    #[tokio::test]
    async fn save_stores_file_under_generated_name() {
        let dir = tempdir().expect("tempdir must be created");
        let store = MediaStore::new(dir.path(), MAX);

        let stored = store
            .save("photo.PNG", Some("image/png"), b"not-really-a-png")
            .await
            .expect("save must succeed");

        assert!(stored.filename.ends_with(".png"));
        assert_eq!(
            stored.public_path,
            format!("/api/uploads/posts/{}", stored.filename)
        );
        assert!(dir.path().join(&stored.filename).exists());
    }

    #[tokio::test]
    async fn save_rejects_disallowed_extension() {
        let dir = tempdir().expect("tempdir must be created");
        let store = MediaStore::new(dir.path(), MAX);

        let err = store
            .save("script.php", Some("image/png"), b"x")
            .await
            .expect_err("save must fail");
        assert!(matches!(err, MediaError::InvalidExtension));
    }

    #[tokio::test]
    async fn save_rejects_non_image_mime() {
        let dir = tempdir().expect("tempdir must be created");
        let store = MediaStore::new(dir.path(), MAX);

        let err = store
            .save("photo.png", Some("text/html"), b"x")
            .await
            .expect_err("save must fail");
        assert!(matches!(err, MediaError::InvalidMime));
    }

    #[tokio::test]
    async fn save_accepts_missing_declared_mime() {
        let dir = tempdir().expect("tempdir must be created");
        let store = MediaStore::new(dir.path(), MAX);

        store
            .save("photo.jpg", None, b"x")
            .await
            .expect("save must succeed");
    }

    #[tokio::test]
    async fn save_enforces_size_ceiling() {
        let dir = tempdir().expect("tempdir must be created");
        let store = MediaStore::new(dir.path(), 8);

        let err = store
            .save("photo.png", Some("image/png"), b"123456789")
            .await
            .expect_err("save must fail");
        assert!(matches!(err, MediaError::TooLarge));
    }

    #[tokio::test]
    async fn open_serves_stored_bytes_with_content_type() {
        let dir = tempdir().expect("tempdir must be created");
        let store = MediaStore::new(dir.path(), MAX);

        let stored = store
            .save("photo.gif", Some("image/gif"), b"GIF89a")
            .await
            .expect("save must succeed");

        let (bytes, content_type) = store
            .open(&stored.filename)
            .await
            .expect("open must succeed");
        assert_eq!(bytes, b"GIF89a");
        assert_eq!(content_type, "image/gif");
    }

    #[tokio::test]
    async fn open_neutralizes_path_traversal() {
        let dir = tempdir().expect("tempdir must be created");
        let store = MediaStore::new(dir.path(), MAX);

        let err = store
            .open("../../etc/passwd")
            .await
            .expect_err("open must fail");
        assert!(matches!(err, MediaError::NotFound));
    }

    #[tokio::test]
    async fn proxied_open_requires_uploads_in_path() {
        let dir = tempdir().expect("tempdir must be created");
        let store = MediaStore::new(dir.path(), MAX);

        let err = store
            .open_proxied("somewhere/else/photo.png")
            .await
            .expect_err("open must fail");
        assert!(matches!(err, MediaError::InvalidPath));

        let stored = store
            .save("photo.png", Some("image/png"), b"x")
            .await
            .expect("save must succeed");
        store
            .open_proxied(&format!("uploads/posts/{}", stored.filename))
            .await
            .expect("open must succeed");
    }

    #[test]
    fn sanitize_keeps_only_the_basename() {
        assert_eq!(
            sanitize_filename("uploads/posts/a.png").as_deref(),
            Some("a.png")
        );
        assert_eq!(sanitize_filename("../a.png").as_deref(), Some("a.png"));
        assert_eq!(sanitize_filename(".."), None);
        assert_eq!(sanitize_filename(""), None);
    }
}
