use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// Filesystem store for uploaded listing images.
///
/// Files are written under a fixed root directory with generated names and
/// referenced from listings by a relative `/uploads/<name>` path. Stored files
/// are never garbage collected; deleting a listing leaves its image behind.
#[derive(Clone)]
pub struct UploadStore {
    root: Arc<PathBuf>,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> std::io::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self {
            root: Arc::new(root),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes one uploaded file and returns the relative path that gets
    /// persisted on the listing. Any byte stream is accepted as-is.
    pub async fn store(&self, original_name: &str, bytes: &[u8]) -> std::io::Result<String> {
        let file_name = generate_file_name(original_name);
        tokio::fs::write(self.root.join(&file_name), bytes).await?;
        Ok(format!("/uploads/{file_name}"))
    }

    /// Best-effort removal of a stored upload, used to compensate when the row
    /// insert fails after the file was already written.
    pub async fn remove(&self, relative_path: &str) {
        let Some(file_name) = relative_path
            .strip_prefix("/uploads/")
            .map(Path::new)
            .and_then(Path::file_name)
        else {
            return;
        };

        if let Err(err) = tokio::fs::remove_file(self.root.join(file_name)).await {
            warn!(path = %relative_path, error = %err, "Failed to remove orphaned upload");
        }
    }
}

/// Combines a millisecond timestamp with a random nine-digit suffix, keeping
/// the original extension. Collisions are astronomically unlikely.
fn generate_file_name(original_name: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix = Uuid::new_v4().as_u128() % 1_000_000_000;

    match Path::new(original_name).extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("image-{millis}-{suffix:09}.{ext}"),
        None => format!("image-{millis}-{suffix:09}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(s: &str) -> bool {
        !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
    }

    #[test]
    fn generated_name_has_timestamp_and_suffix() {
        let name = generate_file_name("photo.jpg");
        let stem = name.strip_suffix(".jpg").unwrap();
        let rest = stem.strip_prefix("image-").unwrap();
        let (millis, suffix) = rest.split_once('-').unwrap();
        assert!(digits(millis));
        assert!(digits(suffix));
        assert_eq!(suffix.len(), 9);
    }

    #[test]
    fn extension_is_optional() {
        let name = generate_file_name("photo");
        assert!(name.starts_with("image-"));
        assert!(!name.contains('.'));
    }

    #[tokio::test]
    async fn store_writes_file_and_returns_relative_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().join("uploads")).unwrap();

        let path = store.store("cat.png", b"not actually a png").await.unwrap();
        assert!(path.starts_with("/uploads/image-"));
        assert!(path.ends_with(".png"));

        let on_disk = store.root().join(path.strip_prefix("/uploads/").unwrap());
        assert_eq!(std::fs::read(on_disk).unwrap(), b"not actually a png");
    }

    #[tokio::test]
    async fn remove_deletes_stored_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path()).unwrap();

        let path = store.store("doc.pdf", b"bytes").await.unwrap();
        store.remove(&path).await;

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn remove_ignores_paths_outside_the_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path()).unwrap();
        store.remove("/etc/passwd").await;
        store.remove("relative.png").await;
    }
}
