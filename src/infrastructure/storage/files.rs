use std::path::{Component, Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

use crate::errors::AppError;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];
const DOCUMENT_EXTENSIONS: &[&str] = &["pdf"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Document,
}

impl FileKind {
    fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            FileKind::Image => IMAGE_EXTENSIONS,
            FileKind::Document => DOCUMENT_EXTENSIONS,
        }
    }
}

/// Stores uploaded assets on disk under a single root, namespaced by the
/// owning entity (`projects/{id}/images/...`, `blogs/{id}/pdfs/...`,
/// `users/{id}/avatar/...`). Stored names are generated, never caller
/// supplied.
#[derive(Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        FileStore { root }
    }

    /// Validates the payload against the allow-list for `kind` and writes it
    /// under `scope`. Returns the stored path relative to the upload root.
    pub async fn save(
        &self,
        scope: &str,
        original_name: &str,
        kind: FileKind,
        bytes: &[u8],
    ) -> Result<String, AppError> {
        let extension = extension_of(original_name).ok_or_else(|| {
            AppError::BadRequest("File must have an extension".into())
        })?;

        if !kind.allowed_extensions().contains(&extension.as_str()) {
            return Err(AppError::BadRequest(format!(
                "File type .{} is not allowed here",
                extension
            )));
        }

        // Sniff the content when recognizable; a .png that is really an
        // executable must not land on disk.
        if let Some(detected) = infer::get(bytes) {
            let sniffed = detected.extension();
            let equivalent = sniffed == extension || (sniffed == "jpg" && extension == "jpeg");
            if !equivalent {
                return Err(AppError::BadRequest(format!(
                    "File content does not match its .{} extension",
                    extension
                )));
            }
        }

        let stored_name = format!("{}.{}", Uuid::new_v4(), extension);
        let relative = format!("{}/{}", scope.trim_matches('/'), stored_name);

        let full_path = self.root.join(&relative);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&full_path, bytes).await?;

        Ok(relative)
    }

    /// Resolves a stored relative path for serving. Anything that would
    /// escape the upload root is treated as absent.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf, AppError> {
        let candidate = Path::new(relative);
        let escapes = candidate.components().any(|c| {
            !matches!(c, Component::Normal(_))
        });
        if relative.is_empty() || escapes {
            return Err(AppError::NotFound("File not found".into()));
        }
        Ok(self.root.join(candidate))
    }
}

fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Content type for serving, keyed by stored extension.
pub fn content_type_for(path: &str) -> &'static str {
    match extension_of(path).as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(extension_of("Photo.PNG").as_deref(), Some("png"));
        assert_eq!(extension_of("noext"), None);
    }

    #[test]
    fn traversal_paths_are_rejected() {
        let store = FileStore::new(PathBuf::from("/tmp/uploads"));
        assert!(store.resolve("../etc/passwd").is_err());
        assert!(store.resolve("/etc/passwd").is_err());
        assert!(store.resolve("").is_err());
        assert!(store.resolve("projects/1/images/a.png").is_ok());
    }

    #[test]
    fn content_types_match_extensions() {
        assert_eq!(content_type_for("a/b/c.pdf"), "application/pdf");
        assert_eq!(content_type_for("x.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("x.bin"), "application/octet-stream");
    }
}
