//! Upload boundary: turns a file or byte buffer into an artifact reference
//! and applies the `image/*` filter.
//!
//! The bytes are held only so the caller owns a real artifact; nothing in
//! the crate inspects them.

use crate::error::{AuditError, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

const FALLBACK_MIME: &str = "application/octet-stream";

const EXTENSION_MIME: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("svg", "image/svg+xml"),
    ("avif", "image/avif"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
];

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
/// What the rest of the system knows about an accepted upload.
pub struct ArtifactRef {
    pub name: String,
    pub mime: String,
    pub size: usize,
}

#[derive(Debug, Clone)]
pub struct Upload {
    name: String,
    mime: String,
    bytes: Vec<u8>,
}

impl Upload {
    pub fn from_bytes(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Upload {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Read `path` from disk. Without `declared_mime` the type is guessed
    /// from the file extension.
    pub fn from_path(path: &Path, declared_mime: Option<&str>) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| AuditError::Io {
            path: path.to_string_lossy().to_string(),
            source,
        })?;
        let mime = declared_mime
            .map(str::to_string)
            .unwrap_or_else(|| mime_from_extension(path).to_string());
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Ok(Upload { name, mime, bytes })
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn is_image(&self) -> bool {
        is_image_mime(&self.mime)
    }

    pub fn artifact(&self) -> ArtifactRef {
        ArtifactRef {
            name: self.name.clone(),
            mime: self.mime.clone(),
            size: self.bytes.len(),
        }
    }
}

/// True when the declared type starts with `image/`.
pub fn is_image_mime(mime: &str) -> bool {
    mime.get(..6).is_some_and(|p| p.eq_ignore_ascii_case("image/"))
}

pub fn mime_from_extension(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return FALLBACK_MIME;
    };
    EXTENSION_MIME
        .iter()
        .find(|(e, _)| e.eq_ignore_ascii_case(ext))
        .map(|(_, m)| *m)
        .unwrap_or(FALLBACK_MIME)
}
