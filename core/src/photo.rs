// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::io::AsyncReadExt;

use crate::error::Error;

/// Largest accepted event photo, in bytes.
pub const MAX_PHOTO_SIZE: u64 = 5 * 1024 * 1024;

pub const PHOTO_TYPE_ERROR: &str = "Please upload a JPG, PNG, or GIF file.";
pub const PHOTO_SIZE_ERROR: &str = "File size must be less than 5MB.";

/// Metadata of the uploaded event photo. The image bytes stay on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPhoto {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
}

impl EventPhoto {
    /// Checks the type and size of an upload.
    pub fn new(name: impl ToString, mime_type: &str, size: u64) -> Result<Self, Error> {
        if !matches!(mime_type, "image/jpeg" | "image/png" | "image/gif") {
            return Err(Error::Photo(PHOTO_TYPE_ERROR.to_string()));
        }
        if size > MAX_PHOTO_SIZE {
            return Err(Error::Photo(PHOTO_SIZE_ERROR.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            size,
        })
    }

    /// Inspects a file on disk, sniffing its image type from the leading bytes.
    #[tracing::instrument]
    pub async fn from_path(path: &Path) -> Result<Self, Error> {
        let io_err = |source| Error::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = tokio::fs::File::open(path).await.map_err(io_err)?;
        let size = file.metadata().await.map_err(io_err)?.len();
        let mut head = [0u8; 8];
        let n = file.read(&mut head).await.map_err(io_err)?;

        let name = path
            .file_name()
            .map(|a| a.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime_type = sniff_mime(&head[..n]).unwrap_or("application/octet-stream");
        tracing::debug!(name = %name, mime_type, size, "inspected event photo");
        Self::new(name, mime_type, size)
    }
}

fn sniff_mime(head: &[u8]) -> Option<&'static str> {
    if head.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if head.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some("image/png")
    } else if head.starts_with(b"GIF87a") || head.starts_with(b"GIF89a") {
        Some("image/gif")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_supported_images() {
        let photo = EventPhoto::new("poster.png", "image/png", 1024).unwrap();
        assert_eq!(photo.mime_type, "image/png");
        assert!(EventPhoto::new("a.gif", "image/gif", MAX_PHOTO_SIZE).is_ok());
    }

    #[test]
    fn rejects_other_types() {
        let err = EventPhoto::new("poster.webp", "image/webp", 10).unwrap_err();
        assert_eq!(err.to_string(), PHOTO_TYPE_ERROR);
    }

    #[test]
    fn rejects_large_files() {
        let err = EventPhoto::new("poster.jpg", "image/jpeg", MAX_PHOTO_SIZE + 1).unwrap_err();
        assert_eq!(err.to_string(), PHOTO_SIZE_ERROR);
    }

    #[tokio::test]
    async fn sniffs_files_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let gif = dir.path().join("banner.gif");
        std::fs::write(&gif, b"GIF89a\x01\x00\x01\x00").unwrap();
        let text = dir.path().join("notes.png");
        std::fs::write(&text, b"hello").unwrap();

        let photo = EventPhoto::from_path(&gif).await.unwrap();
        assert_eq!(photo.name, "banner.gif");
        assert_eq!(photo.mime_type, "image/gif");
        assert_eq!(photo.size, 10);

        assert!(EventPhoto::from_path(&text).await.is_err());
    }
}
