//! Captured media files and their kinds.
//!
//! A `MediaFile` is whatever the hosting view handed us from a paste, drop or
//! file picker: a name, an optional declared MIME type, and bytes that can be
//! read asynchronously.

use std::future::Future;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use mime_sniffer::MimeTypeSniffer;

/// MIME type used when neither a declared type nor sniffing gives one.
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// The two kinds of media block the editor can embed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify a MIME type. Only `image/*` and `video/*` are media.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let mime = mime.trim().to_ascii_lowercase();
        if mime.starts_with("image/") {
            Some(Self::Image)
        } else if mime.starts_with("video/") {
            Some(Self::Video)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file captured from the user.
pub trait MediaFile {
    /// File name, used as the upload filename.
    fn name(&self) -> &str;

    /// Declared MIME type, if the source provided one.
    fn mime_type(&self) -> Option<&str>;

    /// Read the whole file.
    fn read_bytes(&self) -> impl Future<Output = std::io::Result<Bytes>>;

    /// Media kind derived from the declared MIME type.
    fn kind(&self) -> Option<MediaKind> {
        self.mime_type().and_then(MediaKind::from_mime)
    }
}

/// Resolve the MIME type for a file's content.
///
/// Prefers the declared type, then sniffs the bytes.
pub fn resolve_mime<'a>(declared: Option<&'a str>, data: &'a Bytes) -> &'a str {
    match declared.map(str::trim).filter(|m| !m.is_empty()) {
        Some(mime) => mime,
        None => data.sniff_mime_type().unwrap_or(FALLBACK_MIME),
    }
}

/// Media kind of the content, from the same MIME type `resolve_mime` picks.
pub fn resolve_kind(declared: Option<&str>, data: &Bytes) -> Option<MediaKind> {
    MediaKind::from_mime(resolve_mime(declared, data))
}

/// A file whose bytes are already in memory (clipboard items, dropped blobs).
#[derive(Clone, Debug)]
pub struct MemoryFile {
    name: String,
    mime_type: Option<String>,
    data: Bytes,
}

impl MemoryFile {
    pub fn new(name: impl Into<String>, mime_type: Option<&str>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.map(str::to_owned),
            data: data.into(),
        }
    }
}

impl MediaFile for MemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    async fn read_bytes(&self) -> std::io::Result<Bytes> {
        Ok(self.data.clone())
    }
}

/// A file on local disk, read lazily.
#[derive(Clone, Debug)]
pub struct DiskFile {
    path: PathBuf,
    name: String,
    mime_type: Option<String>,
}

impl DiskFile {
    pub fn new(path: impl AsRef<Path>, mime_type: Option<&str>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            name,
            mime_type: mime_type.map(str::to_owned),
        }
    }
}

impl MediaFile for DiskFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    async fn read_bytes(&self) -> std::io::Result<Bytes> {
        tokio::fs::read(&self.path).await.map(Bytes::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_mime_prefix() {
        assert_eq!(MediaKind::from_mime("image/png"), Some(MediaKind::Image));
        assert_eq!(MediaKind::from_mime("Video/MP4"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_mime("application/pdf"), None);
        assert_eq!(MediaKind::from_mime(""), None);
    }

    #[test]
    fn declared_mime_wins_over_sniffing() {
        let png = Bytes::from_static(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR");
        assert_eq!(resolve_mime(Some("image/x-custom"), &png), "image/x-custom");
        assert_eq!(resolve_mime(None, &png), "image/png");
        assert_eq!(resolve_mime(Some("  "), &png), "image/png");
    }

    #[test]
    fn kind_follows_sniffed_type_when_undeclared() {
        let png = Bytes::from_static(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR");
        assert_eq!(resolve_kind(None, &png), Some(MediaKind::Image));
        assert_eq!(resolve_kind(Some("video/mp4"), &png), Some(MediaKind::Video));
        assert_eq!(resolve_kind(None, &Bytes::from_static(&[0, 1, 2, 3])), None);
    }

    #[test]
    fn unknown_bytes_fall_back_to_octet_stream() {
        let data = Bytes::from_static(&[0x00, 0x01, 0x02, 0x03]);
        assert_eq!(resolve_mime(None, &data), FALLBACK_MIME);
    }

    #[tokio::test]
    async fn disk_file_reads_lazily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        std::fs::write(&path, b"frames").unwrap();

        let file = DiskFile::new(&path, Some("video/mp4"));
        assert_eq!(file.name(), "clip.mp4");
        assert_eq!(file.kind(), Some(MediaKind::Video));
        assert_eq!(file.read_bytes().await.unwrap(), Bytes::from_static(b"frames"));
    }

    #[tokio::test]
    async fn missing_disk_file_is_an_io_error() {
        let file = DiskFile::new("/definitely/not/here.png", Some("image/png"));
        assert!(file.read_bytes().await.is_err());
    }
}
