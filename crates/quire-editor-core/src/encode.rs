//! Inline fallback for media that has no remote URL.

use base64::{Engine, engine::general_purpose::STANDARD};
use quire_common::media::resolve_mime;
use quire_common::{MediaFile, MediaKind};

#[derive(thiserror::Error, Debug)]
#[error("failed to read {name}: {source}")]
pub struct EncodeError {
    pub name: String,
    #[source]
    pub source: std::io::Error,
}

/// `data:{mime};base64,{payload}`
pub fn data_uri(mime: &str, data: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(data))
}

/// A file encoded as a data URI, with the kind of the MIME type it carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineData {
    pub kind: Option<MediaKind>,
    pub uri: String,
}

/// Read `file` and encode it as a self-contained data URI.
///
/// Uses the declared MIME type, falling back to sniffing the bytes. `kind`
/// is classified from that same type.
pub async fn encode_inline<F: MediaFile>(file: &F) -> Result<InlineData, EncodeError> {
    let data = file.read_bytes().await.map_err(|source| EncodeError {
        name: file.name().to_owned(),
        source,
    })?;
    let mime = resolve_mime(file.mime_type(), &data);
    Ok(InlineData {
        kind: MediaKind::from_mime(mime),
        uri: data_uri(mime, &data),
    })
}

pub async fn read_as_data_uri<F: MediaFile>(file: &F) -> Result<String, EncodeError> {
    encode_inline(file).await.map(|inline| inline.uri)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_common::MemoryFile;

    #[test]
    fn encodes_payload() {
        assert_eq!(data_uri("video/mp4", &[0, 0]), "data:video/mp4;base64,AAA=");
        assert_eq!(data_uri("text/plain", b""), "data:text/plain;base64,");
    }

    #[tokio::test]
    async fn uses_declared_type() {
        let file = MemoryFile::new("clip.mp4", Some("video/mp4"), &b"hi"[..]);
        assert_eq!(
            read_as_data_uri(&file).await.unwrap(),
            "data:video/mp4;base64,aGk="
        );
    }

    #[tokio::test]
    async fn sniffs_undeclared_type() {
        let file = MemoryFile::new("pasted", None, &b"GIF89a\x01\x00\x01\x00"[..]);
        let uri = read_as_data_uri(&file).await.unwrap();
        assert!(uri.starts_with("data:image/gif;base64,"), "{uri}");
    }

    #[tokio::test]
    async fn kind_matches_encoded_type() {
        let file = MemoryFile::new("paste", None, &b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR"[..]);
        let inline = encode_inline(&file).await.unwrap();
        assert_eq!(inline.kind, Some(MediaKind::Image));
        assert!(inline.uri.starts_with("data:image/png;base64,"));

        let file = MemoryFile::new("notes.txt", Some("text/plain"), &b"hi"[..]);
        assert_eq!(encode_inline(&file).await.unwrap().kind, None);
    }
}
