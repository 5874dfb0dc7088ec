//! Document nodes.
//!
//! Blocks are a closed set of variants rather than a generic attribute map.
//! `Image` and `Video` are atomic: they have no children and move as a unit.

use quire_common::MediaKind;
use smol_str::SmolStr;

/// Inline formatting marks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Marks {
    pub bold: bool,
    pub italic: bool,
}

impl Marks {
    pub const NONE: Marks = Marks {
        bold: false,
        italic: false,
    };

    pub fn with_bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub fn with_italic(self) -> Self {
        Self {
            italic: true,
            ..self
        }
    }
}

/// A run of text sharing one set of marks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inline {
    pub text: String,
    pub marks: Marks,
}

impl Inline {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Marks::NONE,
        }
    }

    pub fn marked(text: impl Into<String>, marks: Marks) -> Self {
        Self {
            text: text.into(),
            marks,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageNode {
    pub src: SmolStr,
    /// Alt text.
    pub alt: Option<SmolStr>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoNode {
    pub src: SmolStr,
    pub title: Option<SmolStr>,
}

/// A top-level document block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Paragraph(Vec<Inline>),
    Heading { level: u8, content: Vec<Inline> },
    Image(ImageNode),
    Video(VideoNode),
}

impl Node {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph(vec![Inline::plain(text)])
    }

    /// Heading with its level clamped to `1..=6`.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::Heading {
            level: level.clamp(1, 6),
            content: vec![Inline::plain(text)],
        }
    }

    pub fn image(src: impl Into<SmolStr>, alt: Option<&str>) -> Self {
        Self::Image(ImageNode {
            src: src.into(),
            alt: alt.map(SmolStr::new),
        })
    }

    pub fn video(src: impl Into<SmolStr>, title: Option<&str>) -> Self {
        Self::Video(VideoNode {
            src: src.into(),
            title: title.map(SmolStr::new),
        })
    }

    /// Atomic blocks have no editable content.
    pub fn is_atom(&self) -> bool {
        matches!(self, Self::Image(_) | Self::Video(_))
    }

    /// Atomic blocks can be dragged to a new position.
    pub fn is_draggable(&self) -> bool {
        self.is_atom()
    }

    pub fn as_media(&self) -> Option<MediaNode> {
        match self {
            Self::Image(image) => Some(MediaNode {
                kind: MediaKind::Image,
                src: image.src.clone(),
                caption: image.alt.clone(),
            }),
            Self::Video(video) => Some(MediaNode {
                kind: MediaKind::Video,
                src: video.src.clone(),
                caption: video.title.clone(),
            }),
            Self::Paragraph(_) | Self::Heading { .. } => None,
        }
    }

    /// Concatenated text of a text block; empty for media.
    pub fn text(&self) -> String {
        match self {
            Self::Paragraph(content) | Self::Heading { content, .. } => {
                content.iter().map(|inline| inline.text.as_str()).collect()
            }
            Self::Image(_) | Self::Video(_) => String::new(),
        }
    }
}

/// Kind-agnostic view of a media block.
///
/// `caption` is the image's alt text or the video's title.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaNode {
    pub kind: MediaKind,
    pub src: SmolStr,
    pub caption: Option<SmolStr>,
}

impl MediaNode {
    pub fn new(kind: MediaKind, src: impl Into<SmolStr>, caption: Option<&str>) -> Self {
        Self {
            kind,
            src: src.into(),
            caption: caption.map(SmolStr::new),
        }
    }
}

impl From<MediaNode> for Node {
    fn from(media: MediaNode) -> Self {
        match media.kind {
            MediaKind::Image => Node::Image(ImageNode {
                src: media.src,
                alt: media.caption,
            }),
            MediaKind::Video => Node::Video(VideoNode {
                src: media.src,
                title: media.caption,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_view_round_trips() {
        let media = MediaNode::new(MediaKind::Video, "/u/1.mp4", Some("demo"));
        let node = Node::from(media.clone());
        assert_eq!(node, Node::video("/u/1.mp4", Some("demo")));
        assert_eq!(node.as_media(), Some(media));
    }

    #[test]
    fn only_media_is_atomic() {
        assert!(Node::image("a.png", None).is_atom());
        assert!(Node::video("a.mp4", None).is_draggable());
        assert!(!Node::paragraph("hi").is_atom());
        assert_eq!(Node::paragraph("hi").as_media(), None);
    }

    #[test]
    fn heading_level_is_clamped() {
        assert_eq!(
            Node::heading(9, "x"),
            Node::Heading {
                level: 6,
                content: vec![Inline::plain("x")]
            }
        );
    }
}
