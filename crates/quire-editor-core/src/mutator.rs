//! Document mutations for media blocks.
//!
//! Every function takes the focused document as `Option<&mut Document>`.
//! With no focused document the call does nothing and returns false. A blank
//! `src` is refused the same way, so no media block ever has an empty source.

use quire_common::MediaKind;
use smol_str::SmolStr;

use crate::document::Document;
use crate::node::{ImageNode, MediaNode, Node, VideoNode};

/// Set an image at the focus: a selected block is replaced, a caret inserts.
pub fn set_image(doc: Option<&mut Document>, src: &str, caption: Option<&str>) -> bool {
    let Some((doc, src)) = focus(doc, src) else {
        return false;
    };
    let index = doc.replace_selection(Node::Image(ImageNode {
        src,
        alt: caption.map(SmolStr::new),
    }));
    tracing::debug!(index, "image set");
    true
}

/// Insert a video at the focus, after a selected block or at the caret.
pub fn insert_video_node(doc: Option<&mut Document>, src: &str, caption: Option<&str>) -> bool {
    let Some((doc, src)) = focus(doc, src) else {
        return false;
    };
    let index = doc.insert_at_focus(Node::Video(VideoNode {
        src,
        title: caption.map(SmolStr::new),
    }));
    tracing::debug!(index, "video inserted");
    true
}

/// Insert `media` with the rule for its kind.
pub fn insert_media(doc: Option<&mut Document>, media: &MediaNode) -> bool {
    let caption = media.caption.as_deref();
    match media.kind {
        MediaKind::Image => set_image(doc, &media.src, caption),
        MediaKind::Video => insert_video_node(doc, &media.src, caption),
    }
}

fn focus<'d>(doc: Option<&'d mut Document>, src: &str) -> Option<(&'d mut Document, SmolStr)> {
    let Some(doc) = doc else {
        tracing::debug!("no focused document, skipping insertion");
        return None;
    };
    if src.trim().is_empty() {
        tracing::debug!("blank media src, skipping insertion");
        return None;
    }
    Some((doc, SmolStr::new(src)))
}
