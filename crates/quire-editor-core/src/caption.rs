//! Caption capture for media that fell back to inline data.
//!
//! One slot: while a caption is pending, another pending media is rejected
//! rather than queued. Confirming or cancelling always returns to `Idle` in a
//! single state replacement.

use quire_common::MediaKind;
use smol_str::SmolStr;

use crate::document::Document;
use crate::mutator;
use crate::node::MediaNode;

/// Media waiting for a caption before it is committed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingMedia {
    pub kind: MediaKind,
    pub src: SmolStr,
}

impl PendingMedia {
    pub fn new(kind: MediaKind, src: impl Into<SmolStr>) -> Self {
        Self {
            kind,
            src: src.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CaptionState {
    #[default]
    Idle,
    AwaitingCaption {
        pending: PendingMedia,
        caption_text: String,
    },
}

#[derive(Clone, Debug, Default)]
pub struct CaptionCapture {
    state: CaptionState,
}

impl CaptionCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CaptionState {
        &self.state
    }

    /// Whether the caption prompt should be showing.
    pub fn is_open(&self) -> bool {
        matches!(self.state, CaptionState::AwaitingCaption { .. })
    }

    pub fn pending(&self) -> Option<&PendingMedia> {
        match &self.state {
            CaptionState::AwaitingCaption { pending, .. } => Some(pending),
            CaptionState::Idle => None,
        }
    }

    /// Current caption text; empty while idle.
    pub fn caption_text(&self) -> &str {
        match &self.state {
            CaptionState::AwaitingCaption { caption_text, .. } => caption_text,
            CaptionState::Idle => "",
        }
    }

    /// Start awaiting a caption for `pending`.
    ///
    /// If a caption is already pending, `pending` is handed back untouched.
    pub fn open(&mut self, pending: PendingMedia) -> Result<(), PendingMedia> {
        if self.is_open() {
            return Err(pending);
        }
        self.state = CaptionState::AwaitingCaption {
            pending,
            caption_text: String::new(),
        };
        Ok(())
    }

    /// Replace the caption text. Ignored while idle.
    pub fn set_caption_text(&mut self, text: impl Into<String>) -> bool {
        match &mut self.state {
            CaptionState::AwaitingCaption { caption_text, .. } => {
                *caption_text = text.into();
                true
            }
            CaptionState::Idle => false,
        }
    }

    /// Commit the pending media with its caption (if non-empty) and return to idle.
    ///
    /// Returns whether a node was inserted. Without a pending media this does
    /// nothing; without a focused document the state still resets.
    pub fn confirm(&mut self, doc: Option<&mut Document>) -> bool {
        let CaptionState::AwaitingCaption {
            pending,
            caption_text,
        } = std::mem::take(&mut self.state)
        else {
            return false;
        };
        let caption = Some(caption_text.as_str()).filter(|text| !text.is_empty());
        mutator::insert_media(doc, &MediaNode::new(pending.kind, pending.src, caption))
    }

    /// Drop the pending media without inserting anything.
    pub fn cancel(&mut self) -> Option<PendingMedia> {
        match std::mem::take(&mut self.state) {
            CaptionState::AwaitingCaption { pending, .. } => Some(pending),
            CaptionState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    fn pending_video() -> PendingMedia {
        PendingMedia::new(MediaKind::Video, "data:video/mp4;base64,AAA")
    }

    #[test]
    fn starts_idle() {
        let capture = CaptionCapture::new();
        assert!(!capture.is_open());
        assert_eq!(capture.pending(), None);
        assert_eq!(capture.caption_text(), "");
    }

    #[test]
    fn confirm_inserts_with_caption_and_resets() {
        let mut capture = CaptionCapture::new();
        let mut doc = Document::new();
        capture.open(pending_video()).unwrap();
        assert!(capture.set_caption_text("demo"));
        assert_eq!(capture.caption_text(), "demo");

        assert!(capture.confirm(Some(&mut doc)));
        assert_eq!(doc.blocks(), [Node::video("data:video/mp4;base64,AAA", Some("demo"))]);
        assert_eq!(capture.state(), &CaptionState::Idle);
    }

    #[test]
    fn empty_caption_is_omitted() {
        let mut capture = CaptionCapture::new();
        let mut doc = Document::new();
        capture
            .open(PendingMedia::new(MediaKind::Image, "data:image/png;base64,AA=="))
            .unwrap();
        capture.confirm(Some(&mut doc));
        assert_eq!(doc.blocks(), [Node::image("data:image/png;base64,AA==", None)]);
    }

    #[test]
    fn cancel_resets_without_inserting() {
        let mut capture = CaptionCapture::new();
        capture.open(pending_video()).unwrap();
        capture.set_caption_text("never mind");
        assert_eq!(capture.cancel(), Some(pending_video()));
        assert_eq!(capture.state(), &CaptionState::Idle);
        assert_eq!(capture.cancel(), None);
    }

    #[test]
    fn second_open_is_rejected() {
        let mut capture = CaptionCapture::new();
        capture.open(pending_video()).unwrap();
        let other = PendingMedia::new(MediaKind::Image, "data:image/png;base64,AA==");
        assert_eq!(capture.open(other.clone()), Err(other));
        assert_eq!(capture.pending(), Some(&pending_video()));
    }

    #[test]
    fn idle_confirm_and_caption_are_no_ops() {
        let mut capture = CaptionCapture::new();
        let mut doc = Document::new();
        assert!(!capture.set_caption_text("x"));
        assert!(!capture.confirm(Some(&mut doc)));
        assert!(doc.is_empty());
    }

    #[test]
    fn confirm_without_document_still_resets() {
        let mut capture = CaptionCapture::new();
        capture.open(pending_video()).unwrap();
        assert!(!capture.confirm(None));
        assert!(!capture.is_open());
    }
}
