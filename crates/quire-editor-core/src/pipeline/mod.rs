//! Media capture pipeline.
//!
//! Turns paste, drop and file-pick events into document mutations:
//!
//! - paste: every file item, in clipboard order, one after another
//! - drop: the first file only
//! - pick: straight to inline data and into the document, no upload, no caption
//!
//! Paste and drop try the store first. A stored file goes in with its URL and
//! no caption step; otherwise the file is inlined and waits in
//! [`CaptionCapture`] for a caption.

use quire_common::media::resolve_kind;
use quire_common::{MediaFile, MediaKind, MediaStore, UploadResult};

use crate::caption::{CaptionCapture, PendingMedia};
use crate::document::Document;
use crate::embed::normalize_video_url;
use crate::encode::{encode_inline, read_as_data_uri};
use crate::mutator;
use crate::node::MediaNode;


/// An item from a paste event's clipboard data.
#[derive(Clone, Debug)]
pub enum ClipboardItem<F> {
    File(F),
    /// Non-file data; left to the default paste behaviour.
    Text(String),
}

/// What the hosting view should do with the original event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventDisposition {
    pub prevent_default: bool,
}

impl EventDisposition {
    pub const PREVENT: Self = Self {
        prevent_default: true,
    };
    pub const PASS: Self = Self {
        prevent_default: false,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Uploaded, but the file is neither an image nor a video.
    NotMedia,
    /// Nothing to insert into.
    NoDocument,
    /// The file could not be read for inline encoding.
    ReadFailed,
    /// Another media is already waiting for its caption.
    CaptionBusy,
    /// Insert-by-URL with nothing typed.
    EmptyUrl,
}

/// Result of handling one file or URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Stored remotely and inserted with the returned URL.
    Uploaded(MediaKind),
    /// Inserted directly, from inline data or a typed URL.
    Inserted(MediaKind),
    /// Inlined and waiting in caption capture.
    AwaitingCaption(MediaKind),
    Skipped(SkipReason),
}

/// What a paste or drop did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaptureReport {
    pub disposition: EventDisposition,
    /// One entry per file handled, in order.
    pub outcomes: Vec<CaptureOutcome>,
}

/// Drives capture events for one editor.
pub struct MediaPipeline<S> {
    store: S,
    caption: CaptionCapture,
}

impl<S: MediaStore> MediaPipeline<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            caption: CaptionCapture::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn caption(&self) -> &CaptionCapture {
        &self.caption
    }

    /// Handle a paste: each file item goes through upload-then-fallback, in order.
    ///
    /// Default paste is suppressed as soon as one file item is present.
    pub async fn handle_paste<F, I>(
        &mut self,
        mut doc: Option<&mut Document>,
        items: I,
    ) -> CaptureReport
    where
        F: MediaFile,
        I: IntoIterator<Item = ClipboardItem<F>>,
    {
        let mut report = CaptureReport::default();
        for item in items {
            let ClipboardItem::File(file) = item else {
                continue;
            };
            report.disposition = EventDisposition::PREVENT;
            let outcome = self.handle_captured_file(doc.as_deref_mut(), &file).await;
            report.outcomes.push(outcome);
        }
        report
    }

    /// Handle a drop. Only the first file is processed.
    pub async fn handle_drop<F, I>(
        &mut self,
        doc: Option<&mut Document>,
        files: I,
    ) -> CaptureReport
    where
        F: MediaFile,
        I: IntoIterator<Item = F>,
    {
        let mut files = files.into_iter();
        let mut report = CaptureReport {
            disposition: EventDisposition::PREVENT,
            outcomes: Vec::new(),
        };
        if let Some(file) = files.next() {
            report.outcomes.push(self.handle_captured_file(doc, &file).await);
        }
        let discarded = files.count();
        if discarded > 0 {
            tracing::debug!(discarded, "ignoring extra dropped files");
        }
        report
    }

    /// Drag-over must be suppressed for drop to fire.
    pub fn handle_drag_over(&self) -> EventDisposition {
        EventDisposition::PREVENT
    }

    /// Upload, and on failure inline the file and wait for a caption.
    pub async fn handle_captured_file<F: MediaFile>(
        &mut self,
        doc: Option<&mut Document>,
        file: &F,
    ) -> CaptureOutcome {
        if let UploadResult::Success(url) = self.store.upload(file).await {
            let Some(kind) = content_kind(file).await else {
                tracing::debug!(
                    file = file.name(),
                    "uploaded file is not media, nothing inserted"
                );
                return CaptureOutcome::Skipped(SkipReason::NotMedia);
            };
            return if mutator::insert_media(doc, &MediaNode::new(kind, url.as_str(), None)) {
                CaptureOutcome::Uploaded(kind)
            } else {
                CaptureOutcome::Skipped(SkipReason::NoDocument)
            };
        }

        if self.caption.is_open() {
            tracing::warn!(file = file.name(), "caption already pending, discarding capture");
            return CaptureOutcome::Skipped(SkipReason::CaptionBusy);
        }

        let inline = match encode_inline(file).await {
            Ok(inline) => inline,
            Err(error) => {
                tracing::warn!(%error, "could not inline captured file");
                return CaptureOutcome::Skipped(SkipReason::ReadFailed);
            }
        };

        let kind = inline.kind.unwrap_or(MediaKind::Video);
        match self.caption.open(PendingMedia::new(kind, inline.uri)) {
            Ok(()) => CaptureOutcome::AwaitingCaption(kind),
            Err(_) => CaptureOutcome::Skipped(SkipReason::CaptionBusy),
        }
    }

    /// Image button: inline the file and set it as an image immediately.
    pub async fn pick_image<F: MediaFile>(
        &mut self,
        doc: Option<&mut Document>,
        file: &F,
    ) -> CaptureOutcome {
        self.pick(doc, file, MediaKind::Image).await
    }

    /// Video button: inline the file and insert it as a video immediately.
    pub async fn pick_video<F: MediaFile>(
        &mut self,
        doc: Option<&mut Document>,
        file: &F,
    ) -> CaptureOutcome {
        self.pick(doc, file, MediaKind::Video).await
    }

    async fn pick<F: MediaFile>(
        &mut self,
        doc: Option<&mut Document>,
        file: &F,
        kind: MediaKind,
    ) -> CaptureOutcome {
        let src = match read_as_data_uri(file).await {
            Ok(src) => src,
            Err(error) => {
                tracing::warn!(%error, "could not inline picked file");
                return CaptureOutcome::Skipped(SkipReason::ReadFailed);
            }
        };
        if mutator::insert_media(doc, &MediaNode::new(kind, src, None)) {
            CaptureOutcome::Inserted(kind)
        } else {
            CaptureOutcome::Skipped(SkipReason::NoDocument)
        }
    }

    /// Insert a video from a typed URL, normalizing known video links first.
    pub fn insert_video_url(&self, doc: Option<&mut Document>, url: &str) -> CaptureOutcome {
        let url = url.trim();
        if url.is_empty() {
            return CaptureOutcome::Skipped(SkipReason::EmptyUrl);
        }
        let src = normalize_video_url(url);
        if mutator::insert_video_node(doc, &src, None) {
            CaptureOutcome::Inserted(MediaKind::Video)
        } else {
            CaptureOutcome::Skipped(SkipReason::NoDocument)
        }
    }

    pub fn set_caption_text(&mut self, text: impl Into<String>) -> bool {
        self.caption.set_caption_text(text)
    }

    /// Commit the pending media. See [`CaptionCapture::confirm`].
    pub fn confirm_caption(&mut self, doc: Option<&mut Document>) -> bool {
        self.caption.confirm(doc)
    }

    pub fn cancel_caption(&mut self) -> Option<PendingMedia> {
        self.caption.cancel()
    }
}

/// Kind from the declared MIME type, or sniffed from the bytes when none is declared.
async fn content_kind<F: MediaFile>(file: &F) -> Option<MediaKind> {
    if let Some(kind) = file.kind() {
        return Some(kind);
    }
    let data = file.read_bytes().await.ok()?;
    resolve_kind(file.mime_type(), &data)
}
