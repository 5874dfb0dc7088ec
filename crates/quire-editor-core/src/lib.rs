//! quire-editor-core: media embedding for the quire rich-text editor.
//!
//! This crate provides:
//! - `Node` / `Document` - tagged block model with a block-level selection
//! - `schema` - parsing markup into nodes and rendering nodes back to markup
//! - `embed` - video URL normalization and embed host detection
//! - `encode` - inline data URI fallback for files that were not uploaded
//! - `mutator` - the only way media nodes enter a live document
//! - `caption` - the single-slot caption capture state machine
//! - `pipeline` - paste/drop/pick handling with upload-then-fallback

pub mod caption;
pub mod document;
pub mod embed;
pub mod encode;
pub mod mutator;
pub mod node;
pub mod pipeline;
pub mod schema;
pub mod types;

pub use caption::{CaptionCapture, CaptionState, PendingMedia};
pub use document::Document;
pub use embed::{EMBED_HOSTS, is_embed_host, normalize_video_url};
pub use encode::{EncodeError, InlineData, data_uri, encode_inline, read_as_data_uri};
pub use mutator::{insert_media, insert_video_node, set_image};
pub use node::{ImageNode, Inline, Marks, MediaNode, Node, VideoNode};
pub use pipeline::{
    CaptureOutcome, CaptureReport, ClipboardItem, EventDisposition, MediaPipeline, SkipReason,
};
pub use quire_common::{MediaFile, MediaKind, MediaStore, UploadResult};
pub use smol_str::SmolStr;
pub use types::Selection;
