//! Node schema: markup in, markup out.
//!
//! Each block variant has a pure parse rule and a pure render rule. The video
//! block recognizes both `iframe[src]` and `video[src]`, and renders to one of
//! them depending on the host of its `src`:
//!
//! ```text
//! <div class="rte-video-wrapper"><iframe src=".." frameborder="0" allowfullscreen="true"></iframe></div>
//! <div class="rte-video-wrapper"><video src=".." controls="true"></video></div>
//! ```

mod parse;
mod render;


pub use parse::parse_fragment;
pub use render::{
    HtmlWriter, VIDEO_WRAPPER_CLASS, VideoForm, render_block, render_document, video_form,
};
