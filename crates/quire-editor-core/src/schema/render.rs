//! Rendering nodes to markup.

use core::fmt;
use std::convert::Infallible;

use markdown_weaver_escape::{StrWrite, escape_html};

use crate::embed::is_embed_host;
use crate::node::{ImageNode, Inline, Node, VideoNode};

/// Class on the block container around both video forms.
pub const VIDEO_WRAPPER_CLASS: &str = "rte-video-wrapper";

/// Which element a video block renders to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VideoForm {
    /// Borderless, fullscreen-capable embeddable frame.
    Frame,
    /// Native playable video with controls.
    Native,
}

pub fn video_form(src: &str) -> VideoForm {
    if is_embed_host(src) {
        VideoForm::Frame
    } else {
        VideoForm::Native
    }
}

/// Writes nodes as markup into any `StrWrite`.
pub struct HtmlWriter<W: StrWrite> {
    writer: W,
}

impl<W: StrWrite> HtmlWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    #[inline]
    fn write(&mut self, s: &str) -> Result<(), W::Error> {
        self.writer.write_str(s)
    }

    /// ` name="value"` with the value escaped.
    fn write_attr(&mut self, name: &str, value: &str) -> Result<(), W::Error> {
        self.write(" ")?;
        self.write(name)?;
        self.write("=\"")?;
        escape_html(&mut self.writer, value)?;
        self.write("\"")
    }

    pub fn write_blocks(&mut self, blocks: &[Node]) -> Result<(), W::Error> {
        for block in blocks {
            self.write_block(block)?;
        }
        Ok(())
    }

    pub fn write_block(&mut self, node: &Node) -> Result<(), W::Error> {
        match node {
            Node::Paragraph(content) => {
                self.write("<p>")?;
                self.write_inlines(content)?;
                self.write("</p>")
            }
            Node::Heading { level, content } => {
                let level = (*level).clamp(1, 6);
                self.writer.write_fmt(format_args!("<h{}>", level))?;
                self.write_inlines(content)?;
                self.writer.write_fmt(format_args!("</h{}>", level))
            }
            Node::Image(image) => self.write_image(image),
            Node::Video(video) => self.write_video(video),
        }
    }

    fn write_inlines(&mut self, content: &[Inline]) -> Result<(), W::Error> {
        for inline in content {
            if inline.marks.bold {
                self.write("<strong>")?;
            }
            if inline.marks.italic {
                self.write("<em>")?;
            }
            escape_html(&mut self.writer, &inline.text)?;
            if inline.marks.italic {
                self.write("</em>")?;
            }
            if inline.marks.bold {
                self.write("</strong>")?;
            }
        }
        Ok(())
    }

    fn write_image(&mut self, image: &ImageNode) -> Result<(), W::Error> {
        self.write("<img")?;
        self.write_attr("src", &image.src)?;
        if let Some(alt) = &image.alt {
            self.write_attr("alt", alt)?;
        }
        self.write(">")
    }

    fn write_video(&mut self, video: &VideoNode) -> Result<(), W::Error> {
        self.write("<div")?;
        self.write_attr("class", VIDEO_WRAPPER_CLASS)?;
        self.write(">")?;

        let form = video_form(&video.src);
        let tag = match form {
            VideoForm::Frame => "iframe",
            VideoForm::Native => "video",
        };
        self.write("<")?;
        self.write(tag)?;
        self.write_attr("src", &video.src)?;
        if let Some(title) = &video.title {
            self.write_attr("title", title)?;
        }
        match form {
            VideoForm::Frame => {
                self.write_attr("frameborder", "0")?;
                self.write_attr("allowfullscreen", "true")?;
            }
            VideoForm::Native => {
                self.write_attr("controls", "true")?;
            }
        }
        self.write("></")?;
        self.write(tag)?;
        self.write("></div>")
    }
}

/// `StrWrite` over a `String`; pushing never fails.
struct StringWriter<'a>(&'a mut String);

impl StrWrite for StringWriter<'_> {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
        self.0.push_str(s);
        Ok(())
    }

    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<(), Infallible> {
        let _ = fmt::Write::write_fmt(self.0, args);
        Ok(())
    }
}

pub fn render_document(blocks: &[Node]) -> String {
    let mut out = String::new();
    let Ok(()) = HtmlWriter::new(StringWriter(&mut out)).write_blocks(blocks);
    out
}

pub fn render_block(node: &Node) -> String {
    render_document(std::slice::from_ref(node))
}
