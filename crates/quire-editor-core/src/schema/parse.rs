//! Parsing markup into nodes.

use scraper::{ElementRef, Html};
use smol_str::SmolStr;

use crate::node::{ImageNode, Inline, Marks, Node, VideoNode};

/// Elements that end the current paragraph and hold their own blocks.
const CONTAINERS: &[&str] = &[
    "article",
    "aside",
    "blockquote",
    "body",
    "div",
    "figure",
    "footer",
    "header",
    "li",
    "main",
    "ol",
    "pre",
    "section",
    "ul",
];

/// Elements whose content is never document text.
const IGNORED: &[&str] = &["head", "script", "style", "template", "noscript"];

/// Parse a markup fragment into top-level blocks.
///
/// Text outside any paragraph becomes a paragraph of its own; whitespace
/// between blocks is dropped. Media elements without a `src` are skipped.
pub fn parse_fragment(markup: &str) -> Vec<Node> {
    let fragment = Html::parse_fragment(markup);
    let mut collector = BlockCollector::default();
    collector.children(fragment.root_element(), Marks::NONE);
    collector.finish()
}

/// `iframe[src]` or `video[src]` into a video block.
fn parse_video(el: ElementRef<'_>) -> Option<VideoNode> {
    Some(VideoNode {
        src: src_attr(el)?,
        title: el.value().attr("title").map(SmolStr::new),
    })
}

/// `img[src]` into an image block.
fn parse_image(el: ElementRef<'_>) -> Option<ImageNode> {
    Some(ImageNode {
        src: src_attr(el)?,
        alt: el.value().attr("alt").map(SmolStr::new),
    })
}

fn src_attr(el: ElementRef<'_>) -> Option<SmolStr> {
    el.value()
        .attr("src")
        .filter(|src| !src.trim().is_empty())
        .map(SmolStr::new)
}

#[derive(Default)]
struct BlockCollector {
    blocks: Vec<Node>,
    /// Inline run of the text block being built.
    run: Vec<Inline>,
    /// Level of the heading being read; runs close as paragraphs when unset.
    heading: Option<u8>,
}

impl BlockCollector {
    fn finish(mut self) -> Vec<Node> {
        self.flush();
        self.blocks
    }

    fn children(&mut self, el: ElementRef<'_>, marks: Marks) {
        for child in el.children() {
            match child.value() {
                scraper::Node::Text(text) => self.push_text(text, marks),
                scraper::Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        self.element(child, marks);
                    }
                }
                _ => {}
            }
        }
    }

    fn element(&mut self, el: ElementRef<'_>, marks: Marks) {
        let name = el.value().name();
        match name {
            "p" => {
                self.flush();
                let before = self.blocks.len();
                self.children(el, Marks::NONE);
                self.flush();
                if self.blocks.len() == before {
                    self.blocks.push(Node::Paragraph(Vec::new()));
                }
            }
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                self.flush();
                let level = name[1..].parse().unwrap_or(1);
                let outer = self.heading.replace(level);
                let before = self.blocks.len();
                self.children(el, Marks::NONE);
                self.flush();
                if self.blocks.len() == before {
                    self.blocks.push(Node::Heading {
                        level,
                        content: Vec::new(),
                    });
                }
                self.heading = outer;
            }
            "img" => {
                self.flush();
                if let Some(image) = parse_image(el) {
                    self.blocks.push(Node::Image(image));
                }
            }
            "iframe" | "video" => {
                self.flush();
                if let Some(video) = parse_video(el) {
                    self.blocks.push(Node::Video(video));
                }
            }
            "strong" | "b" => self.children(el, marks.with_bold()),
            "em" | "i" => self.children(el, marks.with_italic()),
            _ if IGNORED.contains(&name) => {}
            _ if CONTAINERS.contains(&name) => {
                self.flush();
                self.children(el, Marks::NONE);
                self.flush();
            }
            _ => self.children(el, marks),
        }
    }

    fn push_text(&mut self, text: &str, marks: Marks) {
        if text.is_empty() {
            return;
        }
        match self.run.last_mut() {
            Some(last) if last.marks == marks => last.text.push_str(text),
            _ => self.run.push(Inline::marked(text, marks)),
        }
    }

    /// Close the current text block, dropping it if it is only whitespace.
    ///
    /// Inside a heading the run closes as a heading of that level, so text on
    /// either side of nested media keeps its heading.
    fn flush(&mut self) {
        let run = std::mem::take(&mut self.run);
        if !run.iter().any(|inline| !inline.text.trim().is_empty()) {
            return;
        }
        self.blocks.push(match self.heading {
            Some(level) => Node::Heading {
                level,
                content: run,
            },
            None => Node::Paragraph(run),
        });
    }
}
