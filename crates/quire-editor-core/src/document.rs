//! The editor document: an ordered list of blocks plus a selection.
//!
//! Reading and repositioning are public. Inserting or replacing nodes goes
//! through [`crate::mutator`], which owns the rules for media insertion.

use crate::node::{MediaNode, Node};
use crate::schema;
use crate::types::Selection;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Node>,
    selection: Selection,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document with the caret after the last block.
    pub fn from_blocks(blocks: Vec<Node>) -> Self {
        let selection = Selection::Caret(blocks.len());
        Self { blocks, selection }
    }

    /// Parse a markup fragment.
    pub fn from_html(markup: &str) -> Self {
        Self::from_blocks(schema::parse_fragment(markup))
    }

    /// Render all blocks back to markup.
    pub fn to_html(&self) -> String {
        schema::render_document(&self.blocks)
    }

    pub fn blocks(&self) -> &[Node] {
        &self.blocks
    }

    pub fn block(&self, index: usize) -> Option<&Node> {
        self.blocks.get(index)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// All media blocks in document order.
    pub fn media(&self) -> impl Iterator<Item = MediaNode> + '_ {
        self.blocks.iter().filter_map(Node::as_media)
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Set the selection, clamped to the document.
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection.clamp(self.blocks.len());
    }

    /// Select block `index` as a whole. Returns false if out of range.
    pub fn select_node(&mut self, index: usize) -> bool {
        if index < self.blocks.len() {
            self.selection = Selection::Node(index);
            true
        } else {
            false
        }
    }

    /// Move the block at `from` so it ends up at index `to`.
    ///
    /// The moved block becomes the selection. Returns false if either index
    /// is out of range.
    pub fn move_block(&mut self, from: usize, to: usize) -> bool {
        if from >= self.blocks.len() || to >= self.blocks.len() {
            return false;
        }
        let node = self.blocks.remove(from);
        self.blocks.insert(to, node);
        self.selection = Selection::Node(to);
        true
    }

    /// Insert at the focus, leaving the caret after the new block.
    pub(crate) fn insert_at_focus(&mut self, node: Node) -> usize {
        let index = self.selection.insertion_index().min(self.blocks.len());
        self.blocks.insert(index, node);
        self.selection = Selection::Caret(index + 1);
        index
    }

    /// Replace a selected block, or insert at the caret.
    pub(crate) fn replace_selection(&mut self, node: Node) -> usize {
        match self.selection.selected_node() {
            Some(index) if index < self.blocks.len() => {
                self.blocks[index] = node;
                self.selection = Selection::Caret(index + 1);
                index
            }
            _ => self.insert_at_focus(node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        Document::from_blocks(vec![
            Node::paragraph("one"),
            Node::image("a.png", None),
            Node::paragraph("three"),
        ])
    }

    #[test]
    fn caret_starts_at_end() {
        assert_eq!(doc().selection(), Selection::Caret(3));
        assert_eq!(Document::new().selection(), Selection::Caret(0));
    }

    #[test]
    fn insert_at_caret() {
        let mut doc = doc();
        doc.set_selection(Selection::Caret(1));
        assert_eq!(doc.insert_at_focus(Node::paragraph("new")), 1);
        assert_eq!(doc.block(1), Some(&Node::paragraph("new")));
        assert_eq!(doc.selection(), Selection::Caret(2));
    }

    #[test]
    fn insert_after_selected_node() {
        let mut doc = doc();
        assert!(doc.select_node(0));
        assert_eq!(doc.insert_at_focus(Node::paragraph("new")), 1);
        assert_eq!(doc.len(), 4);
        assert_eq!(doc.block(0), Some(&Node::paragraph("one")));
    }

    #[test]
    fn replace_selected_node() {
        let mut doc = doc();
        doc.select_node(1);
        assert_eq!(doc.replace_selection(Node::image("b.png", None)), 1);
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.block(1), Some(&Node::image("b.png", None)));
        assert_eq!(doc.selection(), Selection::Caret(2));
    }

    #[test]
    fn replace_without_node_selection_inserts() {
        let mut doc = doc();
        doc.replace_selection(Node::image("b.png", None));
        assert_eq!(doc.len(), 4);
        assert_eq!(doc.block(3), Some(&Node::image("b.png", None)));
    }

    #[test]
    fn move_media_block() {
        let mut doc = doc();
        assert!(doc.move_block(1, 2));
        assert_eq!(doc.block(2), Some(&Node::image("a.png", None)));
        assert_eq!(doc.selection(), Selection::Node(2));
        assert!(!doc.move_block(0, 3));
    }

    #[test]
    fn selection_is_clamped() {
        let mut doc = doc();
        doc.set_selection(Selection::Node(10));
        assert_eq!(doc.selection(), Selection::Caret(3));
        assert!(!doc.select_node(3));
    }

    #[test]
    fn media_iterates_in_order() {
        let mut doc = doc();
        doc.insert_at_focus(Node::video("v.mp4", Some("clip")));
        let srcs: Vec<_> = doc.media().map(|m| m.src).collect();
        assert_eq!(srcs, ["a.png", "v.mp4"]);
    }
}
