//! Block-level selection.

/// Where the editor focus sits among the document's top-level blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// Gap before block `n` (`n == len` is the end of the document).
    Caret(usize),
    /// Block `n` is selected as a whole, as when an atomic media block is clicked.
    Node(usize),
}

impl Default for Selection {
    fn default() -> Self {
        Self::Caret(0)
    }
}

impl Selection {
    /// Index at which a new block is inserted.
    ///
    /// A selected block keeps its place; the new block goes after it.
    pub fn insertion_index(&self) -> usize {
        match *self {
            Self::Caret(index) => index,
            Self::Node(index) => index + 1,
        }
    }

    pub fn selected_node(&self) -> Option<usize> {
        match *self {
            Self::Node(index) => Some(index),
            Self::Caret(_) => None,
        }
    }

    /// Clamp into a document of `len` blocks.
    pub fn clamp(self, len: usize) -> Self {
        match self {
            Self::Caret(index) => Self::Caret(index.min(len)),
            Self::Node(index) if index < len => Self::Node(index),
            Self::Node(_) => Self::Caret(len),
        }
    }
}
