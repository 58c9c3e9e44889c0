//! Interface to the document collaborator
//!
//! The engine never stores buffer text; it pulls the current text of a
//! block from the document each time the block is processed.

/// Read access to the lines of an open buffer
pub trait Document {
    /// Number of blocks currently in the buffer
    fn block_count(&self) -> usize;

    /// The current text of the block at `index`, without its newline
    fn block_text(&self, index: usize) -> Option<&str>;
}

impl<T: AsRef<str>> Document for [T] {
    fn block_count(&self) -> usize {
        self.len()
    }

    fn block_text(&self, index: usize) -> Option<&str> {
        self.get(index).map(AsRef::as_ref)
    }
}

impl<T: AsRef<str>> Document for Vec<T> {
    fn block_count(&self) -> usize {
        self.len()
    }

    fn block_text(&self, index: usize) -> Option<&str> {
        self.as_slice().block_text(index)
    }
}
