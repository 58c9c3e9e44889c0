//! Module for styled span and claimed-range bookkeeping
//!
//! This module provides the span type emitted by the highlighting pipeline
//! and the per-line occupancy map that keeps scanner and matcher output
//! from overlapping.

use crate::styles::StyleTag;

/// A contiguous range of characters within one block, tagged with a style
///
/// Offsets are character offsets into the block's text. After a block has
/// been fully processed, no two spans for that block overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledSpan {
    /// Character offset of the first styled character
    pub start: usize,
    /// Number of characters covered
    pub len: usize,
    /// The style tag to resolve through the style registry
    pub tag: StyleTag,
}

impl StyledSpan {
    /// Creates a new span
    pub fn new(start: usize, len: usize, tag: StyleTag) -> Self {
        Self { start, len, tag }
    }

    /// Character offset one past the last styled character
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Tracks which character offsets of a line are already styled
///
/// The boundary scanner claims its string and comment spans before the
/// token matcher runs; the matcher then claims each span it accepts, so a
/// later rule can never restyle an offset an earlier rule already took.
#[derive(Debug)]
pub struct ClaimMap {
    claimed: Vec<bool>,
}

impl ClaimMap {
    /// Creates an empty map for a line of `len` characters
    pub fn new(len: usize) -> Self {
        Self {
            claimed: vec![false; len],
        }
    }

    /// Marks every offset covered by `span` as claimed
    pub fn claim(&mut self, span: &StyledSpan) {
        let end = span.end().min(self.claimed.len());
        for slot in &mut self.claimed[span.start.min(end)..end] {
            *slot = true;
        }
    }

    /// Returns true if `offset` is already claimed
    ///
    /// Offsets past the end of the line count as unclaimed.
    pub fn is_claimed(&self, offset: usize) -> bool {
        self.claimed.get(offset).copied().unwrap_or(false)
    }
}
