//! Module for tracking buffer changes for incremental highlighting
//!
//! This module provides functionality to track which blocks have changed in
//! a document to enable efficient incremental rescanning.

use std::collections::HashSet;

/// Tracks changes in a document for incremental highlighting
#[derive(Debug, Default)]
pub struct ChangeTracker {
    /// Set of blocks that have been modified
    changed_blocks: HashSet<usize>,
    /// The last inserted text
    last_inserted_text: String,
    /// The position where the last insertion occurred
    last_insert_position: Option<(usize, usize)>, // (block, offset)
}

impl ChangeTracker {
    /// Creates a new change tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an insertion spanning `start_block..=end_block`
    pub fn record_insertion(
        &mut self,
        start_block: usize,
        end_block: usize,
        offset: usize,
        text: &str,
    ) {
        for block in start_block..=end_block {
            self.changed_blocks.insert(block);
        }
        self.last_inserted_text = text.to_string();
        self.last_insert_position = Some((start_block, offset));
    }

    /// Records a deletion spanning `start_block..=end_block`
    pub fn record_deletion(&mut self, start_block: usize, end_block: usize) {
        for block in start_block..=end_block {
            self.changed_blocks.insert(block);
        }
    }

    /// Marks a single block as changed
    pub fn mark(&mut self, block: usize) {
        self.changed_blocks.insert(block);
    }

    /// Gets the set of changed blocks and clears the tracker
    pub fn take_changed_blocks(&mut self) -> HashSet<usize> {
        std::mem::take(&mut self.changed_blocks)
    }

    /// Checks if there are any pending changes
    pub fn has_changes(&self) -> bool {
        !self.changed_blocks.is_empty()
    }

    /// The text of the most recent insertion
    pub fn last_inserted_text(&self) -> &str {
        &self.last_inserted_text
    }

    /// Where the most recent insertion started, as `(block, offset)`
    pub fn last_insert_position(&self) -> Option<(usize, usize)> {
        self.last_insert_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_marks_every_affected_block() {
        let mut tracker = ChangeTracker::new();
        tracker.record_insertion(2, 4, 0, "a\nb\nc");
        assert!(tracker.has_changes());
        let changed = tracker.take_changed_blocks();
        assert_eq!(changed, HashSet::from([2, 3, 4]));
        assert!(!tracker.has_changes());
    }

    #[test]
    fn deletion_marks_the_range() {
        let mut tracker = ChangeTracker::new();
        tracker.record_deletion(1, 1);
        assert_eq!(tracker.take_changed_blocks(), HashSet::from([1]));
    }

    #[test]
    fn last_insertion_is_remembered() {
        let mut tracker = ChangeTracker::new();
        tracker.record_insertion(3, 3, 5, "self.");
        assert_eq!(tracker.last_inserted_text(), "self.");
        assert_eq!(tracker.last_insert_position(), Some((3, 5)));
    }
}
