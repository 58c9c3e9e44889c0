//! Module for the highlight orchestrator
//!
//! The orchestrator drives dirty blocks through the boundary scanner and
//! the token matcher, hands the merged span list to the rendering
//! collaborator, and keeps the per-block state table that makes
//! triple-quoted strings flow across lines. When a block's outgoing state
//! changes, the following block is reprocessed too, cascading until the
//! state settles or the buffer ends.

use crate::change_tracker::ChangeTracker;
use crate::document::Document;
use crate::error::ConfigError;
use crate::matcher;
use crate::rules::RuleSet;
use crate::scanner::{self, BlockState};
use crate::span::{ClaimMap, StyledSpan};
use crate::styles::StyleRegistry;
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Incremental highlighter for one open buffer
///
/// Owns the rule table, the style registry and the per-block state table.
/// The document and the renderer stay outside: text comes in through a
/// [`Document`], spans go out through the callback given to
/// [`Highlighter::process`].
pub struct Highlighter {
    rules: RuleSet,
    styles: StyleRegistry,
    /// Outgoing block state per block index, from the last pass; `None`
    /// marks an entry that has never been computed, which is distinct
    /// from a computed `BlockState::None` and always cascades
    states: Vec<Option<BlockState>>,
    tracker: ChangeTracker,
    /// Reentrancy guard: edit notifications are ignored while the
    /// orchestrator is emitting spans, since the surrounding environment
    /// may observe span application as a content mutation
    suspended: bool,
}

impl Highlighter {
    /// Creates a highlighter, validating the rule table against the
    /// style registry
    ///
    /// Every tag the engine can emit — the rule tags plus the string and
    /// comment tags owned by the scanner — must resolve in the registry.
    pub fn new(rules: RuleSet, styles: StyleRegistry) -> Result<Self, ConfigError> {
        validate(&rules, &styles)?;
        Ok(Self {
            rules,
            styles,
            states: Vec::new(),
            tracker: ChangeTracker::new(),
            suspended: false,
        })
    }

    /// Creates a highlighter with the default Python rules and palette
    pub fn python() -> Result<Self, ConfigError> {
        Self::new(RuleSet::python()?, StyleRegistry::python_default())
    }

    /// Replaces the rule table and style registry, e.g. to switch language
    ///
    /// The new configuration is validated before anything is replaced; on
    /// error the old configuration stays active. On success the state
    /// table is cleared and the buffer is marked for a full repass.
    pub fn swap_config(
        &mut self,
        rules: RuleSet,
        styles: StyleRegistry,
    ) -> Result<(), ConfigError> {
        validate(&rules, &styles)?;
        self.rules = rules;
        self.styles = styles;
        self.states.clear();
        self.tracker.mark(0);
        debug!("configuration swapped, full repass scheduled");
        Ok(())
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    /// The outgoing state recorded for `block`, `BlockState::None` if the
    /// block has not been processed yet
    pub fn state_of(&self, block: usize) -> BlockState {
        self.states.get(block).copied().flatten().unwrap_or_default()
    }

    /// Marks a single block as needing rescanning
    pub fn invalidate(&mut self, block: usize) {
        if self.suspended {
            return;
        }
        self.tracker.mark(block);
    }

    /// Notification that text was inserted into `start_block..=end_block`
    pub fn notify_insertion(
        &mut self,
        start_block: usize,
        end_block: usize,
        offset: usize,
        text: &str,
    ) {
        if self.suspended {
            return;
        }
        self.tracker
            .record_insertion(start_block, end_block, offset, text);
    }

    /// Notification that text was deleted from `start_block..=end_block`
    pub fn notify_deletion(&mut self, start_block: usize, end_block: usize) {
        if self.suspended {
            return;
        }
        self.tracker.record_deletion(start_block, end_block);
    }

    /// Notification that `count` whole blocks were inserted at `at`
    ///
    /// State entries at and below the insertion point shift down so they
    /// stay attached to the text they describe. The fresh entries are
    /// unknown rather than `BlockState::None`, so the next pass always
    /// cascades past an inserted block even when its computed outgoing
    /// state happens to be `None`.
    pub fn blocks_inserted(&mut self, at: usize, count: usize) {
        if self.suspended {
            return;
        }
        if at <= self.states.len() {
            for _ in 0..count {
                self.states.insert(at, None);
            }
        }
        for block in at..at + count {
            self.tracker.mark(block);
        }
    }

    /// Notification that `count` whole blocks were removed at `at`
    ///
    /// Their state entries are dropped and later entries shift up.
    pub fn blocks_removed(&mut self, at: usize, count: usize) {
        if self.suspended {
            return;
        }
        if at < self.states.len() {
            let end = (at + count).min(self.states.len());
            self.states.drain(at..end);
        }
        // The block that moved up into `at` now follows a new predecessor.
        self.tracker.mark(at);
    }

    /// Runs one block through the scanner and the matcher
    ///
    /// Pure with respect to the buffer: the result depends only on the
    /// text and the incoming state. Returned spans are sorted by start
    /// offset and never overlap.
    pub fn highlight_block(&self, text: &str, incoming: BlockState) -> (Vec<StyledSpan>, BlockState) {
        let scan = scanner::scan(text, incoming);

        let mut claimed = ClaimMap::new(text.chars().count());
        for span in scan.string_spans.iter().chain(scan.comment_spans.iter()) {
            claimed.claim(span);
        }

        let mut spans = matcher::apply(&self.rules, text, &mut claimed);
        spans.extend(scan.string_spans);
        spans.extend(scan.comment_spans);
        spans.sort_by_key(|span| span.start);

        (spans, scan.state)
    }

    /// Processes every pending block, cascading as state changes require
    ///
    /// `emit` receives each processed block's index and its final span
    /// list. Blocks are processed in ascending order so a predecessor's
    /// fresh state is always available before its successor runs. A block
    /// whose outgoing state differs from what was stored (or that was
    /// never stored) queues its successor, so a pass runs to a fixed
    /// point in at most one evaluation per remaining block.
    pub fn process<D: Document + ?Sized>(
        &mut self,
        doc: &D,
        mut emit: impl FnMut(usize, &[StyledSpan]),
    ) {
        if !self.tracker.has_changes() {
            return;
        }

        let count = doc.block_count();
        // Entries for blocks that no longer exist are dropped.
        self.states.truncate(count);

        let mut pending: BTreeSet<usize> = self
            .tracker
            .take_changed_blocks()
            .into_iter()
            .filter(|&block| block < count)
            .collect();
        debug!(dirty = pending.len(), blocks = count, "highlight pass");

        self.suspended = true;
        while let Some(index) = pending.pop_first() {
            let Some(text) = doc.block_text(index) else {
                continue;
            };

            let incoming = if index == 0 {
                BlockState::None
            } else {
                self.states.get(index - 1).copied().flatten().unwrap_or_default()
            };
            let (spans, outgoing) = self.highlight_block(text, incoming);
            emit(index, &spans);

            let previous = self.states.get(index).copied().flatten();
            if self.states.len() <= index {
                self.states.resize(index + 1, None);
            }
            self.states[index] = Some(outgoing);

            if previous != Some(outgoing) {
                trace!(block = index, ?outgoing, "state changed, cascading");
                if index + 1 < count {
                    pending.insert(index + 1);
                }
            }
        }
        self.suspended = false;
    }
}

fn validate(rules: &RuleSet, styles: &StyleRegistry) -> Result<(), ConfigError> {
    for tag in rules.emitted_tags() {
        if !styles.contains(tag) {
            return Err(ConfigError::MissingStyle(tag));
        }
    }
    Ok(())
}
