//! Module for the token matcher
//!
//! This module applies the ordered rule table to the parts of a line the
//! boundary scanner did not claim as string or comment. Rules run front to
//! back over the whole line; the first rule to style an offset keeps it.

use crate::rules::RuleSet;
use crate::span::{ClaimMap, StyledSpan};

/// Applies `rules` to `text`, skipping offsets already claimed
///
/// `claimed` arrives pre-loaded with the scanner's string and comment
/// spans; every span the matcher accepts is claimed in turn, which is what
/// gives the declared rule order its first-come precedence. Returned spans
/// use character offsets and are in rule order, not text order.
pub fn apply(rules: &RuleSet, text: &str, claimed: &mut ClaimMap) -> Vec<StyledSpan> {
    let mut spans = Vec::new();

    for rule in rules.rules() {
        for caps in rule.pattern().captures_iter(text) {
            // A group that did not participate, or matched nothing, yields
            // no span.
            let Some(group) = caps.get(rule.capture()) else {
                continue;
            };
            if group.is_empty() {
                continue;
            }

            let start = char_offset(text, group.start());
            let len = group.as_str().chars().count();
            if claimed.is_claimed(start) {
                continue;
            }

            let span = StyledSpan::new(start, len, rule.tag());
            claimed.claim(&span);
            spans.push(span);
        }
    }

    spans
}

/// Converts a byte offset produced by the regex engine into a character
/// offset
fn char_offset(text: &str, byte: usize) -> usize {
    text[..byte].chars().count()
}
