//! Module for the boundary scanner
//!
//! This module provides the character-level automaton that finds string and
//! comment spans in one line of text. It is the stateful half of the
//! highlighting pipeline: the state left open at the end of one line is fed
//! back in as the incoming state of the next, which is how triple-quoted
//! strings flow across line boundaries.
//!
//! Scanning one character at a time with an explicit state register means a
//! `#` inside a string can never open a comment and a quote inside a
//! comment can never open a string, so string and comment spans cannot
//! overlap by construction.

use crate::span::StyledSpan;
use crate::styles::StyleTag;

/// Which multi-character construct, if any, is open at a point in the scan
///
/// Only the triple-quote states survive past the end of a line. Ordinary
/// single- and double-quoted strings close at the newline, and a line
/// comment never reaches the next line, so `scan` never returns those as
/// the outgoing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockState {
    #[default]
    None,
    InSingle,
    InDouble,
    InTripleSingle,
    InTripleDouble,
    InComment,
}

impl BlockState {
    /// The quote character that closes this string state
    fn quote(self) -> Option<char> {
        match self {
            BlockState::InSingle | BlockState::InTripleSingle => Some('\''),
            BlockState::InDouble | BlockState::InTripleDouble => Some('"'),
            BlockState::None | BlockState::InComment => None,
        }
    }

    fn is_triple(self) -> bool {
        matches!(self, BlockState::InTripleSingle | BlockState::InTripleDouble)
    }

    /// The span style for text inside this string state
    fn style(self) -> StyleTag {
        if self.is_triple() {
            StyleTag::String2
        } else {
            StyleTag::String
        }
    }
}

/// Everything one scan pass produces for a single line
#[derive(Debug, PartialEq, Eq)]
pub struct ScanResult {
    /// Spans of single-, double- and triple-quoted strings
    pub string_spans: Vec<StyledSpan>,
    /// Span of the line comment, if the line has one
    pub comment_spans: Vec<StyledSpan>,
    /// State still open at the end of the line
    pub state: BlockState,
}

/// Finds all string and comment spans of `text`
///
/// `incoming` is the state the previous line left open (`BlockState::None`
/// for the first line of a buffer or a line whose predecessor is unknown).
/// A triple-quote incoming state means the line starts inside that string
/// and the scan begins by searching for the closing delimiter.
///
/// Offsets in the returned spans are character offsets. The function is
/// total: any text, including an empty line, is a valid input.
pub fn scan(text: &str, incoming: BlockState) -> ScanResult {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();

    let mut string_spans = Vec::new();
    let mut comment_spans = Vec::new();

    // Comments never carry over to the next line.
    let mut state = if incoming == BlockState::InComment {
        BlockState::None
    } else {
        incoming
    };
    let mut span_start = 0;

    let mut i = 0;
    while i < len {
        let c = chars[i];
        match state {
            BlockState::None => {
                if c == '#' {
                    comment_spans.push(StyledSpan::new(i, len - i, StyleTag::Comment));
                    state = BlockState::InComment;
                    i = len;
                } else if (c == '\'' || c == '"') && !is_escaped(&chars, i) {
                    // Triple delimiters win over single ones at the same spot.
                    if chars.get(i + 1) == Some(&c) && chars.get(i + 2) == Some(&c) {
                        state = if c == '\'' {
                            BlockState::InTripleSingle
                        } else {
                            BlockState::InTripleDouble
                        };
                        span_start = i;
                        i += 3;
                    } else {
                        state = if c == '\'' {
                            BlockState::InSingle
                        } else {
                            BlockState::InDouble
                        };
                        span_start = i;
                        i += 1;
                    }
                } else {
                    i += 1;
                }
            }
            BlockState::InSingle | BlockState::InDouble => {
                if Some(c) == state.quote() && !is_escaped(&chars, i) {
                    string_spans.push(StyledSpan::new(
                        span_start,
                        i + 1 - span_start,
                        state.style(),
                    ));
                    state = BlockState::None;
                }
                i += 1;
            }
            BlockState::InTripleSingle | BlockState::InTripleDouble => {
                if Some(c) == state.quote()
                    && !is_escaped(&chars, i)
                    && chars.get(i + 1) == Some(&c)
                    && chars.get(i + 2) == Some(&c)
                {
                    string_spans.push(StyledSpan::new(
                        span_start,
                        i + 3 - span_start,
                        state.style(),
                    ));
                    state = BlockState::None;
                    i += 3;
                } else {
                    i += 1;
                }
            }
            // Set only when the rest of the line has already been consumed.
            BlockState::InComment => i = len,
        }
    }

    // Whatever is still open at end of line.
    match state {
        BlockState::InSingle | BlockState::InDouble => {
            // Non-triple strings do not span lines: truncate and reset.
            if len > span_start {
                string_spans.push(StyledSpan::new(span_start, len - span_start, state.style()));
            }
            state = BlockState::None;
        }
        BlockState::InTripleSingle | BlockState::InTripleDouble => {
            if len > span_start {
                string_spans.push(StyledSpan::new(span_start, len - span_start, state.style()));
            }
        }
        BlockState::InComment => state = BlockState::None,
        BlockState::None => {}
    }

    ScanResult {
        string_spans,
        comment_spans,
        state,
    }
}

/// Escape parity: a character is escaped iff an odd number of backslashes
/// immediately precede it
fn is_escaped(chars: &[char], i: usize) -> bool {
    let mut backslashes = 0;
    let mut j = i;
    while j > 0 && chars[j - 1] == '\\' {
        backslashes += 1;
        j -= 1;
    }
    backslashes % 2 == 1
}
