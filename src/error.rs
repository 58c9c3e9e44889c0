//! Configuration error taxonomy
//!
//! Errors only surface while building or swapping a configuration; the
//! scanning and matching paths are total over their inputs and never fail.

use crate::styles::StyleTag;
use thiserror::Error;

/// A fatal configuration problem detected before any block is processed
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A rule pattern failed to compile
    #[error("invalid pattern for {tag:?} rule: {source}")]
    Pattern {
        tag: StyleTag,
        #[source]
        source: regex::Error,
    },

    /// A rule selects a capture group its pattern does not have
    #[error("rule for {tag:?} selects capture group {index}, but the pattern only has groups 0..{available}")]
    CaptureOutOfRange {
        tag: StyleTag,
        index: usize,
        available: usize,
    },

    /// The same style tag was registered twice
    #[error("style {0:?} is registered more than once")]
    DuplicateStyle(StyleTag),

    /// A tag the engine can emit has no entry in the style registry
    #[error("no visual style registered for tag {0:?}")]
    MissingStyle(StyleTag),
}
