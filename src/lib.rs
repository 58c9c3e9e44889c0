//! An incremental, line-based syntax highlighting engine
//!
//! The engine classifies every character of a buffer line into one of a
//! closed set of style tags (keyword, operator, brace, string, docstring,
//! comment, definition name, `self`, number) and tracks the one kind of
//! construct that can span lines, the triple-quoted string, through a
//! small per-block state machine.
//!
//! The pipeline for one block is: the boundary scanner walks the line one
//! character at a time and finds string and comment spans, honoring escape
//! parity and triple-quote precedence; the token matcher then applies the
//! ordered rule table to the characters the scanner left unclaimed. The
//! orchestrator feeds dirty blocks through that pipeline, hands the merged
//! span list to the renderer, and reprocesses following blocks whenever a
//! block's outgoing state changes.
//!
//! The editing widget, the renderer and the palette are collaborators, not
//! parts of the engine: text comes in through the [`document::Document`]
//! trait, spans go out through a callback, and tags resolve to visual
//! attributes through the [`styles::StyleRegistry`].

pub mod change_tracker;
pub mod document;
pub mod error;
pub mod highlighter;
pub mod matcher;
pub mod rules;
pub mod scanner;
pub mod span;
pub mod styles;

pub use change_tracker::ChangeTracker;
pub use document::Document;
pub use error::ConfigError;
pub use highlighter::Highlighter;
pub use rules::{Rule, RuleSet};
pub use scanner::BlockState;
pub use span::StyledSpan;
pub use styles::{StyleRegistry, StyleTag, TextStyle};
