//! Lexer
//!
//! This module turns an in-memory sgf source into a lazy stream of tokens.
//!
//! Structure:
//!     Character classes are recognised by logos lexers (see [tokens]). The tokenizer
//! ([tokenizer::Tokenizer]) is a small state machine on top of them that tracks game tree depth,
//! knows when it is inside a node, and scans value text with the `\` escape rule.
//!
//! Errors and warnings are tokens too. A fatal error is the last token of the stream, a warning
//! is followed by the token it is about. The parser pulls tokens one at a time, so tokenizing and
//! parsing run as one pipeline with no buffering in between.

pub mod tokenizer;
pub mod tokens;

pub use tokenizer::{tokenize, Tokenizer};
pub use tokens::{Expected, LexError, LexWarning, Span, Spanned, Token};
