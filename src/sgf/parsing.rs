//! Parsing module for the sgf format
//!
//! Turns source text into a [Collection] of game trees:
//!     1. **Lexing**: the tokenizer produces tokens lazily
//!     2. **Building**: a recursive descent parser pulls those tokens and builds the tree,
//!        validating every property as its values are attached
//!
//! The two stages run as one pipeline. The first fatal condition, lexical or structural, ends
//! the parse with a [ParseError] and no tree. Warnings accumulate in the collection.
//!
//! Validation outcomes are recorded on each property by default. [ParseOptions] can turn
//! invalid or deferred properties into parse errors instead.

pub mod error;
pub mod options;
pub mod parser;

pub use error::{ParseError, Warning};
pub use options::ParseOptions;
pub use parser::{Collection, Parser};

/// Parse source text with the default options
pub fn parse(source: &str) -> Result<Collection, ParseError> {
    parse_with_options(source, &ParseOptions::default())
}

pub fn parse_with_options(source: &str, options: &ParseOptions) -> Result<Collection, ParseError> {
    Parser::new(source, *options).parse()
}
