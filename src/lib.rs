//! # sgf
//!
//! A parser for the Smart Game Format.
//!
//! File Layout
//!
//!     Everything lives under the [sgf] module, split by pipeline stage:
//!
//!     src/sgf
//!       ├── lexing       Characters to tokens (logos lexemes + tokenizer state machine)
//!       ├── parsing      Tokens to game trees (recursive descent), errors and options
//!       ├── ast          GameTree, Node, Property, PropertyValue and lookups over them
//!       ├── registry     Static property type table
//!       ├── validation   Value type grammar and checks
//!       ├── charset      Byte decoding pre-pass
//!       ├── formats      Output formats (sgf write-back, treeviz, json)
//!       └── testing      Sample document loader for tests
//!
//! The entry points are [sgf::parse], [sgf::parse_with_options] and [sgf::parse_bytes].

#![allow(rustdoc::invalid_html_tags)]

pub mod sgf;
