//! Main module for sgf library functionality

pub mod ast;
pub mod charset;
pub mod formats;
pub mod lexing;
pub mod parsing;
pub mod registry;
pub mod testing;
pub mod validation;

pub use ast::{GameTree, Node, Property, PropertyValue, ValidationStatus};
pub use charset::parse_bytes;
pub use parsing::{parse, parse_with_options, Collection, ParseError, ParseOptions, Warning};
