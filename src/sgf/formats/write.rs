//! Write-back to sgf source
//!
//! Values are written with their escapes as read, so every value reproduces its source bytes.
//! Whitespace between tokens is not kept.

use super::registry::{FormatError, Formatter};
use crate::sgf::parsing::Collection;

/// One game tree per line
pub fn to_sgf_string(collection: &Collection) -> String {
    let mut result = String::new();
    for tree in &collection.game_trees {
        result.push_str(&tree.to_string());
        result.push('\n');
    }
    result
}

pub struct SgfFormatter;

impl Formatter for SgfFormatter {
    fn name(&self) -> &str {
        "sgf"
    }

    fn extension(&self) -> &str {
        "sgf"
    }

    fn serialize(&self, collection: &Collection) -> Result<String, FormatError> {
        Ok(to_sgf_string(collection))
    }

    fn description(&self) -> &str {
        "Compact sgf source, one game tree per line"
    }
}
