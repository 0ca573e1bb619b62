//! Output formats for parsed collections
//!
//!     sgf      write-back to source syntax
//!     treeviz  indented tree drawing with validation status
//!     json     serde rendering of game trees and warnings

pub mod json;
pub mod registry;
pub mod treeviz;
pub mod write;

pub use json::JsonFormatter;
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
pub use write::{to_sgf_string, SgfFormatter};
