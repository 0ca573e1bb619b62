//! Testing utilities
//!
//!     Tests should read sgf content from the sample files in `docs/samples` rather than
//!     inlining whole documents. Short fragments that exercise one edge case are fine inline.
//!
//!     [samples::Samples] loads them by file name, as source text, bytes, tokens or a parsed
//!     collection. The `must_` variants panic with the sample name on failure.

pub mod samples;

pub use samples::{SampleError, Samples};
