//! Parse failures and non-fatal warnings

use crate::sgf::ast::ValidationError;
use crate::sgf::lexing::{LexError, LexWarning};
use serde::Serialize;
use std::fmt;

/// The first fatal condition met while parsing. No partial tree is returned with it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("{error} (at byte {offset})")]
    Lex { error: LexError, offset: usize },
    #[error("only GameTrees are allowed at the top level (at byte {offset})")]
    TopLevel { offset: usize },
    #[error("the GameTree sequence must have at least one node in it (at byte {offset})")]
    EmptySequence { offset: usize },
    #[error("unexpected token {token} (at byte {offset})")]
    UnexpectedToken { token: String, offset: usize },
    #[error("only one {identity} property is allowed per node (at byte {offset})")]
    DuplicateProperty { identity: String, offset: usize },
    #[error("found a PropertyValue without an opening '[' (at byte {offset})")]
    ValueWithoutBracket { offset: usize },
    #[error("found ']' without an opening '[' (at byte {offset})")]
    CloseWithoutBracket { offset: usize },
    #[error("{source} (at byte {offset})")]
    InvalidProperty {
        offset: usize,
        #[source]
        source: ValidationError,
    },
    #[error("property {identity} could not be validated without board context (at byte {offset})")]
    DeferredProperty { identity: String, offset: usize },
    #[error("token stream closed unexpectedly")]
    PipelineClosed,
}

impl ParseError {
    /// Byte offset in the source where the error was detected
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::Lex { offset, .. }
            | ParseError::TopLevel { offset }
            | ParseError::EmptySequence { offset }
            | ParseError::UnexpectedToken { offset, .. }
            | ParseError::DuplicateProperty { offset, .. }
            | ParseError::ValueWithoutBracket { offset }
            | ParseError::CloseWithoutBracket { offset }
            | ParseError::InvalidProperty { offset, .. }
            | ParseError::DeferredProperty { offset, .. } => Some(*offset),
            ParseError::PipelineClosed => None,
        }
    }
}

/// Recorded diagnostics. They never stop the parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Warning {
    /// A lexical warning token, with the byte offset of the token it precedes
    Lexical { warning: LexWarning, offset: usize },
    /// The byte input declared no charset
    MissingCharset,
    UnsupportedCharset { charset: String },
    /// Some input bytes were not UTF-8 and were replaced
    InvalidUtf8,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::Lexical { warning, offset } => write!(f, "{} (at byte {})", warning, offset),
            Warning::MissingCharset => write!(f, "did not find a CA property; assuming UTF-8"),
            Warning::UnsupportedCharset { charset } => {
                write!(f, "charset {} is not supported; decoding as UTF-8", charset)
            }
            Warning::InvalidUtf8 => {
                write!(f, "input is not valid UTF-8; invalid bytes were replaced")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sgf::lexing::Expected;

    #[test]
    fn test_messages() {
        let error = ParseError::Lex {
            error: LexError::UnexpectedEof(Expected::GameTreeContents),
            offset: 4,
        };
        assert_eq!(
            error.to_string(),
            "unexpected EOF; expected GameTree contents or ')' (at byte 4)"
        );
        assert_eq!(error.offset(), Some(4));
        assert_eq!(ParseError::PipelineClosed.offset(), None);
    }

    #[test]
    fn test_warning_messages() {
        let warning = Warning::Lexical {
            warning: LexWarning::LongPropertyIdent("DEF".to_string()),
            offset: 2,
        };
        assert_eq!(
            warning.to_string(),
            "found PropertyIdent DEF wider than 2 characters (at byte 2)"
        );
        assert_eq!(
            Warning::UnsupportedCharset {
                charset: "Shift_JIS".to_string()
            }
            .to_string(),
            "charset Shift_JIS is not supported; decoding as UTF-8"
        );
    }
}
