//! Token definitions for the sgf format
//!
//! Two kinds of types live here:
//!
//!     Tokens:
//!         What the tokenizer hands to the parser. Structural punctuation, identifiers, raw
//!         value text, end of input, and the in-band error and warning tokens.
//!
//!     Lexemes:
//!         The logos-derived character classes the tokenizer is built from. There is one
//!         lexeme set per tokenizer context: outside of nodes only parentheses and semicolons
//!         matter, inside a node identifiers, brackets and whitespace do. Value text is not a
//!         lexeme: it is scanned by hand because of the escape rule.
use logos::Logos;
use serde::Serialize;
use std::fmt;

/// Byte range of a token in the source
pub type Span = std::ops::Range<usize>;

/// A token paired with its location in the source
pub type Spanned = (Token, Span);

/// All tokens the sgf tokenizer can produce
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Token {
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    SemiColon,
    /// Identifier of a property, upper-case letters only
    PropertyIdent(String),
    /// Raw text between brackets, escapes left in place
    PropertyValue(String),
    Eof,
    /// A fatal lexical error. Nothing follows it.
    Error(LexError),
    /// A lexical diagnostic. Tokenizing continues after it.
    Warning(LexWarning),
}

impl Token {
    /// Raw text carried by the token, empty for punctuation
    pub fn text(&self) -> &str {
        match self {
            Token::PropertyIdent(text) | Token::PropertyValue(text) => text,
            Token::OpenParen => "(",
            Token::CloseParen => ")",
            Token::OpenBracket => "[",
            Token::CloseBracket => "]",
            Token::SemiColon => ";",
            Token::Eof | Token::Error(_) | Token::Warning(_) => "",
        }
    }

    /// Check if this token terminates the token stream
    pub fn is_terminal(&self) -> bool {
        matches!(self, Token::Eof | Token::Error(_))
    }

    /// Check if this token is structural punctuation
    pub fn is_punctuation(&self) -> bool {
        matches!(
            self,
            Token::OpenParen
                | Token::CloseParen
                | Token::OpenBracket
                | Token::CloseBracket
                | Token::SemiColon
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Eof => write!(f, "EOF"),
            Token::Error(error) => write!(f, "{}", error),
            Token::Warning(warning) => write!(f, "{}", warning),
            Token::PropertyIdent(text) | Token::PropertyValue(text) => {
                if text.chars().count() > 10 {
                    let head: String = text.chars().take(10).collect();
                    write!(f, "{:?}...", head)
                } else {
                    write!(f, "{:?}", text)
                }
            }
            punctuation => write!(f, "{}", punctuation.text()),
        }
    }
}

/// What the tokenizer was waiting for when the input ran out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Expected {
    GameTreeContents,
    PropertyIdent,
    PropertyValue,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::GameTreeContents => write!(f, "GameTree contents or ')'"),
            Expected::PropertyIdent => write!(f, "PropertyIdent"),
            Expected::PropertyValue => write!(f, "PropertyValue"),
        }
    }
}

/// Fatal lexical errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum LexError {
    #[error("too many right parentheses")]
    TooManyRightParens,
    #[error("unexpected EOF; expected {0}")]
    UnexpectedEof(Expected),
    #[error("PropertyIdent must be upper-case letters")]
    MalformedPropertyIdent,
    #[error("unexpected ';'; expected PropertyIdent")]
    UnexpectedSemiColon,
    #[error("unexpected '['; expected PropertyIdent")]
    MissingPropertyIdent,
}

/// Non-fatal lexical diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LexWarning {
    /// Identifiers in FF[4] are at most two letters; longer ones come from older versions
    LongPropertyIdent(String),
}

impl fmt::Display for LexWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexWarning::LongPropertyIdent(ident) => {
                write!(f, "found PropertyIdent {} wider than 2 characters", ident)
            }
        }
    }
}

/// Lexemes outside of nodes. Everything that is not a parenthesis or a semicolon is skipped.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[^;()]+")]
pub(crate) enum TreeLexeme {
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token(";")]
    SemiColon,
}

/// Lexemes inside a node, between properties
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PropertyLexeme {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,
    #[regex(r"[A-Z]+")]
    Ident,
    #[token("[")]
    OpenBracket,
    #[token(";")]
    SemiColon,
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
}
