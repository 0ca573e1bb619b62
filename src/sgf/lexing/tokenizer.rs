//! The sgf tokenizer state machine
//!
//! The tokenizer is a lazy iterator: every call to `next` runs exactly one transition and
//! yields exactly one token, so it never runs ahead of its consumer by more than a token.
//! (The single exception is the long identifier warning, which is yielded right before the
//! identifier it is about.)
//!
//! States
//!
//!     Outer:      Between game trees. Everything except parentheses is skipped.
//!     Tree:       Inside a game tree, outside of nodes. `;` enters Property, parentheses
//!                 track depth.
//!     Property:   Inside a node. Identifiers, `[` for further values of the current
//!                 property, and the punctuation that ends the node.
//!     OpenValue:  Right after an identifier, the `[` is due.
//!     Value:      Raw value text up to the next unescaped `]`.
//!     CloseValue: The `]` is due.
//!
//! Outer and Tree share the [TreeLexeme] set, the others use [PropertyLexeme]; the underlying
//! logos lexer is morphed between the two whenever the state changes sets. Value text is
//! scanned by hand from the lexer remainder and consumed with `bump`.

use super::tokens::{Expected, LexError, LexWarning, PropertyLexeme, Span, Spanned, Token, TreeLexeme};
use logos::{Lexer, Logos};

enum Mode<'s> {
    Outer(Lexer<'s, TreeLexeme>),
    Tree(Lexer<'s, TreeLexeme>),
    Property {
        lexer: Lexer<'s, PropertyLexeme>,
        after_value: bool,
    },
    OpenValue(Lexer<'s, PropertyLexeme>),
    Value(Lexer<'s, PropertyLexeme>),
    CloseValue(Lexer<'s, PropertyLexeme>),
    Halted,
}

/// Lazy token producer over an in-memory source
pub struct Tokenizer<'s> {
    source: &'s str,
    mode: Mode<'s>,
    depth: usize,
    pending: Option<Spanned>,
}

impl<'s> Tokenizer<'s> {
    pub fn new(source: &'s str) -> Self {
        Tokenizer {
            source,
            mode: Mode::Outer(TreeLexeme::lexer(source)),
            depth: 0,
            pending: None,
        }
    }

    /// Current game tree nesting depth
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn end_of_input(&self) -> Span {
        self.source.len()..self.source.len()
    }

    fn halt(&self, error: LexError, span: Span) -> (Mode<'s>, Spanned) {
        (Mode::Halted, (Token::Error(error), span))
    }

    fn lex_outer(&mut self, mut lexer: Lexer<'s, TreeLexeme>) -> (Mode<'s>, Spanned) {
        loop {
            match lexer.next() {
                Some(Ok(TreeLexeme::OpenParen)) => {
                    let span = lexer.span();
                    return self.open_paren(lexer, span);
                }
                Some(Ok(TreeLexeme::CloseParen)) => {
                    let span = lexer.span();
                    return self.close_paren(lexer, span);
                }
                Some(Ok(TreeLexeme::SemiColon)) | Some(Err(())) => continue,
                None => return (Mode::Halted, (Token::Eof, self.end_of_input())),
            }
        }
    }

    fn lex_tree(&mut self, mut lexer: Lexer<'s, TreeLexeme>) -> (Mode<'s>, Spanned) {
        loop {
            match lexer.next() {
                Some(Ok(TreeLexeme::SemiColon)) => {
                    let span = lexer.span();
                    let mode = Mode::Property {
                        lexer: lexer.morph(),
                        after_value: false,
                    };
                    return (mode, (Token::SemiColon, span));
                }
                Some(Ok(TreeLexeme::OpenParen)) => {
                    let span = lexer.span();
                    return self.open_paren(lexer, span);
                }
                Some(Ok(TreeLexeme::CloseParen)) => {
                    let span = lexer.span();
                    return self.close_paren(lexer, span);
                }
                Some(Err(())) => continue,
                None => {
                    return self.halt(
                        LexError::UnexpectedEof(Expected::GameTreeContents),
                        self.end_of_input(),
                    )
                }
            }
        }
    }

    fn open_paren(&mut self, lexer: Lexer<'s, TreeLexeme>, span: Span) -> (Mode<'s>, Spanned) {
        self.depth += 1;
        (Mode::Tree(lexer), (Token::OpenParen, span))
    }

    fn close_paren(&mut self, lexer: Lexer<'s, TreeLexeme>, span: Span) -> (Mode<'s>, Spanned) {
        match self.depth.checked_sub(1) {
            None => self.halt(LexError::TooManyRightParens, span),
            Some(0) => {
                self.depth = 0;
                (Mode::Outer(lexer), (Token::CloseParen, span))
            }
            Some(depth) => {
                self.depth = depth;
                (Mode::Tree(lexer), (Token::CloseParen, span))
            }
        }
    }

    fn lex_property(
        &mut self,
        mut lexer: Lexer<'s, PropertyLexeme>,
        after_value: bool,
    ) -> (Mode<'s>, Spanned) {
        loop {
            let Some(lexeme) = lexer.next() else {
                // after a value the node may legitimately be over, so the tree is what's missing
                let expected = if after_value {
                    Expected::GameTreeContents
                } else {
                    Expected::PropertyIdent
                };
                return self.halt(LexError::UnexpectedEof(expected), self.end_of_input());
            };
            let span = lexer.span();
            return match lexeme {
                Ok(PropertyLexeme::Whitespace) => continue,
                Ok(PropertyLexeme::Ident) => self.property_ident(lexer, span),
                Ok(PropertyLexeme::OpenBracket) if after_value => {
                    (Mode::Value(lexer), (Token::OpenBracket, span))
                }
                Ok(PropertyLexeme::OpenBracket) => self.halt(LexError::MissingPropertyIdent, span),
                Ok(PropertyLexeme::SemiColon) => {
                    let mode = Mode::Property {
                        lexer,
                        after_value: false,
                    };
                    (mode, (Token::SemiColon, span))
                }
                Ok(PropertyLexeme::OpenParen) => self.open_paren(lexer.morph(), span),
                Ok(PropertyLexeme::CloseParen) => self.close_paren(lexer.morph(), span),
                Err(()) => self.halt(LexError::MalformedPropertyIdent, span),
            };
        }
    }

    fn property_ident(
        &mut self,
        lexer: Lexer<'s, PropertyLexeme>,
        span: Span,
    ) -> (Mode<'s>, Spanned) {
        let ident = lexer.slice().to_string();
        let rest = lexer.remainder();
        let at = span.end..span.end;
        if rest.is_empty() {
            return self.halt(LexError::UnexpectedEof(Expected::PropertyIdent), at);
        }
        if rest.starts_with(';') {
            return self.halt(LexError::UnexpectedSemiColon, at);
        }
        if !rest.starts_with('[') {
            return self.halt(LexError::MalformedPropertyIdent, at);
        }

        let mode = Mode::OpenValue(lexer);
        if ident.len() > 2 {
            let warning = Token::Warning(LexWarning::LongPropertyIdent(ident.clone()));
            self.pending = Some((Token::PropertyIdent(ident), span.clone()));
            (mode, (warning, span))
        } else {
            (mode, (Token::PropertyIdent(ident), span))
        }
    }

    fn open_value(&mut self, mut lexer: Lexer<'s, PropertyLexeme>) -> (Mode<'s>, Spanned) {
        match lexer.next() {
            Some(Ok(PropertyLexeme::OpenBracket)) => {
                let span = lexer.span();
                (Mode::Value(lexer), (Token::OpenBracket, span))
            }
            _ => {
                let span = lexer.span();
                self.halt(LexError::MalformedPropertyIdent, span)
            }
        }
    }

    fn lex_value(&mut self, mut lexer: Lexer<'s, PropertyLexeme>) -> (Mode<'s>, Spanned) {
        let start = lexer.span().end;
        let rest = lexer.remainder();

        let mut chars = rest.char_indices();
        let close = loop {
            match chars.next() {
                // the escaped character is part of the value, whatever it is
                Some((_, '\\')) => {
                    if chars.next().is_none() {
                        break None;
                    }
                }
                Some((at, ']')) => break Some(at),
                Some(_) => {}
                None => break None,
            }
        };

        let Some(len) = close else {
            return self.halt(
                LexError::UnexpectedEof(Expected::PropertyValue),
                start..self.source.len(),
            );
        };
        let text = rest[..len].to_string();
        lexer.bump(len);
        (
            Mode::CloseValue(lexer),
            (Token::PropertyValue(text), start..start + len),
        )
    }

    fn close_value(&mut self, mut lexer: Lexer<'s, PropertyLexeme>) -> (Mode<'s>, Spanned) {
        let at = lexer.span().end;
        lexer.bump(1);
        let mode = Mode::Property {
            lexer,
            after_value: true,
        };
        (mode, (Token::CloseBracket, at..at + 1))
    }
}

impl<'s> Iterator for Tokenizer<'s> {
    type Item = Spanned;

    fn next(&mut self) -> Option<Spanned> {
        if let Some(pending) = self.pending.take() {
            return Some(pending);
        }

        let (mode, spanned) = match std::mem::replace(&mut self.mode, Mode::Halted) {
            Mode::Outer(lexer) => self.lex_outer(lexer),
            Mode::Tree(lexer) => self.lex_tree(lexer),
            Mode::Property { lexer, after_value } => self.lex_property(lexer, after_value),
            Mode::OpenValue(lexer) => self.open_value(lexer),
            Mode::Value(lexer) => self.lex_value(lexer),
            Mode::CloseValue(lexer) => self.close_value(lexer),
            Mode::Halted => return None,
        };
        self.mode = mode;

        tracing::trace!(token = %spanned.0, offset = spanned.1.start, "token");
        Some(spanned)
    }
}

/// Convenience function to tokenize a string and collect all tokens with their spans
pub fn tokenize(source: &str) -> Vec<Spanned> {
    Tokenizer::new(source).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).into_iter().map(|(t, _)| t).collect()
    }

    fn ident(s: &str) -> Token {
        Token::PropertyIdent(s.to_string())
    }

    fn value(s: &str) -> Token {
        Token::PropertyValue(s.to_string())
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(kinds(""), vec![Token::Eof]);
    }

    #[test]
    fn test_junk_input() {
        assert_eq!(kinds(" asdf asdf ; ]"), vec![Token::Eof]);
    }

    #[test]
    fn test_empty_game_trees() {
        assert_eq!(
            kinds("()()"),
            vec![
                Token::OpenParen,
                Token::CloseParen,
                Token::OpenParen,
                Token::CloseParen,
                Token::Eof
            ]
        );
        assert_eq!(
            kinds("(())"),
            vec![
                Token::OpenParen,
                Token::OpenParen,
                Token::CloseParen,
                Token::CloseParen,
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_unclosed_game_tree() {
        assert_eq!(
            kinds("("),
            vec![
                Token::OpenParen,
                Token::Error(LexError::UnexpectedEof(Expected::GameTreeContents))
            ]
        );
    }

    #[test]
    fn test_too_many_closing_parens() {
        assert_eq!(
            kinds("())"),
            vec![
                Token::OpenParen,
                Token::CloseParen,
                Token::Error(LexError::TooManyRightParens)
            ]
        );
    }

    #[test]
    fn test_multiple_values() {
        assert_eq!(
            kinds("(;AB[aa] [bb]\n[cc])"),
            vec![
                Token::OpenParen,
                Token::SemiColon,
                ident("AB"),
                Token::OpenBracket,
                value("aa"),
                Token::CloseBracket,
                Token::OpenBracket,
                value("bb"),
                Token::CloseBracket,
                Token::OpenBracket,
                value("cc"),
                Token::CloseBracket,
                Token::CloseParen,
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_empty_nodes() {
        assert_eq!(
            kinds("(;;)"),
            vec![
                Token::OpenParen,
                Token::SemiColon,
                Token::SemiColon,
                Token::CloseParen,
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_unfinished_property_ident() {
        assert_eq!(
            kinds("(;A"),
            vec![
                Token::OpenParen,
                Token::SemiColon,
                Token::Error(LexError::UnexpectedEof(Expected::PropertyIdent))
            ]
        );
    }

    #[test]
    fn test_unfinished_property_value() {
        assert_eq!(
            kinds("(;A[abc\\]"),
            vec![
                Token::OpenParen,
                Token::SemiColon,
                ident("A"),
                Token::OpenBracket,
                Token::Error(LexError::UnexpectedEof(Expected::PropertyValue))
            ]
        );
    }

    #[test]
    fn test_semicolon_inside_ident() {
        assert_eq!(
            kinds("(;A;B[])"),
            vec![
                Token::OpenParen,
                Token::SemiColon,
                Token::Error(LexError::UnexpectedSemiColon)
            ]
        );
    }

    #[test]
    fn test_value_without_ident() {
        assert_eq!(
            kinds("(;[aa])"),
            vec![
                Token::OpenParen,
                Token::SemiColon,
                Token::Error(LexError::MissingPropertyIdent)
            ]
        );
    }

    #[test]
    fn test_crlf_between_properties() {
        assert_eq!(
            kinds("(;FF[4]\r\nGM[1])"),
            vec![
                Token::OpenParen,
                Token::SemiColon,
                ident("FF"),
                Token::OpenBracket,
                value("4"),
                Token::CloseBracket,
                ident("GM"),
                Token::OpenBracket,
                value("1"),
                Token::CloseBracket,
                Token::CloseParen,
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_spans() {
        let tokens = tokenize("(;C[a\\]b])");
        let spans: Vec<Span> = tokens.into_iter().map(|(_, s)| s).collect();
        assert_eq!(
            spans,
            vec![0..1, 1..2, 2..3, 3..4, 4..8, 8..9, 9..10, 10..10]
        );
    }

    #[test]
    fn test_depth_tracking() {
        let mut tokenizer = Tokenizer::new("((;B[aa]))");
        assert_eq!(tokenizer.next().map(|(t, _)| t), Some(Token::OpenParen));
        assert_eq!(tokenizer.depth(), 1);
        assert_eq!(tokenizer.next().map(|(t, _)| t), Some(Token::OpenParen));
        assert_eq!(tokenizer.depth(), 2);
        let rest: Vec<Token> = tokenizer.by_ref().map(|(t, _)| t).collect();
        assert_eq!(rest.last(), Some(&Token::Eof));
        assert_eq!(tokenizer.depth(), 0);
    }

    #[test]
    fn test_halts_after_error() {
        let mut tokenizer = Tokenizer::new(")(;B[aa])");
        assert_eq!(
            tokenizer.next().map(|(t, _)| t),
            Some(Token::Error(LexError::TooManyRightParens))
        );
        assert_eq!(tokenizer.next(), None);
        assert_eq!(tokenizer.next(), None);
    }
}
