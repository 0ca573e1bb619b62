//! Top-down parser over the token stream
//!
//!     Collection := GameTree*
//!     GameTree   := '(' Sequence GameTree* ')'
//!     Sequence   := Node+
//!     Node       := ';' Property*
//!     Property   := PropertyIdent ('[' PropertyValue ']')+
//!
//! Tokens are pulled from the tokenizer one at a time with a single token of lookahead. Warning
//! tokens are recorded and skipped, an error token aborts the parse.

use super::error::{ParseError, Warning};
use super::options::ParseOptions;
use crate::sgf::ast::{
    DuplicateProperty, GameTree, Node, Property, PropertyValue, ValidationStatus,
};
use crate::sgf::lexing::{Spanned, Token, Tokenizer};
use serde::Serialize;
use tracing::{debug, trace};

/// Everything a successful parse produces
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Collection {
    pub game_trees: Vec<GameTree>,
    pub warnings: Vec<Warning>,
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for tree in &self.game_trees {
            write!(f, "{}", tree)?;
        }
        Ok(())
    }
}

pub struct Parser<'s> {
    tokens: Tokenizer<'s>,
    lookahead: Option<Spanned>,
    options: ParseOptions,
    warnings: Vec<Warning>,
}

impl<'s> Parser<'s> {
    pub fn new(source: &'s str, options: ParseOptions) -> Self {
        Parser {
            tokens: Tokenizer::new(source),
            lookahead: None,
            options,
            warnings: Vec::new(),
        }
    }

    /// Seed the warning list, e.g. with decoding notices from before tokenizing
    pub fn with_warnings(mut self, warnings: Vec<Warning>) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn parse(mut self) -> Result<Collection, ParseError> {
        let game_trees = self.parse_collection()?;
        debug!(
            game_trees = game_trees.len(),
            warnings = self.warnings.len(),
            "parsed collection"
        );
        Ok(Collection {
            game_trees,
            warnings: self.warnings,
        })
    }

    /// Pull the next meaningful token from the tokenizer
    fn pull(&mut self) -> Result<Spanned, ParseError> {
        loop {
            match self.tokens.next() {
                None => return Err(ParseError::PipelineClosed),
                Some((Token::Warning(warning), span)) => {
                    trace!(%warning, "recorded lexical warning");
                    self.warnings.push(Warning::Lexical {
                        warning,
                        offset: span.start,
                    });
                }
                Some((Token::Error(error), span)) => {
                    return Err(ParseError::Lex {
                        error,
                        offset: span.start,
                    })
                }
                Some(spanned) => return Ok(spanned),
            }
        }
    }

    fn peek(&mut self) -> Result<&Spanned, ParseError> {
        let spanned = match self.lookahead.take() {
            Some(spanned) => spanned,
            None => self.pull()?,
        };
        Ok(self.lookahead.insert(spanned))
    }

    fn advance(&mut self) -> Result<Spanned, ParseError> {
        match self.lookahead.take() {
            Some(spanned) => Ok(spanned),
            None => self.pull(),
        }
    }

    fn parse_collection(&mut self) -> Result<Vec<GameTree>, ParseError> {
        let mut game_trees = Vec::new();
        loop {
            let (token, span) = self.advance()?;
            match token {
                Token::OpenParen => game_trees.push(self.parse_game_tree(span.start)?),
                Token::Eof => return Ok(game_trees),
                _ => return Err(ParseError::TopLevel { offset: span.start }),
            }
        }
    }

    /// Called with the opening parenthesis already consumed.
    ///
    /// Variations are parsed with an explicit stack of open trees, so nesting depth is bounded
    /// by memory rather than by the call stack.
    fn parse_game_tree(&mut self, start: usize) -> Result<GameTree, ParseError> {
        let mut parents: Vec<(usize, GameTree)> = Vec::new();
        let mut current = (start, GameTree::new(self.parse_sequence()?));
        loop {
            let (token, span) = self.advance()?;
            match token {
                Token::OpenParen => {
                    let variation = GameTree::new(self.parse_sequence()?);
                    parents.push(std::mem::replace(&mut current, (span.start, variation)));
                }
                Token::CloseParen => {
                    let (offset, tree) = current;
                    debug!(
                        offset,
                        depth = parents.len(),
                        nodes = tree.sequence.len(),
                        variations = tree.variations.len(),
                        "parsed game tree"
                    );
                    match parents.pop() {
                        Some(mut parent) => {
                            parent.1.variations.push(tree);
                            current = parent;
                        }
                        None => return Ok(tree),
                    }
                }
                other => return Err(unexpected(&other, span.start)),
            }
        }
    }

    fn parse_sequence(&mut self) -> Result<Vec<Node>, ParseError> {
        let mut sequence = Vec::new();
        while self.peek()?.0 == Token::SemiColon {
            self.advance()?;
            sequence.push(self.parse_node()?);
        }
        if sequence.is_empty() {
            let offset = self.peek()?.1.start;
            return Err(ParseError::EmptySequence { offset });
        }
        Ok(sequence)
    }

    /// Called with the semicolon already consumed. Stops before the token that ends the node.
    fn parse_node(&mut self) -> Result<Node, ParseError> {
        let mut node = Node::new();
        let mut current: Option<(Property, usize)> = None;
        let mut pending: Option<PropertyValue> = None;

        loop {
            if matches!(
                self.peek()?.0,
                Token::SemiColon | Token::OpenParen | Token::CloseParen | Token::Eof
            ) {
                break;
            }
            let (token, span) = self.advance()?;
            match token {
                Token::PropertyIdent(identity) => {
                    if let Some(property) = current.take() {
                        add_property(&mut node, property)?;
                    }
                    current = Some((Property::new(identity), span.start));
                }
                Token::OpenBracket => pending = Some(PropertyValue::empty()),
                Token::PropertyValue(text) => match pending.as_mut() {
                    Some(value) => value.set_raw(text),
                    None => return Err(ParseError::ValueWithoutBracket { offset: span.start }),
                },
                Token::CloseBracket => {
                    let value = pending
                        .take()
                        .ok_or(ParseError::CloseWithoutBracket { offset: span.start })?;
                    let Some((property, offset)) = current.as_mut() else {
                        return Err(unexpected(&Token::CloseBracket, span.start));
                    };
                    let status = property.add_value(value);
                    self.check_status(property, status, *offset)?;
                }
                other => return Err(unexpected(&other, span.start)),
            }
        }

        if let Some(property) = current {
            add_property(&mut node, property)?;
        }
        Ok(node)
    }

    fn check_status(
        &self,
        property: &Property,
        status: ValidationStatus,
        offset: usize,
    ) -> Result<(), ParseError> {
        if status == ValidationStatus::Invalid && self.options.strict {
            if let Some(error) = property.validation_error() {
                return Err(ParseError::InvalidProperty {
                    offset,
                    source: error.clone(),
                });
            }
        }
        if status == ValidationStatus::Deferred && self.options.deferred_is_error {
            return Err(ParseError::DeferredProperty {
                identity: property.identity().to_string(),
                offset,
            });
        }
        Ok(())
    }
}

fn add_property(node: &mut Node, (property, offset): (Property, usize)) -> Result<(), ParseError> {
    node.add_property(property)
        .map_err(|DuplicateProperty(identity)| ParseError::DuplicateProperty { identity, offset })
}

fn unexpected(token: &Token, offset: usize) -> ParseError {
    ParseError::UnexpectedToken {
        token: token.to_string(),
        offset,
    }
}
