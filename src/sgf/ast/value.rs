//! Property values

use super::query::QueryError;
use crate::sgf::validation::{Atom, Outcome, ValueShape};
use serde::Serialize;
use std::fmt;

/// One bracketed value of a property.
///
/// The raw text is kept exactly as it appeared between the brackets, escapes included, so that
/// writing the value back reproduces the source bytes. The shape is copied from the owning
/// property when the value is attached; until then it is the unknown placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyValue {
    raw: String,
    #[serde(rename = "type")]
    shape: &'static ValueShape,
}

impl PropertyValue {
    pub fn new(raw: impl Into<String>) -> Self {
        PropertyValue {
            raw: raw.into(),
            shape: ValueShape::unknown(),
        }
    }

    /// A value whose text hasn't been read yet
    pub fn empty() -> Self {
        PropertyValue::new(String::new())
    }

    pub fn set_raw(&mut self, raw: impl Into<String>) {
        self.raw = raw.into();
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn shape(&self) -> &'static ValueShape {
        self.shape
    }

    /// Inherit the owning property's shape, unless one was already assigned
    pub(crate) fn attach(&mut self, shape: &'static ValueShape) {
        if self.shape.is_unknown() {
            self.shape = shape;
        }
    }

    pub fn validate(&self) -> Outcome {
        self.shape.validate(&self.raw)
    }

    /// The text with escapes resolved. An escaped line break is a soft break and disappears.
    pub fn unescaped(&self) -> String {
        let mut text = String::with_capacity(self.raw.len());
        let mut chars = self.raw.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '\\' {
                text.push(c);
                continue;
            }
            match chars.next() {
                Some('\r') => {
                    chars.next_if_eq(&'\n');
                }
                Some('\n') => {
                    chars.next_if_eq(&'\r');
                }
                Some(escaped) => text.push(escaped),
                None => {}
            }
        }
        text
    }

    fn expect_single(&self, atom: Atom) -> Result<(), QueryError> {
        if self.shape.is_single(atom) {
            Ok(())
        } else {
            Err(QueryError::WrongValueType {
                expected: atom,
                grammar: self.shape.to_string(),
            })
        }
    }

    pub fn number(&self) -> Result<i64, QueryError> {
        self.expect_single(Atom::Number)?;
        self.raw
            .parse()
            .map_err(|_| QueryError::Unreadable(self.raw.clone()))
    }

    pub fn real(&self) -> Result<f64, QueryError> {
        self.expect_single(Atom::Real)?;
        self.raw
            .parse()
            .map_err(|_| QueryError::Unreadable(self.raw.clone()))
    }

    /// Simple text: escapes resolved, all whitespace other than spaces becomes a space
    pub fn simpletext(&self) -> Result<String, QueryError> {
        self.expect_single(Atom::SimpleText)?;
        Ok(self
            .unescaped()
            .chars()
            .map(|c| if c.is_whitespace() { ' ' } else { c })
            .collect())
    }

    /// Formatted text: escapes resolved, line breaks kept
    pub fn text(&self) -> Result<String, QueryError> {
        self.expect_single(Atom::Text)?;
        Ok(self.unescaped())
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.raw)
    }
}
