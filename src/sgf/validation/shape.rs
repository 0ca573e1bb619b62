//! Value type grammar
//!
//! A grammar string names the value types a property accepts:
//!
//!     alternatives are separated by ` | `
//!     each alternative composes one or more atoms with ` : `
//!
//! e.g. `none | number : simpletext`. Grammar strings are parsed once into a [ValueShape]
//! with a chumsky parser over characters; validation then is a closed match over [Atom].

use super::checks::{Outcome, ShapeError};
use chumsky::prelude::*;
use once_cell::sync::Lazy;
use serde::{Serialize, Serializer};
use std::fmt;

/// The atomic value types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Atom {
    None,
    Double,
    Color,
    Number,
    Real,
    Text,
    SimpleText,
    Move,
    Stone,
    Point,
    Unknown,
}

impl Atom {
    pub const ALL: [Atom; 11] = [
        Atom::None,
        Atom::Double,
        Atom::Color,
        Atom::Number,
        Atom::Real,
        Atom::Text,
        Atom::SimpleText,
        Atom::Move,
        Atom::Stone,
        Atom::Point,
        Atom::Unknown,
    ];

    pub fn from_name(name: &str) -> Option<Atom> {
        Atom::ALL.into_iter().find(|atom| atom.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Atom::None => "none",
            Atom::Double => "double",
            Atom::Color => "color",
            Atom::Number => "number",
            Atom::Real => "real",
            Atom::Text => "text",
            Atom::SimpleText => "simpletext",
            Atom::Move => "move",
            Atom::Stone => "stone",
            Atom::Point => "point",
            Atom::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A grammar string that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value type grammar '{grammar}': {message}")]
pub struct ShapeSyntaxError {
    pub grammar: String,
    pub message: String,
}

/// A parsed value type grammar: alternatives of compositions of atoms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueShape {
    alternatives: Vec<Vec<Atom>>,
}

static UNKNOWN_SHAPE: Lazy<ValueShape> = Lazy::new(|| ValueShape {
    alternatives: vec![vec![Atom::Unknown]],
});

fn shape_parser() -> impl Parser<char, Vec<Vec<Atom>>, Error = Simple<char>> {
    let atom = text::ident::<char, Simple<char>>().try_map(|name: String, span| {
        Atom::from_name(&name)
            .ok_or_else(|| Simple::custom(span, format!("unknown value type '{}'", name)))
    });
    let composition = atom.separated_by(just(" : ")).at_least(1);
    composition
        .separated_by(just(" | "))
        .at_least(1)
        .then_ignore(end())
}

impl ValueShape {
    pub fn parse(grammar: &str) -> Result<ValueShape, ShapeSyntaxError> {
        shape_parser()
            .parse(grammar)
            .map(|alternatives| ValueShape { alternatives })
            .map_err(|errors| ShapeSyntaxError {
                grammar: grammar.to_string(),
                message: errors
                    .first()
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "empty grammar".to_string()),
            })
    }

    /// The placeholder shape carried by values not yet attached to a property
    pub fn unknown() -> &'static ValueShape {
        &UNKNOWN_SHAPE
    }

    pub fn is_unknown(&self) -> bool {
        self == ValueShape::unknown()
    }

    pub fn alternatives(&self) -> &[Vec<Atom>] {
        &self.alternatives
    }

    /// True when the shape is exactly one alternative made of the single given atom
    pub fn is_single(&self, atom: Atom) -> bool {
        matches!(self.alternatives.as_slice(), [only] if only.as_slice() == [atom])
    }

    /// Validate one value's raw text.
    ///
    /// Valid if any alternative validates. Otherwise deferred if any alternative could only be
    /// deferred, otherwise the failure of the first alternative.
    pub fn validate(&self, value: &str) -> Outcome {
        if self.is_unknown() {
            return Outcome::Valid;
        }
        let parts = split_parts(value);
        let mut deferred = false;
        let mut first_failure = None;
        for alternative in &self.alternatives {
            match validate_composition(alternative, &parts) {
                Outcome::Valid => return Outcome::Valid,
                Outcome::Deferred => deferred = true,
                Outcome::Invalid(error) => {
                    first_failure.get_or_insert(error);
                }
            }
        }
        if deferred {
            return Outcome::Deferred;
        }
        first_failure.map_or(Outcome::Valid, Outcome::Invalid)
    }
}

/// Split raw value text on every `:` except an escaped one (`\:`)
fn split_parts(value: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (i, c) in value.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            ':' => {
                parts.push(&value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&value[start..]);
    parts
}

/// One part per atom, or the alternative fails on the count alone
fn validate_composition(atoms: &[Atom], parts: &[&str]) -> Outcome {
    if parts.len() != atoms.len() {
        return Outcome::Invalid(ShapeError::PartCount {
            expected: atoms.len(),
            found: parts.len(),
        });
    }

    let mut deferred = false;
    for (atom, part) in atoms.iter().zip(parts.iter().copied()) {
        match atom.check(part) {
            Outcome::Valid => {}
            Outcome::Deferred => deferred = true,
            invalid => return invalid,
        }
    }
    if deferred {
        Outcome::Deferred
    } else {
        Outcome::Valid
    }
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, alternative) in self.alternatives.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            for (j, atom) in alternative.iter().enumerate() {
                if j > 0 {
                    write!(f, " : ")?;
                }
                write!(f, "{}", atom)?;
            }
        }
        Ok(())
    }
}

impl Serialize for ValueShape {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
