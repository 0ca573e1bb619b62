//! Checks for single atoms

use super::shape::Atom;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?[0-9]+$").unwrap());
static REAL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?[0-9]+(\.[0-9]+)?$").unwrap());

/// Result of checking a value against a shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Valid,
    /// Needs board geometry or game history to decide
    Deferred,
    Invalid(ShapeError),
}

/// Why a value does not fit a shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum ShapeError {
    #[error("expected {expected} ':'-separated parts, found {found}")]
    PartCount { expected: usize, found: usize },
    #[error("None type Property Values must be empty")]
    NotNone,
    #[error("Double type Property Values must be either '1' or '2'")]
    NotDouble,
    #[error("Color type Property Values must be either 'B' or 'W'")]
    NotColor,
    #[error("Number type Property Value expected positive or negative integer")]
    NotNumber,
    #[error("Real type Property Value expected positive or negative real number")]
    NotReal,
}

impl Atom {
    /// Check one part of a value against this atom
    pub fn check(&self, part: &str) -> Outcome {
        let fits = match self {
            Atom::Unknown | Atom::Text | Atom::SimpleText => true,
            Atom::Move | Atom::Stone | Atom::Point => return Outcome::Deferred,
            Atom::None => part.is_empty(),
            Atom::Double => matches!(part, "1" | "2"),
            Atom::Color => matches!(part, "B" | "W"),
            Atom::Number => NUMBER_REGEX.is_match(part),
            Atom::Real => REAL_REGEX.is_match(part),
        };
        if fits {
            return Outcome::Valid;
        }
        Outcome::Invalid(match self {
            Atom::None => ShapeError::NotNone,
            Atom::Double => ShapeError::NotDouble,
            Atom::Color => ShapeError::NotColor,
            Atom::Number => ShapeError::NotNumber,
            _ => ShapeError::NotReal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number() {
        assert_eq!(Atom::Number.check("19"), Outcome::Valid);
        assert_eq!(Atom::Number.check("-3"), Outcome::Valid);
        assert_eq!(Atom::Number.check("+3"), Outcome::Valid);
        assert_eq!(
            Atom::Number.check("3.5"),
            Outcome::Invalid(ShapeError::NotNumber)
        );
        assert_eq!(
            Atom::Number.check(""),
            Outcome::Invalid(ShapeError::NotNumber)
        );
        // non-ASCII digits are not numbers
        assert_eq!(
            Atom::Number.check("١٩"),
            Outcome::Invalid(ShapeError::NotNumber)
        );
    }

    #[test]
    fn test_real() {
        assert_eq!(Atom::Real.check("6.5"), Outcome::Valid);
        assert_eq!(Atom::Real.check("-0.5"), Outcome::Valid);
        assert_eq!(Atom::Real.check("7"), Outcome::Valid);
        assert_eq!(Atom::Real.check("6x5"), Outcome::Invalid(ShapeError::NotReal));
        assert_eq!(Atom::Real.check("6."), Outcome::Invalid(ShapeError::NotReal));
    }

    #[test]
    fn test_deferred_atoms() {
        for atom in [Atom::Move, Atom::Stone, Atom::Point] {
            assert_eq!(atom.check("dd"), Outcome::Deferred);
            assert_eq!(atom.check(""), Outcome::Deferred);
        }
    }
}
