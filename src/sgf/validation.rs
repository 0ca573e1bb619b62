//! Property value validation
//!
//! Pure functions that check a value's raw text against a value type grammar (see [shape]).
//! Nothing here knows about properties or trees; the registry supplies the grammar and the
//! property folds the per-value outcomes into its status.
//!
//! Point-like atoms (`move`, `stone`, `point`) can't be checked without the board size and
//! the placement history, so they come out as [Outcome::Deferred] rather than valid or invalid.

pub mod checks;
pub mod shape;

pub use checks::{Outcome, ShapeError};
pub use shape::{Atom, ShapeSyntaxError, ValueShape};

/// Validate a value's raw text against a grammar string
pub fn validate_value(grammar: &str, value: &str) -> Result<Outcome, ShapeSyntaxError> {
    Ok(ValueShape::parse(grammar)?.validate(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_value() {
        assert_eq!(validate_value("number", "19"), Ok(Outcome::Valid));
        assert_eq!(validate_value("color", "B"), Ok(Outcome::Valid));
        assert_eq!(
            validate_value("color", "b"),
            Ok(Outcome::Invalid(ShapeError::NotColor))
        );
        assert_eq!(validate_value("move", "dd"), Ok(Outcome::Deferred));
        assert!(validate_value("colour", "B").is_err());
    }
}
