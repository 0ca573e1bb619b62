//! Lookups over a finished tree
//!
//! These sit on top of the AST and never touch the parser. Anything game specific (player
//! names, results) reads through [GameTree::simpletext_for].

use super::game_tree::GameTree;
use super::property::Property;
use crate::sgf::registry::Cardinality;
use crate::sgf::validation::Atom;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("value has type '{grammar}', not {expected}")]
    WrongValueType { expected: Atom, grammar: String },
    #[error("could not read value '{0}'")]
    Unreadable(String),
    #[error("could not find a Property for identity {0}")]
    PropertyNotFound(String),
    #[error("no clear winner: {0}")]
    NoClearWinner(String),
    #[error("property {0} is a list property")]
    NotSingleValued(String),
    #[error("property {0} has no values")]
    NoValues(String),
}

/// A player colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Color {
    Black,
    White,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "B"),
            Color::White => write!(f, "W"),
        }
    }
}

impl Property {
    /// The simple text of a single-valued property
    pub fn simpletext(&self) -> Result<String, QueryError> {
        let value = self
            .value()
            .ok_or_else(|| QueryError::NoValues(self.identity().to_string()))?;
        if self.kind().cardinality != Cardinality::One {
            return Err(QueryError::NotSingleValued(self.identity().to_string()));
        }
        value.simpletext()
    }
}

impl GameTree {
    /// First property with this identity: trunk nodes in order, then each variation
    pub fn find_property(&self, identity: &str) -> Option<&Property> {
        self.walk()
            .find_map(|tree| tree.sequence.iter().find_map(|node| node.property(identity)))
    }

    pub fn simpletext_for(&self, identity: &str) -> Result<String, QueryError> {
        self.find_property(identity)
            .ok_or_else(|| QueryError::PropertyNotFound(identity.to_string()))?
            .simpletext()
    }

    pub fn black_player_name(&self) -> Result<String, QueryError> {
        self.simpletext_for("PB")
    }

    pub fn white_player_name(&self) -> Result<String, QueryError> {
        self.simpletext_for("PW")
    }

    /// Reads `RE`: `B+...` and `W+...` name a winner, anything else (draws, `Void`, `?`) does not
    pub fn winner_color(&self) -> Result<Color, QueryError> {
        let result = self.simpletext_for("RE")?;
        if result.starts_with("B+") {
            Ok(Color::Black)
        } else if result.starts_with("W+") {
            Ok(Color::White)
        } else {
            Err(QueryError::NoClearWinner(result))
        }
    }

    pub fn winner_name(&self) -> Result<String, QueryError> {
        match self.winner_color()? {
            Color::Black => self.black_player_name(),
            Color::White => self.white_player_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sgf::ast::Node;

    fn node(properties: &[(&str, &str)]) -> Node {
        let mut node = Node::new();
        for (identity, value) in properties {
            node.add_property(Property::with_values(*identity, [*value]))
                .unwrap();
        }
        node
    }

    fn game(result: &str) -> GameTree {
        GameTree {
            sequence: vec![
                node(&[("PB", "Black\\]Player"), ("PW", "White Player"), ("RE", result)]),
                node(&[("B", "dd")]),
            ],
            variations: vec![],
        }
    }

    #[test]
    fn test_player_names() {
        let tree = game("B+R");
        assert_eq!(tree.black_player_name(), Ok("Black]Player".to_string()));
        assert_eq!(tree.white_player_name(), Ok("White Player".to_string()));
    }

    #[test]
    fn test_winner() {
        assert_eq!(game("B+R").winner_color(), Ok(Color::Black));
        assert_eq!(game("W+3.5").winner_name(), Ok("White Player".to_string()));
        assert_eq!(
            game("0").winner_color(),
            Err(QueryError::NoClearWinner("0".to_string()))
        );
    }

    #[test]
    fn test_missing_property() {
        let tree = GameTree {
            sequence: vec![node(&[("C", "hi")])],
            variations: vec![],
        };
        assert_eq!(
            tree.black_player_name(),
            Err(QueryError::PropertyNotFound("PB".to_string()))
        );
    }

    #[test]
    fn test_find_property_searches_variations_after_trunk() {
        let tree = GameTree {
            sequence: vec![node(&[("B", "aa")])],
            variations: vec![
                GameTree {
                    sequence: vec![node(&[("W", "bb"), ("N", "first")])],
                    variations: vec![],
                },
                GameTree {
                    sequence: vec![node(&[("N", "second")])],
                    variations: vec![],
                },
            ],
        };
        assert_eq!(tree.find_property("B").unwrap().values()[0].raw(), "aa");
        assert_eq!(tree.find_property("N").unwrap().values()[0].raw(), "first");
        assert!(tree.find_property("PW").is_none());
    }

    #[test]
    fn test_simpletext_of_list_property() {
        let property = Property::with_values("AB", ["aa", "bb"]);
        assert_eq!(
            property.simpletext(),
            Err(QueryError::NotSingleValued("AB".to_string()))
        );
        assert_eq!(
            Property::new("PB").simpletext(),
            Err(QueryError::NoValues("PB".to_string()))
        );
    }
}
