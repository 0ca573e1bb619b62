//! Nodes

use super::property::Property;
use serde::Serialize;
use std::fmt;

/// One position in a game record: an ordered set of properties with unique identities
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Node {
    properties: Vec<Property>,
}

/// Returned by [Node::add_property] when the identity is already present
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("only one {0} property is allowed per node")]
pub struct DuplicateProperty(pub String);

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn property(&self, identity: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.identity() == identity)
    }

    pub fn add_property(&mut self, property: Property) -> Result<(), DuplicateProperty> {
        if self.property(property.identity()).is_some() {
            return Err(DuplicateProperty(property.identity().to_string()));
        }
        self.properties.push(property);
        Ok(())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ";")?;
        for property in &self.properties {
            write!(f, "{}", property)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_identity_rejected() {
        let mut node = Node::new();
        node.add_property(Property::with_values("B", ["aa"])).unwrap();
        node.add_property(Property::with_values("C", ["hi"])).unwrap();
        assert_eq!(
            node.add_property(Property::with_values("B", ["bb"])),
            Err(DuplicateProperty("B".to_string()))
        );
        assert_eq!(node.properties().len(), 2);
        assert_eq!(node.property("B").unwrap().values()[0].raw(), "aa");
    }

    #[test]
    fn test_display() {
        let mut node = Node::new();
        assert_eq!(node.to_string(), ";");
        node.add_property(Property::with_values("B", ["aa"])).unwrap();
        node.add_property(Property::with_values("C", ["a\\]"])).unwrap();
        assert_eq!(node.to_string(), ";B[aa]C[a\\]]");
    }
}
