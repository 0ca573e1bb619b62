//! The parsed tree
//!
//!     GameTree  trunk of Nodes, then variations (child GameTrees)
//!     Node      Properties, identities unique within the node
//!     Property  identity, registry type, values, validation status
//!     Value     raw text with escapes kept, plus the shape inherited from its property
//!
//! Ownership is strictly tree shaped. Every type writes itself back in the source syntax
//! through `Display`.

pub mod game_tree;
pub mod node;
pub mod property;
pub mod query;
pub mod value;

pub use game_tree::GameTree;
pub use node::{DuplicateProperty, Node};
pub use property::{Property, ValidationError, ValidationStatus};
pub use query::{Color, QueryError};
pub use value::PropertyValue;
